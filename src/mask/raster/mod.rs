//! Rasterizer: segments → sparse mask
//!
//! Segments are validated against the source shape, stroked onto a
//! zero canvas of that shape, and only then resized to the target shape so
//! strokes stay connected at the output resolution. Text boxes take the same
//! route as filled polygons.
//!
//! # Submodules
//! - `shape` - Raster shapes and the dimensions axis swap
//! - `canvas` - Binary tiny-skia drawing surface
//! - `resize` - Resizing to the output resolution
//! - `mask` - Sparse `Mask` representation

mod shape;
mod canvas;
mod resize;
mod mask;

pub use shape::{RasterShape, DEFAULT_TARGET_SHAPE};
pub use canvas::Canvas;
pub use resize::resize_canvas;
pub use mask::{Mask, Pixel};

use crate::mask::config::ResizeFilter;
use crate::mask::document::{Point, Segment};
use crate::mask::error::MaskError;

/// Rasterize with the default (linear) resize filter
pub fn rasterize(
    segments: &[Segment],
    source_shape: RasterShape,
    target_shape: RasterShape,
    stroke_width: u32,
) -> Mask {
    rasterize_with_filter(segments, source_shape, target_shape, stroke_width, ResizeFilter::default())
}

/// Draw `segments` on a `source_shape` canvas and resize it to `target_shape`
///
/// Returns `Mask::Empty` when there is nothing to draw. Segments with an
/// endpoint outside the source shape are dropped with a warning.
pub fn rasterize_with_filter(
    segments: &[Segment],
    source_shape: RasterShape,
    target_shape: RasterShape,
    stroke_width: u32,
    filter: ResizeFilter,
) -> Mask {
    if segments.is_empty() {
        log::debug!("No segments to rasterize");
        return Mask::Empty;
    }
    if target_shape.pixel_count() == 0 {
        log::warn!("Cannot resize onto a zero-sized target {:?}", target_shape);
        return Mask::Empty;
    }

    let in_bounds: Vec<&Segment> = segments
        .iter()
        .filter(|segment| {
            let inside = source_shape.contains(segment.start) && source_shape.contains(segment.end);
            if !inside {
                let skipped = MaskError::OutOfBoundsSegment {
                    start: segment.start,
                    end: segment.end,
                    width: source_shape.width,
                    height: source_shape.height,
                };
                log::warn!("Skipping {}", skipped);
            }
            inside
        })
        .collect();

    if in_bounds.is_empty() {
        return Mask::Empty;
    }

    let Some(mut canvas) = Canvas::new(source_shape) else {
        log::warn!("Cannot rasterize onto a zero-sized canvas {:?}", source_shape);
        return Mask::Empty;
    };
    for segment in &in_bounds {
        canvas.stroke_segment(&snap_to_grid(segment), stroke_width as f32);
    }

    log::debug!(
        "Rasterized {}/{} segments on {}x{} canvas",
        in_bounds.len(),
        segments.len(),
        source_shape.width,
        source_shape.height
    );

    let resized = resize_canvas(canvas.into_gray(), target_shape, filter);
    Mask::from_canvas(&resized)
}

/// Fill convex polygons on a `source_shape` canvas and resize to `target_shape`
///
/// Corners are truncated to whole pixels; anything outside the source shape
/// is clipped. Returns `Mask::Empty` when there is no polygon.
pub fn rasterize_polygons(
    polygons: &[[Point; 4]],
    source_shape: RasterShape,
    target_shape: RasterShape,
    filter: ResizeFilter,
) -> Mask {
    if polygons.is_empty() {
        return Mask::Empty;
    }
    if target_shape.pixel_count() == 0 {
        log::warn!("Cannot resize onto a zero-sized target {:?}", target_shape);
        return Mask::Empty;
    }
    let Some(mut canvas) = Canvas::new(source_shape) else {
        log::warn!("Cannot rasterize onto a zero-sized canvas {:?}", source_shape);
        return Mask::Empty;
    };

    for polygon in polygons {
        let corners = polygon.map(|p| Point::new(p.x.trunc(), p.y.trunc()));
        canvas.fill_polygon(&corners);
    }
    log::debug!("Filled {} polygons on {:?} canvas", polygons.len(), source_shape);

    let resized = resize_canvas(canvas.into_gray(), target_shape, filter);
    Mask::from_canvas(&resized)
}

/// Endpoints are truncated to whole pixels before stroking
fn snap_to_grid(segment: &Segment) -> Segment {
    let snap = |p: Point| Point::new(p.x.trunc(), p.y.trunc());
    Segment::new(snap(segment.start), snap(segment.end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn test_no_segments_is_absent() {
        let shape = RasterShape::new(20, 20);
        assert!(rasterize(&[], shape, shape, 8).is_absent());
    }

    #[test]
    fn test_all_out_of_bounds_is_absent() {
        let shape = RasterShape::new(20, 20);
        let segments = [seg(0.0, 0.0, 25.0, 0.0), seg(-1.0, 3.0, 5.0, 3.0)];
        assert!(rasterize(&segments, shape, shape, 8).is_absent());
    }

    #[test]
    fn test_bounds_use_width_for_x() {
        // 10 rows, 30 columns: x = 25 is inside, y = 25 is not
        let shape = RasterShape::new(10, 30);
        assert!(!rasterize(&[seg(0.0, 5.0, 25.0, 5.0)], shape, shape, 2).is_absent());
        assert!(rasterize(&[seg(5.0, 0.0, 5.0, 25.0)], shape, shape, 2).is_absent());
    }

    #[test]
    fn test_stroke_covers_segment_and_stays_near_it() {
        let shape = RasterShape::new(40, 40);
        let mask = rasterize(&[seg(10.0, 20.0, 30.0, 20.0)], shape, shape, 8);

        for col in 10..=30 {
            for row in 17..=23 {
                assert!(mask.contains(row, col), "({}, {}) should be on", row, col);
            }
        }
        for pixel in mask.pixels() {
            assert!(pixel.row >= 16 && pixel.row <= 24);
            assert!(pixel.col >= 6 && pixel.col <= 34);
        }
        assert!(!mask.contains(20, 0));
        assert!(!mask.contains(5, 20));
    }

    #[test]
    fn test_out_of_bounds_segment_is_dropped_others_kept() {
        let shape = RasterShape::new(20, 20);
        let mask = rasterize(
            &[seg(2.0, 2.0, 2.0, 10.0), seg(5.0, 5.0, 50.0, 5.0)],
            shape,
            shape,
            2,
        );
        assert!(mask.contains(6, 2));
        assert!(!mask.contains(5, 15));
    }

    #[test]
    fn test_resize_after_drawing() {
        let source = RasterShape::new(100, 100);
        let target = RasterShape::new(10, 10);
        // 1px stroke would vanish if resized before drawing
        let mask = rasterize_with_filter(
            &[seg(0.0, 50.0, 99.0, 50.0)],
            source,
            target,
            8,
            ResizeFilter::Linear,
        );
        assert_eq!(mask.shape(), Some(target));
        assert!(mask.pixel_count() > 0);
        for col in 0..10 {
            assert!(mask.contains(5, col) || mask.contains(4, col));
        }
    }

    #[test]
    fn test_polygons_filled_and_clipped() {
        let shape = RasterShape::new(20, 20);
        let square = [
            Point::new(4.0, 4.0),
            Point::new(10.0, 4.0),
            Point::new(10.0, 10.0),
            Point::new(4.0, 10.0),
        ];
        let overhang = [
            Point::new(15.0, 15.0),
            Point::new(30.0, 15.0),
            Point::new(30.0, 30.0),
            Point::new(15.0, 30.0),
        ];
        let mask = rasterize_polygons(&[square, overhang], shape, shape, ResizeFilter::Linear);
        assert!(mask.contains(7, 7));
        assert!(mask.contains(19, 19));
        assert!(!mask.contains(12, 12));
        assert!(!mask.contains(2, 2));
        assert!(rasterize_polygons(&[], shape, shape, ResizeFilter::Linear).is_absent());
    }
}
