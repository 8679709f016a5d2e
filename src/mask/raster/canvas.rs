//! Source-space drawing surface
//!
//! Wraps a tiny-skia `Pixmap`. Anti-aliasing is off so every pixel is either
//! untouched or fully on, and the surface is shifted by half a pixel so that
//! pixel `(x, y)` samples the integer position `(x, y)`: a stroke centred on
//! row 0 covers row 0.

use super::shape::RasterShape;
use crate::mask::document::{Point, Segment};
use image::{GrayImage, Luma};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

pub struct Canvas {
    pixmap: Pixmap,
}

fn mask_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = false;
    paint
}

fn pixel_grid() -> Transform {
    Transform::from_translate(0.5, 0.5)
}

impl Canvas {
    /// Zero canvas of `shape`; `None` for a zero-sized shape
    pub fn new(shape: RasterShape) -> Option<Self> {
        let pixmap = Pixmap::new(shape.width, shape.height)?;
        Some(Self { pixmap })
    }

    /// Stroke one segment with round caps
    ///
    /// A zero-length segment is drawn as a dot of the stroke's diameter.
    pub fn stroke_segment(&mut self, segment: &Segment, width: f32) {
        if width <= 0.0 {
            return;
        }
        let paint = mask_paint();
        let (start, end) = (segment.start, segment.end);

        if start == end {
            if let Some(dot) = PathBuilder::from_circle(start.x as f32, start.y as f32, width * 0.5) {
                self.pixmap
                    .fill_path(&dot, &paint, FillRule::Winding, pixel_grid(), None);
            }
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(start.x as f32, start.y as f32);
        pb.line_to(end.x as f32, end.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap.stroke_path(&path, &paint, &stroke, pixel_grid(), None);
    }

    /// Fill a convex polygon given by its corners; parts outside the canvas are clipped
    pub fn fill_polygon(&mut self, corners: &[Point]) {
        if let Some(path) = polygon_path(corners) {
            self.pixmap
                .fill_path(&path, &mask_paint(), FillRule::Winding, pixel_grid(), None);
        }
    }

    /// Coverage as a single-channel image (the pixmap's alpha)
    pub fn into_gray(self) -> GrayImage {
        let pixmap = self.pixmap;
        GrayImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
            Luma([pixmap.pixel(x, y).map(|p| p.alpha()).unwrap_or(0)])
        })
    }
}

fn polygon_path(corners: &[Point]) -> Option<Path> {
    let (first, rest) = corners.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for corner in rest {
        pb.line_to(corner.x as f32, corner.y as f32);
    }
    pb.close();
    pb.finish()
}
