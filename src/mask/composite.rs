//! Layer compositing
//!
//! Union of the line, border and building masks into one dense binary image.
//! The text layer is a separate label set and never enters the composite.

use crate::mask::config::Category;
use crate::mask::raster::{Mask, RasterShape};
use image::GrayImage;

/// The mask layers of one attachment; absent layers are `Mask::Empty`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskLayers {
    pub line: Mask,
    pub border: Mask,
    pub building: Mask,
    pub text: Mask,
}

impl MaskLayers {
    pub fn get(&self, category: Category) -> &Mask {
        match category {
            Category::Line => &self.line,
            Category::Border => &self.border,
            Category::Building => &self.building,
            Category::Text => &self.text,
        }
    }

    pub fn set(&mut self, category: Category, mask: Mask) {
        match category {
            Category::Line => self.line = mask,
            Category::Border => self.border = mask,
            Category::Building => self.building = mask,
            Category::Text => self.text = mask,
        }
    }

    /// Present layers in compositing order
    pub fn present(&self) -> impl Iterator<Item = (Category, &Mask)> + '_ {
        Category::ALL
            .into_iter()
            .map(move |c| (c, self.get(c)))
            .filter(|(_, mask)| !mask.is_absent())
    }

    /// Total "on" pixels over all layers (overlaps counted per layer)
    pub fn pixel_count(&self) -> usize {
        self.present().map(|(_, mask)| mask.pixel_count()).sum()
    }

    /// No stroked layer has a pixel, so the composite would be all zero
    pub fn is_blank(&self) -> bool {
        Category::STROKED.iter().all(|c| self.get(*c).pixel_count() == 0)
    }
}

/// Paint every present stroked layer into a zero image of `shape`
pub fn composite(layers: &MaskLayers, shape: RasterShape) -> GrayImage {
    let mut image = GrayImage::new(shape.width, shape.height);
    for (_, mask) in layers.present().filter(|(category, _)| category.is_stroked()) {
        mask.paint_onto(&mut image);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn mask_with(shape: RasterShape, on: &[(u32, u32)]) -> Mask {
        let mut canvas = GrayImage::new(shape.width, shape.height);
        for &(row, col) in on {
            canvas.put_pixel(col, row, Luma([255]));
        }
        Mask::from_canvas(&canvas)
    }

    #[test]
    fn test_all_absent_is_zero_image() {
        let shape = RasterShape::new(4, 6);
        let image = composite(&MaskLayers::default(), shape);
        assert_eq!(image.dimensions(), (6, 4));
        assert!(image.pixels().all(|p| p.0[0] == 0));
        assert!(MaskLayers::default().is_blank());
    }

    #[test]
    fn test_union_of_layers() {
        let shape = RasterShape::new(4, 4);
        let layers = MaskLayers {
            line: mask_with(shape, &[(0, 0), (1, 1)]),
            border: Mask::Empty,
            building: mask_with(shape, &[(1, 1), (3, 2)]),
            text: Mask::Empty,
        };
        let image = composite(&layers, shape);
        let on: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] == 255)
            .map(|(x, y, _)| (y, x))
            .collect();
        assert_eq!(on, vec![(0, 0), (1, 1), (3, 2)]);
        assert_eq!(layers.present().count(), 2);
    }

    #[test]
    fn test_composite_idempotent() {
        let shape = RasterShape::new(3, 3);
        let mask = mask_with(shape, &[(0, 1), (2, 2)]);
        let once = composite(
            &MaskLayers { line: mask.clone(), ..Default::default() },
            shape,
        );
        let twice = composite(
            &MaskLayers { line: mask.clone(), border: mask.clone(), building: mask, ..Default::default() },
            shape,
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_text_layer_stays_out_of_composite() {
        let shape = RasterShape::new(3, 3);
        let layers = MaskLayers { text: mask_with(shape, &[(1, 1)]), ..Default::default() };
        assert!(layers.is_blank());
        assert_eq!(layers.pixel_count(), 1);
        assert!(composite(&layers, shape).pixels().all(|p| p.0[0] == 0));
    }
}
