//! Sparse mask representation

use super::shape::RasterShape;
use image::{GrayImage, Luma};

/// One "on" pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pixel {
    pub row: u32,
    pub col: u32,
}

/// Result of rasterizing one geometry category
///
/// `Empty` means nothing was drawn (no segments, or none in bounds).
/// `Present` means strokes were drawn; its pixel list may still be empty if
/// the resize wiped out every stroke.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mask {
    #[default]
    Empty,
    Present {
        shape: RasterShape,
        /// Non-zero pixels in row-major order, no duplicates
        pixels: Vec<Pixel>,
    },
}

impl Mask {
    /// Collect the non-zero pixels of a canvas
    pub fn from_canvas(canvas: &GrayImage) -> Mask {
        let (width, height) = canvas.dimensions();
        let pixels = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] != 0)
            .map(|(col, row, _)| Pixel { row, col })
            .collect();
        Mask::Present {
            shape: RasterShape::new(height, width),
            pixels,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Mask::Empty)
    }

    pub fn shape(&self) -> Option<RasterShape> {
        match self {
            Mask::Empty => None,
            Mask::Present { shape, .. } => Some(*shape),
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        match self {
            Mask::Empty => &[],
            Mask::Present { pixels, .. } => pixels,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels().len()
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.pixels().binary_search(&Pixel { row, col }).is_ok()
    }

    /// Write 255 at every pixel of this mask into `image`; pixels outside it are ignored
    pub fn paint_onto(&self, image: &mut GrayImage) {
        let (width, height) = image.dimensions();
        for pixel in self.pixels() {
            if pixel.col < width && pixel.row < height {
                image.put_pixel(pixel.col, pixel.row, Luma([255]));
            }
        }
    }

    /// Dense single-layer image
    pub fn to_image(&self, shape: RasterShape) -> GrayImage {
        let mut image = GrayImage::new(shape.width, shape.height);
        self.paint_onto(&mut image);
        image
    }
}
