//! Raster shapes and the (width, height) → (height, width) boundary

use crate::mask::document::{Dimensions, Point};
use serde::{Deserialize, Serialize};

/// Canvas shape in row-major order: `height` rows of `width` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RasterShape {
    pub height: u32,
    pub width: u32,
}

/// Resolution of training masks: 1664 rows × 1024 columns
pub const DEFAULT_TARGET_SHAPE: RasterShape = RasterShape { height: 1664, width: 1024 };

impl RasterShape {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// The only place document dimensions `(width, height)` become a canvas shape
    pub fn from_dimensions(dimensions: Dimensions) -> Self {
        Self {
            height: dimensions.height,
            width: dimensions.width,
        }
    }

    /// `x ∈ [0, width)`, `y ∈ [0, height)`
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.x < self.width as f64
            && point.y >= 0.0
            && point.y < self.height as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.height as usize * self.width as usize
    }
}
