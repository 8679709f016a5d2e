//! Canvas resizing to the output resolution

use super::shape::RasterShape;
use crate::mask::config::ResizeFilter;
use image::imageops::{self, FilterType};
use image::GrayImage;

impl ResizeFilter {
    pub fn filter_type(&self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Linear => FilterType::Triangle,
        }
    }
}

/// Resize a drawn canvas; a canvas already at `target` is returned untouched
pub fn resize_canvas(canvas: GrayImage, target: RasterShape, filter: ResizeFilter) -> GrayImage {
    if canvas.dimensions() == (target.width, target.height) {
        return canvas;
    }
    imageops::resize(&canvas, target.width, target.height, filter.filter_type())
}
