//! Binary training masks from cadastral sketch annotations
//!
//! Points, lines, borders and building outlines of an annotation document
//! are extracted per attachment, stroked onto a canvas in the attachment's
//! own coordinate space, resized to the training resolution and stored as
//! single-channel PNG masks.

pub mod mask;
pub mod io;

use std::path::Path;

pub use mask::composite::{composite, MaskLayers};
pub use mask::config::{
    Category, CategorySet, GraphScope, MaskConfig, OutputMode, PointTolerance, ResizeFilter, THICKNESS,
};
pub use mask::document::{AnnotationDocument, Dimensions, Point, Segment, VertexPair};
pub use mask::error::{MaskError, Result};
pub use mask::extraction::{extract_segments, extract_vertex_pairs, LineKind};
pub use mask::graph::{resolve_building_segments, LineGraph};
pub use mask::pipeline::{
    artifacts_for, mask_file_name, process_document, render_attachment, AttachmentOutcome, MaskArtifact,
    RenderedAttachment,
};
pub use mask::raster::{rasterize, rasterize_with_filter, Mask, Pixel, RasterShape, DEFAULT_TARGET_SHAPE};

/// Load and validate a sketch JSON file
///
/// # Example
/// ```ignore
/// let doc = load_document_file("observations/snapshots/latest/SK-001.latest.json")?;
/// println!("{} attachments", doc.attachments.len());
/// ```
pub fn load_document_file<P: AsRef<Path>>(path: P) -> anyhow::Result<AnnotationDocument> {
    let bytes = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Failed to open file {}: {}", path.as_ref().display(), e))?;
    let document = AnnotationDocument::from_json_slice(&bytes)?;
    Ok(document)
}
