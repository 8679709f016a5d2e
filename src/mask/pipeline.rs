//! Per-attachment mask rendering
//!
//! Attachments of a document are independent: each one builds its own line
//! graph, canvases and masks, so they are rendered in parallel and a failure
//! in one is reported without touching its siblings.

use crate::mask::composite::{composite, MaskLayers};
use crate::mask::config::{Category, CategorySet, MaskConfig, OutputMode};
use crate::mask::document::{AnnotationDocument, Segment};
use crate::mask::error::{MaskError, Result};
use crate::mask::extraction::{extract_segments, extract_text_boxes, LineKind};
use crate::mask::graph::resolve_building_segments;
use crate::mask::raster::{rasterize_polygons, rasterize_with_filter, Mask, RasterShape};
use image::GrayImage;
use rayon::prelude::*;

/// Masks of one attachment
#[derive(Debug, Clone)]
pub struct RenderedAttachment {
    pub attachment: String,
    pub source_shape: RasterShape,
    pub output_shape: RasterShape,
    pub layers: MaskLayers,
}

#[derive(Debug)]
pub enum AttachmentOutcome {
    Rendered(RenderedAttachment),
    Skipped { attachment: String, reason: MaskError },
}

impl AttachmentOutcome {
    pub fn attachment(&self) -> &str {
        match self {
            AttachmentOutcome::Rendered(rendered) => &rendered.attachment,
            AttachmentOutcome::Skipped { attachment, .. } => attachment,
        }
    }
}

/// One encodable mask image with its deterministic file name
#[derive(Debug, Clone)]
pub struct MaskArtifact {
    pub name: String,
    /// `None` for the composite of the stroked layers
    pub category: Option<Category>,
    pub image: GrayImage,
}

/// Segments of one stroked category, resolved to positions; text has none
pub fn category_segments(
    document: &AnnotationDocument,
    attachment_id: &str,
    category: Category,
    config: &MaskConfig,
) -> Result<Vec<Segment>> {
    let tolerate = config.tolerate_missing_points.for_category(category);
    match category {
        Category::Line => extract_segments(document, attachment_id, LineKind::Line, tolerate),
        Category::Border => extract_segments(document, attachment_id, LineKind::Border, tolerate),
        Category::Building => {
            resolve_building_segments(document, attachment_id, config.line_graph_scope, tolerate)
        }
        Category::Text => Ok(Vec::new()),
    }
}

fn render_layer(
    document: &AnnotationDocument,
    attachment_id: &str,
    category: Category,
    config: &MaskConfig,
    source_shape: RasterShape,
    output_shape: RasterShape,
) -> Result<Mask> {
    if category == Category::Text {
        let boxes = extract_text_boxes(document, attachment_id, |class| config.wants_text_class(class))?;
        return Ok(rasterize_polygons(&boxes, source_shape, output_shape, config.resize_filter));
    }

    let segments = category_segments(document, attachment_id, category, config)?;
    Ok(rasterize_with_filter(
        &segments,
        source_shape,
        output_shape,
        config.stroke_thickness,
        config.resize_filter,
    ))
}

/// Render the selected layers of one attachment
pub fn render_attachment(
    document: &AnnotationDocument,
    attachment_id: &str,
    config: &MaskConfig,
    categories: CategorySet,
) -> Result<RenderedAttachment> {
    let dimensions = document.require_dimensions(attachment_id)?;
    if config.only_vectorized
        && document.attachment(attachment_id).and_then(|a| a.vectorize) == Some(false)
    {
        return Err(MaskError::NotVectorized {
            attachment: attachment_id.to_string(),
        });
    }

    let source_shape = RasterShape::from_dimensions(dimensions);
    let output_shape = config.output_shape(source_shape);

    let mut layers = MaskLayers::default();
    for category in categories.iter() {
        let mask = render_layer(document, attachment_id, category, config, source_shape, output_shape)?;
        layers.set(category, mask);
    }

    Ok(RenderedAttachment {
        attachment: attachment_id.to_string(),
        source_shape,
        output_shape,
        layers,
    })
}

/// Render every attachment of a document in parallel
pub fn process_document(
    document: &AnnotationDocument,
    config: &MaskConfig,
    categories: CategorySet,
) -> Vec<AttachmentOutcome> {
    let start = std::time::Instant::now();
    let attachment_ids: Vec<&String> = document.attachments.keys().collect();

    let outcomes: Vec<AttachmentOutcome> = attachment_ids
        .into_par_iter()
        .map(|id| match render_attachment(document, id, config, categories) {
            Ok(rendered) => {
                log::info!(
                    "Rendered attachment {} ({} mask pixels)",
                    id,
                    rendered.layers.pixel_count()
                );
                AttachmentOutcome::Rendered(rendered)
            }
            Err(reason) => {
                log::warn!("Skipping attachment {}: {}", id, reason);
                AttachmentOutcome::Skipped {
                    attachment: id.clone(),
                    reason,
                }
            }
        })
        .collect();

    log::debug!(
        "Processed {} attachments in {:.2}ms",
        outcomes.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    outcomes
}

/// `{sketch}_{attachment}.png`, with `_{category}` before the extension for single layers
pub fn mask_file_name(sketch_name: &str, attachment_id: &str, category: Option<Category>) -> String {
    match category {
        Some(category) => format!("{}_{}_{}.png", sketch_name, attachment_id, category),
        None => format!("{}_{}.png", sketch_name, attachment_id),
    }
}

fn layer_artifact(sketch_name: &str, rendered: &RenderedAttachment, category: Category, mask: &Mask) -> MaskArtifact {
    MaskArtifact {
        name: mask_file_name(sketch_name, &rendered.attachment, Some(category)),
        category: Some(category),
        image: mask.to_image(rendered.output_shape),
    }
}

/// Images to store for one rendered attachment; layers without pixels produce nothing
///
/// In composite mode the stroked layers are merged into one image and the
/// text layer, when drawn, is stored on its own.
pub fn artifacts_for(sketch_name: &str, rendered: &RenderedAttachment, mode: OutputMode) -> Vec<MaskArtifact> {
    let layers = &rendered.layers;
    match mode {
        OutputMode::Composite => {
            let mut artifacts = Vec::new();
            if !layers.is_blank() {
                artifacts.push(MaskArtifact {
                    name: mask_file_name(sketch_name, &rendered.attachment, None),
                    category: None,
                    image: composite(layers, rendered.output_shape),
                });
            }
            if layers.text.pixel_count() > 0 {
                artifacts.push(layer_artifact(sketch_name, rendered, Category::Text, &layers.text));
            }
            artifacts
        }
        OutputMode::Separate => layers
            .present()
            .filter(|(_, mask)| mask.pixel_count() > 0)
            .map(|(category, mask)| layer_artifact(sketch_name, rendered, category, mask))
            .collect(),
    }
}
