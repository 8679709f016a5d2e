//! Annotation document model
//!
//! # Submodules
//! - `types` - Points, attachments, entities, text boxes, segments
//! - `parse` - Validated construction from sketch JSON

mod types;
mod parse;

pub use types::{
    Point,
    Dimensions,
    Attachment,
    LineEntity,
    BuildingEntity,
    RotatedBox,
    TextEntity,
    Segment,
    VertexPair,
    AnnotationDocument,
};
