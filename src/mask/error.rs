//! Error taxonomy for mask generation
//!
//! Geometry-level conditions (unresolved points, out-of-bounds segments,
//! disconnected building vertices) are recovered at the smallest scope and
//! only logged. `OutOfBoundsSegment` and `NoPathFound` exist so the logged
//! diagnostic has one canonical wording; no public operation returns them.

use crate::mask::document::Point;

/// Result alias used throughout the mask engine
pub type Result<T> = std::result::Result<T, MaskError>;

/// Mask generation errors
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    /// Attachment has no usable `properties.dimensions`
    #[error("attachment '{attachment}' has no dimensions")]
    MissingDimensions { attachment: String },

    /// Attachment id is not present in the attachments table
    #[error("attachment '{0}' not found in document")]
    UnknownAttachment(String),

    /// Attachment is explicitly flagged `vectorize: false`
    #[error("attachment '{attachment}' is not flagged for vectorization")]
    NotVectorized { attachment: String },

    /// Entity references a point id that is not in the point table
    #[error("entity '{entity}' references unknown point '{point}'")]
    UnresolvedPoint { point: String, entity: String },

    /// Segment endpoint lies outside the source raster
    #[error("segment ({start:?} -> {end:?}) lies outside {width}x{height} source image")]
    OutOfBoundsSegment {
        start: Point,
        end: Point,
        width: u32,
        height: u32,
    },

    /// Building vertices are in disconnected components of the line graph
    #[error("no path between building vertices '{from}' and '{to}'")]
    NoPathFound { from: String, to: String },

    /// Document is structurally invalid (missing point table, no geometry at all)
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MaskError {
    /// Errors that only invalidate one attachment; siblings keep processing
    pub fn is_attachment_scoped(&self) -> bool {
        matches!(
            self,
            MaskError::MissingDimensions { .. }
                | MaskError::UnknownAttachment(_)
                | MaskError::NotVectorized { .. }
                | MaskError::UnresolvedPoint { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_scoped_errors() {
        let missing = MaskError::MissingDimensions { attachment: "att1".to_string() };
        assert!(missing.is_attachment_scoped());
        assert!(MaskError::UnknownAttachment("x".to_string()).is_attachment_scoped());

        let malformed = MaskError::MalformedDocument("no points".to_string());
        assert!(!malformed.is_attachment_scoped());
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = MaskError::UnresolvedPoint {
            point: "p9".to_string(),
            entity: "border_1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("p9"));
        assert!(msg.contains("border_1"));
    }
}
