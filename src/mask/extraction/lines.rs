//! Line and border segment extraction

use crate::mask::config::Category;
use crate::mask::document::{AnnotationDocument, LineEntity, Segment, VertexPair};
use crate::mask::error::{MaskError, Result};

/// Which polyline table to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Physical lines (`lines`)
    Line,
    /// Administrative borders (`semantic_lines`)
    Border,
}

impl LineKind {
    pub fn category(&self) -> Category {
        match self {
            LineKind::Line => Category::Line,
            LineKind::Border => Category::Border,
        }
    }
}

/// Segments of every `kind` entity tagged with `attachment_id`
///
/// With `tolerate_missing` a pair referencing an unknown point is dropped
/// (the rest of the entity is kept); without it the first such pair fails
/// the call with `UnresolvedPoint`.
pub fn extract_segments(
    document: &AnnotationDocument,
    attachment_id: &str,
    kind: LineKind,
    tolerate_missing: bool,
) -> Result<Vec<Segment>> {
    document.require_dimensions(attachment_id)?;

    let entities: Vec<&LineEntity> = match kind {
        LineKind::Line => document.lines_for(attachment_id).collect(),
        LineKind::Border => document.borders_for(attachment_id).collect(),
    };

    let mut segments = Vec::new();
    for entity in entities {
        let pairs: Vec<VertexPair> = entity
            .points
            .windows(2)
            .map(|w| VertexPair::new(w[0].as_str(), w[1].as_str()))
            .collect();
        segments.extend(resolve_pairs(document, &pairs, &entity.id, tolerate_missing)?);
    }

    log::debug!(
        "Extracted {} {} segments for {}",
        segments.len(),
        kind.category(),
        attachment_id
    );
    Ok(segments)
}

/// Map id pairs to positions via the point table
pub fn resolve_pairs(
    document: &AnnotationDocument,
    pairs: &[VertexPair],
    entity_id: &str,
    tolerate_missing: bool,
) -> Result<Vec<Segment>> {
    let mut segments = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match (document.position(&pair.from), document.position(&pair.to)) {
            (Some(start), Some(end)) => segments.push(Segment::new(start, end)),
            (start, _) => {
                let missing = if start.is_none() { &pair.from } else { &pair.to };
                let err = MaskError::UnresolvedPoint {
                    point: missing.clone(),
                    entity: entity_id.to_string(),
                };
                if !tolerate_missing {
                    return Err(err);
                }
                log::warn!("Dropping segment: {}", err);
            }
        }
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::document::Point;
    use serde_json::json;

    fn document() -> AnnotationDocument {
        AnnotationDocument::from_json_value(json!({
            "points": {
                "a": {"position": [0, 0]},
                "b": {"position": [10, 0]},
                "c": {"position": [10, 10]}
            },
            "attachments": {
                "att1": {"properties": {"dimensions": [20, 20]}},
                "att2": {"properties": {"dimensions": [20, 20]}},
                "nodims": {"properties": {}}
            },
            "lines": {
                "l1": {"attachment": "att1", "points": ["a", "b", "c"]},
                "l2": {"attachment": "att2", "points": ["c", "a"]},
                "l3": {"points": ["a", "c"]}
            },
            "semantic_lines": {
                "s1": {"attachment": "att1", "points": ["a", "ghost", "b", "c"]}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_line_segments_filtered_by_attachment() {
        let doc = document();
        let segments = extract_segments(&doc, "att1", LineKind::Line, false).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
                Segment::new(Point::new(10.0, 0.0), Point::new(10.0, 10.0)),
            ]
        );

        let other = extract_segments(&doc, "att2", LineKind::Line, false).unwrap();
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_border_missing_point_drops_only_that_segment() {
        let doc = document();
        let segments = extract_segments(&doc, "att1", LineKind::Border, true).unwrap();
        // a-ghost and ghost-b are dropped, b-c survives
        assert_eq!(
            segments,
            vec![Segment::new(Point::new(10.0, 0.0), Point::new(10.0, 10.0))]
        );
    }

    #[test]
    fn test_strict_mode_reports_unresolved_point() {
        let doc = document();
        let err = extract_segments(&doc, "att1", LineKind::Border, false).unwrap_err();
        match err {
            MaskError::UnresolvedPoint { point, entity } => {
                assert_eq!(point, "ghost");
                assert_eq!(entity, "s1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_line_reports_unresolved_point() {
        let mut doc = document();
        doc.lines["l1"].points.insert(1, "nowhere".to_string());

        let err = extract_segments(&doc, "att1", LineKind::Line, false).unwrap_err();
        assert!(matches!(
            err,
            MaskError::UnresolvedPoint { ref point, ref entity } if point == "nowhere" && entity == "l1"
        ));

        // tolerant mode keeps the b-c segment
        let kept = extract_segments(&doc, "att1", LineKind::Line, true).unwrap();
        assert_eq!(kept, vec![Segment::new(Point::new(10.0, 0.0), Point::new(10.0, 10.0))]);
    }

    #[test]
    fn test_missing_dimensions() {
        let doc = document();
        let result = extract_segments(&doc, "nodims", LineKind::Line, true);
        assert!(matches!(result, Err(MaskError::MissingDimensions { .. })));
    }

    #[test]
    fn test_attachment_without_entities_is_empty() {
        let doc = document();
        let segments = extract_segments(&doc, "att2", LineKind::Border, true).unwrap();
        assert!(segments.is_empty());
    }
}
