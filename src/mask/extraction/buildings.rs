//! Building vertex pairs
//!
//! Building outlines are not resolved to positions here: consecutive vertices
//! are not necessarily joined by a drawn line, so the path resolver expands
//! each pair through the line graph first.

use crate::mask::document::{AnnotationDocument, BuildingEntity, VertexPair};
use crate::mask::error::Result;

/// Consecutive vertex pairs of one building outline
pub fn building_vertex_pairs(building: &BuildingEntity) -> Vec<VertexPair> {
    building
        .points
        .windows(2)
        .map(|w| VertexPair::new(w[0].as_str(), w[1].as_str()))
        .collect()
}

/// Vertex pairs of every building tagged with `attachment_id`
pub fn extract_vertex_pairs(document: &AnnotationDocument, attachment_id: &str) -> Result<Vec<VertexPair>> {
    document.require_dimensions(attachment_id)?;
    Ok(document
        .buildings_for(attachment_id)
        .flat_map(building_vertex_pairs)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vertex_pairs_unresolved() {
        let doc = AnnotationDocument::from_json_value(json!({
            "points": {"p1": {"position": [0, 0]}},
            "attachments": {"att1": {"properties": {"dimensions": [10, 10]}}},
            "buildings": {
                "b1": {"attachment": "att1", "points": ["p1", "p2", "p3"]},
                "b2": {"attachment": "other", "points": ["p3", "p4"]}
            }
        }))
        .unwrap();

        let pairs = extract_vertex_pairs(&doc, "att1").unwrap();
        // ids are kept even when absent from the point table
        assert_eq!(pairs, vec![VertexPair::new("p1", "p2"), VertexPair::new("p2", "p3")]);
    }

    #[test]
    fn test_single_vertex_building_has_no_pairs() {
        let building = BuildingEntity {
            id: "b".to_string(),
            attachment: None,
            points: vec!["p1".to_string()],
        };
        assert!(building_vertex_pairs(&building).is_empty());
    }
}
