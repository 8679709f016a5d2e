//! Building boundary resolution
//!
//! Each building edge is replaced by the shortest chain of drawn line
//! segments between its two vertices. When the vertices are not connected
//! the straight edge is drawn instead.

use super::line_graph::LineGraph;
use crate::mask::config::GraphScope;
use crate::mask::document::{AnnotationDocument, Segment, VertexPair};
use crate::mask::error::{MaskError, Result};
use crate::mask::extraction::{building_vertex_pairs, resolve_pairs};

/// Expand one building edge into the graph edges along its shortest path
pub fn expand_vertex_pair(graph: &LineGraph, pair: &VertexPair) -> Vec<VertexPair> {
    match graph.shortest_path(&pair.from, &pair.to) {
        Some(path) => path
            .windows(2)
            .map(|w| VertexPair::new(w[0], w[1]))
            .collect(),
        None => {
            let recovered = MaskError::NoPathFound {
                from: pair.from.clone(),
                to: pair.to.clone(),
            };
            log::warn!("{}, drawing direct edge", recovered);
            vec![pair.clone()]
        }
    }
}

/// Resolved boundary segments of every building tagged with `attachment_id`
pub fn resolve_building_segments(
    document: &AnnotationDocument,
    attachment_id: &str,
    scope: GraphScope,
    tolerate_missing: bool,
) -> Result<Vec<Segment>> {
    document.require_dimensions(attachment_id)?;

    let graph = LineGraph::from_document(document, scope, attachment_id);
    let mut segments = Vec::new();

    for building in document.buildings_for(attachment_id) {
        let expanded: Vec<VertexPair> = building_vertex_pairs(building)
            .iter()
            .flat_map(|pair| expand_vertex_pair(&graph, pair))
            .collect();
        segments.extend(resolve_pairs(document, &expanded, &building.id, tolerate_missing)?);
    }

    log::debug!(
        "Extracted {} building segments for {} (graph: {} nodes, {} edges)",
        segments.len(),
        attachment_id,
        graph.node_count(),
        graph.edge_count()
    );
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
                "p1": {"position": [0, 0]},
                "p2": {"position": [5, 5]},
                "p3": {"position": [10, 0]},
                "q1": {"position": [15, 15]}
            },
            "attachments": {
                "att1": {"properties": {"dimensions": [20, 20]}},
                "att2": {"properties": {"dimensions": [20, 20]}}
            },
            "lines": {
                "l1": {"attachment": "att2", "points": ["p1", "p2", "p3"]}
            },
            "buildings": {
                "b1": {"attachment": "att1", "points": ["p1", "p3", "q1"]}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_building_edge_follows_lines_of_other_attachments() {
        let doc = document();
        let segments = resolve_building_segments(&doc, "att1", GraphScope::Global, true).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0)),
                Segment::new(Point::new(5.0, 5.0), Point::new(10.0, 0.0)),
                // p3 - q1 is disconnected: direct fallback
                Segment::new(Point::new(10.0, 0.0), Point::new(15.0, 15.0)),
            ]
        );
    }

    #[test]
    fn test_per_attachment_scope_ignores_foreign_lines() {
        let doc = document();
        let segments = resolve_building_segments(&doc, "att1", GraphScope::PerAttachment, true).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
                Segment::new(Point::new(10.0, 0.0), Point::new(15.0, 15.0)),
            ]
        );
    }

    #[test]
    fn test_expand_direct_edge_is_single_pair() {
        let mut graph = LineGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("c", "a");
        let expanded = expand_vertex_pair(&graph, &VertexPair::new("a", "b"));
        assert_eq!(expanded, vec![VertexPair::new("a", "b")]);
    }

    #[test]
    fn test_unknown_vertex_dropped_when_tolerant() {
        let mut doc = document();
        doc.buildings["b1"].points.push("ghost".to_string());
        let segments = resolve_building_segments(&doc, "att1", GraphScope::Global, true).unwrap();
        assert_eq!(segments.len(), 3);

        let strict = resolve_building_segments(&doc, "att1", GraphScope::Global, false);
        assert!(matches!(strict, Err(MaskError::UnresolvedPoint { .. })));
    }
}
