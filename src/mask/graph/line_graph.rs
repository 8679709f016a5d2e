//! Undirected line graph
//!
//! Nodes are point ids, edges are consecutive point pairs of line entities.
//! A graph is built fresh for every call; nothing is cached between
//! attachments.

use crate::mask::config::GraphScope;
use crate::mask::document::AnnotationDocument;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Default)]
pub struct LineGraph {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl LineGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every point of the document plus the edges of the lines in `scope`
    ///
    /// Line ids missing from the point table still become nodes so paths
    /// through them are found; resolving those segments is left to the caller.
    pub fn from_document(document: &AnnotationDocument, scope: GraphScope, attachment_id: &str) -> Self {
        let mut graph = LineGraph::new();
        for id in document.points.keys() {
            graph.add_node(id);
        }

        for line in document.lines.values() {
            if scope == GraphScope::PerAttachment && line.attachment.as_deref() != Some(attachment_id) {
                continue;
            }
            for w in line.points.windows(2) {
                graph.add_edge(&w[0], &w[1]);
            }
        }
        graph
    }

    /// Index of `id`, inserting it if new
    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Add an undirected edge; repeated edges are stored once
    pub fn add_edge(&mut self, a: &str, b: &str) {
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        if ia == ib || self.adjacency[ia].contains(&ib) {
            return;
        }
        self.adjacency[ia].push(ib);
        self.adjacency[ib].push(ia);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => self.adjacency[ia].contains(&ib),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Fewest-edges path from `from` to `to`, both ends included
    ///
    /// `None` when either id is unknown or the two lie in different
    /// components. Among equally short paths the choice is unspecified.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Vec<&str>> {
        let &start = self.index.get(from)?;
        let &goal = self.index.get(to)?;
        if start == goal {
            return Some(vec![self.ids[start].as_str()]);
        }

        let mut previous: Vec<Option<usize>> = vec![None; self.ids.len()];
        let mut visited = vec![false; self.ids.len()];
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in &self.adjacency[current] {
                if visited[next] {
                    continue;
                }
                visited[next] = true;
                previous[next] = Some(current);
                if next == goal {
                    return Some(self.walk_back(&previous, goal));
                }
                queue.push_back(next);
            }
        }
        None
    }

    fn walk_back(&self, previous: &[Option<usize>], goal: usize) -> Vec<&str> {
        let mut path = vec![self.ids[goal].as_str()];
        let mut current = goal;
        while let Some(prev) = previous[current] {
            path.push(self.ids[prev].as_str());
            current = prev;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> LineGraph {
        let mut g = LineGraph::new();
        g.add_edge("a", "b");
        g.add_edge("b", "c");
        g.add_edge("c", "d");
        g.add_node("island");
        g
    }

    #[test]
    fn test_edges_are_undirected_and_deduplicated() {
        let mut g = chain();
        g.add_edge("b", "a");
        g.add_edge("a", "a");
        assert_eq!(g.edge_count(), 3);
        assert!(g.has_edge("b", "a"));
        assert!(!g.has_edge("a", "c"));
        assert_eq!(g.node_count(), 5);
    }

    #[test]
    fn test_shortest_path_chain() {
        let g = chain();
        assert_eq!(g.shortest_path("a", "d"), Some(vec!["a", "b", "c", "d"]));
        assert_eq!(g.shortest_path("d", "b"), Some(vec!["d", "c", "b"]));
    }

    #[test]
    fn test_direct_edge_beats_detour() {
        let mut g = chain();
        g.add_edge("a", "d");
        assert_eq!(g.shortest_path("a", "d"), Some(vec!["a", "d"]));
    }

    #[test]
    fn test_no_path() {
        let g = chain();
        assert_eq!(g.shortest_path("a", "island"), None);
        assert_eq!(g.shortest_path("a", "unknown"), None);
    }

    #[test]
    fn test_same_node_path() {
        let g = chain();
        assert_eq!(g.shortest_path("b", "b"), Some(vec!["b"]));
    }

    #[test]
    fn test_equal_length_paths_have_same_length() {
        // square a-b-c and a-d-c
        let mut g = LineGraph::new();
        g.add_edge("a", "b");
        g.add_edge("b", "c");
        g.add_edge("a", "d");
        g.add_edge("d", "c");
        let path = g.shortest_path("a", "c").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&"a"));
        assert_eq!(path.last(), Some(&"c"));
    }
}
