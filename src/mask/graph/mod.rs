//! Path resolution for building outlines
//!
//! # Submodules
//! - `line_graph` - Undirected point graph with breadth-first shortest paths
//! - `resolver` - Building edge expansion and segment resolution

mod line_graph;
mod resolver;

pub use line_graph::LineGraph;
pub use resolver::{expand_vertex_pair, resolve_building_segments};
