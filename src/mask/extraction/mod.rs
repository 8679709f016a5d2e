//! Geometry extraction
//!
//! Filters entities by attachment and turns their point-id lists into
//! segments (lines, borders) or unresolved vertex pairs (buildings). Text
//! labels yield their box corners.
//!
//! # Submodules
//! - `lines` - Line and border segment extraction
//! - `buildings` - Building vertex pairs
//! - `texts` - Text label boxes

mod lines;
mod buildings;
mod texts;

pub use lines::{LineKind, extract_segments, resolve_pairs};
pub use buildings::{building_vertex_pairs, extract_vertex_pairs};
pub use texts::extract_text_boxes;
