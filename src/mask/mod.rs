//! Vector-to-raster mask engine for cadastral sketch annotations
//!
//! # Submodules
//! - `document` - Annotation document model and JSON validation
//! - `extraction` - Line, border and building geometry extraction
//! - `graph` - Line graph and building boundary resolution
//! - `raster` - Stroking, scan conversion, resizing, sparse masks
//! - `composite` - Layer union into a dense image
//! - `pipeline` - Per-attachment rendering and artifact naming
//! - `config` - `MaskConfig` and its option types
//! - `error` - `MaskError`

pub mod document;
pub mod extraction;
pub mod graph;
pub mod raster;
pub mod composite;
pub mod pipeline;
pub mod config;
pub mod error;
