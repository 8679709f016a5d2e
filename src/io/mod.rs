//! Boundary adapters around the mask engine
//!
//! # Submodules
//! - `snapshot` - Snapshot families and sketch naming
//! - `source` - Sketch sources (directory, local zip archive)
//! - `sink` - PNG mask sinks
//! - `batch` - Batch driver and report

mod snapshot;
mod source;
mod sink;
mod batch;

pub use snapshot::Snapshot;
pub use source::{SketchSource, DirectorySource, ZipSource, open_source};
pub use sink::{MaskSink, PngDirectorySink};
pub use batch::{BatchReport, process_sketch, run_batch};
