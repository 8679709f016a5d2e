//! Batch driver: every sketch of every requested snapshot family → stored masks

use super::sink::MaskSink;
use super::snapshot::Snapshot;
use super::source::SketchSource;
use crate::mask::config::MaskConfig;
use crate::mask::document::AnnotationDocument;
use crate::mask::pipeline::{artifacts_for, process_document, AttachmentOutcome};

/// Counters for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub sketches: usize,
    pub sketches_failed: usize,
    pub attachments_rendered: usize,
    pub attachments_skipped: usize,
    pub masks_written: usize,
    pub masks_failed: usize,
}

impl BatchReport {
    pub fn merge(&mut self, other: &BatchReport) {
        self.sketches += other.sketches;
        self.sketches_failed += other.sketches_failed;
        self.attachments_rendered += other.attachments_rendered;
        self.attachments_skipped += other.attachments_skipped;
        self.masks_written += other.masks_written;
        self.masks_failed += other.masks_failed;
    }
}

/// Render and store the masks of one parsed sketch
pub fn process_sketch(
    sketch_name: &str,
    document: &AnnotationDocument,
    snapshot: Snapshot,
    config: &MaskConfig,
    sink: &mut dyn MaskSink,
) -> BatchReport {
    let mut report = BatchReport { sketches: 1, ..Default::default() };
    let categories = snapshot.categories().intersect(&config.categories);

    for outcome in process_document(document, config, categories) {
        let rendered = match outcome {
            AttachmentOutcome::Rendered(rendered) => rendered,
            AttachmentOutcome::Skipped { .. } => {
                report.attachments_skipped += 1;
                continue;
            }
        };
        report.attachments_rendered += 1;

        for artifact in artifacts_for(sketch_name, &rendered, config.output_mode) {
            match sink.store(snapshot.output_group(), &artifact) {
                Ok(_) => report.masks_written += 1,
                Err(e) => {
                    log::error!("Error storing mask {}: {:#}", artifact.name, e);
                    report.masks_failed += 1;
                }
            }
        }
    }
    report
}

/// Process all sketches of `snapshots` found in `source`
///
/// Only failing to list the source is fatal; unreadable sketches are logged
/// and counted.
pub fn run_batch(
    source: &mut dyn SketchSource,
    sink: &mut dyn MaskSink,
    config: &MaskConfig,
    snapshots: &[Snapshot],
) -> anyhow::Result<BatchReport> {
    let mut report = BatchReport::default();

    for &snapshot in snapshots {
        let sketches = source.sketches(snapshot)?;
        if !sketches.is_empty() {
            log::info!(
                "Processing {} '{}' sketches from {}",
                sketches.len(),
                snapshot,
                source.describe()
            );
        }

        for (i, (name, entry)) in sketches.iter().enumerate() {
            log::info!("Processing sketch: {}: {}", i, name);
            let document = match source.load(entry) {
                Ok(document) => document,
                Err(e) => {
                    log::error!("{:#}", e);
                    report.sketches += 1;
                    report.sketches_failed += 1;
                    continue;
                }
            };
            let sketch_report = process_sketch(name, &document, snapshot, config, sink);
            report.merge(&sketch_report);
        }
    }

    log::info!(
        "Batch done: {} sketches ({} failed), {} attachments rendered, {} skipped, {} masks written",
        report.sketches,
        report.sketches_failed,
        report.attachments_rendered,
        report.attachments_skipped,
        report.masks_written
    );
    Ok(report)
}
