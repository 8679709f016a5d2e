//! Mask sinks

use crate::mask::pipeline::MaskArtifact;
use anyhow::Context;
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Destination for encoded masks
pub trait MaskSink {
    /// Store one artifact under `group` (e.g. `ground_truth`), returning where it went
    fn store(&mut self, group: &str, artifact: &MaskArtifact) -> anyhow::Result<PathBuf>;
}

/// Writes `<root>/<group>/<category|composite>/<name>` as single-channel PNG
pub struct PngDirectorySink {
    root: PathBuf,
}

impl PngDirectorySink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn artifact_path(&self, group: &str, artifact: &MaskArtifact) -> PathBuf {
        let layer = artifact
            .category
            .map(|c| c.as_str())
            .unwrap_or("composite");
        self.root.join(group).join(layer).join(&artifact.name)
    }
}

impl MaskSink for PngDirectorySink {
    fn store(&mut self, group: &str, artifact: &MaskArtifact) -> anyhow::Result<PathBuf> {
        let path = self.artifact_path(group, artifact);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        artifact
            .image
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Saved mask to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::config::Category;
    use image::{GrayImage, Luma};

    #[test]
    fn test_png_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngDirectorySink::new(dir.path());

        let mut image = GrayImage::new(8, 4);
        image.put_pixel(7, 3, Luma([255]));
        let artifact = MaskArtifact {
            name: "sk_att1_border.png".to_string(),
            category: Some(Category::Border),
            image: image.clone(),
        };

        let path = sink.store("detection", &artifact).unwrap();
        assert_eq!(path, dir.path().join("detection/border/sk_att1_border.png"));

        let decoded = image::open(&path).unwrap().to_luma8();
        assert_eq!(decoded, image);
    }
}
