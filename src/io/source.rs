//! Sketch sources: a local zip archive or a directory with the same layout

use crate::mask::document::AnnotationDocument;
use super::snapshot::Snapshot;
use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read access to the entries of a sketch archive
///
/// Entry names are relative paths with `/` separators, as in a zip file.
pub trait SketchSource {
    fn describe(&self) -> String;

    fn entries(&mut self) -> anyhow::Result<Vec<String>>;

    fn read(&mut self, entry: &str) -> anyhow::Result<Vec<u8>>;

    /// `(sketch_name, entry)` for every entry of a snapshot family, sorted by entry
    fn sketches(&mut self, snapshot: Snapshot) -> anyhow::Result<Vec<(String, String)>> {
        let mut found: Vec<(String, String)> = self
            .entries()?
            .into_iter()
            .filter_map(|entry| snapshot.sketch_name(&entry).map(|name| (name, entry)))
            .collect();
        found.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(found)
    }

    fn load(&mut self, entry: &str) -> anyhow::Result<AnnotationDocument> {
        let bytes = self.read(entry)?;
        AnnotationDocument::from_json_slice(&bytes)
            .with_context(|| format!("Failed to parse sketch '{}' from {}", entry, self.describe()))
    }
}

/// A directory laid out like an unpacked archive
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
}

fn walk(dir: &Path, relative: &str, out: &mut Vec<String>) -> anyhow::Result<()> {
    let listing = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory {}", dir.display()))?;
    for item in listing {
        let item = item?;
        let file_name = item.file_name().to_string_lossy().to_string();
        let entry = if relative.is_empty() {
            file_name
        } else {
            format!("{}/{}", relative, file_name)
        };
        if item.file_type()?.is_dir() {
            walk(&item.path(), &entry, out)?;
        } else {
            out.push(entry);
        }
    }
    Ok(())
}

impl SketchSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn entries(&mut self) -> anyhow::Result<Vec<String>> {
        let mut entries = Vec::new();
        walk(&self.root, "", &mut entries)?;
        Ok(entries)
    }

    fn read(&mut self, entry: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.root.join(entry);
        std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// A local `.zip` sketch archive
pub struct ZipSource {
    path: PathBuf,
    archive: zip::ZipArchive<File>,
}

impl ZipSource {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .with_context(|| format!("Failed to open archive {}", path.display()))?;
        let archive = zip::ZipArchive::new(file)
            .with_context(|| format!("Failed to read archive {}", path.display()))?;
        Ok(Self { path, archive })
    }
}

impl SketchSource for ZipSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn entries(&mut self) -> anyhow::Result<Vec<String>> {
        Ok(self
            .archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect())
    }

    fn read(&mut self, entry: &str) -> anyhow::Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(entry)
            .with_context(|| format!("No entry '{}' in {}", entry, self.path.display()))?;
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Open `path` as a zip archive or a directory source
pub fn open_source<P: AsRef<Path>>(path: P) -> anyhow::Result<Box<dyn SketchSource>> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(Box::new(DirectorySource::new(path)))
    } else {
        Ok(Box::new(ZipSource::open(path)?))
    }
}
