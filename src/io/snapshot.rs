//! Snapshot families inside a sketch archive
//!
//! An archive holds the reference annotations under
//! `observations/snapshots/latest/` and detector output under one directory
//! per detector (line, building, text box). Each family decides which mask layers make sense for it.

use crate::mask::config::{Category, CategorySet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Snapshot {
    /// Hand-made ground truth
    Latest,
    /// Line detector output
    LineDetector,
    /// Building and border detector output
    BuildingDetection,
    /// Text box detector output
    TextboxDetection,
}

impl Snapshot {
    pub const ALL: [Snapshot; 4] = [
        Snapshot::Latest,
        Snapshot::LineDetector,
        Snapshot::BuildingDetection,
        Snapshot::TextboxDetection,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Snapshot::Latest => "latest",
            Snapshot::LineDetector => "LineDetector",
            Snapshot::BuildingDetection => "BuildingDetection",
            Snapshot::TextboxDetection => "TextboxDetection",
        }
    }

    pub fn from_name(name: &str) -> Option<Snapshot> {
        Snapshot::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn prefix(&self) -> String {
        format!("observations/snapshots/{}/", self.name())
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Snapshot::Latest => ".latest.json",
            Snapshot::TextboxDetection => ".TextboxDetection.json",
            Snapshot::LineDetector | Snapshot::BuildingDetection => ".json",
        }
    }

    /// Layers this family carries
    pub fn categories(&self) -> CategorySet {
        match self {
            Snapshot::Latest => CategorySet::default(),
            Snapshot::LineDetector => CategorySet::only(&[Category::Line]),
            Snapshot::BuildingDetection => CategorySet::only(&[Category::Border, Category::Building]),
            Snapshot::TextboxDetection => CategorySet::only(&[Category::Text]),
        }
    }

    /// Output directory group: ground truth and detections are kept apart
    pub fn output_group(&self) -> &'static str {
        match self {
            Snapshot::Latest => "ground_truth",
            Snapshot::LineDetector | Snapshot::BuildingDetection | Snapshot::TextboxDetection => "detection",
        }
    }

    /// Sketch name of an archive entry, if the entry belongs to this family
    pub fn sketch_name(&self, entry: &str) -> Option<String> {
        let prefix = self.prefix();
        let rest = entry.strip_prefix(prefix.as_str())?;
        let name = rest.strip_suffix(self.suffix())?;
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sketch_name() {
        assert_eq!(
            Snapshot::Latest.sketch_name("observations/snapshots/latest/SK-001.latest.json"),
            Some("SK-001".to_string())
        );
        assert_eq!(
            Snapshot::LineDetector.sketch_name("observations/snapshots/LineDetector/SK-001.json"),
            Some("SK-001".to_string())
        );
        assert_eq!(Snapshot::Latest.sketch_name("observations/snapshots/latest/SK-001.json"), None);
        assert_eq!(Snapshot::Latest.sketch_name("other/SK-001.latest.json"), None);
        assert_eq!(Snapshot::Latest.sketch_name("observations/snapshots/latest/.latest.json"), None);
        assert_eq!(
            Snapshot::TextboxDetection
                .sketch_name("observations/snapshots/TextboxDetection/SK-001.TextboxDetection.json"),
            Some("SK-001".to_string())
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Snapshot::from_name("linedetector"), Some(Snapshot::LineDetector));
        assert_eq!(Snapshot::from_name("latest"), Some(Snapshot::Latest));
        assert_eq!(Snapshot::from_name("nope"), None);
    }

    #[test]
    fn test_family_categories() {
        assert!(Snapshot::LineDetector.categories().contains(Category::Line));
        assert!(!Snapshot::LineDetector.categories().contains(Category::Building));
        assert!(!Snapshot::BuildingDetection.categories().contains(Category::Line));
        assert_eq!(Snapshot::Latest.categories().iter().count(), 4);
        assert_eq!(
            Snapshot::TextboxDetection.categories().iter().collect::<Vec<_>>(),
            vec![Category::Text]
        );
    }
}
