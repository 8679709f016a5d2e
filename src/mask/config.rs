//! Mask generation configuration
//!
//! Every field has a default matching the production labelling run, so an
//! empty JSON object (`{}`) is a valid configuration file.

use crate::mask::error::Result;
use crate::mask::raster::{RasterShape, DEFAULT_TARGET_SHAPE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default stroke width in source pixels
pub const THICKNESS: u32 = 8;

/// Geometry category of a mask layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Line,
    Border,
    Building,
    /// Filled text label boxes
    Text,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Line, Category::Border, Category::Building, Category::Text];

    /// Stroked geometry layers, in compositing order
    pub const STROKED: [Category; 3] = [Category::Line, Category::Border, Category::Building];

    pub fn is_stroked(&self) -> bool {
        !matches!(self, Category::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Line => "line",
            Category::Border => "border",
            Category::Building => "building",
            Category::Text => "text",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which layers to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySet {
    pub line: bool,
    pub border: bool,
    pub building: bool,
    pub text: bool,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self { line: true, border: true, building: true, text: true }
    }
}

impl CategorySet {
    pub const NONE: CategorySet = CategorySet { line: false, border: false, building: false, text: false };

    pub fn only(categories: &[Category]) -> Self {
        let mut set = Self::NONE;
        for category in categories {
            set.set(*category, true);
        }
        set
    }

    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::Line => self.line,
            Category::Border => self.border,
            Category::Building => self.building,
            Category::Text => self.text,
        }
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        match category {
            Category::Line => self.line = enabled,
            Category::Border => self.border = enabled,
            Category::Building => self.building = enabled,
            Category::Text => self.text = enabled,
        }
    }

    pub fn intersect(&self, other: &CategorySet) -> CategorySet {
        CategorySet {
            line: self.line && other.line,
            border: self.border && other.border,
            building: self.building && other.building,
            text: self.text && other.text,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

/// Per-category handling of point ids missing from the point table.
/// `true` drops the affected segment, `false` fails the attachment.
/// Text boxes carry their own geometry and never reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointTolerance {
    pub line: bool,
    pub border: bool,
    pub building: bool,
}

impl Default for PointTolerance {
    fn default() -> Self {
        Self { line: true, border: true, building: true }
    }
}

impl PointTolerance {
    pub fn strict() -> Self {
        Self { line: false, border: false, building: false }
    }

    pub fn for_category(&self, category: Category) -> bool {
        match category {
            Category::Line => self.line,
            Category::Border => self.border,
            Category::Building => self.building,
            Category::Text => true,
        }
    }
}

/// Which line entities feed the building path graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphScope {
    /// Every line in the document, whatever its attachment
    #[default]
    Global,
    /// Only lines tagged with the attachment being rendered
    PerAttachment,
}

/// Interpolation used when resizing the source canvas to the target shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Linear,
}

/// How rendered layers become stored artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One union mask per attachment
    #[default]
    Composite,
    /// One mask per attachment and category
    Separate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Output resolution; `None` keeps each attachment's own shape
    pub target_shape: Option<RasterShape>,
    pub stroke_thickness: u32,
    pub tolerate_missing_points: PointTolerance,
    pub line_graph_scope: GraphScope,
    pub resize_filter: ResizeFilter,
    pub output_mode: OutputMode,
    pub categories: CategorySet,
    /// Skip attachments carrying `vectorize: false`
    pub only_vectorized: bool,
    /// Text classes drawn into the text layer (`measurement`, `red_parcel`, ...); empty means all
    pub text_classes: Vec<String>,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            target_shape: Some(DEFAULT_TARGET_SHAPE),
            stroke_thickness: THICKNESS,
            tolerate_missing_points: PointTolerance::default(),
            line_graph_scope: GraphScope::default(),
            resize_filter: ResizeFilter::default(),
            output_mode: OutputMode::default(),
            categories: CategorySet::default(),
            only_vectorized: false,
            text_classes: Vec::new(),
        }
    }
}

impl MaskConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn wants_text_class(&self, class: &str) -> bool {
        self.text_classes.is_empty() || self.text_classes.iter().any(|c| c == class)
    }

    /// Resolution masks are produced at for a given source shape
    pub fn output_shape(&self, source: RasterShape) -> RasterShape {
        self.target_shape.unwrap_or(source)
    }
}
