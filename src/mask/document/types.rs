//! Core annotation types
//!
//! Immutable value types for one cadastral sketch: the point table,
//! attachments (sub-images with their own coordinate space) and the
//! attachment-tagged line, border and building entities.

use crate::mask::error::{MaskError, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// A 2D position in attachment pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Attachment size as stored in the document: (width, height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A named sub-image of the document
#[derive(Debug, Clone)]
pub struct Attachment {
    pub id: String,
    /// `None` when `properties.dimensions` is missing or unusable
    pub dimensions: Option<Dimensions>,
    pub vectorize: Option<bool>,
}

/// Polyline entity: used for both physical lines and semantic (border) lines
#[derive(Debug, Clone)]
pub struct LineEntity {
    pub id: String,
    pub attachment: Option<String>,
    /// Point ids; consecutive pairs are segments
    pub points: Vec<String>,
}

/// Building outline given as its intended vertices
#[derive(Debug, Clone)]
pub struct BuildingEntity {
    pub id: String,
    pub attachment: Option<String>,
    pub points: Vec<String>,
}

/// Rotated rectangle `((cx, cy), (w, h), angle)` with the angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotatedBox {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl RotatedBox {
    /// Corners in bottom-left, top-left, top-right, bottom-right order for a
    /// zero angle (y pointing down)
    pub fn corners(&self) -> [Point; 4] {
        let theta = self.angle.to_radians();
        let b = theta.cos() * 0.5;
        let a = theta.sin() * 0.5;
        let (cx, cy) = (self.center.x, self.center.y);

        let p0 = Point::new(cx - a * self.height - b * self.width, cy + b * self.height - a * self.width);
        let p1 = Point::new(cx + a * self.height - b * self.width, cy - b * self.height - a * self.width);
        let p2 = Point::new(2.0 * cx - p0.x, 2.0 * cy - p0.y);
        let p3 = Point::new(2.0 * cx - p1.x, 2.0 * cy - p1.y);
        [p0, p1, p2, p3]
    }
}

/// A text label annotated with its bounding box
#[derive(Debug, Clone)]
pub struct TextEntity {
    pub id: String,
    pub attachment: Option<String>,
    /// `measurement`, `parcel`, `coordinate`, `year`, ...
    pub kind: String,
    pub color: Option<String>,
    pub bounds: RotatedBox,
}

impl TextEntity {
    /// Class label: parcel numbers are split by ink colour (`red_parcel`)
    pub fn class(&self) -> String {
        match (&self.color, self.kind.as_str()) {
            (Some(color), "parcel") => format!("{}_{}", color, self.kind),
            _ => self.kind.clone(),
        }
    }
}

/// A resolved straight segment, the rasterizer's input unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// An unresolved pair of point ids (building edge or graph edge)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexPair {
    pub from: String,
    pub to: String,
}

impl VertexPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

/// A validated annotation document
///
/// All maps keep the order in which entries appeared in the source JSON so
/// extraction output is deterministic.
#[derive(Debug, Clone, Default)]
pub struct AnnotationDocument {
    pub points: IndexMap<String, Point>,
    pub attachments: IndexMap<String, Attachment>,
    pub lines: IndexMap<String, LineEntity>,
    /// `semantic_lines` in the source document
    pub borders: IndexMap<String, LineEntity>,
    pub buildings: IndexMap<String, BuildingEntity>,
    pub texts: IndexMap<String, TextEntity>,
}

impl AnnotationDocument {
    /// Look up a point position by id
    pub fn position(&self, id: &str) -> Option<Point> {
        self.points.get(id).copied()
    }

    pub fn attachment(&self, id: &str) -> Option<&Attachment> {
        self.attachments.get(id)
    }

    /// Dimensions of an attachment, or the error that makes it unprocessable
    pub fn require_dimensions(&self, attachment_id: &str) -> Result<Dimensions> {
        let attachment = self
            .attachment(attachment_id)
            .ok_or_else(|| MaskError::UnknownAttachment(attachment_id.to_string()))?;
        attachment.dimensions.ok_or_else(|| MaskError::MissingDimensions {
            attachment: attachment_id.to_string(),
        })
    }

    /// Lines tagged with `attachment_id`
    pub fn lines_for<'a>(&'a self, attachment_id: &'a str) -> impl Iterator<Item = &'a LineEntity> + 'a {
        self.lines
            .values()
            .filter(move |l| l.attachment.as_deref() == Some(attachment_id))
    }

    /// Borders tagged with `attachment_id`
    pub fn borders_for<'a>(&'a self, attachment_id: &'a str) -> impl Iterator<Item = &'a LineEntity> + 'a {
        self.borders
            .values()
            .filter(move |l| l.attachment.as_deref() == Some(attachment_id))
    }

    /// Buildings tagged with `attachment_id`
    pub fn buildings_for<'a>(&'a self, attachment_id: &'a str) -> impl Iterator<Item = &'a BuildingEntity> + 'a {
        self.buildings
            .values()
            .filter(move |b| b.attachment.as_deref() == Some(attachment_id))
    }

    /// Text labels tagged with `attachment_id`
    pub fn texts_for<'a>(&'a self, attachment_id: &'a str) -> impl Iterator<Item = &'a TextEntity> + 'a {
        self.texts
            .values()
            .filter(move |t| t.attachment.as_deref() == Some(attachment_id))
    }
}
