//! JSON → `AnnotationDocument`
//!
//! The raw serde shapes mirror the sketch JSON; `from_raw` turns them into the
//! validated value types and decides which problems are structural (hard
//! failure) and which only disable one attachment.

use super::types::*;
use crate::mask::error::{MaskError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawDocument {
    points: Option<IndexMap<String, RawPoint>>,
    attachments: Option<IndexMap<String, RawAttachment>>,
    lines: Option<IndexMap<String, RawEntity>>,
    semantic_lines: Option<IndexMap<String, RawEntity>>,
    borders: Option<IndexMap<String, RawEntity>>,
    buildings: Option<IndexMap<String, RawEntity>>,
    text: Option<IndexMap<String, RawText>>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    position: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAttachment {
    #[serde(default)]
    properties: RawProperties,
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    dimensions: Option<Value>,
    vectorize: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    #[serde(default)]
    attachment: Option<String>,
    #[serde(default)]
    points: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawText {
    #[serde(default)]
    attachment: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(rename = "box", default)]
    bounds: Option<Value>,
}

impl AnnotationDocument {
    /// Parse and validate a sketch from raw JSON bytes
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let raw: RawDocument = serde_json::from_slice(bytes)?;
        Self::from_raw(raw)
    }

    /// Parse and validate a sketch from an already-decoded JSON value
    pub fn from_json_value(value: Value) -> Result<Self> {
        let raw: RawDocument = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> Result<Self> {
        let raw_points = raw
            .points
            .ok_or_else(|| MaskError::MalformedDocument("missing 'points' table".to_string()))?;
        let raw_attachments = raw
            .attachments
            .ok_or_else(|| MaskError::MalformedDocument("missing 'attachments' table".to_string()))?;

        if raw.lines.is_none()
            && raw.semantic_lines.is_none()
            && raw.borders.is_none()
            && raw.buildings.is_none()
            && raw.text.is_none()
        {
            return Err(MaskError::MalformedDocument(
                "document has no 'lines', 'semantic_lines', 'buildings' or 'text'".to_string(),
            ));
        }

        // A point without a usable position is left out; entities that
        // reference it hit the unresolved-point handling at extraction.
        let mut points = IndexMap::with_capacity(raw_points.len());
        for (id, point) in raw_points {
            match point.position.as_deref() {
                Some([x, y, ..]) => {
                    points.insert(id, Point::new(*x, *y));
                }
                _ => log::warn!("Point '{}' has no [x, y] position, ignoring it", id),
            }
        }

        let attachments = raw_attachments
            .into_iter()
            .map(|(id, attachment)| {
                let dimensions = attachment
                    .properties
                    .dimensions
                    .as_ref()
                    .and_then(parse_dimensions);
                if attachment.properties.dimensions.is_some() && dimensions.is_none() {
                    log::warn!("Attachment '{}' has unusable dimensions, ignoring them", id);
                }
                let parsed = Attachment {
                    id: id.clone(),
                    dimensions,
                    vectorize: attachment.properties.vectorize,
                };
                (id, parsed)
            })
            .collect();

        Ok(AnnotationDocument {
            points,
            attachments,
            lines: convert_lines(raw.lines),
            borders: merge_borders(raw.semantic_lines, raw.borders),
            buildings: raw
                .buildings
                .unwrap_or_default()
                .into_iter()
                .map(|(id, entity)| {
                    let building = BuildingEntity {
                        id: id.clone(),
                        attachment: entity.attachment,
                        points: entity.points,
                    };
                    (id, building)
                })
                .collect(),
            texts: convert_texts(raw.text),
        })
    }
}

/// `semantic_lines` first, then `borders`; on a duplicate id the first entry wins
fn merge_borders(
    semantic_lines: Option<IndexMap<String, RawEntity>>,
    borders: Option<IndexMap<String, RawEntity>>,
) -> IndexMap<String, LineEntity> {
    let mut merged = convert_lines(semantic_lines);
    for (id, line) in convert_lines(borders) {
        if merged.contains_key(&id) {
            log::warn!("Border '{}' appears in both 'semantic_lines' and 'borders', keeping the first", id);
            continue;
        }
        merged.insert(id, line);
    }
    merged
}

fn convert_texts(raw: Option<IndexMap<String, RawText>>) -> IndexMap<String, TextEntity> {
    let mut texts = IndexMap::new();
    for (id, text) in raw.unwrap_or_default() {
        let Some(kind) = text.kind else {
            log::warn!("Text '{}' has no type, ignoring it", id);
            continue;
        };
        let Some(bounds) = text.bounds.as_ref().and_then(parse_rotated_box) else {
            log::warn!("Text '{}' has no usable box, ignoring it", id);
            continue;
        };
        let entity = TextEntity {
            id: id.clone(),
            attachment: text.attachment,
            kind,
            color: text.color,
            bounds,
        };
        texts.insert(id, entity);
    }
    texts
}

/// `[[cx, cy], [w, h], angle]`
fn parse_rotated_box(value: &Value) -> Option<RotatedBox> {
    let items = value.as_array()?;
    let pair = |v: &Value| -> Option<(f64, f64)> {
        let xy = v.as_array()?;
        Some((xy.first()?.as_f64()?, xy.get(1)?.as_f64()?))
    };
    let (cx, cy) = pair(items.first()?)?;
    let (width, height) = pair(items.get(1)?)?;
    let angle = items.get(2).and_then(Value::as_f64).unwrap_or(0.0);
    Some(RotatedBox {
        center: Point::new(cx, cy),
        width,
        height,
        angle,
    })
}

fn convert_lines(raw: Option<IndexMap<String, RawEntity>>) -> IndexMap<String, LineEntity> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|(id, entity)| {
            let line = LineEntity {
                id: id.clone(),
                attachment: entity.attachment,
                points: entity.points,
            };
            (id, line)
        })
        .collect()
}

/// `[width, height]` with positive whole-number entries
fn parse_dimensions(value: &Value) -> Option<Dimensions> {
    let items = value.as_array()?;
    if items.len() < 2 {
        return None;
    }
    let to_pixels = |v: &Value| -> Option<u32> {
        let n = v.as_f64()?;
        if n >= 1.0 && n.fract() == 0.0 && n <= u32::MAX as f64 {
            Some(n as u32)
        } else {
            None
        }
    };
    Some(Dimensions {
        width: to_pixels(&items[0])?,
        height: to_pixels(&items[1])?,
    })
}
