//! Text label boxes

use crate::mask::document::{AnnotationDocument, Point};
use crate::mask::error::Result;

/// Corner polygons of the text boxes tagged with `attachment_id` whose class
/// passes `wants`
pub fn extract_text_boxes(
    document: &AnnotationDocument,
    attachment_id: &str,
    wants: impl Fn(&str) -> bool,
) -> Result<Vec<[Point; 4]>> {
    document.require_dimensions(attachment_id)?;

    let boxes: Vec<[Point; 4]> = document
        .texts_for(attachment_id)
        .filter(|text| wants(&text.class()))
        .map(|text| text.bounds.corners())
        .collect();

    log::debug!("Extracted {} text boxes for {}", boxes.len(), attachment_id);
    Ok(boxes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::error::MaskError;
    use serde_json::json;

    fn document() -> AnnotationDocument {
        AnnotationDocument::from_json_value(json!({
            "points": {},
            "attachments": {
                "att1": {"properties": {"dimensions": [40, 40]}},
                "nodims": {"properties": {}}
            },
            "lines": {},
            "text": {
                "t1": {"attachment": "att1", "type": "parcel", "color": "red", "box": [[10, 10], [6, 4], 0]},
                "t2": {"attachment": "att1", "type": "measurement", "box": [[30, 30], [4, 2], 45]},
                "t3": {"attachment": "other", "type": "year", "box": [[5, 5], [2, 2], 0]}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_boxes_filtered_by_attachment_and_class() {
        let doc = document();
        let all = extract_text_boxes(&doc, "att1", |_| true).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0][1], Point::new(7.0, 8.0));

        let parcels = extract_text_boxes(&doc, "att1", |class| class == "red_parcel").unwrap();
        assert_eq!(parcels.len(), 1);
    }

    #[test]
    fn test_missing_dimensions() {
        let doc = document();
        let result = extract_text_boxes(&doc, "nodims", |_| true);
        assert!(matches!(result, Err(MaskError::MissingDimensions { .. })));
    }
}
