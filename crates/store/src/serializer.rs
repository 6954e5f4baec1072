//! Encoding and decoding of template documents

use crate::{DocumentEnvelope, Result, StoreError, LEGACY_SCHEMA_VERSION, SCHEMA_VERSION};
use serde_json::Value;
use template_model::{Element, Page, TemplateDocument, MAX_PAGES};

/// A document read back from storage, with the version it was written in
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDocument {
    pub document: TemplateDocument,
    pub schema_version: u32,
    /// Elements that could not be read and were left out
    pub skipped_elements: usize,
}

/// Serialize a document to the string stored in a template's `elements`
pub fn encode_document(document: &TemplateDocument) -> Result<String> {
    let envelope = DocumentEnvelope {
        schema_version: SCHEMA_VERSION,
        elements: document
            .elements
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<_, _>>()?,
        pages: document.pages.clone(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a stored `elements` value.
///
/// Accepts a JSON string holding either shape, or the already-parsed
/// array/object. Unknown element fields are dropped; elements that cannot be
/// read at all are skipped and counted.
pub fn decode_document(value: &Value) -> Result<DecodedDocument> {
    match value {
        Value::String(text) => {
            let parsed: Value = serde_json::from_str(text)?;
            decode_parsed(parsed)
        }
        Value::Null => Ok(DecodedDocument {
            document: TemplateDocument::blank(),
            schema_version: LEGACY_SCHEMA_VERSION,
            skipped_elements: 0,
        }),
        other => decode_parsed(other.clone()),
    }
}

/// Decode from a JSON string
pub fn decode_document_str(text: &str) -> Result<DecodedDocument> {
    decode_document(&Value::String(text.to_string()))
}

fn decode_parsed(value: Value) -> Result<DecodedDocument> {
    let (raw_elements, pages, schema_version) = match value {
        Value::Array(items) => (items, Vec::new(), LEGACY_SCHEMA_VERSION),
        Value::Object(_) => {
            let envelope: DocumentEnvelope = serde_json::from_value(value)?;
            if !envelope.is_supported() {
                tracing::warn!(
                    found = envelope.schema_version,
                    supported = SCHEMA_VERSION,
                    "Template written by a newer editor; unknown fields will be dropped"
                );
            }
            (envelope.elements, envelope.pages, envelope.schema_version)
        }
        other => {
            return Err(StoreError::InvalidFormat(format!(
                "expected element array or document envelope, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = raw_elements.len();
    let elements: Vec<Element> = raw_elements
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<Element>(raw) {
            Ok(element) => Some(element),
            Err(e) => {
                tracing::warn!("Skipping unreadable template element: {}", e);
                None
            }
        })
        .collect();
    let skipped_elements = total - elements.len();

    let mut document = TemplateDocument { elements, pages };
    if document.pages.is_empty() {
        let wanted = document.max_element_page().max(1) as usize;
        if wanted > MAX_PAGES {
            tracing::warn!(
                wanted,
                max = MAX_PAGES,
                "Template elements reference more pages than allowed; extra pages not created"
            );
        }
        let count = wanted.min(MAX_PAGES);
        document.pages = (0..count).map(|_| Page::blank()).collect();
    }

    Ok(DecodedDocument {
        document,
        schema_version,
        skipped_elements,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use template_model::{ElementId, ElementKind, Point};

    fn every_kind() -> TemplateDocument {
        let mut document = TemplateDocument::blank();
        document.pages.push(Page::blank());

        let mut text = Element::new(ElementKind::Text, Point::new(10.0, 10.0), 1);
        text.content = Some("Lessee name".into());
        let rectangle = Element::new(ElementKind::Rectangle, Point::new(50.0, 80.0), 1);
        let signature = Element::new(ElementKind::Signature, Point::new(400.0, 900.0), 2);
        let image = Element::new(ElementKind::Image, Point::new(0.0, 0.0), 2)
            .with_image_url("data:image/png;base64,AAAA");
        let mut checkbox = Element::new(ElementKind::Checkbox, Point::new(30.0, 300.0), 1);
        checkbox.checked = Some(true);

        document.elements = vec![text, rectangle, signature, image, checkbox];
        document
    }

    #[test]
    fn test_round_trip_all_kinds() {
        let document = every_kind();
        let encoded = encode_document(&document).unwrap();
        let decoded = decode_document_str(&encoded).unwrap();

        assert_eq!(decoded.schema_version, SCHEMA_VERSION);
        assert_eq!(decoded.skipped_elements, 0);
        assert_eq!(decoded.document, document);
    }

    #[test]
    fn test_encoded_form_carries_version() {
        let encoded = encode_document(&TemplateDocument::blank()).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["schemaVersion"], 1);
        assert!(value["elements"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_legacy_bare_array_string() {
        let legacy = r#"[{"id":"element-1","type":"text","x":5,"y":6,"width":300,"height":40,"content":"Hi","page":3}]"#;
        let decoded = decode_document(&Value::String(legacy.into())).unwrap();

        assert_eq!(decoded.schema_version, LEGACY_SCHEMA_VERSION);
        assert_eq!(decoded.document.pages.len(), 3);
        assert_eq!(decoded.document.elements[0].id, ElementId::from("element-1"));
    }

    #[test]
    fn test_inline_array_and_null() {
        let decoded = decode_document(&json!([])).unwrap();
        assert!(decoded.document.elements.is_empty());
        assert_eq!(decoded.document.pages.len(), 1);

        let decoded = decode_document(&Value::Null).unwrap();
        assert!(decoded.document.elements.is_empty());
        assert_eq!(decoded.document.pages.len(), 1);
    }

    #[test]
    fn test_newer_version_loads_best_effort() {
        let payload = json!({
            "schemaVersion": 7,
            "elements": [
                {"id": "a", "type": "rectangle", "x": 1, "y": 2, "width": 3, "height": 4,
                 "page": 1, "borderRadius": 8},
                {"id": "b", "type": "qr-code", "x": 1, "y": 2, "width": 3, "height": 4, "page": 1}
            ],
            "pages": [{"content": "", "layoutGrid": true}]
        });
        let decoded = decode_document(&payload).unwrap();

        assert_eq!(decoded.schema_version, 7);
        assert_eq!(decoded.document.elements.len(), 1);
        assert_eq!(decoded.skipped_elements, 1);
    }

    #[test]
    fn test_rejects_scalar_payload() {
        let result = decode_document(&json!(42));
        assert!(matches!(result, Err(StoreError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_malformed_string() {
        let result = decode_document_str("{not json");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_legacy_page_count_is_capped() {
        let legacy = r#"[
            {"id":"a","type":"text","x":0,"y":0,"width":300,"height":40,"page":1},
            {"id":"b","type":"text","x":0,"y":0,"width":300,"height":40,"page":4294967295}
        ]"#;
        let decoded = decode_document_str(legacy).unwrap();

        assert_eq!(decoded.document.pages.len(), MAX_PAGES);
        assert_eq!(decoded.document.elements.len(), 2);
        assert_eq!(decoded.document.elements[1].page, u32::MAX);
    }

    #[test]
    fn test_numeric_element_ids_survive() {
        let legacy = r#"[{"id":1700000000000,"type":"text","x":10,"y":10,"width":300,"height":40,"page":1}]"#;
        let decoded = decode_document_str(legacy).unwrap();

        assert_eq!(decoded.skipped_elements, 0);
        assert_eq!(decoded.document.elements[0].id, ElementId::from("1700000000000"));
    }
}
