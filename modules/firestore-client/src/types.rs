use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{FirestoreError, Result};
use crate::value::{fields_from_json, fields_to_json, Value};

/// A stored document. `name` is the full resource path, e.g.
/// `projects/p/databases/(default)/documents/risks/R01`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    /// Build a document for writing from a plain JSON object.
    pub fn from_json(name: String, body: &serde_json::Map<String, JsonValue>) -> Self {
        Self {
            name,
            fields: fields_from_json(body),
            create_time: None,
            update_time: None,
        }
    }

    /// The document key: last segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Decode all fields into a plain JSON object.
    pub fn to_json_object(&self) -> Result<serde_json::Map<String, JsonValue>> {
        fields_to_json(&self.fields).map_err(|message| FirestoreError::Decode {
            document: self.name.clone(),
            message,
        })
    }
}

/// Response body of `GET .../documents/{collection}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    pub next_page_token: Option<String>,
}

/// A single write inside a commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Write {
    /// Create or fully replace a document.
    Update(Document),
    /// Delete a document by resource name.
    Delete(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitRequest<'a> {
    pub writes: &'a [Write],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    #[serde(default)]
    pub write_results: Vec<JsonValue>,
    pub commit_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_id_is_last_segment() {
        let doc: Document = serde_json::from_value(json!({
            "name": "projects/ai-4-society/databases/(default)/documents/risks/R01",
            "fields": {}
        }))
        .unwrap();
        assert_eq!(doc.id(), "R01");
    }

    #[test]
    fn test_empty_collection_page() {
        let page: ListDocumentsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_decode_error_names_document() {
        let mut fields = BTreeMap::new();
        fields.insert("score_2026".to_string(), Value::IntegerValue("x".into()));
        let doc = Document {
            name: "projects/p/databases/(default)/documents/risks/R07".into(),
            fields,
            create_time: None,
            update_time: None,
        };
        let err = doc.to_json_object().unwrap_err();
        assert!(err.to_string().contains("risks/R07"));
        assert!(err.to_string().contains("score_2026"));
    }

    #[test]
    fn test_write_wire_shape() {
        let name = "projects/p/databases/(default)/documents/risks/R01";
        let writes = vec![Write::Delete(name.to_string())];
        let body = serde_json::to_value(CommitRequest { writes: &writes }).unwrap();
        assert_eq!(body, json!({ "writes": [{ "delete": name }] }));
    }
}
