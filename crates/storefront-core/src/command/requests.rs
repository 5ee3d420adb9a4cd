// ── Typed request structs for section commands ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::model::{DisplayOn, EntityId, SectionType};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub config: Map<String, Value>,
    /// Appended after the last section when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_on: Option<DisplayOn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<EntityId>,
}

impl CreateSectionRequest {
    pub fn new(name: impl Into<String>, section_type: SectionType) -> Self {
        Self {
            name: name.into(),
            section_type,
            title: None,
            subtitle: None,
            description: None,
            config: Map::new(),
            ordering: None,
            is_active: None,
            is_published: None,
            display_on: None,
            created_by: None,
        }
    }

    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }
}

/// Partial update. Only fields that are `Some` are applied; `config`
/// replaces the whole object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub section_type: Option<SectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_on: Option<DisplayOn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<EntityId>,
}

impl UpdateSectionRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.section_type.is_none()
            && self.title.is_none()
            && self.subtitle.is_none()
            && self.description.is_none()
            && self.config.is_none()
            && self.ordering.is_none()
            && self.is_active.is_none()
            && self.is_published.is_none()
            && self.display_on.is_none()
    }
}

/// One `(id, ordering)` pair of a bulk reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: EntityId,
    pub ordering: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderFailure {
    pub id: EntityId,
    pub reason: String,
}

/// Outcome of a bulk reorder. Entries succeed or fail independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReorderReport {
    pub updated: Vec<EntityId>,
    pub failed: Vec<ReorderFailure>,
}

impl ReorderReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Accept only a JSON object as a section config.
pub fn config_object(value: Value) -> Result<Map<String, Value>, CoreError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(CoreError::ValidationFailed {
            field: "config".into(),
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_object_rejects_arrays() {
        let err = config_object(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(config_object(json!(null)).unwrap().is_empty());
    }

    #[test]
    fn create_request_reads_wire_names() {
        let req: CreateSectionRequest = serde_json::from_value(json!({
            "name": "Deals", "type": "productStrip", "isPublished": false
        }))
        .unwrap();
        assert_eq!(req.section_type, SectionType::ProductStrip);
        assert_eq!(req.is_published, Some(false));
        assert!(req.ordering.is_none());
    }
}
