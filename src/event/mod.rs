//! Sensu Go event document model
//!
//! Deserializes the event JSON a Sensu backend pipes to handlers on
//! stdin. Sensu omits empty fields when serializing, so every leaf
//! field carries a serde default.

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EventError;

/// Object metadata common to entities, checks and hooks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

/// Host facts reported by an agent entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct System {
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub platform_family: String,
    #[serde(default)]
    pub platform_version: String,
}

/// The monitored entity the check ran against
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub entity_class: String,
    #[serde(default)]
    pub system: System,
}

/// A hook executed alongside the check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hook {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub status: u32,
}

/// The check result that triggered this event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Check {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub command: String,
    /// Exit status: 0 = OK, anything else is failing
    #[serde(default)]
    pub status: u32,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub interval: u32,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub occurrences: i64,
    #[serde(default)]
    pub occurrences_watermark: i64,
    #[serde(default)]
    pub proxy_entity_name: String,
    #[serde(default)]
    pub subscriptions: Vec<String>,
    #[serde(default)]
    pub handlers: Vec<String>,
    #[serde(default)]
    pub hooks: Vec<Hook>,
}

/// One monitoring event: a check result paired with its entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub timestamp: i64,
    pub entity: Entity,
    pub check: Check,
}

impl Event {
    /// Parse and validate one event document
    pub fn parse(input: &str) -> Result<Self, EventError> {
        let doc: Value = serde_json::from_str(input)?;
        if doc.get("check").map_or(true, Value::is_null) {
            return Err(EventError::MissingCheck);
        }
        if doc.get("entity").map_or(true, Value::is_null) {
            return Err(EventError::MissingEntity);
        }
        Ok(serde_json::from_value(doc)?)
    }

    /// Read one event document from a reader (stdin in production)
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, EventError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw).map_err(EventError::Read)?;
        Self::parse(&raw)
    }

    /// Merged annotation lookup. Check annotations take precedence over
    /// entity annotations when both define the same key.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.check
            .metadata
            .annotations
            .get(key)
            .or_else(|| self.entity.metadata.annotations.get(key))
            .map(String::as_str)
    }

    /// Serialized form of the event, attached to alert notes
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Projection of the event used as the template-rendering context.
    ///
    /// Metadata names are promoted so templates can say `{{entity.name}}`
    /// instead of `{{entity.metadata.name}}`.
    pub fn template_context(&self) -> Value {
        let mut doc = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Some(root) = doc.as_object_mut() {
            promote_metadata(root, "entity");
            promote_metadata(root, "check");
        }
        doc
    }
}

/// Copy name, namespace, labels and annotations up out of a metadata block
fn promote_metadata(root: &mut serde_json::Map<String, Value>, key: &str) {
    let meta = root
        .get(key)
        .and_then(Value::as_object)
        .and_then(|section| section.get("metadata"))
        .and_then(Value::as_object)
        .cloned();
    if let (Some(meta), Some(section)) = (meta, root.get_mut(key).and_then(Value::as_object_mut)) {
        for field in ["name", "namespace", "labels", "annotations"] {
            if let Some(value) = meta.get(field) {
                section.insert(field.to_string(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "entity": {"metadata": {"name": "server01", "namespace": "default"}},
        "check": {"metadata": {"name": "disk"}, "status": 2, "output": "disk full"}
    }"#;

    #[test]
    fn test_parse_minimal_event() {
        let event = Event::parse(MINIMAL).unwrap();
        assert_eq!(event.entity.metadata.name, "server01");
        assert_eq!(event.entity.metadata.namespace, "default");
        assert_eq!(event.check.metadata.name, "disk");
        assert_eq!(event.check.status, 2);
        assert_eq!(event.check.output, "disk full");
    }

    #[test]
    fn test_parse_tolerates_omitted_fields() {
        let event = Event::parse(MINIMAL).unwrap();
        assert!(event.check.subscriptions.is_empty());
        assert!(event.check.hooks.is_empty());
        assert!(event.entity.metadata.annotations.is_empty());
        assert_eq!(event.check.interval, 0);
        assert_eq!(event.entity.entity_class, "");
    }

    #[test]
    fn test_parse_rejects_missing_check() {
        let err = Event::parse(r#"{"entity": {"metadata": {"name": "a"}}}"#).unwrap_err();
        assert!(matches!(err, EventError::MissingCheck));
    }

    #[test]
    fn test_parse_rejects_null_check() {
        let err =
            Event::parse(r#"{"entity": {"metadata": {"name": "a"}}, "check": null}"#).unwrap_err();
        assert!(matches!(err, EventError::MissingCheck));
    }

    #[test]
    fn test_parse_rejects_missing_entity() {
        let err = Event::parse(r#"{"check": {"metadata": {"name": "c"}}}"#).unwrap_err();
        assert!(matches!(err, EventError::MissingEntity));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = Event::parse("not json").unwrap_err();
        assert!(matches!(err, EventError::InvalidJson(_)));
    }

    #[test]
    fn test_from_reader() {
        let event = Event::from_reader(MINIMAL.as_bytes()).unwrap();
        assert_eq!(event.entity.metadata.name, "server01");
    }

    #[test]
    fn test_annotation_prefers_check_over_entity() {
        let mut event = Event::parse(MINIMAL).unwrap();
        event
            .entity
            .metadata
            .annotations
            .insert("opsgenie_priority".to_string(), "P5".to_string());
        assert_eq!(event.annotation("opsgenie_priority"), Some("P5"));

        event
            .check
            .metadata
            .annotations
            .insert("opsgenie_priority".to_string(), "P1".to_string());
        assert_eq!(event.annotation("opsgenie_priority"), Some("P1"));
        assert_eq!(event.annotation("unset"), None);
    }

    #[test]
    fn test_template_context_promotes_metadata_names() {
        let event = Event::parse(MINIMAL).unwrap();
        let ctx = event.template_context();
        assert_eq!(ctx["entity"]["name"], "server01");
        assert_eq!(ctx["entity"]["namespace"], "default");
        assert_eq!(ctx["check"]["name"], "disk");
        assert_eq!(ctx["check"]["output"], "disk full");
    }

    #[test]
    fn test_to_json_round_trips() {
        let event = Event::parse(MINIMAL).unwrap();
        let again = Event::parse(&event.to_json()).unwrap();
        assert_eq!(again.entity.metadata.name, "server01");
        assert_eq!(again.check.status, 2);
    }
}
