//! Wire types for the OpsGenie Alert API v2

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Source tag stamped on every alert operation
pub const ALERT_SOURCE: &str = "sensuGo";

/// Alert priority, P1 (highest) through P5 (lowest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
    P5,
}

impl Priority {
    /// Parse a priority string. Unrecognized or empty input falls back
    /// to the P3 default.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "P1" => Self::P1,
            "P2" => Self::P2,
            "P3" => Self::P3,
            "P4" => Self::P4,
            "P5" => Self::P5,
            _ => Self::P3,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::P3
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Responder category understood by the alert API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderKind {
    Team,
    Escalation,
    Schedule,
}

/// Who an alert is routed to (or made visible to)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responder {
    #[serde(rename = "type")]
    pub kind: ResponderKind,
    pub name: String,
}

impl Responder {
    pub fn team(name: &str) -> Self {
        Self {
            kind: ResponderKind::Team,
            name: name.to_string(),
        }
    }

    pub fn escalation(name: &str) -> Self {
        Self {
            kind: ResponderKind::Escalation,
            name: name.to_string(),
        }
    }

    pub fn schedule(name: &str) -> Self {
        Self {
            kind: ResponderKind::Schedule,
            name: name.to_string(),
        }
    }
}

/// Request id returned by the asynchronous alert API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body for POST /v2/alerts
///
/// Empty optional sections are omitted from the serialized body.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAlertRequest {
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alias: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responders: Vec<Responder>,
    #[serde(rename = "visibleTo", skip_serializing_if = "Vec::is_empty")]
    pub visible_to: Vec<Responder>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity: String,
    pub source: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
}

/// Body for POST /v2/alerts/{id}/close
#[derive(Debug, Clone, Serialize)]
pub struct CloseAlertRequest {
    pub source: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
}

/// Body for POST /v2/alerts/{id}/notes
#[derive(Debug, Clone, Serialize)]
pub struct AddNoteRequest {
    pub source: String,
    pub note: String,
}

/// Body for POST /v2/alerts/{id}/details
#[derive(Debug, Clone, Serialize)]
pub struct AddDetailsRequest {
    pub source: String,
    pub details: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("P1"), Priority::P1);
        assert_eq!(Priority::parse("P5"), Priority::P5);
        assert_eq!(Priority::parse("p2"), Priority::P2);
        assert_eq!(Priority::parse(" P4 "), Priority::P4);
    }

    #[test]
    fn test_priority_parse_defaults_to_p3() {
        assert_eq!(Priority::parse(""), Priority::P3);
        assert_eq!(Priority::parse("urgent"), Priority::P3);
        assert_eq!(Priority::parse("P6"), Priority::P3);
    }

    #[test]
    fn test_priority_serializes_as_bare_name() {
        let json = serde_json::to_string(&Priority::P1).unwrap();
        assert_eq!(json, "\"P1\"");
    }

    #[test]
    fn test_responder_wire_form() {
        let json = serde_json::to_string(&Responder::team("ops")).unwrap();
        assert_eq!(json, r#"{"type":"team","name":"ops"}"#);

        let json = serde_json::to_string(&Responder::escalation("oncall")).unwrap();
        assert_eq!(json, r#"{"type":"escalation","name":"oncall"}"#);
    }

    #[test]
    fn test_create_request_omits_empty_sections() {
        let request = CreateAlertRequest {
            message: "server01/disk".to_string(),
            alias: "server01/disk".to_string(),
            description: String::new(),
            responders: vec![],
            visible_to: vec![],
            actions: vec![],
            tags: vec![],
            details: HashMap::new(),
            entity: String::new(),
            source: ALERT_SOURCE.to_string(),
            priority: Priority::P3,
            note: String::new(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"message\""));
        assert!(json.contains("\"source\":\"sensuGo\""));
        assert!(json.contains("\"priority\":\"P3\""));
        assert!(!json.contains("\"description\""));
        assert!(!json.contains("\"responders\""));
        assert!(!json.contains("\"visibleTo\""));
        assert!(!json.contains("\"note\""));
    }

    #[test]
    fn test_create_request_renames_visible_to() {
        let request = CreateAlertRequest {
            message: "m".to_string(),
            alias: "a".to_string(),
            description: String::new(),
            responders: vec![Responder::team("ops")],
            visible_to: vec![Responder::team("watchers")],
            actions: vec![],
            tags: vec![],
            details: HashMap::new(),
            entity: String::new(),
            source: ALERT_SOURCE.to_string(),
            priority: Priority::P1,
            note: String::new(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"visibleTo\""));
        assert!(!json.contains("\"visible_to\""));
    }
}
