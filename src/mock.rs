//! Mock implementations for testing
//!
//! Provides a recording alert-API double plus event and settings
//! fixtures shared across unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::config::{Options, Settings};
use crate::error::ApiError;
use crate::event::Event;
use crate::opsgenie::{AlertSummary, CreateAlertRequest, OpsGenieApi, RequestId};

/// A recorded API call
#[derive(Debug, Clone)]
pub enum ApiCall {
    Create(CreateAlertRequest),
    Get(String),
    Close {
        id: String,
        note: String,
    },
    AddNote {
        id: String,
        note: String,
    },
    AddDetails {
        id: String,
        details: HashMap<String, String>,
    },
    Ping(String),
}

/// Recording mock of the alert API
#[derive(Debug, Default)]
pub struct MockApi {
    calls: Mutex<Vec<ApiCall>>,
    existing: Option<AlertSummary>,
    fail_get: bool,
    fail_mutations: bool,
}

impl MockApi {
    /// Mock with no open alerts and no failures
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock with one open alert that lookups for its alias will find
    pub fn with_existing(id: &str, alias: &str) -> Self {
        Self {
            existing: Some(AlertSummary {
                id: id.to_string(),
                alias: alias.to_string(),
                status: "open".to_string(),
                count: 1,
                ..AlertSummary::default()
            }),
            ..Self::default()
        }
    }

    /// Builder: make alias lookups fail
    pub fn with_failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    /// Builder: make mutating calls fail
    pub fn with_failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    /// Snapshot of the recorded calls, in order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn mock_error() -> ApiError {
        ApiError::UnexpectedPayload("mock failure".to_string())
    }
}

impl OpsGenieApi for MockApi {
    fn create(&self, request: &CreateAlertRequest) -> Result<RequestId, ApiError> {
        self.record(ApiCall::Create(request.clone()));
        if self.fail_mutations {
            return Err(Self::mock_error());
        }
        Ok(RequestId("mock-create".to_string()))
    }

    fn get(&self, alias: &str) -> Result<Option<AlertSummary>, ApiError> {
        self.record(ApiCall::Get(alias.to_string()));
        if self.fail_get {
            return Err(Self::mock_error());
        }
        Ok(self.existing.iter().find(|a| a.alias == alias).cloned())
    }

    fn close(&self, alert_id: &str, note: &str) -> Result<RequestId, ApiError> {
        self.record(ApiCall::Close {
            id: alert_id.to_string(),
            note: note.to_string(),
        });
        if self.fail_mutations {
            return Err(Self::mock_error());
        }
        Ok(RequestId("mock-close".to_string()))
    }

    fn add_note(&self, alert_id: &str, note: &str) -> Result<RequestId, ApiError> {
        self.record(ApiCall::AddNote {
            id: alert_id.to_string(),
            note: note.to_string(),
        });
        if self.fail_mutations {
            return Err(Self::mock_error());
        }
        Ok(RequestId("mock-note".to_string()))
    }

    fn add_details(
        &self,
        alert_id: &str,
        details: &HashMap<String, String>,
    ) -> Result<RequestId, ApiError> {
        self.record(ApiCall::AddDetails {
            id: alert_id.to_string(),
            details: details.clone(),
        });
        if self.fail_mutations {
            return Err(Self::mock_error());
        }
        Ok(RequestId("mock-details".to_string()))
    }

    fn ping(&self, heartbeat: &str) -> Result<Duration, ApiError> {
        self.record(ApiCall::Ping(heartbeat.to_string()));
        if self.fail_mutations {
            return Err(Self::mock_error());
        }
        Ok(Duration::from_millis(12))
    }
}

/// A failing disk check on an agent entity
pub fn sample_event() -> Event {
    let raw = serde_json::json!({
        "timestamp": 1_621_349_261,
        "entity": {
            "metadata": {"name": "server01", "namespace": "default"},
            "entity_class": "agent",
            "system": {
                "arch": "amd64",
                "os": "linux",
                "hostname": "server01",
                "platform": "debian",
                "platform_family": "debian",
                "platform_version": "12.4"
            }
        },
        "check": {
            "metadata": {"name": "disk"},
            "command": "check-disk.rb",
            "status": 2,
            "output": "disk full",
            "state": "failing",
            "interval": 60,
            "occurrences": 3,
            "occurrences_watermark": 3,
            "subscriptions": ["system", "linux"],
            "handlers": ["opsgenie"]
        }
    });
    serde_json::from_value(raw).unwrap()
}

/// Sample event with the given check status
pub fn event_with_status(status: u32) -> Event {
    let mut event = sample_event();
    event.check.status = status;
    if status == 0 {
        event.check.state = "passing".to_string();
        event.check.output = "disk OK".to_string();
    }
    event
}

/// Settings resolved from a minimal valid option set
pub fn sample_settings() -> Settings {
    Settings::resolve(Options {
        auth: Some("token".to_string()),
        team: Some("ops".to_string()),
        ..Options::default()
    })
    .unwrap()
}
