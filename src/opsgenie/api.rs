//! Trait definition for alert operations
//!
//! This trait abstracts over the OpsGenie Alert API to enable testing
//! with mocks.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use super::types::{CreateAlertRequest, RequestId};
use crate::error::ApiError;

/// Subset of an alert returned by an alias lookup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "tinyId")]
    pub tiny_id: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub count: i64,
}

/// Trait for OpsGenie alert operations
///
/// This trait abstracts every remote call the handler performs, allowing
/// for mock implementations in tests while using HTTP in production.
pub trait OpsGenieApi: Send + Sync {
    /// Create an alert
    ///
    /// The API deduplicates server-side by alias: creating against an
    /// open alias increments its count and appends the note instead of
    /// opening a second alert.
    fn create(&self, request: &CreateAlertRequest) -> Result<RequestId, ApiError>;

    /// Look up an open alert by alias
    ///
    /// Returns `Ok(None)` when no open alert carries the alias.
    fn get(&self, alias: &str) -> Result<Option<AlertSummary>, ApiError>;

    /// Close an alert by id
    fn close(&self, alert_id: &str, note: &str) -> Result<RequestId, ApiError>;

    /// Append a note to an alert by id
    fn add_note(&self, alert_id: &str, note: &str) -> Result<RequestId, ApiError>;

    /// Attach extra properties to an alert by id
    fn add_details(
        &self,
        alert_id: &str,
        details: &HashMap<String, String>,
    ) -> Result<RequestId, ApiError>;

    /// Ping a heartbeat by name, returning the round-trip time
    fn ping(&self, heartbeat: &str) -> Result<Duration, ApiError>;
}
