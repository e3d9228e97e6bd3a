//! Unified error types for ogbridge
//!
//! This module defines all error types used throughout the handler.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration resolution/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error reading or validating the input event
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// Error constructing the API client before any remote call
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO error (stdin, file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from configuration resolution and validation
///
/// All of these are fatal: they abort the handler before any remote call.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No API token supplied
    #[error("OpsGenie auth token is empty")]
    MissingAuthToken,

    /// Normal mode needs somewhere to route the alert
    #[error("no responder configured: set a team, escalation, schedule, or --allow-override")]
    MissingResponders,

    /// Remediation and heartbeat modes are mutually exclusive
    #[error("--remediation-events and --heartbeat cannot both be enabled")]
    ConflictingModes,

    /// Remediation mode without a target alias
    #[error("remediation mode requires --remediation-alias")]
    MissingRemediationAlias,

    /// Heartbeat mode without a routing map
    #[error("heartbeat mode requires a non-empty --heartbeat-map")]
    MissingHeartbeatMap,

    /// Unrecognized API region selector
    #[error("unknown OpsGenie region: {0} (expected \"us\" or \"eu\")")]
    InvalidRegion(String),

    /// Heartbeat map entry is not a key=value pair
    #[error("malformed heartbeat map entry: {0:?} (expected entity/check=heartbeat)")]
    MalformedHeartbeatEntry(String),

    /// Heartbeat name contains a slash, which means key and value were swapped
    #[error("heartbeat name {0:?} contains '/': key and value appear reversed")]
    ReversedHeartbeatEntry(String),

    /// Config file not found
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors from reading or validating the input event
///
/// All of these are fatal: they abort the handler before any remote call.
#[derive(Error, Debug)]
pub enum EventError {
    /// Standard input could not be read
    #[error("failed to read event from stdin: {0}")]
    Read(std::io::Error),

    /// Input is not valid JSON or does not match the event schema
    #[error("invalid event JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Event document has no check sub-document
    #[error("event has no check")]
    MissingCheck,

    /// Event document has no entity sub-document
    #[error("event has no entity")]
    MissingEntity,
}

/// Errors from template rendering
///
/// Recovered locally: a failed render yields an empty identity or
/// description and the handler skips alerting instead of crashing.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template text failed to parse
    #[error("template syntax error: {0}")]
    Syntax(String),

    /// Template references a field the event does not expose
    #[error("template render error: {0}")]
    Render(String),
}

/// Errors from the OpsGenie API client
///
/// Recovered locally: logged with context, the handler returns normally
/// and the process still exits zero (best-effort notify).
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API base URL could not be parsed
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// Transport-level failure (connect, TLS, timeout)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("OpsGenie returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The API answered 2xx but the payload was not what we expected
    #[error("unexpected OpsGenie response: {0}")]
    UnexpectedPayload(String),
}

impl ApiError {
    /// True when the failure was a request timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
