//! ogbridge - Sensu Go to OpsGenie notification bridge
//!
//! This library implements a Sensu Go handler: one monitoring event in
//! on stdin, at most one OpsGenie alert mutation (or heartbeat ping) out.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration system
//! - [`event`]: Sensu event document model
//! - [`template`]: Template rendering and text post-processing
//! - [`alert`]: Alert identity, details and routing derivation
//! - [`handler`]: Lifecycle classification and action execution
//! - [`opsgenie`]: OpsGenie Alert API boundary
//! - [`error`]: Error types

pub mod alert;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod opsgenie;
pub mod template;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
