//! OpsGenie Alert API integration
//!
//! The `OpsGenieApi` trait is the boundary between the handler logic
//! and the remote service; `OpsGenieClient` is the HTTP implementation.

pub mod api;
pub mod client;
pub mod types;

pub use api::{AlertSummary, OpsGenieApi};
pub use client::{OpsGenieClient, EU_API_BASE, US_API_BASE};
pub use types::{CreateAlertRequest, Priority, RequestId, Responder, ResponderKind, ALERT_SOURCE};
