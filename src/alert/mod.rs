//! Alert derivation
//!
//! Turns an event plus settings into the identity, details and routing
//! of an OpsGenie alert.

pub mod details;
pub mod identity;
pub mod responders;

pub use details::{dashboard_url, extract_details, DetailMap};
pub use identity::{derive_description, derive_identity, RenderedIdentity};
pub use responders::{resolve_actions, resolve_priority, resolve_responders, resolve_visibility};
