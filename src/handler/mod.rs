//! Event handling pipeline
//!
//! Classifies one event into an alert-lifecycle action and executes it
//! through the alert API. Remote failures are logged and recovered so
//! the process can keep its best-effort exit policy.

use std::collections::HashMap;

use log::{error, info, warn};

use crate::alert::{
    dashboard_url, derive_description, derive_identity, extract_details, resolve_actions,
    resolve_priority, resolve_responders, resolve_visibility,
};
use crate::config::{Mode, Settings};
use crate::event::Event;
use crate::opsgenie::{AlertSummary, CreateAlertRequest, OpsGenieApi, ALERT_SOURCE};
use crate::template::Renderer;

/// Note attached when an alert is closed by a passing check
pub const CLOSE_NOTE: &str = "Closed Automatically";

/// The lifecycle action selected for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertAction {
    /// Open (or, via server-side alias dedup, re-notify) an alert
    Create,
    /// Close the open alert with this id
    Close { alert_id: String },
    /// Nothing to do: check passing and no open alert
    None,
}

/// What one invocation ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A create request was submitted
    Created,
    /// A close request was submitted
    Closed,
    /// A remediation note was appended
    NoteAppended,
    /// A heartbeat was pinged
    Pinged,
    /// Nothing needed doing
    Nothing,
    /// The event was skipped (unrenderable identity, no route, or a
    /// remote failure already logged)
    Skipped,
}

/// Classify an event's status against the remote lookup result.
///
/// Create always fires on a nonzero status: the remote side
/// deduplicates by alias, so repeated failures append to the open
/// alert rather than opening a second one.
pub fn classify(status: u32, existing: Option<&AlertSummary>) -> AlertAction {
    if status != 0 {
        return AlertAction::Create;
    }
    match existing {
        Some(alert) => AlertAction::Close {
            alert_id: alert.id.clone(),
        },
        None => AlertAction::None,
    }
}

/// One-shot event handler
///
/// Holds the resolved settings and the API boundary; `process` runs
/// the whole decide-and-execute pipeline for a single event.
pub struct Handler<'a, A: OpsGenieApi> {
    api: &'a A,
    settings: &'a Settings,
    renderer: Renderer,
}

impl<'a, A: OpsGenieApi> Handler<'a, A> {
    pub fn new(api: &'a A, settings: &'a Settings) -> Self {
        Self {
            api,
            settings,
            renderer: Renderer::new(),
        }
    }

    /// Handle one event according to the configured operating mode
    pub fn process(&self, event: &Event) -> Outcome {
        match self.settings.mode {
            Mode::Normal => self.process_normal(event),
            Mode::Remediation => self.process_remediation(event),
            Mode::Heartbeat => self.process_heartbeat(event),
        }
    }

    /// Normal mode: alert lifecycle driven by check status
    fn process_normal(&self, event: &Event) -> Outcome {
        let identity = derive_identity(event, self.settings, &self.renderer);
        if identity.is_empty() {
            warn!(
                "skipping event for {}/{}: identity templates did not render",
                event.entity.metadata.name, event.check.metadata.name
            );
            return Outcome::Skipped;
        }

        // Fresh lookup every invocation; a failed lookup is treated as
        // "not found" so a flapping API cannot suppress creation.
        let existing = match self.api.get(&identity.alias) {
            Ok(existing) => existing,
            Err(e) => {
                warn!("alert lookup for {:?} failed: {e}", identity.alias);
                None
            }
        };
        if let Some(alert) = &existing {
            info!(
                "found open alert id={} count={} for alias {:?}",
                alert.id, alert.count, identity.alias
            );
        }

        match classify(event.check.status, existing.as_ref()) {
            AlertAction::Create => {
                let request = CreateAlertRequest {
                    message: identity.title,
                    alias: identity.alias,
                    description: derive_description(event, self.settings, &self.renderer),
                    responders: resolve_responders(event, self.settings),
                    visible_to: resolve_visibility(self.settings),
                    actions: resolve_actions(event),
                    tags: identity.tags,
                    details: extract_details(event, self.settings),
                    entity: event.entity.metadata.name.clone(),
                    source: ALERT_SOURCE.to_string(),
                    priority: resolve_priority(event, self.settings),
                    note: self.event_note(event),
                };
                match self.api.create(&request) {
                    Ok(id) => {
                        info!("create submitted, request id {id}");
                        Outcome::Created
                    }
                    Err(e) => {
                        error!("create for alias {:?} failed: {e}", request.alias);
                        Outcome::Skipped
                    }
                }
            }
            AlertAction::Close { alert_id } => match self.api.close(&alert_id, CLOSE_NOTE) {
                Ok(id) => {
                    info!("close of {alert_id} submitted, request id {id}");
                    Outcome::Closed
                }
                Err(e) => {
                    error!("close of alert {alert_id} failed: {e}");
                    Outcome::Skipped
                }
            },
            AlertAction::None => {
                info!("check passing and no open alert, nothing to do");
                Outcome::Nothing
            }
        }
    }

    /// Remediation mode: passing checks report progress on one fixed alert
    fn process_remediation(&self, event: &Event) -> Outcome {
        if event.check.status != 0 {
            // Remediation checks only report success; failures are not
            // this handler's problem.
            info!("remediation check failing, nothing to report");
            return Outcome::Nothing;
        }

        let alias = &self.settings.remediation_alias;
        let alert = match self.api.get(alias) {
            Ok(Some(alert)) => alert,
            Ok(None) => {
                warn!("no open alert for remediation alias {alias:?}");
                return Outcome::Skipped;
            }
            Err(e) => {
                error!("lookup of remediation alias {alias:?} failed: {e}");
                return Outcome::Skipped;
            }
        };

        if let Err(e) = self.api.add_note(&alert.id, &event.check.output) {
            error!("remediation note on alert {} failed: {e}", alert.id);
            return Outcome::Skipped;
        }
        if self.settings.dashboard_enabled() {
            let mut details = HashMap::new();
            details.insert(
                "sensuDashboard".to_string(),
                dashboard_url(event, self.settings),
            );
            if let Err(e) = self.api.add_details(&alert.id, &details) {
                warn!("dashboard detail on alert {} failed: {e}", alert.id);
            }
        }
        info!("remediation note appended to alert {}", alert.id);
        Outcome::NoteAppended
    }

    /// Heartbeat mode: passing checks become liveness pings
    fn process_heartbeat(&self, event: &Event) -> Outcome {
        if event.check.status != 0 {
            info!("check failing, no heartbeat ping");
            return Outcome::Nothing;
        }

        let entity = &event.entity.metadata.name;
        let check = &event.check.metadata.name;
        let Some(name) = self.settings.heartbeat_map.resolve(entity, check) else {
            info!("no heartbeat route for {entity}/{check}");
            return Outcome::Skipped;
        };

        match self.api.ping(name) {
            Ok(elapsed) => {
                info!("heartbeat {name:?} pinged in {elapsed:?}");
                Outcome::Pinged
            }
            Err(e) => {
                error!("heartbeat {name:?} ping failed: {e}");
                Outcome::Skipped
            }
        }
    }

    /// Note attached to alert creation, when configured
    fn event_note(&self, event: &Event) -> String {
        if self.settings.include_event_in_note {
            format!("Event data update:\n\n{}", event.to_json())
        } else {
            String::new()
        }
    }
}
