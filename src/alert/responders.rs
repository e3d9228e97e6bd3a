//! Priority, responder and action resolution
//!
//! Maps event annotations and configured team lists onto the routing
//! fields of an alert.

use log::info;

use crate::config::Settings;
use crate::event::Event;
use crate::opsgenie::{Priority, Responder};

/// Annotation key that overrides the alert priority
pub const PRIORITY_ANNOTATION: &str = "opsgenie_priority";
/// Annotation key that redirects the alert to another team
pub const TEAM_ANNOTATION: &str = "opsgenie_team";
/// Annotation key listing extra alert actions
pub const ACTIONS_ANNOTATION: &str = "opsgenie_actions";

/// Resolve the alert priority.
///
/// An opsgenie_priority annotation (check over entity) wins over the
/// configured default; unrecognized annotation values fall back to P3
/// rather than falling through to the configured value.
pub fn resolve_priority(event: &Event, settings: &Settings) -> Priority {
    match event.annotation(PRIORITY_ANNOTATION) {
        Some(value) => Priority::parse(value),
        None => settings.priority,
    }
}

/// Resolve who the alert is routed to.
///
/// The configured team, escalation and schedule lists produce responders
/// in that order. When overrides are allowed and an opsgenie_team
/// annotation is present (check over entity), it replaces the whole
/// computed set with a single team.
pub fn resolve_responders(event: &Event, settings: &Settings) -> Vec<Responder> {
    if settings.allow_override {
        if let Some(team) = event.annotation(TEAM_ANNOTATION) {
            let team = team.trim();
            if !team.is_empty() {
                info!("responders overridden by annotation: {team}");
                return vec![Responder::team(team)];
            }
        }
    }

    let mut responders = Vec::new();
    for name in split_list(&settings.team) {
        responders.push(Responder::team(name));
    }
    for name in split_list(&settings.escalation_team) {
        responders.push(Responder::escalation(name));
    }
    for name in split_list(&settings.schedule_team) {
        responders.push(Responder::schedule(name));
    }
    responders
}

/// Resolve the visibility team list, independent of routing
pub fn resolve_visibility(settings: &Settings) -> Vec<Responder> {
    split_list(&settings.visibility_teams)
        .map(Responder::team)
        .collect()
}

/// Extra alert actions listed in an opsgenie_actions annotation
pub fn resolve_actions(event: &Event) -> Vec<String> {
    match event.annotation(ACTIONS_ANNOTATION) {
        Some(list) => split_list(list).map(str::to_string).collect(),
        None => Vec::new(),
    }
}

/// Split a comma-separated list, dropping entries empty after trimming
fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}
