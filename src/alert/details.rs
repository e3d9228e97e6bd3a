//! Alert detail extraction
//!
//! Assembles the structured "details" bag attached to alerts, from the
//! event and the configured data-source toggles.

use std::collections::HashMap;

use crate::config::Settings;
use crate::event::Event;

/// Key space reserved for handler configuration annotations; these are
/// never copied into alert details.
pub const CONFIG_KEYSPACE: &str = "sensu.io/plugins/ogbridge/config";

/// Alert details: string key/value pairs shown on the alert page
pub type DetailMap = HashMap<String, String>;

/// Build the details bag for an event.
///
/// Subscriptions, status and interval are always present; everything
/// else is opt-in. Later writes for the same key overwrite.
pub fn extract_details(event: &Event, settings: &Settings) -> DetailMap {
    let mut details = DetailMap::new();

    details.insert(
        "subscriptions".to_string(),
        event.check.subscriptions.join(", "),
    );
    details.insert("status".to_string(), event.check.status.to_string());
    details.insert("interval".to_string(), event.check.interval.to_string());

    if settings.full_details {
        details.insert("output".to_string(), event.check.output.clone());
        details.insert("command".to_string(), event.check.command.clone());
        details.insert(
            "proxy_entity_name".to_string(),
            event.check.proxy_entity_name.clone(),
        );
        details.insert("state".to_string(), event.check.state.clone());
        details.insert("ttl".to_string(), event.check.ttl.to_string());
        details.insert(
            "occurrences".to_string(),
            event.check.occurrences.to_string(),
        );
        details.insert(
            "occurrences_watermark".to_string(),
            event.check.occurrences_watermark.to_string(),
        );
        details.insert("handlers".to_string(), event.check.handlers.join(", "));

        // Host facts only exist for real agents, not proxy entities
        if event.entity.entity_class == "agent" {
            let system = &event.entity.system;
            details.insert("arch".to_string(), system.arch.clone());
            details.insert("os".to_string(), system.os.clone());
            details.insert("platform".to_string(), system.platform.clone());
            details.insert(
                "platform_family".to_string(),
                system.platform_family.clone(),
            );
            details.insert(
                "platform_version".to_string(),
                system.platform_version.clone(),
            );
        }
    }

    if settings.hooks_details {
        for (index, hook) in event.check.hooks.iter().enumerate() {
            let name = &hook.metadata.name;
            if name.is_empty() {
                continue;
            }
            for (label, value) in &hook.metadata.labels {
                insert_non_empty(
                    &mut details,
                    format!("hooks_{index}_{name}_label_{label}"),
                    value,
                );
            }
            insert_non_empty(
                &mut details,
                format!("hooks_{index}_{name}_command"),
                &hook.command,
            );
            insert_non_empty(
                &mut details,
                format!("hooks_{index}_{name}_output"),
                &hook.output,
            );
        }
    }

    if settings.with_annotations {
        for (key, value) in &event.check.metadata.annotations {
            if !key.contains(CONFIG_KEYSPACE) {
                details.insert(format!("check_annotation_{key}"), value.clone());
            }
        }
        for (key, value) in &event.entity.metadata.annotations {
            if !key.contains(CONFIG_KEYSPACE) {
                details.insert(format!("entity_annotation_{key}"), value.clone());
            }
        }
    }

    if settings.with_labels {
        for (key, value) in &event.check.metadata.labels {
            details.insert(format!("check_label_{key}"), value.clone());
        }
        for (key, value) in &event.entity.metadata.labels {
            details.insert(format!("entity_label_{key}"), value.clone());
        }
    }

    if settings.dashboard_enabled() {
        details.insert("sensuDashboard".to_string(), dashboard_url(event, settings));
    }

    details
}

/// Deep link to the event on the configured dashboard
pub fn dashboard_url(event: &Event, settings: &Settings) -> String {
    format!(
        "{}/{}/events/{}/{}",
        settings.sensu_dashboard,
        event.entity.metadata.namespace,
        event.entity.metadata.name,
        event.check.metadata.name
    )
}

fn insert_non_empty(details: &mut DetailMap, key: String, value: &str) {
    if !value.is_empty() {
        details.insert(key, value.to_string());
    }
}
