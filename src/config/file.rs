//! Configuration file loading
//!
//! Handles loading handler defaults from TOML files.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// One layer of configuration values.
///
/// Both the flag/environment surface and the TOML defaults file produce
/// this shape; layers merge field-wise with [`Options::or`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Options {
    pub auth: Option<String>,
    pub region: Option<String>,
    pub url: Option<String>,
    pub team: Option<String>,
    pub escalation_team: Option<String>,
    pub schedule_team: Option<String>,
    pub visibility_teams: Option<String>,
    pub allow_override: Option<bool>,
    pub priority: Option<String>,
    pub sensu_dashboard: Option<String>,
    pub message_template: Option<String>,
    pub message_limit: Option<usize>,
    pub alias_template: Option<String>,
    pub description_template: Option<String>,
    pub description_limit: Option<usize>,
    pub tags_templates: Option<Vec<String>>,
    pub title_prettify: Option<bool>,
    pub full_details: Option<bool>,
    pub with_annotations: Option<bool>,
    pub with_labels: Option<bool>,
    pub include_event_in_note: Option<bool>,
    pub hooks_details: Option<bool>,
    pub remediation_events: Option<bool>,
    pub remediation_alias: Option<String>,
    pub heartbeat: Option<bool>,
    pub heartbeat_map: Option<String>,
    pub timeout: Option<u64>,
}

impl Options {
    /// Field-wise merge keeping `self` where set, `fallback` otherwise
    pub fn or(self, fallback: Options) -> Options {
        Options {
            auth: self.auth.or(fallback.auth),
            region: self.region.or(fallback.region),
            url: self.url.or(fallback.url),
            team: self.team.or(fallback.team),
            escalation_team: self.escalation_team.or(fallback.escalation_team),
            schedule_team: self.schedule_team.or(fallback.schedule_team),
            visibility_teams: self.visibility_teams.or(fallback.visibility_teams),
            allow_override: self.allow_override.or(fallback.allow_override),
            priority: self.priority.or(fallback.priority),
            sensu_dashboard: self.sensu_dashboard.or(fallback.sensu_dashboard),
            message_template: self.message_template.or(fallback.message_template),
            message_limit: self.message_limit.or(fallback.message_limit),
            alias_template: self.alias_template.or(fallback.alias_template),
            description_template: self.description_template.or(fallback.description_template),
            description_limit: self.description_limit.or(fallback.description_limit),
            tags_templates: self.tags_templates.or(fallback.tags_templates),
            title_prettify: self.title_prettify.or(fallback.title_prettify),
            full_details: self.full_details.or(fallback.full_details),
            with_annotations: self.with_annotations.or(fallback.with_annotations),
            with_labels: self.with_labels.or(fallback.with_labels),
            include_event_in_note: self.include_event_in_note.or(fallback.include_event_in_note),
            hooks_details: self.hooks_details.or(fallback.hooks_details),
            remediation_events: self.remediation_events.or(fallback.remediation_events),
            remediation_alias: self.remediation_alias.or(fallback.remediation_alias),
            heartbeat: self.heartbeat.or(fallback.heartbeat),
            heartbeat_map: self.heartbeat_map.or(fallback.heartbeat_map),
            timeout: self.timeout.or(fallback.timeout),
        }
    }
}

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load defaults from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Options, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let options: Options = toml::from_str(&content)?;
        Ok(options)
    }

    /// Load defaults from the first readable default location
    pub fn load_default() -> Option<Options> {
        for path in Self::default_paths() {
            if path.exists() {
                if let Ok(options) = Self::load(&path) {
                    log::info!("Loaded config from {}", path.display());
                    return Some(options);
                }
            }
        }
        None
    }

    /// Get default configuration file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide config
        paths.push(PathBuf::from("/etc/ogbridge/config.toml"));

        // User config
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ogbridge").join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("ogbridge.toml"));

        paths
    }
}
