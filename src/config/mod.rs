//! Handler configuration
//!
//! Resolves the option surface (flags and environment merged over an
//! optional TOML defaults file) into one immutable `Settings` value
//! that the rest of the handler reads by reference.

pub mod file;
pub mod heartbeat;

pub use file::{ConfigFile, Options};
pub use heartbeat::HeartbeatMap;

use std::time::Duration;

use crate::error::ConfigError;
use crate::opsgenie::{Priority, EU_API_BASE, US_API_BASE};

/// Default title and alias template
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "{{entity.name}}/{{check.name}}";
/// Default description template
pub const DEFAULT_DESCRIPTION_TEMPLATE: &str = "{{check.output}}";
/// Default tag templates
pub const DEFAULT_TAGS_TEMPLATES: [&str; 4] = [
    "{{entity.name}}",
    "{{check.name}}",
    "{{entity.namespace}}",
    "{{entity.entity_class}}",
];
/// Sentinel value that keeps dashboard links out of alert details
pub const DASHBOARD_DISABLED: &str = "disabled";

const DEFAULT_MESSAGE_LIMIT: usize = 130;
const DEFAULT_DESCRIPTION_LIMIT: usize = 15000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// OpsGenie service region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Us,
    Eu,
}

impl Region {
    /// Parse a region name, case-insensitively
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Self::Us),
            "eu" => Ok(Self::Eu),
            _ => Err(ConfigError::InvalidRegion(value.trim().to_string())),
        }
    }

    /// API base URL for the region
    pub fn api_base(self) -> &'static str {
        match self {
            Self::Us => US_API_BASE,
            Self::Eu => EU_API_BASE,
        }
    }
}

/// Operating mode, decided once at configuration load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Alert lifecycle driven by check status
    Normal,
    /// Append remediation output to one pre-configured alert
    Remediation,
    /// Translate passing checks into heartbeat pings
    Heartbeat,
}

/// Resolved handler configuration
///
/// Built once, validated, then passed by reference. Never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    pub auth_token: String,
    pub api_base: String,
    pub mode: Mode,
    pub team: String,
    pub escalation_team: String,
    pub schedule_team: String,
    pub visibility_teams: String,
    pub allow_override: bool,
    pub priority: Priority,
    pub sensu_dashboard: String,
    pub message_template: String,
    pub message_limit: usize,
    pub alias_template: String,
    pub description_template: String,
    pub description_limit: usize,
    pub tags_templates: Vec<String>,
    pub title_prettify: bool,
    pub full_details: bool,
    pub with_annotations: bool,
    pub with_labels: bool,
    pub include_event_in_note: bool,
    pub hooks_details: bool,
    pub remediation_alias: String,
    pub heartbeat_map: HeartbeatMap,
    pub timeout: Duration,
}

impl Settings {
    /// Resolve merged options into validated settings.
    ///
    /// Every rule here is fatal: the handler refuses to read the event
    /// when its configuration is unusable.
    pub fn resolve(options: Options) -> Result<Self, ConfigError> {
        let auth_token = options.auth.unwrap_or_default();
        if auth_token.trim().is_empty() {
            return Err(ConfigError::MissingAuthToken);
        }

        let region = match options.region.as_deref() {
            Some(name) if !name.trim().is_empty() => Region::parse(name)?,
            _ => Region::Us,
        };
        let api_base = match options.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => region.api_base().to_string(),
        };

        let remediation = options.remediation_events.unwrap_or(false);
        let heartbeat = options.heartbeat.unwrap_or(false);
        let mode = match (remediation, heartbeat) {
            (true, true) => return Err(ConfigError::ConflictingModes),
            (true, false) => Mode::Remediation,
            (false, true) => Mode::Heartbeat,
            (false, false) => Mode::Normal,
        };

        let remediation_alias = options.remediation_alias.unwrap_or_default();
        if mode == Mode::Remediation && remediation_alias.trim().is_empty() {
            return Err(ConfigError::MissingRemediationAlias);
        }

        let heartbeat_map = HeartbeatMap::parse(&options.heartbeat_map.unwrap_or_default())?;
        if mode == Mode::Heartbeat && heartbeat_map.is_empty() {
            return Err(ConfigError::MissingHeartbeatMap);
        }

        let team = options.team.unwrap_or_default();
        let escalation_team = options.escalation_team.unwrap_or_default();
        let schedule_team = options.schedule_team.unwrap_or_default();
        let allow_override = options.allow_override.unwrap_or(false);
        if mode == Mode::Normal
            && !allow_override
            && team.trim().is_empty()
            && escalation_team.trim().is_empty()
            && schedule_team.trim().is_empty()
        {
            return Err(ConfigError::MissingResponders);
        }

        let message_template = options
            .message_template
            .unwrap_or_else(|| DEFAULT_MESSAGE_TEMPLATE.to_string());
        // The alias default is the fixed form, not whatever the message
        // template was overridden to; alias stability outlives cosmetics.
        let alias_template = options
            .alias_template
            .unwrap_or_else(|| DEFAULT_MESSAGE_TEMPLATE.to_string());
        let description_template = options
            .description_template
            .unwrap_or_else(|| DEFAULT_DESCRIPTION_TEMPLATE.to_string());
        let tags_templates = options.tags_templates.unwrap_or_else(|| {
            DEFAULT_TAGS_TEMPLATES
                .iter()
                .map(|t| t.to_string())
                .collect()
        });

        let sensu_dashboard = options
            .sensu_dashboard
            .unwrap_or_else(|| DASHBOARD_DISABLED.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            auth_token,
            api_base,
            mode,
            team,
            escalation_team,
            schedule_team,
            visibility_teams: options.visibility_teams.unwrap_or_default(),
            allow_override,
            priority: Priority::parse(&options.priority.unwrap_or_default()),
            sensu_dashboard,
            message_template,
            message_limit: options.message_limit.unwrap_or(DEFAULT_MESSAGE_LIMIT),
            alias_template,
            description_template,
            description_limit: options
                .description_limit
                .unwrap_or(DEFAULT_DESCRIPTION_LIMIT),
            tags_templates,
            title_prettify: options.title_prettify.unwrap_or(false),
            full_details: options.full_details.unwrap_or(false),
            with_annotations: options.with_annotations.unwrap_or(false),
            with_labels: options.with_labels.unwrap_or(false),
            include_event_in_note: options.include_event_in_note.unwrap_or(false),
            hooks_details: options.hooks_details.unwrap_or(false),
            remediation_alias,
            heartbeat_map,
            timeout: Duration::from_secs(options.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    /// True when a dashboard base URL is configured
    pub fn dashboard_enabled(&self) -> bool {
        !self.sensu_dashboard.is_empty() && self.sensu_dashboard != DASHBOARD_DISABLED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> Options {
        Options {
            auth: Some("token".to_string()),
            team: Some("ops".to_string()),
            ..Options::default()
        }
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let settings = Settings::resolve(minimal()).unwrap();
        assert_eq!(settings.mode, Mode::Normal);
        assert_eq!(settings.api_base, US_API_BASE);
        assert_eq!(settings.priority, Priority::P3);
        assert_eq!(settings.message_template, "{{entity.name}}/{{check.name}}");
        assert_eq!(settings.alias_template, "{{entity.name}}/{{check.name}}");
        assert_eq!(settings.description_template, "{{check.output}}");
        assert_eq!(settings.message_limit, 130);
        assert_eq!(settings.description_limit, 15000);
        assert_eq!(settings.tags_templates.len(), 4);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(!settings.dashboard_enabled());
        assert!(!settings.full_details);
    }

    #[test]
    fn test_resolve_rejects_missing_auth() {
        let err = Settings::resolve(Options::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingAuthToken));

        let err = Settings::resolve(Options {
            auth: Some("  ".to_string()),
            ..Options::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingAuthToken));
    }

    #[test]
    fn test_resolve_rejects_conflicting_modes() {
        let err = Settings::resolve(Options {
            remediation_events: Some(true),
            heartbeat: Some(true),
            ..minimal()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingModes));
    }

    #[test]
    fn test_resolve_remediation_requires_alias() {
        let err = Settings::resolve(Options {
            remediation_events: Some(true),
            ..minimal()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingRemediationAlias));

        let settings = Settings::resolve(Options {
            remediation_events: Some(true),
            remediation_alias: Some("infra/remediation".to_string()),
            ..minimal()
        })
        .unwrap();
        assert_eq!(settings.mode, Mode::Remediation);
    }

    #[test]
    fn test_resolve_heartbeat_requires_map() {
        let err = Settings::resolve(Options {
            heartbeat: Some(true),
            auth: Some("token".to_string()),
            ..Options::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingHeartbeatMap));
    }

    #[test]
    fn test_resolve_heartbeat_mode_needs_no_team() {
        let settings = Settings::resolve(Options {
            heartbeat: Some(true),
            heartbeat_map: Some("all=hb".to_string()),
            auth: Some("token".to_string()),
            ..Options::default()
        })
        .unwrap();
        assert_eq!(settings.mode, Mode::Heartbeat);
        assert_eq!(settings.heartbeat_map.resolve("x", "y"), Some("hb"));
    }

    #[test]
    fn test_resolve_rejects_bad_heartbeat_map() {
        let err = Settings::resolve(Options {
            heartbeat: Some(true),
            heartbeat_map: Some("hb=entity/check".to_string()),
            auth: Some("token".to_string()),
            ..Options::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::ReversedHeartbeatEntry(_)));
    }

    #[test]
    fn test_resolve_normal_mode_requires_responder_source() {
        let err = Settings::resolve(Options {
            auth: Some("token".to_string()),
            ..Options::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingResponders));

        // any one source suffices
        for options in [
            Options {
                auth: Some("token".to_string()),
                escalation_team: Some("oncall".to_string()),
                ..Options::default()
            },
            Options {
                auth: Some("token".to_string()),
                schedule_team: Some("rota".to_string()),
                ..Options::default()
            },
            Options {
                auth: Some("token".to_string()),
                allow_override: Some(true),
                ..Options::default()
            },
        ] {
            assert!(Settings::resolve(options).is_ok());
        }
    }

    #[test]
    fn test_resolve_region_selects_base() {
        let settings = Settings::resolve(Options {
            region: Some("EU".to_string()),
            ..minimal()
        })
        .unwrap();
        assert_eq!(settings.api_base, EU_API_BASE);

        let err = Settings::resolve(Options {
            region: Some("apac".to_string()),
            ..minimal()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegion(_)));
    }

    #[test]
    fn test_resolve_url_overrides_region() {
        let settings = Settings::resolve(Options {
            region: Some("eu".to_string()),
            url: Some("https://opsgenie.internal/".to_string()),
            ..minimal()
        })
        .unwrap();
        assert_eq!(settings.api_base, "https://opsgenie.internal");
    }

    #[test]
    fn test_resolve_alias_default_ignores_message_override() {
        let settings = Settings::resolve(Options {
            message_template: Some("{{check.name}} on {{entity.name}}".to_string()),
            ..minimal()
        })
        .unwrap();
        assert_eq!(settings.alias_template, DEFAULT_MESSAGE_TEMPLATE);
    }

    #[test]
    fn test_resolve_dashboard_trims_trailing_slash() {
        let settings = Settings::resolve(Options {
            sensu_dashboard: Some("https://sensu.example.com/c/~/n/".to_string()),
            ..minimal()
        })
        .unwrap();
        assert!(settings.dashboard_enabled());
        assert_eq!(settings.sensu_dashboard, "https://sensu.example.com/c/~/n");
    }

    #[test]
    fn test_file_merge_honors_flag_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
auth = "file-token"
team = "file-team"
message_limit = 80
"#,
        )
        .unwrap();

        let from_file = ConfigFile::load(&path).unwrap();
        let cli = Options {
            auth: Some("flag-token".to_string()),
            ..Options::default()
        };
        let settings = Settings::resolve(cli.or(from_file)).unwrap();
        assert_eq!(settings.auth_token, "flag-token");
        assert_eq!(settings.team, "file-team");
        assert_eq!(settings.message_limit, 80);
    }
}
