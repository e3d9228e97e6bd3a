//! CLI argument definitions using clap derive
//!
//! Defines the full flag and environment surface of the handler. Every
//! option can also come from the TOML defaults file; flags and
//! environment variables win.

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::config::Options;

/// Sensu Go handler that bridges monitoring events to OpsGenie alerts
///
/// Reads one event JSON document on stdin and creates, closes or
/// annotates the matching OpsGenie alert (or pings a heartbeat).
#[derive(Parser, Debug)]
#[command(name = "ogbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// OpsGenie API authentication token
    #[arg(short, long, env = "OPSGENIE_AUTHTOKEN", hide_env_values = true)]
    pub auth: Option<String>,

    /// OpsGenie service region (us or eu)
    #[arg(short, long, env = "OPSGENIE_REGION")]
    pub region: Option<String>,

    /// Explicit API base URL, overrides --region when set
    #[arg(long, env = "OPSGENIE_APIURL")]
    pub url: Option<String>,

    /// Team responders (comma-separated)
    #[arg(short, long, env = "OPSGENIE_TEAM")]
    pub team: Option<String>,

    /// Escalation responders (comma-separated)
    #[arg(long, env = "OPSGENIE_ESCALATION_TEAM")]
    pub escalation_team: Option<String>,

    /// Schedule responders (comma-separated)
    #[arg(long, env = "OPSGENIE_SCHEDULE_TEAM")]
    pub schedule_team: Option<String>,

    /// Teams the alert is visible to without being routed to (comma-separated)
    #[arg(long, env = "OPSGENIE_VISIBILITY_TEAMS")]
    pub visibility_teams: Option<String>,

    /// Let an opsgenie_team annotation replace the configured responders
    #[arg(long, env = "OPSGENIE_ALLOW_OVERRIDE")]
    pub allow_override: bool,

    /// Default alert priority (P1-P5)
    #[arg(short, long, env = "OPSGENIE_PRIORITY")]
    pub priority: Option<String>,

    /// Dashboard base URL for event links, or "disabled"
    #[arg(long, env = "OPSGENIE_SENSU_DASHBOARD")]
    pub sensu_dashboard: Option<String>,

    /// Template for the alert title
    #[arg(long, env = "OPSGENIE_MESSAGE_TEMPLATE")]
    pub message_template: Option<String>,

    /// Byte limit applied to the rendered title
    #[arg(long, env = "OPSGENIE_MESSAGE_LIMIT")]
    pub message_limit: Option<usize>,

    /// Template for the alert alias
    #[arg(long, env = "OPSGENIE_ALIAS_TEMPLATE")]
    pub alias_template: Option<String>,

    /// Template for the alert description
    #[arg(long, env = "OPSGENIE_DESCRIPTION_TEMPLATE")]
    pub description_template: Option<String>,

    /// Byte limit applied to the rendered description
    #[arg(long, env = "OPSGENIE_DESCRIPTION_LIMIT")]
    pub description_limit: Option<usize>,

    /// Templates for alert tags (comma-separated)
    #[arg(long, env = "OPSGENIE_TAGS_TEMPLATES", value_delimiter = ',')]
    pub tags_templates: Vec<String>,

    /// Replace separators in the title with spaces and capitalize words
    #[arg(long, env = "OPSGENIE_TITLE_PRETTIFY")]
    pub title_prettify: bool,

    /// Include the full check result in alert details
    #[arg(long, env = "OPSGENIE_FULL_DETAILS")]
    pub full_details: bool,

    /// Copy check and entity annotations into alert details
    #[arg(long, env = "OPSGENIE_WITH_ANNOTATIONS")]
    pub with_annotations: bool,

    /// Copy check and entity labels into alert details
    #[arg(long, env = "OPSGENIE_WITH_LABELS")]
    pub with_labels: bool,

    /// Attach the serialized event as a note when creating alerts
    #[arg(long, env = "OPSGENIE_INCLUDE_EVENT_IN_NOTE")]
    pub include_event_in_note: bool,

    /// Include hook output in alert details
    #[arg(long, env = "OPSGENIE_HOOKS_DETAILS")]
    pub hooks_details: bool,

    /// Treat passing events as remediation output for one fixed alert
    #[arg(long, env = "OPSGENIE_REMEDIATION_EVENTS")]
    pub remediation_events: bool,

    /// Alias of the alert remediation notes are appended to
    #[arg(long, env = "OPSGENIE_REMEDIATION_ALIAS")]
    pub remediation_alias: Option<String>,

    /// Translate passing events into heartbeat pings
    #[arg(long, env = "OPSGENIE_HEARTBEAT")]
    pub heartbeat: bool,

    /// Heartbeat routes (entity/check=name, comma-separated, "all" wildcards)
    #[arg(long, env = "OPSGENIE_HEARTBEAT_MAP")]
    pub heartbeat_map: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "OPSGENIE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Path to a TOML defaults file
    #[arg(short, long, env = "OGBRIDGE_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Project the flag/environment layer into configuration options.
    ///
    /// Unset values map to `None` so the defaults file can fill them in;
    /// boolean toggles only override when switched on.
    pub fn options(&self) -> Options {
        Options {
            auth: self.auth.clone(),
            region: self.region.clone(),
            url: self.url.clone(),
            team: self.team.clone(),
            escalation_team: self.escalation_team.clone(),
            schedule_team: self.schedule_team.clone(),
            visibility_teams: self.visibility_teams.clone(),
            allow_override: self.allow_override.then_some(true),
            priority: self.priority.clone(),
            sensu_dashboard: self.sensu_dashboard.clone(),
            message_template: self.message_template.clone(),
            message_limit: self.message_limit,
            alias_template: self.alias_template.clone(),
            description_template: self.description_template.clone(),
            description_limit: self.description_limit,
            tags_templates: (!self.tags_templates.is_empty()).then(|| self.tags_templates.clone()),
            title_prettify: self.title_prettify.then_some(true),
            full_details: self.full_details.then_some(true),
            with_annotations: self.with_annotations.then_some(true),
            with_labels: self.with_labels.then_some(true),
            include_event_in_note: self.include_event_in_note.then_some(true),
            hooks_details: self.hooks_details.then_some(true),
            remediation_events: self.remediation_events.then_some(true),
            remediation_alias: self.remediation_alias.clone(),
            heartbeat: self.heartbeat.then_some(true),
            heartbeat_map: self.heartbeat_map.clone(),
            timeout: self.timeout,
        }
    }
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
