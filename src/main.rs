//! ogbridge - Sensu Go to OpsGenie notification bridge
//!
//! Invoked once per event by a Sensu backend pipeline: reads one event
//! JSON document on stdin and creates, closes or annotates the matching
//! OpsGenie alert (or pings a heartbeat).

use clap::Parser;
use ogbridge::cli::args::{generate_completions, Cli};
use ogbridge::config::{ConfigFile, Settings};
use ogbridge::error::{AppError, ConfigError, EventError};
use ogbridge::event::Event;
use ogbridge::handler::Handler;
use ogbridge::opsgenie::OpsGenieClient;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return;
    }

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    // Flags and environment win over the defaults file
    let defaults = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::load_default().unwrap_or_default(),
    };
    let settings = Settings::resolve(cli.options().or(defaults))?;

    let event = Event::from_reader(std::io::stdin().lock()).map_err(AppError::Event)?;

    let client = OpsGenieClient::new(&settings.api_base, &settings.auth_token, settings.timeout)?;
    let outcome = Handler::new(&client, &settings).process(&event);
    log::debug!("outcome: {outcome:?}");

    // Remote failures were already logged inside the handler; the
    // process still exits zero (best-effort notify).
    Ok(())
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(ConfigError::MissingAuthToken) => {
            eprintln!();
            eprintln!("Hint: Pass --auth or set OPSGENIE_AUTHTOKEN.");
        }
        AppError::Config(ConfigError::MissingResponders) => {
            eprintln!();
            eprintln!("Hint: Set --team, --escalation-team or --schedule-team,");
            eprintln!("      or pass --allow-override to route via annotations.");
        }
        AppError::Event(EventError::Read(_)) | AppError::Event(EventError::InvalidJson(_)) => {
            eprintln!();
            eprintln!("Hint: This binary expects one Sensu event JSON document on stdin.");
            eprintln!("      It is meant to run as a Sensu Go pipeline handler.");
        }
        _ => {}
    }
}
