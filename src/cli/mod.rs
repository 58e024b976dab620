//! Command-line interface for the `confluent` binary.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use anyhow::Result;

use crate::infrastructure::config::{ConfigLoader, Settings};
use crate::infrastructure::logging::LoggerImpl;

/// Load settings for a CLI invocation, applying command-line overrides
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match cli.settings {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    if let Some(ref level) = cli.log_level {
        settings.logging.level.clone_from(level);
        ConfigLoader::validate(&settings)?;
    }

    Ok(settings)
}

/// Run a parsed invocation to completion
pub fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;
    let _logger = LoggerImpl::init(&settings.logging)?;

    match cli.command {
        Commands::Demo(args) => commands::demo::execute(args, &settings, cli.json),
        Commands::Compose(args) => commands::compose::execute(args, &settings, cli.json),
    }
}

/// Report a failed invocation and exit with a non-zero status
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
