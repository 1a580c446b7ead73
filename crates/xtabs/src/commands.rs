use std::path::Path;

use clap::ArgMatches;
use tracing::{error, info};

use xtabs_core::XtabsConfig;
use xtabs_core::events;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = matches.get_one::<String>("config").map(Path::new);

    let config = match XtabsConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(event = "cli.config.load_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let session = matches
        .get_one::<String>("session")
        .cloned()
        .unwrap_or_else(|| config.session.default_name.clone());

    info!(event = "cli.run.started", session = %session);

    match xtabs_core::run(&config, &session) {
        Ok(()) => {
            info!(event = "cli.run.completed", session = %session);
            Ok(())
        }
        Err(e) => {
            error!(event = "cli.run.failed", session = %session, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
