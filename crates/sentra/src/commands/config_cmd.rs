//! Config file management.

use sentra_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(
                &sentra_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
        ConfigCommand::Init { backend, force } => init(&backend, force, global),
    }
}

fn init(backend: &str, force: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let path = sentra_config::config_path();
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    let _: url::Url = backend.parse().map_err(|_| CliError::Validation {
        field: "backend".into(),
        reason: format!("invalid URL: {backend}"),
    })?;

    let mut cfg = Config::default();
    cfg.profiles.insert(
        "default".into(),
        Profile {
            backend: backend.to_owned(),
            days: None,
            page_size: None,
            auto_refresh: None,
            refresh_interval_ms: None,
            cache_ttl_ms: None,
            status: None,
            source: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        },
    );
    sentra_config::save_config(&cfg)?;

    output::print_output(&format!("Wrote {}", path.display()), global.quiet);
    Ok(())
}
