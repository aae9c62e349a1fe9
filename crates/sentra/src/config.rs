//! Resolution of profiles + CLI flag overrides into a `FeedConfig`.

use std::time::Duration;

use sentra_core::{FeedConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `FeedConfig` from the config file, profile, and CLI overrides.
pub fn resolve_feed_config(global: &GlobalOpts) -> Result<FeedConfig, CliError> {
    let cfg = sentra_config::load_config_or_default();

    let profile_name = global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    let mut feed = if let Some(profile) = cfg.profiles.get(&profile_name) {
        sentra_config::profile_to_feed_config(profile)?
    } else if global.profile.is_some() {
        // The user asked for a profile by name; not finding it is an error
        // even when --backend could stand in.
        return Err(CliError::ProfileNotFound { name: profile_name });
    } else if global.backend.is_some() {
        FeedConfig::default()
    } else {
        return Err(CliError::NoBackend {
            path: sentra_config::config_path().display().to_string(),
        });
    };

    // CLI flags override whatever the profile said.
    if let Some(ref backend) = global.backend {
        feed.base_url = backend.parse().map_err(|_| CliError::Validation {
            field: "backend".into(),
            reason: format!("invalid URL: {backend}"),
        })?;
    }
    if global.insecure {
        feed.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(timeout) = global.timeout {
        feed.timeout = Duration::from_secs(timeout);
    }

    Ok(feed)
}
