//! Profile resolution with CLI flag overrides.
//!
//! Flags win over the profile, the profile wins over `[defaults]`. With no
//! profile on disk, `--token` alone is enough to talk to the default API.

use std::time::Duration;

use secrecy::SecretString;

use nukiweb_config::{Config, Profile};
use nukiweb_core::CoordinatorConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use nukiweb_config::{config_path, load_config_or_default, save_config};

/// Profile name selected by `--profile`, the config, or `"default"`.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    cfg.active_profile_name(global.profile.as_deref())
}

/// Build a `CoordinatorConfig` from the config file, profile, and flags.
pub fn build_coordinator_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<CoordinatorConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, cfg, global);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        return Err(profile_not_found(&profile_name, cfg));
    }

    let Some(token) = global.token.clone() else {
        return Err(if config_path().exists() {
            CliError::NoCredentials {
                profile: profile_name,
            }
        } else {
            CliError::NoConfig {
                path: config_path().display().to_string(),
            }
        });
    };

    let profile = Profile {
        api_token: Some(token),
        ..Profile::default()
    };
    resolve_profile(&profile, &profile_name, cfg, global)
}

/// Apply flag overrides on top of one profile.
fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<CoordinatorConfig, CliError> {
    let mut profile = profile.clone();
    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    // A flag token skips env/keyring lookup entirely.
    if let Some(ref token) = global.token {
        profile.validate()?;
        let base_url = parse_url(&profile.api_url)?;
        return Ok(CoordinatorConfig::new(SecretString::from(token.clone()))
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(
                profile.timeout.unwrap_or(cfg.defaults.timeout),
            ))
            .with_scan_interval(Duration::from_secs(
                profile.scan_interval.unwrap_or(cfg.defaults.scan_interval),
            )));
    }

    Ok(nukiweb_config::profile_to_coordinator_config(
        &profile,
        profile_name,
        &cfg.defaults,
    )?)
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "api-url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

pub fn profile_not_found(name: &str, cfg: &Config) -> CliError {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    names.sort();
    CliError::ProfileNotFound {
        name: name.into(),
        available: if names.is_empty() {
            "(none)".into()
        } else {
            names.join(", ")
        },
    }
}
