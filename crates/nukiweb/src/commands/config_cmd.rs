//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Select};
use secrecy::SecretString;

use nukiweb_config::{Config, Profile};
use nukiweb_core::{DEFAULT_BASE_URL, validate_credentials};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, active_profile_name, profile_not_found};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the token.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "scan_interval = {}", cfg.defaults.scan_interval);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "api_url = \"{}\"", p.api_url);
        if p.api_token.is_some() {
            let _ = writeln!(out, "api_token = \"****\"");
        }
        if let Some(ref env) = p.api_token_env {
            let _ = writeln!(out, "api_token_env = \"{env}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(interval) = p.scan_interval {
            let _ = writeln!(out, "scan_interval = {interval}");
        }
    }

    out
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_token() -> Result<SecretString, CliError> {
    let token = rpassword::prompt_password("API token: ").map_err(prompt_err)?;
    let token = token.trim();
    if token.is_empty() {
        return Err(CliError::Validation {
            field: "api_token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    Ok(SecretString::from(token.to_owned()))
}

/// Store the token in the keyring, or return it for plaintext config.
fn prompt_token_storage(
    profile_name: &str,
    token: &SecretString,
) -> Result<Option<String>, CliError> {
    use secrecy::ExposeSecret;

    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where should the token be stored?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        nukiweb_config::store_api_token(profile_name, token)?;
        eprintln!("   ✓ token stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(token.expose_secret().to_owned()))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global).await,

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(format_config_redacted(&cfg).trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Validate => {
            let cfg = nukiweb_config::load_config()?;
            let coordinator_config = config::build_coordinator_config(global, &cfg)?;
            if !validate_credentials(&coordinator_config).await {
                return Err(CliError::AuthFailed {
                    message: format!("token rejected by {}", coordinator_config.base_url),
                });
            }
            if !global.quiet {
                eprintln!(
                    "✓ profile '{}' is valid and its token is accepted",
                    active_profile_name(global, &cfg)
                );
            }
            Ok(())
        }

        ConfigCommand::SetToken => {
            let cfg = config::load_config_or_default();
            let name = active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(&name, &cfg));
            }
            let token = prompt_token()?;
            nukiweb_config::store_api_token(&name, &token)?;
            if !global.quiet {
                eprintln!("✓ token for profile '{name}' stored in system keyring");
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(&name, &cfg));
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref();
            let mut names: Vec<_> = cfg.profiles.keys().collect();
            names.sort();
            let out = names
                .iter()
                .map(|n| {
                    if Some(n.as_str()) == default {
                        format!("* {n}")
                    } else {
                        format!("  {n}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Interactive profile setup: name, URL, token, probe, storage.
async fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();

    let name: String = Input::new()
        .with_prompt("Profile name")
        .default(active_profile_name(global, &cfg))
        .interact_text()
        .map_err(prompt_err)?;

    let api_url: String = Input::new()
        .with_prompt("API URL")
        .default(
            global
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
        )
        .interact_text()
        .map_err(prompt_err)?;

    let token = match global.token {
        Some(ref t) => SecretString::from(t.clone()),
        None => prompt_token()?,
    };

    let mut profile = Profile {
        api_url,
        ..cfg.profiles.get(&name).cloned().unwrap_or_default()
    };
    profile.validate()?;

    let probe = nukiweb_core::CoordinatorConfig::new(token.clone())
        .with_base_url(profile.api_url.parse().map_err(|_| CliError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", profile.api_url),
        })?);
    eprintln!("Checking token...");
    if validate_credentials(&probe).await {
        eprintln!("   ✓ token accepted");
    } else {
        return Err(CliError::AuthFailed {
            message: format!("token rejected by {}", profile.api_url),
        });
    }

    profile.api_token = prompt_token_storage(&name, &token)?;
    cfg.profiles.insert(name.clone(), profile);
    if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
        cfg.default_profile = Some(name.clone());
    }
    config::save_config(&cfg)?;

    eprintln!(
        "✓ profile '{name}' saved to {}",
        config::config_path().display()
    );
    Ok(())
}
