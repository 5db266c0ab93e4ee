mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use livebox_api::{ClientConfiguration, HttpClient, LoggingConfig, TransportConfig};
use livebox_config::{Config, Profile};
use livebox_core::Livebox;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local commands never touch the router
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Features(args) => commands::features::handle(&args, &cli.global),

        cmd => {
            let (config, transport) = build_client_config(&cli.global)?;
            let client = HttpClient::with_transport_config(config, &transport, LoggingConfig::default())?;
            let livebox = Livebox::new(client);

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &livebox, &cli.global).await
        }
    }
}

/// Build the client and transport settings from the config file, the
/// selected profile, and CLI overrides.
fn build_client_config(
    global: &GlobalOpts,
) -> Result<(ClientConfiguration, TransportConfig), CliError> {
    let cfg = livebox_config::load_config()?;
    let profile = effective_profile(&cfg, global)?;
    if profile.url.is_empty() {
        return Err(CliError::NoConfig {
            path: livebox_config::config_path().display().to_string(),
        });
    }

    let config = livebox_config::profile_to_client_config(&profile, &cfg.defaults)?;
    let transport = livebox_config::profile_to_transport_config(&profile, &cfg.defaults);
    Ok((config, transport))
}

/// The selected profile with `--url`, `--username`, `--password`,
/// `--timeout` and `--insecure` applied on top.
///
/// An explicitly named profile must exist; the implicit default may be
/// absent when `--url` is given.
fn effective_profile(cfg: &Config, global: &GlobalOpts) -> Result<Profile, CliError> {
    let mut profile = match cfg.profile(global.profile.as_deref()) {
        Ok((_, profile)) => profile.clone(),
        Err(_) if global.profile.is_none() => Profile::default(),
        Err(_) => {
            return Err(CliError::ProfileNotFound {
                name: global.profile.clone().unwrap_or_default(),
                available: available_profiles(cfg),
            });
        }
    };

    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if let Some(ref password) = global.password {
        profile.password = Some(password.clone());
        profile.password_env = None;
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    Ok(profile)
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
