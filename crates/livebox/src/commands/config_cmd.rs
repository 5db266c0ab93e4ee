//! Config subcommand handlers.

use livebox_config::{self as config, Config, Profile};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

const REDACTED: &str = "********";

#[derive(Serialize)]
struct ProfileView<'a> {
    name: &'a str,
    url: &'a str,
    default: bool,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Default")]
    default: String,
}

/// Copy of `cfg` with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
    }
    cfg
}

fn init_profile(
    cfg: &mut Config,
    name: String,
    router_url: String,
    account: Option<String>,
    password_env: Option<String>,
    set_default: bool,
) -> Result<(), CliError> {
    router_url.parse::<url::Url>().map_err(|e| CliError::Validation {
        field: "router-url".into(),
        reason: format!("{router_url}: {e}"),
    })?;

    let profile = cfg.profiles.entry(name.clone()).or_default();
    profile.url = router_url;
    profile.username = account;
    profile.password_env = password_env;

    if set_default || cfg.profiles.len() == 1 {
        cfg.default_profile = Some(name);
    }
    Ok(())
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init {
            name,
            router_url,
            account,
            password_env,
            set_default,
        } => {
            let mut cfg = config::load_config()?;
            init_profile(&mut cfg, name.clone(), router_url, account, password_env, set_default)?;
            let path = config::save_config(&cfg)?;
            util::notice(global, &format!("Profile '{name}' saved to {}", path.display()));
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = match global.output {
                OutputFormat::Json => serde_json::to_string_pretty(&cfg)?,
                OutputFormat::JsonCompact => serde_json::to_string(&cfg)?,
                OutputFormat::Table | OutputFormat::Plain => {
                    toml::to_string_pretty(&cfg).map_err(|e| CliError::Config(e.into()))?
                }
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.default_profile.as_deref();
            let views: Vec<ProfileView<'_>> = cfg
                .profiles
                .iter()
                .map(|(name, p): (&String, &Profile)| ProfileView {
                    name,
                    url: &p.url,
                    default: default == Some(name.as_str()),
                })
                .collect();
            let out = output::render_list(
                global.output,
                &views,
                |v| ProfileRow {
                    name: v.name.to_owned(),
                    url: v.url.to_owned(),
                    default: if v.default { "*".into() } else { String::new() },
                },
                |v| v.name.to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
