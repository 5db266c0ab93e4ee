//! Router-wide command handlers: info, capabilities, login, reboot.

use std::sync::Arc;

use livebox_api::{Capabilities, Feature, LiveboxClient};
use livebox_core::{GeneralInfo, Livebox};
use secrecy::SecretString;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "Feature")]
    id: String,
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Ops")]
    ops: String,
}

impl From<&Feature> for FeatureRow {
    fn from(f: &Feature) -> Self {
        Self {
            id: f.id.clone(),
            uri: f.uri.clone(),
            ops: f.ops.iter().map(|op| op.code()).collect(),
        }
    }
}

fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

fn info_detail(info: &GeneralInfo, color: bool) -> String {
    output::detail_lines(
        &[
            ("Manufacturer", info.manufacturer.clone()),
            ("Model", info.model_name.clone()),
            ("Product class", info.product_class.clone()),
            ("Serial", info.serial_number.clone()),
            ("Hardware", info.hardware_version.clone()),
            ("Software", info.software_version.clone()),
            ("Uptime", output::or_dash(info.up_time.map(format_uptime))),
            ("Reboots", output::or_dash(info.number_of_reboots)),
            ("Country", output::or_dash(info.country.as_deref())),
            ("API version", output::or_dash(info.api_version.as_deref())),
        ],
        color,
    )
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn info(livebox: &Livebox, global: &GlobalOpts) -> Result<(), CliError> {
    let info = livebox.general_info().await?;
    let color = util::color(global);
    let out = output::render_single(
        global.output,
        &info,
        |i| info_detail(i, color),
        |i| i.serial_number.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn capabilities(capabilities: &Arc<Capabilities>, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        global.output,
        &capabilities.features,
        |f| FeatureRow::from(f),
        |f| f.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Re-run discovery with the configured credentials to check them.
pub async fn login(livebox: &Livebox, global: &GlobalOpts) -> Result<(), CliError> {
    let config = livebox.client().configuration();
    let password: SecretString = config.password.clone().ok_or(CliError::NoCredentials)?;

    let has_features = livebox.login(config.username.clone(), password).await?;
    let username = livebox.current_username().unwrap_or_default();
    let count = livebox.client().capabilities().map_or(0, |c| c.len());
    if !has_features {
        tracing::warn!("router accepted the credentials but advertises no features");
    }
    util::notice(
        global,
        &format!("Logged in as {username} at {} ({count} features)", livebox.base_url()),
    );
    Ok(())
}

pub async fn reboot(livebox: &Livebox, global: &GlobalOpts) -> Result<(), CliError> {
    util::require_yes(global)?;
    livebox.reboot().await?;
    util::notice(global, "Router reboot initiated");
    Ok(())
}
