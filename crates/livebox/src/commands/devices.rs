//! Connected-device command handlers.

use livebox_core::{DeviceDetail, DeviceInfo, Livebox};
use tabled::Tabled;

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl DeviceRow {
    fn new(d: &DeviceInfo, color: bool) -> Self {
        Self {
            name: d.display_name().to_owned(),
            mac: d.phys_address.clone(),
            ip: d.ip_address.clone(),
            link: d.interface_type().to_string(),
            active: output::paint_state(if d.active { "yes" } else { "no" }, d.active, color),
        }
    }
}

fn detail(d: &DeviceDetail, color: bool) -> String {
    output::detail_lines(
        &[
            ("MAC", d.phys_address.clone()),
            ("IP", d.ip_address.clone()),
            ("Host name", d.host_name.clone()),
            ("Alias", d.alias.clone()),
            ("Type", d.device_type.clone()),
            ("Link", d.interface_type().to_string()),
            ("SSID", if d.ssid.is_empty() { "-".into() } else { d.ssid.clone() }),
            ("Active", output::paint_state(&d.active.to_string(), d.active, color)),
            ("Last seen", d.last_connection.clone()),
            ("Address source", output::or_dash(d.address_source.as_deref())),
            ("Lease left", output::or_dash(d.lease_time_remaining.map(|s| format!("{s}s")))),
            ("Vendor OUI", output::or_dash(d.manufacturer_oui.as_deref())),
        ],
        color,
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(livebox: &Livebox, args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = util::color(global);
    match args.command {
        DevicesCommand::List { active } => {
            let mut devices = livebox.connected_devices().await?;
            if active {
                devices.retain(|d| d.active);
            }
            let out = output::render_list(
                global.output,
                &devices,
                |d| DeviceRow::new(d, color),
                |d| d.phys_address.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        DevicesCommand::Get { mac } => {
            let device = livebox.device_detail(&mac).await?;
            let out = output::render_single(
                global.output,
                &device,
                |d| detail(d, color),
                |d| d.phys_address.clone(),
            )?;
            output::print_output(&out, global.quiet);
        }

        DevicesCommand::Alias { mac, alias } => {
            let device = livebox.set_device_alias(&mac, &alias).await?;
            util::notice(global, &format!("Device {} renamed to '{}'", device.phys_address, device.alias));
        }
    }
    Ok(())
}
