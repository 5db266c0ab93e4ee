//! Wi-Fi command handlers: radios, WLAN interfaces, access points.

use std::convert::Infallible;

use livebox_core::{
    AccessPoint, AccessPointStatus, AccessPointUpdate, BandwidthConf, ChannelConf, Livebox,
    ShortAccessPoint, Wifi, WlanInterface, wifi_interfaces,
};
use tabled::Tabled;

use crate::cli::{ApArgs, ApCommand, ApStatus, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RadioRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Band")]
    frequency: String,
}

impl RadioRow {
    fn new(w: &Wifi, color: bool) -> Self {
        Self {
            id: w.id.clone(),
            status: output::paint_state(&w.status.to_string(), w.status.is_up(), color),
            frequency: w.frequency.to_string(),
        }
    }
}

#[derive(Tabled)]
struct ShortApRow {
    #[tabled(rename = "Index")]
    idx: String,
    #[tabled(rename = "BSSID")]
    bssid: String,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Temporary")]
    temporary: String,
}

impl ShortApRow {
    fn new(ap: &ShortAccessPoint, color: bool) -> Self {
        Self {
            idx: ap.idx.clone(),
            bssid: ap.bssid.clone(),
            ssid: ap.ssid.clone(),
            status: output::paint_state(&ap.status.to_string(), ap.status.is_up(), color),
            temporary: match ap.remaining_duration {
                Some(minutes) if ap.is_temporarily_on() => format!("{minutes} min left"),
                _ => "-".into(),
            },
        }
    }
}

fn wlan_detail(wlan: &WlanInterface, color: bool) -> String {
    let header = output::detail_lines(
        &[
            ("Interface", wlan.id.clone()),
            (
                "Status",
                output::paint_state(&wlan.status.to_string(), wlan.status.is_up(), color),
            ),
            ("Frequency", wlan.frequency.clone()),
            ("Last change", output::or_dash(wlan.last_change)),
        ],
        color,
    );
    if wlan.access_points.is_empty() {
        return header;
    }
    let rows: Vec<ShortApRow> = wlan
        .access_points
        .iter()
        .map(|ap| ShortApRow::new(ap, color))
        .collect();
    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    format!("{header}\n\n{table}")
}

fn ap_detail(ap: &AccessPoint, color: bool) -> String {
    output::detail_lines(
        &[
            ("Index", output::or_dash(ap.idx.as_deref())),
            ("BSSID", ap.bssid.clone()),
            ("SSID", ap.ssid.clone()),
            ("Type", ap.ap_type.to_string()),
            ("Status", output::paint_state(&ap.status.to_string(), ap.is_up(), color)),
            ("Broadcast", output::or_dash(ap.ssid_advertisement_enabled)),
            ("Channel", output::or_dash(ap.channel)),
            ("Channel conf", ap.channel_conf.to_string()),
            ("Bandwidth", ap.bandwidth.clone()),
            ("Bandwidth conf", ap.bandwidth_conf.to_string()),
            ("Mode", output::or_dash(ap.mode.as_deref())),
            ("Max stations", output::or_dash(ap.max_stations)),
            ("Scheduling", ap.scheduling_allowed.to_string()),
        ],
        color,
    )
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn radios(livebox: &Livebox, global: &GlobalOpts) -> Result<(), CliError> {
    let radios = wifi_interfaces(livebox.wifi_interfaces().await?);
    let color = util::color(global);
    let out = output::render_list(
        global.output,
        &radios,
        |w| RadioRow::new(w, color),
        |w| w.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn wlan(livebox: &Livebox, ifc: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let wlan = livebox.wlan_interface(ifc).await?;
    let color = util::color(global);
    let out = if global.output == OutputFormat::Plain {
        wlan.access_points
            .iter()
            .map(|ap| ap.bssid.clone())
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        output::render_single(global.output, &wlan, |w| wlan_detail(w, color), |w| w.id.clone())?
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle_ap(livebox: &Livebox, args: ApArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = util::color(global);
    let ap = match args.command {
        ApCommand::Get { ifc, ap } => livebox.access_point(&ifc, &ap).await?,

        ApCommand::Set {
            ifc,
            ap,
            ssid,
            passphrase,
            status,
            broadcast,
            channel_conf,
            bandwidth,
            mode,
        } => {
            let update = AccessPointUpdate {
                status: status.map(|s| match s {
                    ApStatus::Up => AccessPointStatus::Up,
                    ApStatus::Down => AccessPointStatus::Down,
                }),
                ssid,
                password: passphrase,
                ssid_advertisement_enabled: broadcast,
                channel_conf: channel_conf.as_deref().map(parse_channel_conf).transpose()?,
                bandwidth_conf: bandwidth.as_deref().map(parse_bandwidth).transpose()?,
                mode,
                ..AccessPointUpdate::default()
            };
            if update == AccessPointUpdate::default() {
                return Err(CliError::Validation {
                    field: "ap set".into(),
                    reason: "nothing to change; pass at least one setting".into(),
                });
            }

            let current = livebox.access_point(&ifc, &ap).await?;
            let stored = livebox
                .update_access_point(&ifc, &ap, &current.with_changes(update))
                .await?;
            util::notice(global, &format!("Access point {} updated", stored.bssid));
            stored
        }
    };

    let out = output::render_single(global.output, &ap, |a| ap_detail(a, color), |a| a.bssid.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Argument parsing ────────────────────────────────────────────────

fn parse_channel_conf(raw: &str) -> Result<ChannelConf, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "channel-conf".into(),
        reason: format!("'{raw}' is not one of auto, auto1, auto2"),
    })
}

fn parse_bandwidth(raw: &str) -> Result<BandwidthConf, CliError> {
    let conf: BandwidthConf = raw.parse().unwrap_or_else(|never: Infallible| match never {});
    if let BandwidthConf::Unknown(_) = conf {
        return Err(CliError::Validation {
            field: "bandwidth".into(),
            reason: format!("'{raw}' is not a supported channel width"),
        });
    }
    Ok(conf)
}
