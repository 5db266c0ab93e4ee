//! Parental-control and Wi-Fi schedule command handlers.

use std::collections::BTreeSet;

use livebox_core::{
    DeviceScheduleStatus, Livebox, Schedule, ScheduleId, ScheduleState, Weekday,
    WlanScheduleStatus,
};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalOpts, ScheduleCommand, SchedulesArgs, SchedulesCommand, SlotArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "ID")]
    id: u8,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

impl From<&Schedule> for SlotRow {
    fn from(s: &Schedule) -> Self {
        let hour = s.id.hour();
        Self {
            id: s.id.get(),
            day: s.id.day().to_string(),
            hours: format!("{hour:02}:00-{:02}:00", hour + 1),
        }
    }
}

#[derive(Serialize)]
struct StatusView {
    enabled: bool,
}

// ── Slot parsing ────────────────────────────────────────────────────

fn invalid_slot(raw: &str, reason: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "slot".into(),
        reason: format!("'{raw}': {reason}"),
    }
}

/// Expand one slot argument: `25`, `monday`, `monday:8` or `monday:8-12`
/// (end hour exclusive).
fn parse_slot(raw: &str) -> Result<Vec<ScheduleId>, CliError> {
    if let Ok(id) = raw.parse::<i64>() {
        return ScheduleId::new(id)
            .map(|id| vec![id])
            .map_err(|e| invalid_slot(raw, e));
    }

    let (day, hours) = match raw.split_once(':') {
        Some((day, hours)) => (day, Some(hours)),
        None => (raw, None),
    };
    let day: Weekday = day
        .parse()
        .map_err(|_| invalid_slot(raw, format!("unknown day '{day}'")))?;

    let Some(hours) = hours else {
        return Ok(ScheduleId::all_hours(day));
    };
    let parse_hour = |h: &str| {
        h.trim()
            .parse::<i64>()
            .map_err(|_| invalid_slot(raw, format!("'{h}' is not an hour")))
    };
    let (start, end) = match hours.split_once('-') {
        Some((start, end)) => (parse_hour(start)?, parse_hour(end)?),
        None => {
            let hour = parse_hour(hours)?;
            (hour, hour + 1)
        }
    };
    if start >= end || end > 24 {
        return Err(invalid_slot(raw, "hour range must be ascending and end at 24 at most"));
    }
    (start..end)
        .map(|hour| ScheduleId::from_day_hour(day, hour).map_err(|e| invalid_slot(raw, e)))
        .collect()
}

/// Parse every slot argument into a sorted, duplicate-free schedule list.
fn parse_slots(args: &SlotArgs) -> Result<Vec<Schedule>, CliError> {
    let mut ids = BTreeSet::new();
    for raw in &args.slots {
        ids.extend(parse_slot(raw)?);
    }
    Ok(ids.into_iter().map(Schedule::new).collect())
}

// ── Handlers ────────────────────────────────────────────────────────

fn print_slots(schedules: &[Schedule], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(global.output, schedules, |s| SlotRow::from(s), |s| s.id.get().to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_status(enabled: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let color = util::color(global);
    let state = ScheduleState::from(enabled).to_string();
    let out = output::render_single(
        global.output,
        &StatusView { enabled },
        |_| output::paint_state(&state, enabled, color),
        |_| enabled.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(livebox: &Livebox, args: SchedulesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SchedulesCommand::Device { mac, command } => device(livebox, &mac, command, global).await,
        SchedulesCommand::Wlan { ifc, ap, command } => wlan(livebox, &ifc, &ap, command, global).await,
    }
}

async fn device(
    livebox: &Livebox,
    mac: &str,
    command: ScheduleCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ScheduleCommand::List => print_slots(&livebox.device_schedules(mac).await?, global),
        ScheduleCommand::Add(slots) => {
            let added = livebox.add_device_schedules(mac, &parse_slots(&slots)?).await?;
            print_slots(&added, global)
        }
        ScheduleCommand::Delete(slots) => {
            let remaining = livebox.delete_device_schedules(mac, &parse_slots(&slots)?).await?;
            print_slots(&remaining, global)
        }
        ScheduleCommand::Enable | ScheduleCommand::Disable => {
            let enabled = matches!(command, ScheduleCommand::Enable);
            let status = DeviceScheduleStatus::new(mac, ScheduleState::from(enabled));
            livebox.change_device_schedule_status(mac, &status).await?;
            util::notice(global, &format!("Schedule for {mac} {}", status.status.to_string().to_lowercase()));
            Ok(())
        }
        ScheduleCommand::Status => {
            let status = livebox.device_schedule_status(mac).await?;
            print_status(status.is_enabled(), global)
        }
    }
}

async fn wlan(
    livebox: &Livebox,
    ifc: &str,
    ap: &str,
    command: ScheduleCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ScheduleCommand::List => print_slots(&livebox.wlan_schedules(ifc, ap).await?, global),
        ScheduleCommand::Add(slots) => {
            let added = livebox.add_wlan_schedules(ifc, ap, &parse_slots(&slots)?).await?;
            print_slots(&added, global)
        }
        ScheduleCommand::Delete(slots) => {
            let remaining = livebox.delete_wlan_schedules(ifc, ap, &parse_slots(&slots)?).await?;
            print_slots(&remaining, global)
        }
        ScheduleCommand::Enable | ScheduleCommand::Disable => {
            let enabled = matches!(command, ScheduleCommand::Enable);
            livebox
                .change_wlan_schedule_status(ifc, ap, WlanScheduleStatus::new(enabled))
                .await?;
            let state = ScheduleState::from(enabled).to_string().to_lowercase();
            util::notice(global, &format!("Wi-Fi schedule for {ap} {state}"));
            Ok(())
        }
        ScheduleCommand::Status => {
            let status = livebox.wlan_schedule_status(ifc, ap).await?;
            print_status(status.enabled, global)
        }
    }
}
