// ── Schedule status domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ScheduleState {
    Enabled,
    Disabled,
}

string_serde!(ScheduleState);

impl From<bool> for ScheduleState {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

/// Parental-control scheduling state of one device (`PcDevicesMac`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStatus {
    #[serde(rename = "MAC")]
    pub mac: String,
    #[serde(rename = "Status")]
    pub status: ScheduleState,
}

pub type DeviceScheduleStatus = ScheduleStatus;

impl ScheduleStatus {
    pub fn new(mac: impl Into<String>, status: ScheduleState) -> Self {
        Self {
            mac: mac.into(),
            status,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.status == ScheduleState::Enabled
    }
}

/// Whether an access point follows its weekly schedule
/// (`WlanScheduleEnable`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WlanScheduleStatus {
    #[serde(rename = "Enabled")]
    pub enabled: bool,
}

impl WlanScheduleStatus {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}
