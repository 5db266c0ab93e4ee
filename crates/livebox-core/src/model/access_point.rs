// ── Access point domain types ──
//
// `WlanAccessPoint` resource. Firmwares disagree on the index key (`idx`
// vs `Idx` on ZTE) and on whether numbers are quoted, so decoding goes
// through `Fields`. The router's own `BandwithConf`/`Bandwith` spelling is
// kept on the wire.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use livebox_api::codec::{Fields, flexible};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

// ── Enums ───────────────────────────────────────────────────────────

/// Access point role. Unrecognized roles are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccessPointType {
    Home,
    Guest,
    Unknown(String),
}

impl FromStr for AccessPointType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "home" => Self::Home,
            "guest" => Self::Guest,
            _ => Self::Unknown(s.to_owned()),
        })
    }
}

impl fmt::Display for AccessPointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("Home"),
            Self::Guest => f.write_str("Guest"),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}

string_serde!(AccessPointType);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Manner {
    Combined,
    Split,
}

string_serde!(Manner);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AccessPointStatus {
    Up,
    Down,
}

string_serde!(AccessPointStatus);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ChannelConf {
    Auto,
    Auto1,
    Auto2,
}

string_serde!(ChannelConf);

/// Channel width setting. Unrecognized widths are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BandwidthConf {
    Auto,
    Mhz20,
    Mhz40,
    Mhz80,
    Mhz160,
    Mhz20_40,
    Mhz80_40_20,
    Unknown(String),
}

impl FromStr for BandwidthConf {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "auto" => Self::Auto,
            "20mhz" => Self::Mhz20,
            "40mhz" => Self::Mhz40,
            "80mhz" => Self::Mhz80,
            "160mhz" => Self::Mhz160,
            "20/40mhz" => Self::Mhz20_40,
            "80/40/20mhz" => Self::Mhz80_40_20,
            _ => Self::Unknown(s.to_owned()),
        })
    }
}

impl fmt::Display for BandwidthConf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "Auto",
            Self::Mhz20 => "20MHz",
            Self::Mhz40 => "40MHz",
            Self::Mhz80 => "80MHz",
            Self::Mhz160 => "160MHz",
            Self::Mhz20_40 => "20/40MHz",
            Self::Mhz80_40_20 => "80/40/20MHz",
            Self::Unknown(raw) => raw.as_str(),
        })
    }
}

string_serde!(BandwidthConf);

// ── Access point ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AccessPoint {
    #[serde(rename = "idx", skip_serializing_if = "Option::is_none")]
    pub idx: Option<String>,
    #[serde(rename = "BSSID")]
    pub bssid: String,
    #[serde(rename = "Type")]
    pub ap_type: AccessPointType,
    #[serde(rename = "Manner")]
    pub manner: Manner,
    #[serde(rename = "Status")]
    pub status: AccessPointStatus,
    #[serde(rename = "SSID")]
    pub ssid: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "SSIDAdvertisementEnabled", skip_serializing_if = "Option::is_none")]
    pub ssid_advertisement_enabled: Option<bool>,
    #[serde(rename = "RetryLimit", with = "flexible::lenient", skip_serializing_if = "Option::is_none")]
    pub retry_limit: Option<i64>,
    #[serde(rename = "WMMCapability", skip_serializing_if = "Option::is_none")]
    pub wmm_capability: Option<bool>,
    #[serde(rename = "UAPSDCapability", skip_serializing_if = "Option::is_none")]
    pub uapsd_capability: Option<bool>,
    #[serde(rename = "WMMEnable", skip_serializing_if = "Option::is_none")]
    pub wmm_enable: Option<bool>,
    #[serde(rename = "UAPSDEnable", skip_serializing_if = "Option::is_none")]
    pub uapsd_enable: Option<bool>,
    #[serde(rename = "MaxStations", with = "flexible::lenient", skip_serializing_if = "Option::is_none")]
    pub max_stations: Option<i64>,
    #[serde(rename = "APBridgeDisable", skip_serializing_if = "Option::is_none")]
    pub ap_bridge_disable: Option<bool>,
    #[serde(rename = "ChannelConf")]
    pub channel_conf: ChannelConf,
    /// Always sent, as `null` when unknown.
    #[serde(rename = "Channel", with = "flexible::lenient")]
    pub channel: Option<i64>,
    #[serde(rename = "BandwithConf")]
    pub bandwidth_conf: BandwidthConf,
    #[serde(rename = "Bandwith")]
    pub bandwidth: String,
    #[serde(rename = "Mode", skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(rename = "SchedulingAllowed")]
    pub scheduling_allowed: bool,
}

impl<'de> Deserialize<'de> for AccessPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Fields::deserialize(deserializer)?;
        Ok(Self {
            idx: fields.optional(&["idx", "Idx"]),
            bssid: fields.require::<_, D::Error>(&["BSSID"])?,
            ap_type: fields.require::<_, D::Error>(&["Type"])?,
            manner: fields.require::<_, D::Error>(&["Manner"])?,
            status: fields.require::<_, D::Error>(&["Status"])?,
            ssid: fields.require::<_, D::Error>(&["SSID"])?,
            password: fields.require::<_, D::Error>(&["Password"])?,
            ssid_advertisement_enabled: fields.optional(&["SSIDAdvertisementEnabled"]),
            retry_limit: fields.flexible(&["RetryLimit"]),
            wmm_capability: fields.optional(&["WMMCapability"]),
            uapsd_capability: fields.optional(&["UAPSDCapability"]),
            wmm_enable: fields.optional(&["WMMEnable"]),
            uapsd_enable: fields.optional(&["UAPSDEnable"]),
            max_stations: fields.flexible(&["MaxStations"]),
            ap_bridge_disable: fields.optional(&["APBridgeDisable"]),
            channel_conf: fields.require::<_, D::Error>(&["ChannelConf"])?,
            channel: fields.flexible(&["Channel"]),
            bandwidth_conf: fields.require::<_, D::Error>(&["BandwithConf"])?,
            bandwidth: fields.require::<_, D::Error>(&["Bandwith"])?,
            mode: fields.optional(&["Mode"]),
            scheduling_allowed: fields.require::<_, D::Error>(&["SchedulingAllowed"])?,
        })
    }
}

/// Writable subset of an [`AccessPoint`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPointUpdate {
    pub status: Option<AccessPointStatus>,
    pub ssid: Option<String>,
    pub password: Option<String>,
    pub ssid_advertisement_enabled: Option<bool>,
    pub retry_limit: Option<i64>,
    pub wmm_enable: Option<bool>,
    pub uapsd_enable: Option<bool>,
    pub ap_bridge_disable: Option<bool>,
    pub channel_conf: Option<ChannelConf>,
    pub bandwidth_conf: Option<BandwidthConf>,
    pub mode: Option<String>,
}

impl AccessPoint {
    /// Copy of `self` with the fields set in `update` replaced, ready to be
    /// sent back with a PUT.
    #[must_use]
    pub fn with_changes(&self, update: AccessPointUpdate) -> Self {
        let mut updated = self.clone();
        if let Some(status) = update.status {
            updated.status = status;
        }
        if let Some(ssid) = update.ssid {
            updated.ssid = ssid;
        }
        if let Some(password) = update.password {
            updated.password = password;
        }
        if update.ssid_advertisement_enabled.is_some() {
            updated.ssid_advertisement_enabled = update.ssid_advertisement_enabled;
        }
        if update.retry_limit.is_some() {
            updated.retry_limit = update.retry_limit;
        }
        if update.wmm_enable.is_some() {
            updated.wmm_enable = update.wmm_enable;
        }
        if update.uapsd_enable.is_some() {
            updated.uapsd_enable = update.uapsd_enable;
        }
        if update.ap_bridge_disable.is_some() {
            updated.ap_bridge_disable = update.ap_bridge_disable;
        }
        if let Some(channel_conf) = update.channel_conf {
            updated.channel_conf = channel_conf;
        }
        if let Some(bandwidth_conf) = update.bandwidth_conf {
            updated.bandwidth_conf = bandwidth_conf;
        }
        if update.mode.is_some() {
            updated.mode = update.mode;
        }
        updated
    }

    pub fn is_up(&self) -> bool {
        self.status == AccessPointStatus::Up
    }
}
