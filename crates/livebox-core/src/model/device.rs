// ── Connected device domain types ──
//
// Unlike most resources, device payloads use camelCase keys with the odd
// acronym kept upper-case (`SSID`, `deviceID`, `uPnPNames`).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Link medium reported in `interfaceType`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InterfaceType {
    Ethernet,
    Wifi,
    Wifi24,
    Wifi50,
    #[default]
    Unknown,
}

impl InterfaceType {
    pub fn is_wireless(self) -> bool {
        matches!(self, Self::Wifi | Self::Wifi24 | Self::Wifi50)
    }
}

impl FromStr for InterfaceType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "ethernet" => Self::Ethernet,
            "wifi" => Self::Wifi,
            "wifi24" => Self::Wifi24,
            "wifi50" => Self::Wifi50,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ethernet => "Ethernet",
            Self::Wifi => "Wifi",
            Self::Wifi24 => "Wifi24",
            Self::Wifi50 => "Wifi50",
            Self::Unknown => "Unknown",
        })
    }
}

string_serde!(InterfaceType);

/// Entry of the `ConnectedDevices` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub phys_address: String,
    pub ip_address: String,
    pub ip_v6_address: String,
    pub host_name: String,
    pub alias: String,
    pub interface_type: String,
    pub active: bool,
}

impl DeviceInfo {
    pub fn interface_type(&self) -> InterfaceType {
        self.interface_type.parse().unwrap_or_default()
    }

    /// Alias when set, host name otherwise.
    pub fn display_name(&self) -> &str {
        if self.alias.is_empty() { &self.host_name } else { &self.alias }
    }
}

/// `ConnectedDevicesMac` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetail {
    pub phys_address: String,
    pub ip_address: String,
    pub ip_v6_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_types: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_time_remaining: Option<i64>,
    #[serde(rename = "vendorClassID", default, skip_serializing_if = "Option::is_none")]
    pub vendor_class_id: Option<String>,
    #[serde(rename = "clientID", default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "userClassID", default, skip_serializing_if = "Option::is_none")]
    pub user_class_id: Option<String>,
    pub host_name: String,
    pub alias: String,
    #[serde(rename = "uPnPNames", default, skip_serializing_if = "Option::is_none")]
    pub upnp_names: Option<String>,
    #[serde(rename = "mDNSNames", default, skip_serializing_if = "Option::is_none")]
    pub mdns_names: Option<String>,
    #[serde(rename = "lLTDDevice", default, skip_serializing_if = "Option::is_none")]
    pub lltd_device: Option<bool>,
    #[serde(rename = "SSID")]
    pub ssid: String,
    pub active: bool,
    pub last_connection: String,
    pub tags: String,
    pub layer2_interface: i64,
    pub interface_type: String,
    #[serde(rename = "manufacturerOUI", default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_oui: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_location: Option<String>,
    pub device_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_source: Option<String>,
    #[serde(rename = "deviceID")]
    pub device_id: String,
}

impl DeviceDetail {
    pub fn interface_type(&self) -> InterfaceType {
        self.interface_type.parse().unwrap_or_default()
    }
}
