// ── Wi-Fi domain types ──
//
// `GET Wifi` answers with a list that mixes real radio interfaces with a
// status-button record of the same shape:
//
//   [ { "WiFiStatusButton": true },
//     { "Id": "24GHz", "Status": "Up", "Frequency": "2.4GHz" } ]

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Administrative state of an interface. Anything other than up/down
/// (in any case) reads as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    Up,
    Down,
    #[default]
    Unknown,
}

impl LinkStatus {
    pub fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

impl FromStr for LinkStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Unknown => "Unknown",
        })
    }
}

string_serde!(LinkStatus);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Frequency {
    Ghz2_4,
    Ghz5,
    Ghz6,
    #[default]
    Unknown,
}

impl FromStr for Frequency {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "2.4ghz" => Self::Ghz2_4,
            "5ghz" => Self::Ghz5,
            "6ghz" => Self::Ghz6,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ghz2_4 => "2.4GHz",
            Self::Ghz5 => "5GHz",
            Self::Ghz6 => "6GHz",
            Self::Unknown => "Unknown",
        })
    }
}

string_serde!(Frequency);

/// One entry of the `Wifi` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wifi {
    #[serde(rename = "WiFiStatusButton", default, skip_serializing_if = "Option::is_none")]
    pub wifi_status_button: Option<bool>,
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Status", default)]
    pub status: LinkStatus,
    #[serde(rename = "Frequency", default)]
    pub frequency: Frequency,
}

impl Wifi {
    pub fn new(id: impl Into<String>, status: LinkStatus, frequency: Frequency) -> Self {
        Self {
            wifi_status_button: None,
            id: id.into(),
            status,
            frequency,
        }
    }

    /// True for real radio interfaces, false for the status-button record.
    pub fn is_wifi_interface(&self) -> bool {
        self.wifi_status_button.is_none() && !self.id.is_empty()
    }
}

/// Keep only the real radio interfaces of a `Wifi` listing.
pub fn wifi_interfaces(entries: impl IntoIterator<Item = Wifi>) -> Vec<Wifi> {
    entries.into_iter().filter(Wifi::is_wifi_interface).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn status_button_record_is_not_an_interface() {
        let entries: Vec<Wifi> = serde_json::from_value(json!([
            { "WiFiStatusButton": true },
            { "Id": "24GHz", "Status": "Up", "Frequency": "2.4GHz" },
            { "Id": "5GHz", "Status": "DOWN", "Frequency": "5ghz" }
        ]))
        .unwrap();

        assert_eq!(entries[0].id, "");
        assert_eq!(entries[0].status, LinkStatus::Unknown);
        assert_eq!(entries[0].frequency, Frequency::Unknown);

        let radios = wifi_interfaces(entries);
        assert_eq!(radios.len(), 2);
        assert_eq!(radios[1].status, LinkStatus::Down);
        assert_eq!(radios[1].frequency, Frequency::Ghz5);
    }

    #[test]
    fn unknown_strings_fall_back() {
        let wifi: Wifi =
            serde_json::from_value(json!({ "Id": "x", "Status": "Dormant", "Frequency": "60GHz" }))
                .unwrap();
        assert_eq!(wifi.status, LinkStatus::Unknown);
        assert_eq!(wifi.frequency, Frequency::Unknown);
    }

    #[test]
    fn encodes_canonical_spelling() {
        let wifi = Wifi::new("6GHz", LinkStatus::Up, Frequency::Ghz6);
        assert_eq!(
            serde_json::to_value(&wifi).unwrap(),
            json!({ "Id": "6GHz", "Status": "Up", "Frequency": "6GHz" })
        );
    }
}
