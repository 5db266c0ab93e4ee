// ── WLAN interface domain types ──

use livebox_api::codec::Fields;
use serde::{Deserialize, Deserializer, Serialize};

use super::strip_colons;
use super::wifi::LinkStatus;

/// One radio interface (`WlanInterface`) and its access points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WlanInterface {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Status")]
    pub status: LinkStatus,
    #[serde(rename = "Frequency")]
    pub frequency: String,
    #[serde(rename = "LastChangeTime", default, skip_serializing_if = "Option::is_none")]
    pub last_change_time: Option<i64>,
    #[serde(rename = "LastChange", default, skip_serializing_if = "Option::is_none")]
    pub last_change: Option<i64>,
    #[serde(rename = "AccessPoints", default)]
    pub access_points: Vec<ShortAccessPoint>,
}

/// Access point summary embedded in a [`WlanInterface`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortAccessPoint {
    /// Path segment for the access point; the BSSID without colons when
    /// the router omits it.
    #[serde(rename = "Idx")]
    pub idx: String,
    #[serde(rename = "BSSID")]
    pub bssid: String,
    #[serde(rename = "SSID")]
    pub ssid: String,
    #[serde(rename = "Status")]
    pub status: LinkStatus,
    /// Minutes left on a temporary switch-on; absent or `-1` otherwise.
    #[serde(rename = "RemainingDuration", skip_serializing_if = "Option::is_none")]
    pub remaining_duration: Option<i64>,
}

impl ShortAccessPoint {
    /// Whether a temporary switch-on is currently running.
    pub fn is_temporarily_on(&self) -> bool {
        self.remaining_duration.is_some_and(|minutes| minutes >= 0)
    }
}

impl<'de> Deserialize<'de> for ShortAccessPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Fields::deserialize(deserializer)?;
        let bssid: String = fields.require::<_, D::Error>(&["BSSID"])?;
        let idx = fields
            .optional::<String>(&["Idx", "idx"])
            .unwrap_or_else(|| strip_colons(&bssid));
        Ok(Self {
            idx,
            ssid: fields.require::<_, D::Error>(&["SSID"])?,
            status: fields.require::<_, D::Error>(&["Status"])?,
            remaining_duration: fields.flexible(&["RemainingDuration"]),
            bssid,
        })
    }
}
