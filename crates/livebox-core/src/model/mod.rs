// ── Domain model ──
//
// Typed router resources. Wire keys follow the router's own spelling
// (including its typos); Rust field names are normalized snake_case.

/// Serialize through `Display` and deserialize through `FromStr`.
///
/// Used for the string-coded router enums whose parsing is
/// case-insensitive or falls back to an unknown variant.
macro_rules! string_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// MAC addresses and BSSIDs appear in router paths without separators.
pub fn strip_colons(mac: &str) -> String {
    mac.replace(':', "")
}

pub mod access_point;
pub mod device;
pub mod feature_id;
pub mod general_info;
pub mod schedule;
pub mod schedule_status;
pub mod wifi;
pub mod wlan_interface;

pub use access_point::{
    AccessPoint, AccessPointStatus, AccessPointType, AccessPointUpdate, BandwidthConf, ChannelConf,
    Manner,
};
pub use device::{DeviceDetail, DeviceInfo, InterfaceType};
pub use feature_id::FeatureId;
pub use general_info::GeneralInfo;
pub use schedule::{Schedule, ScheduleId, Schedules, Weekday};
pub use schedule_status::{DeviceScheduleStatus, ScheduleState, ScheduleStatus, WlanScheduleStatus};
pub use wifi::{Frequency, LinkStatus, Wifi, wifi_interfaces};
pub use wlan_interface::{ShortAccessPoint, WlanInterface};
