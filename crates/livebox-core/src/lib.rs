//! Domain layer over `livebox-api`.
//!
//! - **[`Livebox`]**: facade with typed methods for the common router
//!   features (general info, Wi-Fi, access points, connected devices,
//!   parental-control and Wi-Fi schedules) plus login/logout bookkeeping.
//! - **Domain model** ([`model`]): router resources decoded tolerantly from
//!   the vendor JSON, and [`FeatureId`], the catalogue of known feature ids.

pub mod error;
pub mod model;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::ScheduleError;
pub use service::{DEFAULT_USERNAME, Livebox};

pub use model::{
    // Access points
    AccessPoint, AccessPointStatus, AccessPointType, AccessPointUpdate, BandwidthConf, ChannelConf,
    Manner,
    // Devices
    DeviceDetail, DeviceInfo, InterfaceType,
    // Features and router info
    FeatureId, GeneralInfo,
    // Schedules
    DeviceScheduleStatus, Schedule, ScheduleId, ScheduleState, ScheduleStatus, Schedules, Weekday,
    WlanScheduleStatus,
    // Wi-Fi
    Frequency, LinkStatus, ShortAccessPoint, Wifi, WlanInterface, wifi_interfaces,
};

pub use livebox_api::{Error, LiveboxClient};
