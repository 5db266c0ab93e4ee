// ── Feature identifiers ──
//
// Typed names for the feature ids advertised by the Livebox family. The
// router accepts any string id; this catalogue is for discoverability and
// typo safety.

use strum::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumMessage,
    IntoStaticStr,
)]
pub enum FeatureId {
    // ── General ──
    #[strum(message = "Router capabilities")]
    Capabilities,
    #[strum(message = "General router information")]
    GeneralInfo,
    #[strum(message = "Reboot the router")]
    Reboot,
    #[strum(message = "Reset router configuration")]
    Reset,
    #[strum(message = "Factory reset the router")]
    FullReset,
    #[strum(message = "Firmware upgrade")]
    FwUpgrade,
    #[strum(message = "Automatic reboot configuration")]
    Autoreboot,

    // ── WAN ──
    #[strum(message = "WAN configuration")]
    Wan,
    #[strum(message = "Supported WAN features")]
    WanSupported,
    #[strum(message = "DSL configuration")]
    Dsl,
    #[strum(message = "DSL statistics")]
    DslStats,
    #[strum(to_string = "3g", message = "3G configuration")]
    ThreeG,
    #[strum(to_string = "3gNetwork", message = "3G network settings")]
    ThreeGNetwork,
    #[strum(to_string = "3gPin", message = "3G PIN management")]
    ThreeGPin,
    #[strum(to_string = "3gPuk", message = "3G PUK management")]
    ThreeGPuk,
    #[strum(message = "ONT configuration")]
    Ont,
    #[strum(message = "ONT alarms")]
    OntAlarms,
    #[strum(message = "ONT GEM statistics")]
    OntGem,
    #[strum(message = "ONT GTC statistics")]
    OntGtc,
    #[strum(message = "PPP configuration")]
    Ppp,
    #[strum(message = "Restart PPP connection")]
    PppRestart,
    #[strum(message = "WAN DHCP configuration")]
    WanDhcp,
    #[strum(message = "Renew WAN DHCP lease")]
    WanDhcpRenew,
    #[strum(message = "WAN DHCPv6 configuration")]
    WanDhcpv6,
    #[strum(message = "Renew WAN DHCPv6 lease")]
    WanDhcpv6Renew,

    // ── Wi-Fi ──
    #[strum(message = "Supported WiFi features")]
    WifiSupported,
    #[strum(message = "WiFi interfaces")]
    Wifi,
    #[strum(message = "Smart WiFi configuration")]
    SmartWifi,
    #[strum(message = "WLAN interface configuration")]
    WlanInterface,
    #[strum(message = "Supported WLAN features")]
    WlanSupported,
    #[strum(message = "WLAN access point configuration")]
    WlanAccessPoint,
    #[strum(message = "WLAN security settings")]
    WlanSecurity,
    #[strum(to_string = "WlanWPS", message = "WLAN WPS configuration")]
    WlanWps,
    #[strum(message = "Start WLAN WPS pairing")]
    WlanWpsStartPairing,
    #[strum(message = "WLAN MAC filtering")]
    WlanMacFiltering,
    #[strum(message = "WLAN MAC filtering entry")]
    WlanMacFilteringMac,
    #[strum(message = "WLAN scheduling")]
    WlanSchedule,
    #[strum(message = "Enable WLAN scheduling")]
    WlanScheduleEnable,
    #[strum(message = "WLAN schedule entry")]
    WlanScheduleId,
    #[strum(message = "Delete WLAN schedule by ID")]
    WlanScheduleDelById,
    #[strum(message = "Temporarily switch on WLAN")]
    WlanScheduleTempSwitchOn,
    #[strum(message = "Scan WiFi channels")]
    ScanChannel,

    // ── LAN and DHCP ──
    #[strum(message = "LAN DHCP configuration")]
    LanDhcp,
    #[strum(message = "DHCP fixed IP addresses")]
    LanDhcpFixedIp,
    #[strum(message = "DHCP fixed IP address entry")]
    LanDhcpFixedIpId,
    #[strum(message = "Connected devices")]
    ConnectedDevices,
    #[strum(message = "Connected device details")]
    ConnectedDevicesMac,
    #[strum(message = "Device list")]
    DeviceList,

    // ── Connectivity ──
    #[strum(message = "Connectivity status")]
    Connectivity,
    #[strum(message = "Ethernet ports")]
    EthPort,
    #[strum(message = "Ethernet port configuration")]
    EthPortId,
    #[strum(message = "USB ports")]
    UsbPort,
    #[strum(message = "USB port details")]
    UsbPortId,
    #[strum(message = "Eject USB device")]
    UsbPortIdEject,

    // ── Telephony ──
    #[strum(message = "FXS ports")]
    FxsPort,
    #[strum(to_string = "VoIP", message = "VoIP configuration")]
    VoIp,
    #[strum(to_string = "SIP", message = "SIP configuration")]
    Sip,
    #[strum(message = "SIP lines")]
    SipLines,
    #[strum(message = "SIP line configuration")]
    SipLinesLine,
    #[strum(to_string = "SipSuscription", message = "SIP subscription")]
    SipSubscription,
    #[strum(message = "H.323 configuration")]
    H323,
    #[strum(message = "H.323 lines")]
    H323Lines,
    #[strum(message = "H.323 line configuration")]
    H323LinesLine,
    #[strum(message = "Softphone configuration")]
    Softphone,
    #[strum(message = "Softphone paired clients")]
    SoftphonePairedClients,
    #[strum(message = "Autodial configuration")]
    Autodial,
    #[strum(message = "Ring phone")]
    Ring,
    #[strum(message = "Call registry")]
    CallRegistry,

    // ── Services ──
    #[strum(to_string = "DDNS", message = "Dynamic DNS configuration")]
    Ddns,
    #[strum(message = "Available DDNS providers")]
    DdnsProviders,
    #[strum(message = "Parental control")]
    ParentalCtrl,
    #[strum(message = "Parental control")]
    PcUrls,
    #[strum(message = "Parental control URL entry")]
    PcUrlsId,
    #[strum(message = "Parental control URLs")]
    ParentalCtrlUrls,
    #[strum(message = "Parental control devices")]
    PcDevices,
    #[strum(message = "Parental control device settings")]
    PcDevicesMac,
    #[strum(message = "Parental control device URLs")]
    PcDevicesMacUrls,
    #[strum(message = "Parental control device URL entry")]
    PcDevicesMacUrlsId,
    #[strum(message = "Parental control device services")]
    PcDevicesMacServices,
    #[strum(message = "Parental control device service entry")]
    PcDevicesMacServicesId,
    #[strum(message = "Parental control device schedules")]
    PcDevicesMacSchedules,
    #[strum(message = "Parental control device schedule entry")]
    PcDevicesMacSchedulesId,
    #[strum(message = "Firewall configuration")]
    Firewall,
    #[strum(message = "Firewall services")]
    FirewallServices,
    #[strum(message = "Firewall service entry")]
    FirewallServicesId,
    #[strum(to_string = "NAT", message = "NAT configuration")]
    Nat,
    #[strum(message = "IP NAT rules")]
    IpNat,
    #[strum(message = "IP NAT rule entry")]
    IpNatId,
    #[strum(message = "Port NAT rules")]
    PortNat,
    #[strum(message = "Port NAT rule entry")]
    PortNatId,
    #[strum(message = "Notification settings")]
    Notifications,
    #[strum(message = "Email notification settings")]
    NotificationsEmail,
    #[strum(message = "Quality of Service")]
    Qos,
    #[strum(message = "Supported QoS features")]
    QosSupported,
    #[strum(message = "Run QoS analysis")]
    QosRun,

    // ── Access control ──
    #[strum(message = "Access control")]
    Access,
    #[strum(message = "LAN GUI access control")]
    AccessLanGui,
    #[strum(message = "WAN GUI access control")]
    AccessWanGui,
    #[strum(message = "Allow WAN GUI access")]
    AccessWanGuiAllow,
    #[strum(message = "Open API access control")]
    AccessOpenApi,
    #[strum(message = "LAN API access control")]
    AccessLanApi,
    #[strum(message = "WAN API access control")]
    AccessWanApi,
    #[strum(message = "OSP API access control")]
    AccessOspApi,

    // ── Reports ──
    #[strum(message = "System reports")]
    Report,
    #[strum(message = "Dispatch system report")]
    ReportDispatch,
}

string_serde!(FeatureId);

impl FeatureId {
    pub const DEVICE_MANAGEMENT: &'static [Self] = &[
        Self::ConnectedDevices,
        Self::ConnectedDevicesMac,
        Self::DeviceList,
        Self::PcDevicesMac,
        Self::PcDevicesMacSchedules,
        Self::PcDevicesMacServices,
    ];

    pub const WIFI: &'static [Self] = &[
        Self::Wifi,
        Self::WifiSupported,
        Self::SmartWifi,
        Self::WlanInterface,
        Self::WlanAccessPoint,
        Self::WlanSecurity,
        Self::WlanWps,
        Self::WlanMacFiltering,
        Self::WlanSchedule,
        Self::ScanChannel,
    ];

    pub const WAN: &'static [Self] = &[
        Self::Wan,
        Self::WanSupported,
        Self::Dsl,
        Self::DslStats,
        Self::Ppp,
        Self::WanDhcp,
        Self::WanDhcpv6,
    ];

    /// Action features that are triggered with an invoke-style POST.
    pub const INVOKE: &'static [Self] = &[
        Self::Reboot,
        Self::Reset,
        Self::FullReset,
        Self::FwUpgrade,
        Self::PppRestart,
        Self::WanDhcpRenew,
        Self::WanDhcpv6Renew,
        Self::WlanWpsStartPairing,
        Self::WlanScheduleTempSwitchOn,
        Self::WlanScheduleDelById,
        Self::UsbPortIdEject,
        Self::Ring,
        Self::QosRun,
        Self::AccessWanGuiAllow,
        Self::ReportDispatch,
    ];

    /// Wire id, e.g. `"3gPin"`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        self.get_message().unwrap_or_default()
    }
}

impl From<FeatureId> for String {
    fn from(id: FeatureId) -> Self {
        id.as_str().to_owned()
    }
}
