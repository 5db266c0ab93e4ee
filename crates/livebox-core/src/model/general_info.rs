// ── General information domain types ──

use livebox_api::codec::{Fields, flexible};
use serde::{Deserialize, Deserializer, Serialize};

/// `GeneralInfo` resource: identity, versions and uptime of the router.
///
/// Some firmwares spell the manufacturer key `ManuFacturer`; both are
/// accepted and `Manufacturer` is written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeneralInfo {
    pub manufacturer: String,
    #[serde(rename = "ManufacturerOUI", skip_serializing_if = "Option::is_none")]
    pub manufacturer_oui: Option<String>,
    pub model_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub product_class: String,
    pub serial_number: String,
    pub hardware_version: String,
    pub software_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescue_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modem_firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_hardware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_software_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_code: Option<String>,
    /// Seconds since boot.
    #[serde(with = "flexible::lenient", skip_serializing_if = "Option::is_none")]
    pub up_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_use_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_log: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_config_file_number_of_entries: Option<String>,
    #[serde(rename = "ManufacturerURL", skip_serializing_if = "Option::is_none")]
    pub manufacturer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(with = "flexible::lenient", skip_serializing_if = "Option::is_none")]
    pub number_of_reboots: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_occurred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_occurred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_occurred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router_name: Option<String>,
}

impl<'de> Deserialize<'de> for GeneralInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let f = Fields::deserialize(deserializer)?;
        Ok(Self {
            manufacturer: f.require::<_, D::Error>(&["Manufacturer", "ManuFacturer"])?,
            manufacturer_oui: f.optional(&["ManufacturerOUI"]),
            model_name: f.require::<_, D::Error>(&["ModelName"])?,
            description: f.optional(&["Description"]),
            product_class: f.require::<_, D::Error>(&["ProductClass"])?,
            serial_number: f.require::<_, D::Error>(&["SerialNumber"])?,
            hardware_version: f.require::<_, D::Error>(&["HardwareVersion"])?,
            software_version: f.require::<_, D::Error>(&["SoftwareVersion"])?,
            rescue_version: f.optional(&["RescueVersion"]),
            modem_firmware_version: f.optional(&["ModemFirmwareVersion"]),
            enabled_options: f.optional(&["EnabledOptions"]),
            additional_hardware_version: f.optional(&["AdditionalHardwareVersion"]),
            additional_software_version: f.optional(&["AdditionalSoftwareVersion"]),
            spec_version: f.optional(&["SpecVersion"]),
            provisioning_code: f.optional(&["ProvisioningCode"]),
            up_time: f.flexible(&["UpTime"]),
            first_use_date: f.optional(&["FirstUseDate"]),
            device_log: f.optional(&["DeviceLog"]),
            vendor_config_file_number_of_entries: f.optional(&["VendorConfigFileNumberOfEntries"]),
            manufacturer_url: f.optional(&["ManufacturerURL"]),
            country: f.optional(&["Country"]),
            number_of_reboots: f.flexible(&["NumberOfReboots"]),
            upgrade_occurred: f.optional(&["UpgradeOccurred"]),
            reset_occurred: f.optional(&["ResetOccurred"]),
            restore_occurred: f.optional(&["RestoreOccurred"]),
            api_version: f.optional(&["ApiVersion"]),
            router_image: f.optional(&["RouterImage"]),
            router_name: f.optional(&["RouterName"]),
        })
    }
}
