// ── Livebox facade ──
//
// Typed convenience layer over any `LiveboxClient`. Each method names its
// feature, path variables and payload; validation, routing and transport
// stay in the client. Login is credential bookkeeping verified by a
// capability discovery: the router API itself has no session.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use livebox_api::{
    Capabilities, ClientConfiguration, Error, FeatureRequest, HttpClient, LiveboxClient,
};
use secrecy::SecretString;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::model::{
    AccessPoint, DeviceDetail, DeviceInfo, DeviceScheduleStatus, FeatureId, GeneralInfo, Schedule,
    ScheduleState, Schedules, Wifi, WlanInterface, WlanScheduleStatus, strip_colons,
};

/// Account used by the router's local administration API.
pub const DEFAULT_USERNAME: &str = "UsrAdmin";

const WLAN_IFC: &str = "wlan_ifc";
const WLAN_AP: &str = "wlan_ap";
const MAC: &str = "mac";

pub struct Livebox<C = HttpClient> {
    client: C,
    authenticated: AtomicBool,
    capabilities_fetched: AtomicBool,
}

impl Livebox {
    /// Anonymous facade over a live HTTP client.
    pub fn connect(base_url: &str) -> Result<Self, Error> {
        let config = ClientConfiguration::parse(base_url)?;
        Ok(Self::new(HttpClient::new(config)?))
    }

    /// Facade over a live HTTP client with credentials installed up front.
    pub fn connect_with_credentials(
        base_url: &str,
        username: Option<String>,
        password: SecretString,
    ) -> Result<Self, Error> {
        let config = ClientConfiguration::parse(base_url)?.with_credentials(
            Some(username.unwrap_or_else(|| DEFAULT_USERNAME.to_owned())),
            Some(password),
        );
        Ok(Self::new(HttpClient::new(config)?))
    }
}

impl<C: LiveboxClient> Livebox<C> {
    /// Wrap `client`. A client that already carries credentials counts as
    /// authenticated.
    pub fn new(client: C) -> Self {
        let authenticated = client.configuration().has_credentials();
        Self {
            client,
            authenticated: AtomicBool::new(authenticated),
            capabilities_fetched: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    pub fn capabilities_fetched(&self) -> bool {
        self.capabilities_fetched.load(Ordering::SeqCst)
    }

    pub fn base_url(&self) -> Url {
        self.client.configuration().base_url.clone()
    }

    pub fn current_username(&self) -> Option<String> {
        self.client.configuration().username.clone()
    }

    // ── Session bookkeeping ─────────────────────────────────────────

    /// Install credentials and verify them with a capability discovery.
    ///
    /// Returns whether the router advertised any feature. On failure the
    /// previous credentials are restored and the error is returned.
    pub async fn login(&self, username: Option<String>, password: SecretString) -> Result<bool, Error> {
        let previous = self.client.configuration();
        let username = username.unwrap_or_else(|| DEFAULT_USERNAME.to_owned());
        debug!(%username, "logging in");
        self.client.update_credentials(Some(username), Some(password));

        match self.client.discover_capabilities().await {
            Ok(capabilities) => {
                self.authenticated.store(true, Ordering::SeqCst);
                self.capabilities_fetched.store(true, Ordering::SeqCst);
                info!(features = capabilities.len(), "login verified");
                Ok(!capabilities.is_empty())
            }
            Err(e) => {
                warn!(error = %e, "login failed, restoring previous credentials");
                self.client
                    .update_credentials(previous.username.clone(), previous.password.clone());
                Err(e)
            }
        }
    }

    /// Forget the credentials. No network traffic.
    pub fn logout(&self) {
        self.client.update_credentials(None, None);
        self.authenticated.store(false, Ordering::SeqCst);
        self.capabilities_fetched.store(false, Ordering::SeqCst);
    }

    /// Replace the credentials without verifying them. The capability cache
    /// is kept.
    pub fn update_credentials(&self, username: Option<String>, password: Option<SecretString>) {
        let complete = username.is_some() && password.is_some();
        self.client.update_credentials(username, password);
        self.authenticated.store(complete, Ordering::SeqCst);
    }

    pub fn set_base_url(&self, base_url: Url, clear_capabilities: bool) {
        self.client.update_base_url(base_url, clear_capabilities);
        if clear_capabilities {
            self.capabilities_fetched.store(false, Ordering::SeqCst);
        }
    }

    pub fn update_base_url(&self, base_url: &str, clear_capabilities: bool) -> Result<(), Error> {
        let url = Url::parse(base_url).map_err(|_| Error::InvalidUrl(base_url.to_owned()))?;
        self.set_base_url(url, clear_capabilities);
        Ok(())
    }

    // ── General ─────────────────────────────────────────────────────

    /// Discover (or rediscover) the router's capabilities.
    pub async fn capabilities(&self) -> Result<Arc<Capabilities>, Error> {
        let capabilities = self.client.discover_capabilities().await?;
        self.capabilities_fetched.store(true, Ordering::SeqCst);
        Ok(capabilities)
    }

    pub async fn general_info(&self) -> Result<GeneralInfo, Error> {
        self.client.invoke(FeatureRequest::get(FeatureId::GeneralInfo)).await
    }

    pub async fn reboot(&self) -> Result<(), Error> {
        self.client.invoke_void(FeatureRequest::post(FeatureId::Reboot)).await
    }

    // ── Wi-Fi ───────────────────────────────────────────────────────

    /// Raw `Wifi` listing, status-button record included. See
    /// [`crate::model::wifi_interfaces`] to keep only the radios.
    pub async fn wifi_interfaces(&self) -> Result<Vec<Wifi>, Error> {
        self.client.invoke(FeatureRequest::get(FeatureId::Wifi)).await
    }

    pub async fn wlan_interface(&self, wlan_ifc: &str) -> Result<WlanInterface, Error> {
        self.client
            .invoke(FeatureRequest::get(FeatureId::WlanInterface).path_var(WLAN_IFC, wlan_ifc))
            .await
    }

    pub async fn access_point(&self, wlan_ifc: &str, wlan_ap: &str) -> Result<AccessPoint, Error> {
        self.client
            .invoke(access_point_request(FeatureRequest::get(FeatureId::WlanAccessPoint), wlan_ifc, wlan_ap))
            .await
    }

    pub async fn update_access_point(
        &self,
        wlan_ifc: &str,
        wlan_ap: &str,
        access_point: &AccessPoint,
    ) -> Result<AccessPoint, Error> {
        let request = FeatureRequest::put(FeatureId::WlanAccessPoint).json(access_point);
        self.client
            .invoke(access_point_request(request, wlan_ifc, wlan_ap))
            .await
    }

    // ── Devices ─────────────────────────────────────────────────────

    pub async fn connected_devices(&self) -> Result<Vec<DeviceInfo>, Error> {
        self.client.invoke(FeatureRequest::get(FeatureId::ConnectedDevices)).await
    }

    pub async fn device_detail(&self, mac: &str) -> Result<DeviceDetail, Error> {
        self.client
            .invoke(device_request(FeatureRequest::get(FeatureId::ConnectedDevicesMac), mac))
            .await
    }

    pub async fn set_device_alias(&self, mac: &str, alias: &str) -> Result<DeviceDetail, Error> {
        let request = FeatureRequest::put(FeatureId::ConnectedDevicesMac).json(&json!({ "alias": alias }));
        self.client.invoke(device_request(request, mac)).await
    }

    // ── Parental control schedules ──────────────────────────────────

    pub async fn device_schedules(&self, mac: &str) -> Result<Schedules, Error> {
        self.client
            .invoke(device_request(FeatureRequest::get(FeatureId::PcDevicesMacSchedules), mac))
            .await
    }

    /// Enable scheduling for the device, then add `schedules` to it.
    pub async fn add_device_schedules(&self, mac: &str, schedules: &[Schedule]) -> Result<Schedules, Error> {
        self.change_device_schedule_status(mac, &DeviceScheduleStatus::new(mac, ScheduleState::Enabled))
            .await?;
        let request = FeatureRequest::post(FeatureId::PcDevicesMacSchedules).json(schedules);
        self.client.invoke(device_request(request, mac)).await
    }

    pub async fn device_schedule_status(&self, mac: &str) -> Result<DeviceScheduleStatus, Error> {
        self.client
            .invoke(device_request(FeatureRequest::get(FeatureId::PcDevicesMac), mac))
            .await
    }

    pub async fn change_device_schedule_status(
        &self,
        mac: &str,
        status: &DeviceScheduleStatus,
    ) -> Result<(), Error> {
        let request = FeatureRequest::put(FeatureId::PcDevicesMac).json(status);
        self.client.invoke_void(device_request(request, mac)).await
    }

    pub async fn delete_device_schedules(&self, mac: &str, schedules: &[Schedule]) -> Result<Schedules, Error> {
        let request = FeatureRequest::delete(FeatureId::PcDevicesMacSchedules).json(schedules);
        self.client.invoke(device_request(request, mac)).await
    }

    // ── Wi-Fi schedules ─────────────────────────────────────────────

    pub async fn wlan_schedules(&self, wlan_ifc: &str, wlan_ap: &str) -> Result<Schedules, Error> {
        self.client
            .invoke(access_point_request(FeatureRequest::get(FeatureId::WlanSchedule), wlan_ifc, wlan_ap))
            .await
    }

    pub async fn add_wlan_schedules(
        &self,
        wlan_ifc: &str,
        wlan_ap: &str,
        schedules: &[Schedule],
    ) -> Result<Schedules, Error> {
        let request = FeatureRequest::post(FeatureId::WlanSchedule).json(schedules);
        self.client
            .invoke(access_point_request(request, wlan_ifc, wlan_ap))
            .await
    }

    pub async fn delete_wlan_schedules(
        &self,
        wlan_ifc: &str,
        wlan_ap: &str,
        schedules: &[Schedule],
    ) -> Result<Schedules, Error> {
        let request = FeatureRequest::delete(FeatureId::WlanSchedule).json(schedules);
        self.client
            .invoke(access_point_request(request, wlan_ifc, wlan_ap))
            .await
    }

    pub async fn wlan_schedule_status(&self, wlan_ifc: &str, wlan_ap: &str) -> Result<WlanScheduleStatus, Error> {
        let request = FeatureRequest::get(FeatureId::WlanScheduleEnable);
        self.client
            .invoke(access_point_request(request, wlan_ifc, wlan_ap))
            .await
    }

    pub async fn change_wlan_schedule_status(
        &self,
        wlan_ifc: &str,
        wlan_ap: &str,
        status: WlanScheduleStatus,
    ) -> Result<(), Error> {
        let request = FeatureRequest::put(FeatureId::WlanScheduleEnable).json(&status);
        self.client
            .invoke_void(access_point_request(request, wlan_ifc, wlan_ap))
            .await
    }
}

fn access_point_request(request: FeatureRequest, wlan_ifc: &str, wlan_ap: &str) -> FeatureRequest {
    request
        .path_var(WLAN_IFC, wlan_ifc)
        .path_var(WLAN_AP, strip_colons(wlan_ap))
}

fn device_request(request: FeatureRequest, mac: &str) -> FeatureRequest {
    request.path_var(MAC, strip_colons(mac))
}
