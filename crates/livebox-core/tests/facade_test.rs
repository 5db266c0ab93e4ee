#![allow(clippy::unwrap_used)]
// End-to-end tests for the `Livebox` facade over a live `HttpClient`
// talking to a wiremock router.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use livebox_api::{ClientConfiguration, HttpClient, LoggingConfig, TransportConfig};
use livebox_core::{
    AccessPointStatus, AccessPointUpdate, Error, FeatureId, LinkStatus, Livebox, Schedule,
    ScheduleId, Weekday, wifi_interfaces,
};

// ── Helpers ─────────────────────────────────────────────────────────

const AUTH: &str = "Basic VXNyQWRtaW46c2VjcmV0";

fn capabilities() -> Value {
    json!({
        "Features": [
            { "Id": "GeneralInfo", "Uri": "/API/GeneralInfo", "Ops": ["R"] },
            { "Id": "Wifi", "Uri": "/API/LAN/WIFI", "Ops": ["R"] },
            { "Id": "WlanAccessPoint",
              "Uri": "/API/LAN/WIFI/{wlan_ifc}/AccessPoint/{wlan_ap}",
              "Ops": ["R", "W"] },
            { "Id": "PcDevicesMac",
              "Uri": "/API/ParentalControl/Devices/{mac}",
              "Ops": ["R", "W"] },
            { "Id": "PcDevicesMacSchedules",
              "Uri": "/API/ParentalControl/Devices/{mac}/Schedules",
              "Ops": ["R", "A", "D"] }
        ]
    })
}

fn access_point() -> Value {
    json!({
        "idx": "wl0",
        "BSSID": "AA:BB:CC:DD:EE:FF",
        "Type": "Home",
        "Manner": "Combined",
        "Status": "Up",
        "SSID": "Livebox-1234",
        "Password": "hunter22",
        "ChannelConf": "Auto",
        "Channel": 6,
        "BandwithConf": "Auto",
        "Bandwith": "20MHz",
        "SchedulingAllowed": true
    })
}

async fn setup() -> (MockServer, Livebox) {
    let server = MockServer::start().await;
    let config = ClientConfiguration::parse(&server.uri())
        .unwrap()
        .with_timeout(Duration::from_secs(5));
    let client = HttpClient::with_transport_config(
        config,
        &TransportConfig::default(),
        LoggingConfig::disabled(),
    )
    .unwrap();
    (server, Livebox::new(client))
}

async fn logged_in() -> (MockServer, Livebox) {
    let (server, livebox) = setup().await;
    Mock::given(method("GET"))
        .and(path("/API/Capabilities"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(capabilities()))
        .mount(&server)
        .await;
    assert!(livebox
        .login(None, SecretString::from("secret".to_owned()))
        .await
        .unwrap());
    (server, livebox)
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_then_general_info() {
    let (server, livebox) = logged_in().await;

    Mock::given(method("GET"))
        .and(path("/API/GeneralInfo"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ManuFacturer": "Sagemcom",
            "ModelName": "Livebox 6",
            "ProductClass": "Livebox",
            "SerialNumber": "SN123",
            "HardwareVersion": "HW1",
            "SoftwareVersion": "SG60",
            "UpTime": "120"
        })))
        .mount(&server)
        .await;

    let info = livebox.general_info().await.unwrap();
    assert_eq!(info.manufacturer, "Sagemcom");
    assert_eq!(info.up_time, Some(120));
    assert!(livebox.is_authenticated());
}

#[tokio::test]
async fn test_rejected_login_keeps_client_anonymous() {
    let (server, livebox) = setup().await;
    Mock::given(method("GET"))
        .and(path("/API/Capabilities"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = livebox
        .login(Some("admin".into()), SecretString::from("wrong".to_owned()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AuthenticationRequired));
    assert!(!livebox.is_authenticated());
    assert_eq!(livebox.current_username(), None);
}

// ── Wi-Fi ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_wifi_listing_filters_status_button() {
    let (server, livebox) = logged_in().await;
    Mock::given(method("GET"))
        .and(path("/API/LAN/WIFI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "WiFiStatusButton": true },
            { "Id": "24GHz", "Status": "Up", "Frequency": "2.4GHz" }
        ])))
        .mount(&server)
        .await;

    let radios = wifi_interfaces(livebox.wifi_interfaces().await.unwrap());
    assert_eq!(radios.len(), 1);
    assert_eq!(radios[0].status, LinkStatus::Up);
}

#[tokio::test]
async fn test_update_access_point_puts_modified_copy() {
    let (server, livebox) = logged_in().await;
    Mock::given(method("GET"))
        .and(path("/API/LAN/WIFI/wl0/AccessPoint/AABBCCDDEEFF"))
        .respond_with(ResponseTemplate::new(200).set_body_json(access_point()))
        .mount(&server)
        .await;

    let mut expected = access_point();
    expected["Status"] = json!("Down");
    Mock::given(method("PUT"))
        .and(path("/API/LAN/WIFI/wl0/AccessPoint/AABBCCDDEEFF"))
        .and(header("content-type", "application/json"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
        .expect(1)
        .mount(&server)
        .await;

    let current = livebox.access_point("wl0", "AA:BB:CC:DD:EE:FF").await.unwrap();
    let updated = current.with_changes(AccessPointUpdate {
        status: Some(AccessPointStatus::Down),
        ..AccessPointUpdate::default()
    });
    let stored = livebox
        .update_access_point("wl0", "AA:BB:CC:DD:EE:FF", &updated)
        .await
        .unwrap();

    assert_eq!(stored.status, AccessPointStatus::Down);
    assert_eq!(stored.channel, Some(6));
}

#[tokio::test]
async fn test_undeclared_feature_fails_locally() {
    let (server, livebox) = logged_in().await;

    let err = livebox.wlan_interface("wl0").await.unwrap_err();

    assert!(matches!(err, Error::FeatureNotFound(ref id) if id == FeatureId::WlanInterface.as_str()));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "only the discovery call reached the router");
}

// ── Schedules ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_device_schedules_enables_then_posts() {
    let (server, livebox) = logged_in().await;
    Mock::given(method("PUT"))
        .and(path("/API/ParentalControl/Devices/AABBCCDDEEFF"))
        .and(body_json(json!({ "MAC": "AA:BB:CC:DD:EE:FF", "Status": "Enabled" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/API/ParentalControl/Devices/AABBCCDDEEFF/Schedules"))
        .and(body_json(json!([{ "Id": "25" }, { "Id": "26" }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "Id": "25" }, { "Id": "26" }])))
        .expect(1)
        .mount(&server)
        .await;

    let tuesday: Vec<Schedule> = ScheduleId::all_hours(Weekday::Tuesday)
        .into_iter()
        .take(2)
        .map(Schedule::new)
        .collect();
    let added = livebox
        .add_device_schedules("AA:BB:CC:DD:EE:FF", &tuesday)
        .await
        .unwrap();

    assert_eq!(added, tuesday);
    assert_eq!(added[0].id.to_string(), "Tuesday 00:00-01:00");
}

#[tokio::test]
async fn test_delete_device_schedules_sends_body_with_delete() {
    let (server, livebox) = logged_in().await;
    Mock::given(method("DELETE"))
        .and(path("/API/ParentalControl/Devices/AABBCCDDEEFF/Schedules"))
        .and(body_json(json!([{ "Id": "168" }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let remaining = livebox
        .delete_device_schedules("AABBCCDDEEFF", &[Schedule::new(ScheduleId::SUNDAY_LAST_HOUR)])
        .await
        .unwrap();
    assert!(remaining.is_empty());
}
