#![allow(clippy::unwrap_used)]
// Local failures never reach the transport.
//
// Uses a counting in-process transport instead of a socket so the number
// of sends is observable exactly.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::ser::Error as _;
use serde_json::{Value, json};

use livebox_api::{
    Capabilities, ClientConfiguration, Error, Feature, FeatureRequest, HttpClient, HttpRequest,
    HttpResponse, LiveboxClient, LoggingConfig, Operation, Transport, TransportError,
};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Debug)]
struct CountingTransport {
    sends: AtomicUsize,
    status: u16,
    body: &'static str,
    last: Mutex<Option<HttpRequest>>,
}

impl CountingTransport {
    fn replying(status: u16, body: &'static str) -> Self {
        Self {
            sends: AtomicUsize::new(0),
            status,
            body,
            last: Mutex::new(None),
        }
    }

    fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

impl Transport for CountingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request);
        Ok(HttpResponse {
            status: self.status,
            headers: HeaderMap::new(),
            body: Bytes::from_static(self.body.as_bytes()),
        })
    }
}

fn client(transport: CountingTransport) -> HttpClient<CountingTransport> {
    let config = ClientConfiguration::parse("http://livebox.home").unwrap();
    let client = HttpClient::with_transport(config, transport, LoggingConfig::disabled());
    client.router().install(Capabilities {
        features: vec![
            Feature::new("GeneralInfo", "/API/GeneralInfo", [Operation::Read]),
            Feature::new(
                "WlanAccessPoint",
                "/API/LAN/WIFI/{wlan_ifc}/AccessPoint/{wlan_ap}",
                [Operation::Read, Operation::Write],
            ),
            Feature::new("Reboot", "/API/Reboot", [Operation::Invoke]),
        ],
    });
    client
}

struct Unencodable;

impl Serialize for Unencodable {
    fn serialize<S: serde::Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("cannot encode"))
    }
}

// ── No-network failures ─────────────────────────────────────────────

#[tokio::test]
async fn test_local_failures_issue_no_requests() {
    let client = client(CountingTransport::replying(200, "{}"));

    let unknown: Result<Value, _> = client.invoke(FeatureRequest::get("Nope")).await;
    assert!(matches!(unknown, Err(Error::FeatureNotFound(_))));

    let unsupported = client.invoke_void(FeatureRequest::delete("GeneralInfo")).await;
    assert!(matches!(unsupported, Err(Error::OperationNotSupported { .. })));

    let missing: Result<Value, _> = client
        .invoke(FeatureRequest::get("WlanAccessPoint").path_var("wlan_ap", "x"))
        .await;
    assert!(matches!(missing, Err(Error::InvalidPathVariables { .. })));

    let extra: Result<Value, _> = client
        .invoke(
            FeatureRequest::get("WlanAccessPoint")
                .path_var("wlan_ifc", "wl0")
                .path_var("wlan_ap", "x")
                .path_var("bogus", "1"),
        )
        .await;
    assert!(matches!(extra, Err(Error::InvalidPathVariables { .. })));

    let encoding = client
        .invoke_void(FeatureRequest::post("Reboot").json(&Unencodable))
        .await;
    assert!(matches!(encoding, Err(Error::Encoding(_))));

    let bad_header = client
        .invoke_void(FeatureRequest::post("Reboot").header("bad header", "x"))
        .await;
    assert!(matches!(bad_header, Err(Error::InvalidHeader(_))));

    assert_eq!(client.transport().sends(), 0);
}

#[tokio::test]
async fn test_valid_call_issues_exactly_one_request() {
    let client = client(CountingTransport::replying(200, r#"{"ok":true}"#));

    let value: Value = client
        .invoke(
            FeatureRequest::get("WlanAccessPoint")
                .path_var("wlan_ifc", "wl0")
                .path_var("wlan_ap", "AABBCCDDEEFF"),
        )
        .await
        .unwrap();

    assert_eq!(value, json!({ "ok": true }));
    assert_eq!(client.transport().sends(), 1);

    let sent = client.transport().last.lock().unwrap().clone().unwrap();
    assert_eq!(
        sent.url.as_str(),
        "http://livebox.home/API/LAN/WIFI/wl0/AccessPoint/AABBCCDDEEFF"
    );
    assert!(sent.headers.get("authorization").is_none());
}

// ── Classification without a socket ─────────────────────────────────

#[tokio::test]
async fn test_status_outside_http_range_is_unexpected() {
    let client = client(CountingTransport::replying(42, "{}"));
    let result: Result<Value, _> = client.invoke(FeatureRequest::get("GeneralInfo")).await;
    assert!(matches!(result, Err(Error::UnexpectedResponse)));
}

#[tokio::test]
async fn test_401_precedes_decoding() {
    let client = client(CountingTransport::replying(401, "{not json"));
    let result: Result<Value, _> = client.invoke(FeatureRequest::get("GeneralInfo")).await;
    assert!(matches!(result, Err(Error::AuthenticationRequired)));
}
