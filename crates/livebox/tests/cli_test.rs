//! Integration tests for the `livebox` CLI binary.
//!
//! Offline commands run against an isolated config directory; router
//! commands run against a wiremock router.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const AUTH: &str = "Basic VXNyQWRtaW46c2VjcmV0";

/// Build a [`Command`] for the `livebox` binary with env isolation.
///
/// Clears all `LIVEBOX_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn livebox_cmd(home: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("livebox");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("LIVEBOX_PROFILE")
        .env_remove("LIVEBOX_URL")
        .env_remove("LIVEBOX_USERNAME")
        .env_remove("LIVEBOX_PASSWORD")
        .env_remove("LIVEBOX_OUTPUT")
        .env_remove("LIVEBOX_INSECURE")
        .env_remove("LIVEBOX_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn capabilities() -> Value {
    json!({
        "Features": [
            { "Id": "GeneralInfo", "Uri": "/API/GeneralInfo", "Ops": ["R"] },
            { "Id": "Reboot", "Uri": "/API/Reboot", "Ops": ["I"] },
            { "Id": "PcDevicesMac",
              "Uri": "/API/ParentalControl/Devices/{mac}",
              "Ops": ["R", "W"] },
            { "Id": "PcDevicesMacSchedules",
              "Uri": "/API/ParentalControl/Devices/{mac}/Schedules",
              "Ops": ["R", "A", "D"] }
        ]
    })
}

async fn router() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/API/Capabilities"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(capabilities()))
        .mount(&server)
        .await;
    server
}

fn router_cmd(home: &std::path::Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = livebox_cmd(home);
    cmd.args(["--url", &server.uri(), "--password", "secret"]);
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = livebox_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    livebox_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("Livebox")
            .and(predicate::str::contains("capabilities"))
            .and(predicate::str::contains("schedules"))
            .and(predicate::str::contains("call")),
    );
}

// ── Offline commands ────────────────────────────────────────────────

#[test]
fn test_features_catalogue_keeps_router_spelling() {
    let home = tempfile::tempdir().unwrap();
    livebox_cmd(home.path())
        .args(["features", "--output", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3gPin").and(predicate::str::contains("SipSuscription")));
}

#[test]
fn test_features_group_as_json() {
    let home = tempfile::tempdir().unwrap();
    let output = livebox_cmd(home.path())
        .args(["features", "--group", "invoke", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(entries.iter().any(|e| e["id"] == "Reboot"));
    assert!(entries.iter().all(|e| e["id"] != "GeneralInfo"));
}

#[test]
fn test_config_init_then_profiles() {
    let home = tempfile::tempdir().unwrap();
    livebox_cmd(home.path())
        .args(["config", "init", "--name", "home", "--router-url", "http://192.168.1.1"])
        .args(["--password-env", "HOME_ROUTER_PW"])
        .assert()
        .success();

    livebox_cmd(home.path())
        .args(["config", "profiles", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("home"));
}

#[test]
fn test_router_command_without_config_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = livebox_cmd(home.path()).arg("info").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("No router configured"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let output = livebox_cmd(home.path())
        .args(["--profile", "attic", "info"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("attic"));
}

// ── Router commands ─────────────────────────────────────────────────

#[tokio::test]
async fn test_info_renders_general_info() {
    let server = router().await;
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
            "UpTime": "3660"
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    router_cmd(home.path(), &server)
        .arg("info")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Sagemcom")
                .and(predicate::str::contains("Livebox 6"))
                .and(predicate::str::contains("1h 1m")),
        );
}

#[tokio::test]
async fn test_reboot_requires_confirmation() {
    let server = router().await;
    Mock::given(method("POST"))
        .and(path("/API/Reboot"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let refused = router_cmd(home.path(), &server).arg("reboot").output().unwrap();
    assert_eq!(refused.status.code(), Some(2));

    router_cmd(home.path(), &server)
        .args(["reboot", "--yes"])
        .assert()
        .success();
}

#[tokio::test]
async fn test_undeclared_feature_exits_unsupported() {
    let server = router().await;
    let home = tempfile::tempdir().unwrap();

    let output = router_cmd(home.path(), &server)
        .args(["call", "WlanInterface", "--var", "wlan_ifc=wl0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(5));
    assert!(combined_output(&output).contains("WlanInterface"));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "only discovery reached the router");
}

#[tokio::test]
async fn test_rejected_password_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/API/Capabilities"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let output = router_cmd(home.path(), &server).arg("login").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[tokio::test]
async fn test_schedule_add_enables_then_posts_slots() {
    let server = router().await;
    Mock::given(method("PUT"))
        .and(path("/API/ParentalControl/Devices/AABBCCDDEEFF"))
        .and(body_json(json!({ "MAC": "AA:BB:CC:DD:EE:FF", "Status": "Enabled" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/API/ParentalControl/Devices/AABBCCDDEEFF/Schedules"))
        .and(body_json(json!([{ "Id": "9" }, { "Id": "10" }])))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "Id": "9" }, { "Id": "10" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    router_cmd(home.path(), &server)
        .args(["schedules", "device", "AA:BB:CC:DD:EE:FF", "add", "monday:8-10", "-o", "plain"])
        .assert()
        .success()
        .stdout("9\n10\n");
}
