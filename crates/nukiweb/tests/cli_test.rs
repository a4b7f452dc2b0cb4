//! Integration tests for the `nukiweb` CLI binary.
//!
//! Argument parsing, help, completions, and error handling run without a
//! server; device commands run against a wiremock Nuki Web.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `nukiweb` binary with env isolation.
///
/// Clears all `NUKIWEB_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn nukiweb_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("nukiweb");
    cmd.env("HOME", "/tmp/nukiweb-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/nukiweb-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("NUKIWEB_PROFILE")
        .env_remove("NUKIWEB_API_URL")
        .env_remove("NUKIWEB_TOKEN")
        .env_remove("NUKIWEB_OUTPUT")
        .env_remove("NUKIWEB_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a prepared command off the async runtime.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn front_door() -> serde_json::Value {
    json!({
        "smartlockId": 1,
        "type": 4,
        "name": "Front door",
        "firmwareVersion": 263_940,
        "state": { "state": 1, "batteryCritical": false, "batteryCharge": 87, "doorState": 2 },
        "config": { "autoUnlatch": true, "ledBrightness": 3 },
        "advancedConfig": { "lngTimeout": 25, "motorSpeed": 0 }
    })
}

async fn server_with_front_door() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([front_door()])))
        .mount(&server)
        .await;
    server
}

fn against(server: &MockServer, args: &[&str]) -> assert_cmd::Command {
    let mut cmd = nukiweb_cmd();
    cmd.args(["--token", "test-token", "--api-url", &server.uri()])
        .args(args);
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = nukiweb_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    nukiweb_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Nuki Web")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("lock-n-go"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_version_flag() {
    nukiweb_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nukiweb"));
}

#[test]
fn test_invalid_output_format_is_usage_error() {
    nukiweb_cmd()
        .args(["--output", "xml", "devices", "list"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    nukiweb_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nukiweb"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_no_config_and_no_token_fails() {
    let output = nukiweb_cmd().args(["devices", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("config init"), "Expected hint in:\n{text}");
}

#[test]
fn test_unknown_profile_is_not_found() {
    nukiweb_cmd()
        .args(["--profile", "office", "--token", "x", "devices", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("office"));
}

#[test]
fn test_config_show_without_file() {
    nukiweb_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

// ── Against a mock server ───────────────────────────────────────────

#[tokio::test]
async fn test_devices_list_plain() {
    let server = server_with_front_door().await;
    let output = run(against(&server, &["-o", "plain", "devices", "list"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
}

#[tokio::test]
async fn test_devices_get_by_name_as_json() {
    let server = server_with_front_door().await;
    let output = run(against(&server, &["-o", "json", "devices", "get", "front door"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["name"], "Front door");
}

#[tokio::test]
async fn test_unknown_device_exit_code() {
    let server = server_with_front_door().await;
    let output = run(against(&server, &["devices", "get", "garage"])).await;
    assert_eq!(output.status.code(), Some(4));
}

#[tokio::test]
async fn test_rejected_token_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let output = run(against(&server, &["devices", "list"])).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}

#[tokio::test]
async fn test_lock_posts_action() {
    let server = server_with_front_door().await;
    Mock::given(method("POST"))
        .and(path("/smartlock/1/action"))
        .and(body_json(json!({ "action": 2, "option": 0 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(against(&server, &["lock", "1"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test]
async fn test_unlatch_requires_confirmation_when_not_interactive() {
    let server = server_with_front_door().await;
    Mock::given(method("POST"))
        .and(path("/smartlock/1/action"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = run(against(&server, &["unlatch", "1"])).await;
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
}

#[tokio::test]
async fn test_set_select_by_label() {
    let server = server_with_front_door().await;
    Mock::given(method("POST"))
        .and(path("/smartlock/1/advanced/config"))
        .and(body_json(json!({ "motorSpeed": 2 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(against(&server, &["set", "1", "motor_speed", "slow"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test]
async fn test_set_rejects_out_of_range_number() {
    let server = server_with_front_door().await;
    Mock::given(method("POST"))
        .and(path("/smartlock/1/config"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = run(against(&server, &["set", "1", "ledBrightness", "9"])).await;
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
}

#[tokio::test]
async fn test_entities_filtered_by_platform() {
    let server = server_with_front_door().await;
    let output = run(against(
        &server,
        &["-o", "plain", "entities", "--platform", "lock"],
    ))
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1_lock");
}
