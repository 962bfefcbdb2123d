//! Integration tests for the `slots` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run the generate, page and month
//! subcommands through the actual binary.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: path to a file under tests/fixtures.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: `slots generate` for 09:00-17:00 New York on 2026-03-02.
fn generate() -> Command {
    let mut cmd = Command::cargo_bin("slots").unwrap();
    cmd.args([
        "generate",
        "--date",
        "2026-03-02",
        "--start",
        "09:00",
        "--end",
        "17:00",
        "--host-zone",
        "America/New_York",
    ]);
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// generate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn generate_lists_sixteen_half_hour_slots() {
    let output = generate().args(["--duration", "30"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 16);
    assert!(lines[0].starts_with("09:00am"));
    assert!(lines[0].ends_with("2026-03-02T14:00:00+00:00"));
    assert!(lines[15].starts_with("04:30pm"));
}

#[test]
fn generate_json_output() {
    let value = stdout_json(generate().args(["--duration", "30", "--format", "json"]));
    let slots = value.as_array().unwrap();

    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0]["start"], "2026-03-02T14:00:00+00:00");
    assert_eq!(slots[0]["local"], "2026-03-02T09:00:00-05:00");
    assert_eq!(slots[0]["label"], "09:00am");
}

#[test]
fn generate_subtracts_busy_file() {
    let value = stdout_json(generate().args([
        "--duration",
        "30",
        "--format",
        "json",
        "--busy",
        &fixture("busy.json"),
    ]));
    let labels: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();

    assert_eq!(labels.len(), 14);
    assert!(!labels.contains(&"10:00am"));
    assert!(!labels.contains(&"10:30am"));
    assert!(labels.contains(&"11:00am"));
}

#[test]
fn generate_reads_busy_array_from_stdin() {
    let busy = json!([{ "start": "2026-03-02T14:00:00Z", "end": "2026-03-02T22:00:00Z" }]);

    generate()
        .args(["--duration", "30", "--busy", "-"])
        .write_stdin(busy.to_string())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn generate_minute_rule_and_exact_rule() {
    // Busy from 10:00:30: blocked by minute match, free under exact match.
    generate()
        .args(["--duration", "30", "--busy", &fixture("busy_seconds.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("10:00am").not());

    generate()
        .args([
            "--duration",
            "30",
            "--busy",
            &fixture("busy_seconds.json"),
            "--exact-start",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("10:00am"));
}

#[test]
fn generate_for_viewer_in_other_zone() {
    generate()
        .args(["--duration", "60", "--viewer-zone", "Asia/Tokyo", "--24h"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("23:00"));
}

/// Helper: `slots generate` for 09:00-10:00 with 45 minute slots, JSON output.
fn short_window() -> Command {
    let mut cmd = Command::cargo_bin("slots").unwrap();
    cmd.args([
        "generate",
        "--date",
        "2026-03-02",
        "--start",
        "09:00",
        "--end",
        "10:00",
        "--host-zone",
        "America/New_York",
        "--duration",
        "45",
        "--format",
        "json",
    ]);
    cmd
}

#[test]
fn generate_fit_window_drops_overrun() {
    let loose = stdout_json(&mut short_window());
    assert_eq!(loose.as_array().unwrap().len(), 2);

    let strict = stdout_json(short_window().arg("--fit-window"));
    assert_eq!(strict.as_array().unwrap().len(), 1);
}

#[test]
fn generate_rejects_zero_duration() {
    generate()
        .args(["--duration", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn generate_rejects_inverted_window() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "--date",
            "2026-03-02",
            "--start",
            "17:00",
            "--end",
            "09:00",
            "--host-zone",
            "America/New_York",
            "--duration",
            "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid working window"));
}

#[test]
fn generate_rejects_unknown_zone() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "--date",
            "2026-03-02",
            "--start",
            "09:00",
            "--end",
            "17:00",
            "--host-zone",
            "Moon/Tranquility",
            "--duration",
            "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

// ─────────────────────────────────────────────────────────────────────────────
// month
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn month_marks_past_days() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["month", "--now", "2026-03-11T12:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("March 2026"))
        .stdout(predicate::str::contains("(10)"))
        .stdout(predicate::str::contains(" 11 "));
}

#[test]
fn month_offset_json() {
    let value = stdout_json(Command::cargo_bin("slots").unwrap().args([
        "month",
        "--now",
        "2026-11-20T12:00:00Z",
        "--offset",
        "3",
        "--format",
        "json",
    ]));

    assert_eq!(value["year"], 2027);
    assert_eq!(value["month"], 2);
    assert_eq!(value["days"].as_array().unwrap().len(), 28);
    assert_eq!(value["can_go_back"], true);
}

// ─────────────────────────────────────────────────────────────────────────────
// page
// ─────────────────────────────────────────────────────────────────────────────

/// Write a page config pointing at `api` into a temp file and return its path.
fn write_config(api: &str, name: &str) -> String {
    let path = std::env::temp_dir().join(format!("slots-cli-test-{}.toml", name));
    let content = format!(
        r#"
[api]
base_url = "{}"
timeout_secs = 5

[site]
base_url = "https://book.example.com"

[viewer]
time_zone = "America/New_York"
hour_format = "12h"

[[hosts]]
username = "alice"
name = "Alice Example"
timeZone = "America/New_York"
startTime = 540
endTime = 1020

[[event_types]]
id = 1
title = "Intro call"
length = 30
"#,
        api
    );
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[tokio::test(flavor = "multi_thread")]
async fn page_lists_booking_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/availability/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "primary": { "busy": [
                { "start": "2026-03-02T15:00:00Z", "end": "2026-03-02T16:00:00Z" }
            ] }
        })))
        .mount(&server)
        .await;
    let config = write_config(&server.uri(), "links");

    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "page",
            "--config",
            &config,
            "--user",
            "alice",
            "--event-type",
            "1",
            "--date",
            "2026-03-02",
            "--now",
            "2026-03-01T12:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Intro call | Alice Example"))
        .stdout(predicate::str::contains("Monday 02 March 2026"))
        .stdout(predicate::str::contains(
            "https://book.example.com/alice/book?date=2026-03-02T14:00:00Z&type=1",
        ))
        .stdout(predicate::str::contains("type=1").count(14));
}

#[tokio::test(flavor = "multi_thread")]
async fn page_fails_visibly_when_service_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let config = write_config(&server.uri(), "failing");

    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "page",
            "-c",
            &config,
            "-u",
            "alice",
            "-e",
            "1",
            "--date",
            "2026-03-02",
            "--now",
            "2026-03-01T12:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load availability"));
}

#[test]
fn page_unknown_user_fails() {
    let config = write_config("http://127.0.0.1:9", "unknown-user");

    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "page",
            "-c",
            &config,
            "-u",
            "mallory",
            "-e",
            "1",
            "--date",
            "2026-03-02",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown user: mallory"));
}
