//! Integration tests for the `roster` CLI binary.
//!
//! Argument parsing, help output, shell completions, and the list/add
//! commands against a wiremock directory. Nothing touches the network or
//! the user's real configuration.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `roster` binary with env isolation.
///
/// Clears all `ROSTER_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn roster_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("roster");
    cmd.env("HOME", "/tmp/roster-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/roster-cli-test-nonexistent")
        .env_remove("ROSTER_CONFIG")
        .env_remove("ROSTER_LIST_URL")
        .env_remove("ROSTER_CREATE_URL")
        .env_remove("ROSTER_TIMEOUT")
        .env_remove("ROSTER_OUTPUT")
        .env_remove("ROSTER_DEFAULTS__COLOR")
        .env_remove("RUST_LOG");
    cmd
}

/// Point both endpoints at a mock server.
fn against(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = roster_cmd();
    cmd.env("ROSTER_LIST_URL", format!("{}/users", server.uri()))
        .env("ROSTER_CREATE_URL", format!("{}/posts", server.uri()));
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn directory_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Alice", "username": "alice1", "email": "a@x.com" },
            { "id": 2, "name": "bob", "username": "bobby", "email": "b@x.com" },
            { "id": 10, "name": "Carl", "username": "carl3", "email": "c@x.com" }
        ])))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = roster_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    roster_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("JSON endpoint")
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("add"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    roster_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("roster"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    roster_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    roster_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("roster.toml");
    let file_arg = file.to_str().unwrap();

    roster_cmd()
        .args(["--config", file_arg, "config", "init"])
        .assert()
        .success();
    assert!(file.exists());

    roster_cmd()
        .args(["--config", file_arg, "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[endpoint]")
                .and(predicate::str::contains("jsonplaceholder.typicode.com/users")),
        );

    // A second init without --force refuses to clobber.
    roster_cmd()
        .args(["--config", file_arg, "config", "init"])
        .assert()
        .code(6);
}

#[test]
fn test_config_init_uses_configured_color() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("roster.toml");

    roster_cmd()
        .env("ROSTER_DEFAULTS__COLOR", "always")
        .args(["--config", file.to_str().unwrap(), "config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\u{1b}[").and(predicate::str::contains("Wrote")));
}

#[test]
fn test_config_path_honours_flag() {
    roster_cmd()
        .args(["--config", "/tmp/somewhere/roster.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/somewhere/roster.toml"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = roster_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_sort_field() {
    roster_cmd()
        .args(["list", "--sort", "phone"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_add_missing_flag_is_usage_error() {
    roster_cmd()
        .args(["add", "--name", "Carl", "--username", "carl3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--email"));
}

#[test]
fn test_list_unreachable_endpoint() {
    roster_cmd()
        .args([
            "--list-url",
            "http://127.0.0.1:1/users",
            "--create-url",
            "http://127.0.0.1:1/posts",
            "list",
        ])
        .assert()
        .code(7);
}

// ── Against a mock directory ────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_search_and_sort() {
    let server = directory_server().await;

    let output = against(&server)
        .args(["-o", "plain", "list", "--search", "ALI"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");

    let output = against(&server)
        .args(["-o", "plain", "list", "--sort", "name", "--desc"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2\n10\n1");

    let output = against(&server)
        .args(["-o", "plain", "list", "--sort", "id", "--desc"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "10\n2\n1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_table_and_json() {
    let server = directory_server().await;

    against(&server)
        .args(["list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Username")
                .and(predicate::str::contains("alice1"))
                .and(predicate::str::contains("c@x.com")),
        );

    let output = against(&server)
        .args(["-o", "json-compact", "list", "-s", "bob"])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        parsed,
        json!([{ "id": 2, "name": "bob", "username": "bobby", "email": "b@x.com" }])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    against(&server)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_posts_and_prints_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3, "name": "Carl", "username": "carl3", "email": "c@x.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    against(&server)
        .args([
            "-o",
            "plain",
            "add",
            "--name",
            "Carl",
            "--username",
            "carl3",
            "--email",
            "c@x.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_empty_field_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    against(&server)
        .args(["add", "--name", "Carl", "--username", "", "--email", "c@x.com"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--username"));
}
