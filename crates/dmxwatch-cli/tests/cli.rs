use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("dmxwatch"))
}

#[test]
fn help_lists_watch_and_log() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("watch").and(contains("log")));
}

#[test]
fn watch_help_documents_keys() {
    cmd()
        .arg("watch")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--universe").and(contains("quit")));
}

#[test]
fn log_help_documents_limit() {
    cmd()
        .arg("log")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--limit"));
}

#[test]
fn version_is_available() {
    cmd().arg("--version").assert().success();
}

#[test]
fn invalid_listen_address_is_rejected() {
    cmd()
        .arg("log")
        .arg("--listen")
        .arg("not-an-address")
        .assert()
        .failure()
        .stderr(contains("invalid value"));
}

#[test]
fn universe_outside_u16_is_rejected() {
    cmd()
        .arg("watch")
        .arg("--universe")
        .arg("70000")
        .assert()
        .failure()
        .stderr(contains("invalid value"));
}

#[test]
fn log_with_zero_limit_exits_after_bind() {
    cmd()
        .arg("log")
        .arg("--listen")
        .arg("127.0.0.1")
        .arg("--port")
        .arg("0")
        .arg("--limit")
        .arg("0")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stderr(contains("listening on udp 127.0.0.1:"));
}
