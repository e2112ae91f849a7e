use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("quran-assistant").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: quran-assistant <COMMAND>"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("--help"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("quran-assistant").unwrap();
    cmd.arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: quran-assistant serve"))
        .stdout(predicate::str::contains("--port <PORT>"))
        .stdout(predicate::str::contains("--host <HOST>"))
        .stdout(predicate::str::contains("--templates <TEMPLATES>"))
        .stdout(predicate::str::contains("--model <MODEL>"))
        .stdout(predicate::str::contains("--timeout-secs <TIMEOUT_SECS>"));
}

#[test]
fn test_cli_serve_rejects_zero_timeout() {
    let mut cmd = Command::cargo_bin("quran-assistant").unwrap();
    cmd.current_dir(std::env::temp_dir())
        .env_remove("QURAN_ASSISTANT_TIMEOUT_SECS")
        .arg("serve")
        .arg("--timeout-secs")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value '0' for '--timeout-secs <TIMEOUT_SECS>'"));
}

#[test]
fn test_cli_has_no_ask_command() {
    let mut cmd = Command::cargo_bin("quran-assistant").unwrap();
    cmd.arg("ask")
        .arg("What does the Quran say about patience?")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand 'ask'"));
}

#[test]
fn test_cli_no_command() {
    let mut cmd = Command::cargo_bin("quran-assistant").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage: quran-assistant <COMMAND>"));
}
