//! Exit-code behaviour of the `nachrichten` binary for bad arguments.
//!
//! None of these reach the network.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nachrichten"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to spawn nachrichten")
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("usage: "), "stderr was {stderr:?}");
    assert!(stderr.trim_end().ends_with("[tagesschau|heute]"));
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn test_unknown_broadcast_prints_usage() {
    let output = run(&["foo"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("[tagesschau|heute]"));
}

#[test]
fn test_invalid_date_prints_usage() {
    let output = run(&["heute", "--date", "yesterday"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: "));
}

#[test]
fn test_help_exits_zero() {
    let output = run(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tagesschau"));
    assert!(stdout.contains("heute"));
}
