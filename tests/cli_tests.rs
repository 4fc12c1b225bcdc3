//! CLI integration tests for the pomoclock binary.
//!
//! Exercises the compiled binary end to end: help and version output,
//! completion generation, and the prompt-driven terminal front-end fed
//! through stdin.

use assert_cmd::Command;
use predicates::prelude::*;

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("pomoclock")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("term"))
        .stdout(predicate::str::contains("app"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_no_args_shows_help() {
    Command::cargo_bin("pomoclock")
        .unwrap()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("pomoclock")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pomoclock"));
}

#[test]
fn test_unknown_subcommand_fails() {
    Command::cargo_bin("pomoclock")
        .unwrap()
        .arg("bogus")
        .assert()
        .failure();
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    Command::cargo_bin("pomoclock")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomoclock"));
}

#[test]
fn test_completions_invalid_shell_fails() {
    Command::cargo_bin("pomoclock")
        .unwrap()
        .args(["completions", "powershell9000"])
        .assert()
        .failure();
}

// ============================================================================
// Terminal Front-End
// ============================================================================

#[test]
fn test_term_prompts_for_durations() {
    // Close stdin after the first two answers; the binary must fail
    // cleanly instead of hanging.
    Command::cargo_bin("pomoclock")
        .unwrap()
        .arg("term")
        .write_stdin("25\n5\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Enter work session duration (minutes): ",
        ))
        .stdout(predicate::str::contains("Enter break duration (minutes): "))
        .stdout(predicate::str::contains("Enter number of cycles: "));
}

#[test]
fn test_term_closed_stdin_fails() {
    Command::cargo_bin("pomoclock")
        .unwrap()
        .arg("term")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input closed"));
}

#[test]
fn test_term_reprompts_on_invalid_input() {
    Command::cargo_bin("pomoclock")
        .unwrap()
        .arg("term")
        .write_stdin("abc\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please enter valid numeric values."));
}

#[test]
fn test_term_rejects_value_flags() {
    Command::cargo_bin("pomoclock")
        .unwrap()
        .args(["term", "--work", "25"])
        .assert()
        .failure();
}
