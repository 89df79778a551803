//! CLI integration tests for the clank demo binary
//!
//! These run the real executable, so they cover argv handling, the exit
//! code and which stream each message lands on.

use predicates::prelude::*;

/// Get a command instance for the clank binary
fn clank_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("clank"))
}

// =============================================================================
// Dispatch Tests
// =============================================================================

#[test]
fn test_no_command_prints_all_usage() {
    clank_cmd()
        .assert()
        .code(1)
        .stdout(
            "not enough arguments\n\
             clank echo [OPTIONS]\n\
             clank greet [OPTIONS]\n\
             clank help COMMAND\n\
             clank usage [COMMAND]\n",
        )
        .stderr("");
}

#[test]
fn test_unknown_command() {
    clank_cmd()
        .arg("deploy")
        .assert()
        .code(1)
        .stdout("")
        .stderr("error: Command not found: deploy\n");
}

// =============================================================================
// Built-in Command Tests
// =============================================================================

#[test]
fn test_usage_of_one_command() {
    clank_cmd()
        .args(["usage", "greet"])
        .assert()
        .success()
        .stdout("clank greet [OPTIONS]\nGreet someone.\n");
}

#[test]
fn test_usage_too_many_arguments() {
    clank_cmd()
        .args(["usage", "a", "b"])
        .assert()
        .code(1)
        .stdout("too many arguments\nusage: clank usage [COMMAND]\n");
}

#[test]
fn test_help_for_builtin() {
    clank_cmd()
        .args(["help", "help"])
        .assert()
        .success()
        .stdout("usage: clank help COMMAND\nPrint help text for a command.\n");
}

#[test]
fn test_help_for_argument_command() {
    clank_cmd()
        .args(["help", "greet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("usage: clank greet [OPTIONS]\nOptions:"))
        .stdout(predicate::str::contains("--name <NAME>"))
        .stdout(predicate::str::contains("Greet in capitals"));
}

#[test]
fn test_help_without_command_name() {
    clank_cmd()
        .arg("help")
        .assert()
        .code(1)
        .stdout("not enough arguments\nusage: clank help COMMAND\n");
}

#[test]
fn test_help_for_unknown_command() {
    clank_cmd()
        .args(["help", "nope"])
        .assert()
        .code(1)
        .stderr("error: Command not found: nope\n");
}

// =============================================================================
// Argument Command Tests
// =============================================================================

#[test]
fn test_greet_defaults() {
    clank_cmd()
        .arg("greet")
        .assert()
        .success()
        .stdout("Hello, world!\n");
}

#[test]
fn test_greet_with_options() {
    clank_cmd()
        .args(["greet", "-n", "Ada", "--times", "2", "--shout"])
        .assert()
        .success()
        .stdout("HELLO, ADA!\nHELLO, ADA!\n");
}

#[test]
fn test_greet_invalid_value_reprints_usage() {
    clank_cmd()
        .args(["greet", "--times", "many"])
        .assert()
        .code(1)
        .stdout("invalid value for times: many\nusage: clank greet [OPTIONS]\n");
}

#[test]
fn test_greet_rejects_unknown_option() {
    clank_cmd()
        .args(["greet", "--bogus"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("--bogus"))
        .stdout(predicate::str::ends_with("usage: clank greet [OPTIONS]\n"))
        .stderr("");
}

#[test]
fn test_echo_keeps_unknown_tokens() {
    clank_cmd()
        .args(["echo", "hello", "--loud", "world"])
        .assert()
        .success()
        .stdout("hello --loud world\n");
}

#[test]
fn test_echo_json() {
    clank_cmd()
        .args(["echo", "a", "--json", "-x", "b"])
        .assert()
        .success()
        .stdout("{\"options\":{\"json\":true},\"rest\":[\"a\",\"-x\",\"b\"]}\n");
}
