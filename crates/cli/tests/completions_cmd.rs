use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn bash_completion_script_names_subcommands() {
    Command::new(assert_cmd::cargo::cargo_bin!("smig"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("smig"))
        .stdout(predicate::str::contains("convert-batch"))
        .stdout(predicate::str::contains("transcript"));
}

#[test]
fn help_lists_commands() {
    Command::new(assert_cmd::cargo::cargo_bin!("smig"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("content-types"));
}
