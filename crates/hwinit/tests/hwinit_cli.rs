// tests/hwinit_cli.rs

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::fs;

fn hwinit() -> Command {
    let mut cmd = Command::cargo_bin("hwinit").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_init_in_current_directory() {
    let temp = TempDir::new().unwrap();

    hwinit()
        .current_dir(temp.path())
        .args(["--name", "net1_hw4"])
        .assert()
        .success()
        .stderr(predicate::str::contains("initialized"));

    temp.child(".hwconfig.json").assert("");
    temp.child("CMakeLists.txt")
        .assert("cmake_minimum_required(VERSION 3.7)\nproject(net1_hw4)\n");
    temp.child(".gitignore")
        .assert(predicate::str::contains("cmake-build*/\n/stage/\n"));
}

#[test]
fn test_positional_directory_is_created() {
    let temp = TempDir::new().unwrap();
    hwinit()
        .current_dir(temp.path())
        .arg("hw7")
        .assert()
        .success();
    assert!(temp.path().join("hw7/.hwconfig.json").is_file());
    assert!(fs::read_to_string(temp.path().join("hw7/CMakeLists.txt"))
        .unwrap()
        .contains("project(hw)"));
}

#[test]
fn test_already_initialized_exits_1() {
    let temp = TempDir::new().unwrap();
    temp.child(".hwconfig.json").write_str("").unwrap();

    hwinit()
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert!(!temp.path().join("CMakeLists.txt").exists());

    hwinit()
        .current_dir(temp.path())
        .arg("--unsafe")
        .assert()
        .success();
    assert!(temp.path().join("CMakeLists.txt").is_file());
}
