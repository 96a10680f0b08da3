// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn paradiff(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("paradiff"));
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn similarity_of_identical_texts_is_one() {
    let dir = TempDir::new().expect("tempdir");
    paradiff(&dir)
        .args([
            "similarity",
            "The vendor must ship on time.",
            "the vendor MUST ship on time",
            "--provider",
            "hashing",
        ])
        .assert()
        .success()
        .stdout("1.0000\n");
}

#[test]
fn similarity_json_output() {
    let dir = TempDir::new().expect("tempdir");
    let assert = paradiff(&dir)
        .args([
            "--format",
            "json",
            "similarity",
            "apples and pears",
            "quarterly tax filing deadline",
            "--provider",
            "hashing",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let json: Value = serde_json::from_str(&stdout).expect("json");

    assert_eq!(json["model"], "hashing-512");
    let score = json["similarity"].as_f64().expect("score");
    assert!((0.0..0.75).contains(&score), "score {}", score);
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().expect("tempdir");
    paradiff(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("paradiff"));
}
