mod common;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;

use common::conflict_script;

fn cmd() -> Command {
    Command::cargo_bin("stockout").unwrap()
}

#[test]
fn plays_a_full_game_from_stdin() {
    cmd()
        .args(["--coin", "heads"])
        .write_stdin(conflict_script().text())
        .assert()
        .success()
        .stdout(contains("=== Part one: the elimination game ==="))
        .stdout(contains("Final stock: 🟥1 / 🟦0 / 🟨0"))
        .stdout(contains("Ending: Open-conflict ending"));
}

#[test]
fn forced_tails_twists() {
    cmd()
        .args(["--coin", "tails"])
        .write_stdin(conflict_script().text())
        .assert()
        .success()
        .stdout(contains("tails"))
        .stdout(contains("Ending: Alliance ending"));
}

#[test]
fn json_summary_follows_the_narration() {
    let out = cmd()
        .args(["--coin", "heads", "--json"])
        .write_stdin(conflict_script().text())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let start = text.rfind("\n{").expect("json object after narration");
    let summary: Value = serde_json::from_str(&text[start..]).expect("valid json summary");
    assert_eq!(summary["ending"], "OpenConflict");
    assert_eq!(summary["coin"], "Heads");
    assert_eq!(summary["world"]["score"]["R"], 1);
    assert_eq!(summary["nations"][1]["weakness_color"], "B");
}

#[test]
fn seed_makes_the_coin_repeatable() {
    let run = || {
        let out = cmd()
            .args(["--seed", "1234"])
            .write_stdin(conflict_script().text())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let text = String::from_utf8(out).unwrap();
        text.lines()
            .find(|l| l.starts_with("Incident coin toss"))
            .map(str::to_string)
    };
    let first = run();
    assert!(first.is_some());
    assert_eq!(first, run());
}

#[test]
fn explicit_config_changes_the_rules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        concat!(
            "[rules]\nlong_phrase_limit = 200\n\n",
            "[elimination]\nstages = [\"Sea\", \"Land\", \"Sky\", \"Home\", \"Pocket\"]\n",
        ),
    )
    .unwrap();
    // with a huge limit the long turn-5 speech keeps its R and resonates
    cmd()
        .args(["--coin", "heads", "--config"])
        .arg(&path)
        .write_stdin(conflict_script().text())
        .assert()
        .success()
        .stdout(contains("--- Pocket ---"))
        .stdout(contains("Final stock: 🟥2 / 🟦0 / 🟨0"));
}

#[test]
fn missing_config_fails() {
    cmd()
        .args(["--config", "no-such-dir/stockout.toml"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("loading config"));
}

#[test]
fn closed_stdin_fails_cleanly() {
    cmd()
        .args(["--coin", "heads"])
        .write_stdin("North\nSouth\n")
        .assert()
        .failure()
        .stderr(contains("input closed"));
}
