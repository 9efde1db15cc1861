use std::path::PathBuf;
use std::process::Command;

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "usports-cli-{label}-{}.json",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/team_mens.json")
}

fn fixture_command(datasets: &str, output: &PathBuf) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_usports-scraper"));
    command
        .args(["--source", "fixture", "--fixture"])
        .arg(fixture())
        .args([
            "--datasets",
            datasets,
            "--base-url",
            "http://fixture.local",
            "--retries",
            "1",
            "--timeout-secs",
            "5",
            "--report",
            "json",
            "--output",
        ])
        .arg(output);
    command
}

fn read_json(path: &PathBuf) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("read output");
    serde_json::from_str(&content).expect("parse output")
}

#[test]
fn cli_list_datasets_prints_keys() {
    let output = Command::new(env!("CARGO_BIN_EXE_usports-scraper"))
        .arg("--list-datasets")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available datasets"));
    for key in ["team-mens", "team-womens", "player-mens", "player-womens"] {
        assert!(stdout.contains(key), "missing {key}");
    }
}

#[test]
fn cli_fixture_run_writes_assembled_document() {
    let output_path = temp_path("team-mens");
    let output = fixture_command("team-mens", &output_path)
        .output()
        .expect("run cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value = read_json(&output_path);
    let acadia = &value["team"]["mens"]["Acadia"];
    assert_eq!(acadia["games_played"], "24");
    assert_eq!(acadia["field_goals"], "10.0");
    assert_eq!(acadia["total_wins"], "18");
    assert_eq!(acadia["streak"], "W2");
    assert_eq!(acadia["conference"], "AUS");
    assert_eq!(value["team"]["mens"]["UBC"]["def_efficiency"], "81.1");
    assert_eq!(value["team"]["mens"]["UBC"]["conference"], "CW");
    assert_eq!(value["season"], "2023-24");
    assert_eq!(value["completeness"][0]["dataset"]["subject"], "team");
    assert_eq!(value["completeness"][0]["complete"], true);
    assert_eq!(value["completeness"][0]["entities"], 2);
}

#[test]
fn cli_exits_non_zero_when_a_dataset_is_incomplete() {
    let output_path = temp_path("partial");
    let output = fixture_command("team-mens,team-womens", &output_path)
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));

    let value = read_json(&output_path);
    assert!(value["team"]["mens"]["Acadia"].is_object());
    assert!(value["team"]["womens"].as_object().unwrap().is_empty());
    let completeness = value["completeness"].as_array().unwrap();
    assert_eq!(completeness.len(), 2);
    assert_eq!(completeness[1]["complete"], false);
    assert!(completeness[1]["failure"].as_str().unwrap().contains("wbkb"));
}

#[test]
fn cli_fixture_source_requires_a_fixture() {
    let output = Command::new(env!("CARGO_BIN_EXE_usports-scraper"))
        .args(["--source", "fixture", "--datasets", "team-mens"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--fixture"));
}
