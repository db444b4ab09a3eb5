/*
[INPUT]:  The built twodo binary, a temp data dir, mocked weather endpoint
[OUTPUT]: End-to-end checks of the one-shot subcommands
[POS]:    Integration tests for CLI mode
[UPDATE]: When adding subcommands or changing their output
*/

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIN: &str = env!("CARGO_BIN_EXE_twodo");

/// A config file that pins storage to the temp dir and turns weather off.
fn write_config(dir: &Path) -> std::path::PathBuf {
    let config_path = dir.join("config.yaml");
    std::fs::write(
        &config_path,
        format!(
            "storage:\n  data_dir: {}\nweather:\n  enabled: false\n",
            dir.join("data").display()
        ),
    )
    .unwrap();
    config_path
}

fn twodo(dir: &Path, args: &[&str]) -> Output {
    let output = Command::new(BIN)
        .arg("--config")
        .arg(write_config(dir))
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to start twodo binary");
    assert!(
        output.status.success(),
        "twodo {:?} exited with {}\nStdout: {}\nStderr: {}",
        args,
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn list_json(dir: &Path, extra: &[&str]) -> Vec<Value> {
    let mut args = vec!["list", "--json"];
    args.extend_from_slice(extra);
    let output = twodo(dir, &args);
    let value: Value = serde_json::from_slice(&output.stdout).expect("list --json prints JSON");
    value.as_array().cloned().unwrap_or_default()
}

fn texts(tasks: &[Value]) -> Vec<&str> {
    tasks.iter().map(|task| task["text"].as_str().unwrap()).collect()
}

#[test]
fn add_toggle_and_list_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    twodo(dir.path(), &["add", "Buy", "milk"]);
    twodo(dir.path(), &["add", "--priority", "high", "Call dad"]);

    let tasks = list_json(dir.path(), &[]);
    assert_eq!(texts(&tasks), vec!["Buy milk", "Call dad"]);
    assert_eq!(tasks[0]["priority"], "low");
    assert_eq!(tasks[1]["priority"], "high");
    assert_eq!(tasks[0]["status"], "pending");

    let id = tasks[0]["id"].as_i64().unwrap().to_string();
    twodo(dir.path(), &["toggle", &id]);

    let done = list_json(dir.path(), &["--filter", "done"]);
    assert_eq!(texts(&done), vec!["Buy milk"]);
    let pending = list_json(dir.path(), &["--filter", "pending"]);
    assert_eq!(texts(&pending), vec!["Call dad"]);

    let stored = std::fs::read_to_string(dir.path().join("data").join("tasks.json")).unwrap();
    let envelope: Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(envelope["version"], 1);
    assert_eq!(envelope["tasks"].as_array().unwrap().len(), 2);
}

#[test]
fn search_and_sort_shape_the_listing() {
    let dir = TempDir::new().unwrap();
    twodo(dir.path(), &["add", "-p", "low", "Buy milk"]);
    twodo(dir.path(), &["add", "-p", "high", "Buy bread"]);
    twodo(dir.path(), &["add", "-p", "medium", "Call dad"]);

    let found = list_json(dir.path(), &["--search", "BUY"]);
    assert_eq!(texts(&found), vec!["Buy milk", "Buy bread"]);

    let sorted = list_json(dir.path(), &["--sort"]);
    assert_eq!(texts(&sorted), vec!["Buy bread", "Call dad", "Buy milk"]);
}

#[test]
fn priority_flag_after_text_is_parsed() {
    let dir = TempDir::new().unwrap();
    twodo(dir.path(), &["add", "Buy", "milk", "--priority", "high"]);
    twodo(dir.path(), &["add", "Call", "dad", "-p", "medium"]);

    let tasks = list_json(dir.path(), &[]);
    assert_eq!(texts(&tasks), vec!["Buy milk", "Call dad"]);
    assert_eq!(tasks[0]["priority"], "high");
    assert_eq!(tasks[1]["priority"], "medium");
}

#[test]
fn edit_rm_and_clear_done() {
    let dir = TempDir::new().unwrap();
    twodo(dir.path(), &["add", "Buy milk"]);
    twodo(dir.path(), &["add", "Call dad"]);
    let tasks = list_json(dir.path(), &[]);
    let first = tasks[0]["id"].as_i64().unwrap().to_string();
    let second = tasks[1]["id"].as_i64().unwrap().to_string();

    twodo(dir.path(), &["edit", &first, "Buy", "oat", "milk"]);
    twodo(dir.path(), &["toggle", &second]);
    let output = twodo(dir.path(), &["clear-done"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Cleared 1"));
    assert_eq!(texts(&list_json(dir.path(), &[])), vec!["Buy oat milk"]);

    twodo(dir.path(), &["rm", &first]);
    assert!(list_json(dir.path(), &[]).is_empty());
}

#[test]
fn unknown_id_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let output = twodo(dir.path(), &["toggle", "42"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No task with id 42"));
}

#[test]
fn plain_listing_shows_summary_line() {
    let dir = TempDir::new().unwrap();
    twodo(dir.path(), &["add", "Water plants"]);
    let output = twodo(dir.path(), &["list"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[ ]"));
    assert!(stdout.contains("Water plants"));
    assert!(stdout.contains("1 shown | 1 pending | 0 done | 1 total"));
}

#[tokio::test]
async fn weather_command_prints_readout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": {"temp": 21.4},
            "weather": [{"main": "Sunny"}],
            "name": "Helsingborg"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = tokio::process::Command::new(BIN)
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--config")
        .arg(write_config(dir.path()))
        .arg("weather")
        .env("RUST_LOG", "error")
        .env("TWODO_WEATHER__BASE_URL", server.uri())
        .env("TWODO_WEATHER__API_KEY", "test-key")
        .output()
        .await
        .expect("Failed to start twodo binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Helsingborg"));
    assert!(stdout.contains("21° ☀ Remember your sunglasses today"));
}

#[test]
fn weather_without_api_key_degrades() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(BIN)
        .arg("--config")
        .arg(write_config(dir.path()))
        .arg("weather")
        .env("RUST_LOG", "error")
        .env_remove("TWODO_WEATHER__API_KEY")
        .output()
        .expect("Failed to start twodo binary");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--°"));
}
