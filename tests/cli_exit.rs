use std::path::Path;
use std::process::Output;

use serde_json::{json, Value};
use tempfile::tempdir;
use tokio::process::Command;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn anifetch(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_anifetch"))
        .args(args)
        .current_dir(dir)
        .env_remove("ANIFETCH_ENDPOINT")
        .output()
        .await
        .unwrap()
}

fn output_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("anime-") && name.ends_with(".json"))
        .collect()
}

#[tokio::test]
async fn malformed_ranges_exit_with_one_and_write_nothing() {
    let server = MockServer::start().await;
    let uri = server.uri();

    for range in ["5-3", "0-5", "-1-5", "-4", "abc"] {
        let dir = tempdir().unwrap();

        let out = anifetch(dir.path(), &[range, "--endpoint", uri.as_str()]).await;

        assert_eq!(out.status.code(), Some(1), "range {range:?}");
        assert!(String::from_utf8_lossy(&out.stderr).contains("Usage: anifetch"));
        assert!(output_files(dir.path()).is_empty(), "range {range:?}");
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unexpected_arguments_exit_with_one() {
    let dir = tempdir().unwrap();

    let out = anifetch(dir.path(), &["1-2", "3-4"]).await;

    assert_eq!(out.status.code(), Some(1));
    assert!(output_files(dir.path()).is_empty());
}

#[tokio::test]
async fn help_exits_cleanly() {
    let dir = tempdir().unwrap();

    let out = anifetch(dir.path(), &["--help"]).await;

    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--per-page"));
}

#[tokio::test]
async fn failed_pages_still_exit_with_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "page": 1 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "Page": { "media": [{ "id": 1 }, { "id": 2 }, { "id": 3 }] } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "page": 2 } })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let uri = server.uri();

    let out = anifetch(
        dir.path(),
        &["1-2", "--endpoint", uri.as_str(), "--delay-ms", "0"],
    )
    .await;

    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed pages: 2"));
    assert_eq!(output_files(dir.path()), vec!["anime-1-2.json".to_string()]);
    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("anime-1-2.json")).unwrap())
            .unwrap();
    assert_eq!(saved, json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }]));
}
