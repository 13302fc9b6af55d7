use std::path::Path;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;

fn pulse(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pulse").unwrap();
    cmd.env_remove("PULSE_CONFIG")
        .env_remove("PULSE_STORE_URL")
        .env_remove("PULSE_STORE_TOKEN")
        .env_remove("PULSE_JOBS_URL")
        .env_remove("PULSE_WEBHOOK_URL")
        .env_remove("ANTHROPIC_API_KEY")
        .env("RUST_LOG", "off")
        .arg("--work-dir")
        .arg(dir)
        .arg("--store-root")
        .arg(dir.join("store"));
    cmd
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("pulse")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("comments"))
        .stdout(predicate::str::contains("news"))
        .stdout(predicate::str::contains("digest"))
        .stdout(predicate::str::contains("dispatch"));
}

#[test]
fn unreadable_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("pulse.json");
    std::fs::write(&cfg, "{ not json").unwrap();

    pulse(dir.path())
        .arg("--config")
        .arg(&cfg)
        .arg("news")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing config"));
}

#[test]
fn dispatch_without_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    pulse(dir.path())
        .args(["dispatch", "--jobs-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dispatch.image_uri is empty"));
}

#[test]
fn digest_requires_api_key() {
    let dir = tempfile::tempdir().unwrap();
    pulse(dir.path())
        .args(["digest", "--bucket", "in", "--key", "csv/a.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ANTHROPIC_API_KEY"));
}

#[test]
fn comments_fail_without_browser() {
    let dir = tempfile::tempdir().unwrap();
    pulse(dir.path())
        .args(["comments", "--webdriver", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("starting browser session"));
}

#[test]
fn news_run_stages_table_in_store() {
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET).path("/news/");
        then.status(200).body(pulse_mock::fixtures::NEWS_PAGE);
    });

    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("pulse.json");
    let body = serde_json::json!({ "news": { "url": server.url("/news/") } });
    std::fs::write(&cfg, body.to_string()).unwrap();

    pulse(dir.path())
        .arg("--config")
        .arg(&cfg)
        .arg("news")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"items\": 2"));

    page.assert();
    let csv_dir = dir.path().join("store/news-scraped-data/csv");
    let tables: Vec<_> = std::fs::read_dir(&csv_dir).unwrap().collect();
    assert_eq!(tables.len(), 1);
}
