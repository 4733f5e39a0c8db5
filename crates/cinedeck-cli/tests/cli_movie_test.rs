#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};

/// Writes a config pointing both endpoints at the mock server.
fn write_mock_config(dir: &Path, server: &wiremock::MockServer) {
    let content = format!(
        "[tmdb]\nbase_url = \"{uri}/3/\"\n\n[file_search]\nbase_url = \"{uri}/0:search\"\ntimeout_secs = 5\n",
        uri = server.uri()
    );
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_movie_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.args(["movie", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("view"));
}

#[test]
fn test_movie_show_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.args(["movie", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_movie_show_rejects_non_numeric_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.args(["movie", "show", "--id", "top-gun"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_movie_show_requires_token() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.env_remove("TMDB_API_TOKEN")
        .arg("--dir")
        .arg(dir.path())
        .args(["movie", "show", "--id", "361743"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "TMDB_API_TOKEN environment variable is required",
        ));
}

#[test]
fn test_config_path_with_dir() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cargo_bin_cmd!("cinedeck")
        .arg("--dir")
        .arg(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("config.toml").exists());

    cargo_bin_cmd!("cinedeck")
        .arg("--dir")
        .arg(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cargo_bin_cmd!("cinedeck")
        .arg("--dir")
        .arg(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedeck");
    cmd.args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cinedeck"));
}

#[tokio::test]
async fn test_movie_show_renders_page() {
    // Arrange
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/3/movie/361743"))
        .and(wiremock::matchers::query_param("append_to_response", "videos"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(include_str!(
            "../../../fixtures/tmdb/movie_details_361743.json"
        )))
        .mount(&server)
        .await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/3/search/movie"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(include_str!(
            "../../../fixtures/tmdb/search_movie_top_gun.json"
        )))
        .mount(&server)
        .await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/0:search"))
        .and(wiremock::matchers::query_param("q", "Top Gun: Maverick"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(include_str!(
            "../../../fixtures/filesearch/search_top_gun.json"
        )))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_mock_config(dir.path(), &server);

    // Act & Assert
    cargo_bin_cmd!("cinedeck")
        .env("TMDB_API_TOKEN", "test-token")
        .env("RUST_LOG", "info")
        .arg("--dir")
        .arg(dir.path())
        .args(["movie", "show", "--id", "361743"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top Gun: Maverick"))
        .stdout(predicate::str::contains("May 27, 2022"))
        .stdout(predicate::str::contains("2h 11m"))
        .stdout(predicate::str::contains("Action, Drama"))
        .stdout(predicate::str::contains("Rating: 8.3/10 (091k votes)"))
        .stdout(predicate::str::contains(
            "Trailer: https://www.youtube.com/embed/giXco2jaZ_4",
        ))
        .stdout(predicate::str::contains("1080p.WEBRip.x264.mkv"));
}

#[tokio::test]
async fn test_movie_show_failed_fetch_reports_no_data() {
    // Arrange
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/3/movie/999"))
        .respond_with(wiremock::ResponseTemplate::new(404).set_body_string(
            r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#,
        ))
        .mount(&server)
        .await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/3/search/movie"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(include_str!(
            "../../../fixtures/tmdb/search_movie_top_gun.json"
        )))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_mock_config(dir.path(), &server);

    // Act & Assert
    cargo_bin_cmd!("cinedeck")
        .env("TMDB_API_TOKEN", "test-token")
        .env("RUST_LOG", "info")
        .arg("--dir")
        .arg(dir.path())
        .args(["movie", "show", "--id", "999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data available for movie 999"))
        .stdout(predicate::str::contains("Download:").not());
}
