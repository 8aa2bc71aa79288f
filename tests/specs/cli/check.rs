//! `lull check` specs
//!
//! Verify configuration is layered, validated, and reported.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn check_prints_resolved_settings_with_defaults() {
    let temp = Project::empty();
    let watched = temp.watched();

    temp.lull()
        .args(&[
            "check",
            "--watch-folder",
            watched.to_str().unwrap(),
            "--webhook-url",
            WEBHOOK,
        ])
        .passes()
        .stdout_has("webhook_url:    http://127.0.0.1:9/hook")
        .stdout_has(r"file_regex:     .*\.demo$")
        .stdout_has("upload_timeout: 5m")
        .stdout_has("http_timeout:   2m")
        .stdout_has("log_file:       stderr");
}

#[test]
fn check_json_is_machine_readable() {
    let temp = Project::empty();
    let watched = temp.watched();

    let run = temp
        .lull()
        .args(&[
            "check",
            "--json",
            "--watch-folder",
            watched.to_str().unwrap(),
            "--webhook-url",
            WEBHOOK,
            "--size-limit",
            "0B",
            "--upload-timeout",
            "90s",
        ])
        .passes();

    let json: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(json["watch_folder"], watched.to_str().unwrap());
    assert_eq!(json["upload_timeout"], "1m 30s");
    assert_eq!(json["size_limit"], serde_json::Value::Null);
}

#[test]
fn environment_variables_configure_lull() {
    let temp = Project::empty();
    let watched = temp.watched();

    temp.lull()
        .env("LULL_WATCH_FOLDER", watched.to_str().unwrap())
        .env("LULL_WEBHOOK_URL", WEBHOOK)
        .env("LULL_FILE_REGEX", r"\.rec$")
        .args(&["check"])
        .passes()
        .stdout_has(r"file_regex:     \.rec$");
}

#[test]
fn flags_override_config_file_and_environment() {
    let temp = Project::empty();
    let watched = temp.watched();
    let config = temp.file(
        "lull.toml",
        &format!(
            "watch_folder = \"{}\"\nwebhook_url = \"{}\"\nupload_timeout = \"1h\"\nhttp_timeout = \"10s\"\n",
            watched.display(),
            WEBHOOK
        ),
    );

    temp.lull()
        .env("LULL_UPLOAD_TIMEOUT", "20m")
        .args(&[
            "check",
            "--config",
            config.to_str().unwrap(),
            "--http-timeout",
            "30s",
        ])
        .passes()
        .stdout_has("upload_timeout: 20m")
        .stdout_has("http_timeout:   30s");
}

#[test]
fn missing_webhook_url_fails() {
    let temp = Project::empty();
    let watched = temp.watched();

    temp.lull()
        .args(&["check", "--watch-folder", watched.to_str().unwrap()])
        .fails()
        .stderr_has("webhook_url is required");
}

#[test]
fn missing_watch_folder_fails() {
    let temp = Project::empty();
    let missing = temp.path().join("nowhere");

    temp.lull()
        .args(&[
            "check",
            "--watch-folder",
            missing.to_str().unwrap(),
            "--webhook-url",
            WEBHOOK,
        ])
        .fails()
        .stderr_has("invalid watch_folder");
}

#[test]
fn bad_size_limit_fails() {
    let temp = Project::empty();
    let watched = temp.watched();

    temp.lull()
        .args(&[
            "check",
            "--watch-folder",
            watched.to_str().unwrap(),
            "--webhook-url",
            WEBHOOK,
            "--size-limit",
            "lots",
        ])
        .fails()
        .stderr_has("invalid size_limit");
}

#[test]
fn watch_rejects_invalid_configuration_before_starting() {
    let temp = Project::empty();

    temp.lull()
        .args(&["watch", "--webhook-url", WEBHOOK])
        .fails()
        .stderr_has("watch_folder is required");
}
