//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();

    temp.lull()
        .args(&["--help"])
        .passes()
        .stdout_has("watch")
        .stdout_has("check");
}

#[test]
fn version_is_printed() {
    let temp = Project::empty();

    temp.lull()
        .args(&["--version"])
        .passes()
        .stdout_has("lull");
}

#[test]
fn watch_help_documents_configuration_flags() {
    let temp = Project::empty();

    temp.lull()
        .args(&["watch", "--help"])
        .passes()
        .stdout_has("--watch-folder")
        .stdout_has("--webhook-url")
        .stdout_has("--upload-timeout")
        .stdout_has("--size-limit")
        .stdout_has("LULL_WEBHOOK_URL");
}

#[test]
fn missing_command_fails() {
    let temp = Project::empty();

    temp.lull().fails().stderr_has("Usage");
}
