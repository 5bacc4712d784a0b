use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use web_checks::checks::string::{self, CheckInput, Staging};
use web_checks::console::plugins::string::check;
use web_checks::probe::status::ServiceState;

use crate::common::fixtures::{fetcher, not_found, serving};
use crate::common::http::Environment;

const PAGE: &str = "<html><head><title>Cranleigh School</title></head><body>Welcome</body></html>";

fn input(env: &Environment, needle: &str, staging: Staging) -> CheckInput {
    CheckInput {
        url: env.url("/"),
        needle: needle.to_string(),
        staging,
    }
}

#[tokio::test]
async fn it_should_be_ok_when_the_string_is_present() {
    let env = Environment::start(serving("/", PAGE.to_string())).await;

    let verdict = string::run(&fetcher(Duration::from_secs(5)), &input(&env, "Welcome", Staging::InMemory)).await;

    assert_eq!(verdict.status_line(), "OK - String Found");
    assert_eq!(verdict.exit_code(), 0);

    env.stop();
}

#[tokio::test]
async fn it_should_be_critical_when_the_string_is_absent() {
    let env = Environment::start(serving("/", PAGE.to_string())).await;

    let verdict = string::run(&fetcher(Duration::from_secs(5)), &input(&env, "Maintenance", Staging::InMemory)).await;

    assert_eq!(verdict.status_line(), "CRITICAL - String Not Found");
    assert_eq!(verdict.exit_code(), 2);

    env.stop();
}

#[tokio::test]
async fn it_should_be_unknown_when_the_resource_is_missing() {
    let env = Environment::start(not_found()).await;

    let verdict = string::run(&fetcher(Duration::from_secs(5)), &input(&env, "Not Found", Staging::InMemory)).await;

    assert_eq!(verdict.state(), ServiceState::Unknown);
    assert_eq!(verdict.exit_code(), 3);

    env.stop();
}

#[tokio::test]
async fn it_should_search_a_response_staged_on_disk_and_remove_it_afterwards() {
    let env = Environment::start(serving("/", PAGE.to_string())).await;
    let dir = TempDir::new().unwrap();

    let staging = Staging::TempFile {
        dir: dir.path().to_path_buf(),
    };

    let verdict = string::run(&fetcher(Duration::from_secs(5)), &input(&env, "Cranleigh", staging)).await;

    assert_eq!(verdict.state(), ServiceState::Ok);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

    env.stop();
}

#[tokio::test]
async fn it_should_remove_the_staged_response_when_the_string_is_absent() {
    let env = Environment::start(serving("/", PAGE.to_string())).await;
    let dir = TempDir::new().unwrap();

    let staging = Staging::TempFile {
        dir: dir.path().to_path_buf(),
    };

    let verdict = string::run(&fetcher(Duration::from_secs(5)), &input(&env, "Maintenance", staging)).await;

    assert_eq!(verdict.state(), ServiceState::Critical);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

    env.stop();
}

#[tokio::test]
async fn it_should_be_unknown_when_the_response_cannot_be_staged() {
    let env = Environment::start(serving("/", PAGE.to_string())).await;
    let dir = TempDir::new().unwrap();

    let staging = Staging::TempFile {
        dir: dir.path().join("missing"),
    };

    let verdict = string::run(&fetcher(Duration::from_secs(5)), &input(&env, "Welcome", staging)).await;

    assert_eq!(verdict.exit_code(), 3);

    env.stop();
}

#[tokio::test]
async fn the_plugin_should_check_the_url_and_string_given_on_the_command_line() {
    let env = Environment::start(serving("/", PAGE.to_string())).await;
    let url = env.url("/").to_string();

    let verdict = check(["check_string", "--url", url.as_str(), "--str", "Cranleigh School"]).await;

    assert_eq!(verdict.status_line(), "OK - String Found");

    env.stop();
}

#[tokio::test]
async fn the_plugin_should_report_options_not_set_without_arguments() {
    let verdict = check(["check_string"]).await;

    assert_eq!(verdict.status_line(), "UNKNOWN - Options not set");
    assert_eq!(verdict.exit_code(), 3);
}
