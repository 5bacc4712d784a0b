use std::time::Duration;

use web_checks::checks::freshness::{self, CheckInput};
use web_checks::probe::evaluate::Thresholds;
use web_checks::probe::status::ServiceState;

use crate::common::fixtures::{fetcher, not_found, serving, slow, status_document_updated_hours_ago};
use crate::common::http::{closed_url, Environment};

fn input(env: &Environment, warning_hours: u64, critical_hours: u64) -> CheckInput {
    CheckInput {
        url: env.url("/status.json"),
        fields: vec!["lastUpdated".to_string(), "last_update".to_string()],
        thresholds: Thresholds::new(warning_hours * 3600, critical_hours * 3600).unwrap(),
        label: "RSYNC".to_string(),
    }
}

#[tokio::test]
async fn it_should_be_ok_when_the_job_ran_an_hour_ago() {
    let env = Environment::start(serving("/status.json", status_document_updated_hours_ago("lastUpdated", 1))).await;

    let verdict = freshness::run(&fetcher(Duration::from_secs(5)), &input(&env, 12, 24)).await;

    assert_eq!(verdict.exit_code(), 0);
    assert!(verdict.status_line().starts_with("OK - RSYNC last run: "));

    env.stop();
}

#[tokio::test]
async fn it_should_be_warning_when_the_job_ran_twenty_hours_ago() {
    let env = Environment::start(serving("/status.json", status_document_updated_hours_ago("last_update", 20))).await;

    let verdict = freshness::run(&fetcher(Duration::from_secs(5)), &input(&env, 18, 24)).await;

    assert_eq!(verdict.state(), ServiceState::Warning);
    assert_eq!(verdict.exit_code(), 1);
    assert_eq!(verdict.status_line(), "WARNING - not run in the last 18h");

    env.stop();
}

#[tokio::test]
async fn it_should_be_critical_when_the_job_ran_thirty_hours_ago() {
    let env = Environment::start(serving("/status.json", status_document_updated_hours_ago("lastUpdated", 30))).await;

    let verdict = freshness::run(&fetcher(Duration::from_secs(5)), &input(&env, 12, 24)).await;

    assert_eq!(verdict.state(), ServiceState::Critical);
    assert_eq!(verdict.exit_code(), 2);
    assert_eq!(verdict.status_line(), "ERROR - not run in the last 24h");

    env.stop();
}

#[tokio::test]
async fn it_should_report_object_not_found_for_an_empty_document() {
    let env = Environment::start(serving("/status.json", "{}".to_string())).await;

    let verdict = freshness::run(&fetcher(Duration::from_secs(5)), &input(&env, 12, 24)).await;

    assert_eq!(verdict.status_line(), "UNKNOWN - Object Not found");
    assert_eq!(verdict.exit_code(), 2);

    env.stop();
}

#[tokio::test]
async fn it_should_be_unknown_when_the_document_is_missing() {
    let env = Environment::start(not_found()).await;

    let verdict = freshness::run(&fetcher(Duration::from_secs(5)), &input(&env, 12, 24)).await;

    assert_eq!(verdict.state(), ServiceState::Unknown);
    assert_eq!(verdict.exit_code(), 3);

    env.stop();
}

#[tokio::test]
async fn it_should_be_unknown_when_the_server_does_not_answer_in_time() {
    let env = Environment::start(slow("/status.json", Duration::from_secs(5))).await;

    let verdict = freshness::run(&fetcher(Duration::from_secs(1)), &input(&env, 12, 24)).await;

    assert_eq!(verdict.state(), ServiceState::Unknown);
    assert_eq!(verdict.exit_code(), 3);

    env.stop();
}

mod the_plugin {
    use web_checks::console::plugins::freshness::check;

    use super::*;

    #[tokio::test]
    async fn it_should_check_the_url_given_on_the_command_line() {
        let env = Environment::start(serving("/status.json", status_document_updated_hours_ago("lastUpdated", 20))).await;
        let url = env.url("/status.json").to_string();

        let verdict = check(["check_freshness", url.as_str(), "-w", "64800", "-c", "86400"]).await;

        assert_eq!(verdict.status_line(), "WARNING - not run in the last 18h");
        assert_eq!(verdict.exit_code(), 1);

        env.stop();
    }

    #[tokio::test]
    async fn it_should_look_for_the_fields_given_on_the_command_line() {
        let env = Environment::start(serving("/status.json", status_document_updated_hours_ago("finished_at", 1))).await;
        let url = env.url("/status.json").to_string();

        let verdict = check(["check_freshness", url.as_str(), "--field", "finished_at", "--label", "Backup"]).await;

        assert!(verdict.status_line().starts_with("OK - Backup last run: "));

        env.stop();
    }

    #[tokio::test]
    async fn it_should_be_unknown_without_a_url() {
        let verdict = check(["check_freshness"]).await;

        assert_eq!(verdict.exit_code(), 3);
        assert!(verdict.status_line().starts_with("UNKNOWN - Invalid arguments"));
    }

    #[tokio::test]
    async fn it_should_be_unknown_when_the_config_file_does_not_exist() {
        let verdict = check([
            "check_freshness",
            "http://127.0.0.1/status.json",
            "--config-path",
            "/nonexistent/web_checks.toml",
        ])
        .await;

        assert_eq!(verdict.exit_code(), 3);
        assert!(verdict.status_line().starts_with("UNKNOWN - can't read the configuration"));
    }

    #[tokio::test]
    async fn it_should_be_unknown_when_the_configured_timeout_is_zero() {
        let verdict = check([
            "check_freshness",
            "http://127.0.0.1/status.json",
            "--config-content",
            "timeout_secs = 0",
        ])
        .await;

        assert_eq!(verdict.exit_code(), 3);
        assert!(verdict.status_line().starts_with("UNKNOWN - invalid configuration: Invalid setting `timeout_secs`"));
    }

    #[tokio::test]
    async fn it_should_take_the_thresholds_from_the_configuration_content() {
        let env = Environment::start(serving("/status.json", status_document_updated_hours_ago("lastUpdated", 3))).await;
        let url = env.url("/status.json").to_string();

        let verdict = check([
            "check_freshness",
            url.as_str(),
            "--config-content",
            "[freshness]\nwarning_secs = 3600\ncritical_secs = 7200\n",
        ])
        .await;

        assert_eq!(verdict.status_line(), "ERROR - not run in the last 2h");

        env.stop();
    }

    #[tokio::test]
    async fn it_should_be_unknown_when_nothing_answers() {
        let url = closed_url().await.to_string();

        let verdict = check(["check_freshness", url.as_str(), "--timeout", "1"]).await;

        assert_eq!(verdict.exit_code(), 3);
    }
}
