use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use web_checks::checks::fonts::{self, default_resources, CheckInput, Resource};
use web_checks::console::plugins::fonts::check;
use web_checks::probe::status::ServiceState;

use crate::common::fixtures::fetcher;
use crate::common::http::{closed_url, Environment};

/// Serves every BentonSans file but the ones in `missing`.
fn font_server(missing: &'static [&'static str]) -> Router {
    let mut router = Router::new();

    for resource in default_resources() {
        let path = format!("/fonts/bentonsans/{}", resource.path);

        router = if missing.contains(&resource.name.as_str()) {
            router.route(&path, get(|| async { (StatusCode::NOT_FOUND, "Not Found") }))
        } else {
            router.route(&path, get(|| async { "font data" }))
        };
    }

    router
}

#[tokio::test]
async fn it_should_be_ok_when_every_resource_is_served() {
    let env = Environment::start(font_server(&[])).await;

    let input = CheckInput::new(env.url("/fonts/bentonsans"), default_resources());

    let verdict = fonts::run(&fetcher(Duration::from_secs(5)), &input).await;

    assert_eq!(verdict.status_line(), "OK - Found All Fonts and CSS");
    assert_eq!(verdict.exit_code(), 0);

    env.stop();
}

#[tokio::test]
async fn it_should_name_the_resource_that_is_not_served() {
    let env = Environment::start(font_server(&["italic"])).await;

    let input = CheckInput::new(env.url("/fonts/bentonsans/"), default_resources());

    let verdict = fonts::run(&fetcher(Duration::from_secs(5)), &input).await;

    assert_eq!(verdict.state(), ServiceState::Critical);
    assert_eq!(verdict.exit_code(), 2);
    assert_eq!(verdict.status_line(), "ERROR italic HTTP/1.1 404 Not Found");

    env.stop();
}

#[tokio::test]
async fn it_should_stop_at_the_first_resource_that_is_not_served() {
    let env = Environment::start(font_server(&["light-italic", "css"])).await;

    let input = CheckInput::new(env.url("/fonts/bentonsans/"), default_resources());

    let verdict = fonts::run(&fetcher(Duration::from_secs(5)), &input).await;

    assert_eq!(verdict.status_line(), "ERROR light-italic HTTP/1.1 404 Not Found");

    env.stop();
}

#[tokio::test]
async fn it_should_report_headers_not_found_when_nothing_answers() {
    let input = CheckInput::new(closed_url().await, vec![Resource::new("regular", "reg/woff")]);

    let verdict = fonts::run(&fetcher(Duration::from_secs(1)), &input).await;

    assert_eq!(verdict.status_line(), "ERROR regular Headers Not Found");
    assert_eq!(verdict.exit_code(), 2);
}

#[tokio::test]
async fn the_plugin_should_check_the_resources_given_on_the_command_line() {
    let env = Environment::start(font_server(&["css"])).await;
    let url = env.url("/fonts/bentonsans/").to_string();

    let verdict = check(["check_fonts", url.as_str(), "-r", "regular=reg/woff", "-r", "italic=it/woff"]).await;

    assert_eq!(verdict.status_line(), "OK - Found All Fonts and CSS");

    env.stop();
}
