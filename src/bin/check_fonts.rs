//! Program to run the `fonts` check as a Nagios plugin.
//!
//! Refer to [`web_checks::console::plugins::fonts`] for the usage.
use std::process::ExitCode;

use web_checks::console::plugins::fonts;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    fonts::run().await
}
