//! Nagios plugin checking the age of the timestamp in a JSON document.
//!
//! ```text
//! check_freshness https://mirror.example.com/status.json -w 43200 -c 86400
//! WEB_CHECKS_CONFIG_TOML_PATH="/etc/nagios/web_checks.toml" check_freshness https://mirror.example.com/status.json
//! ```
use std::process::ExitCode;

use web_checks::console::plugins::freshness;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    freshness::run().await
}
