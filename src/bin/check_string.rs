//! Nagios plugin checking a string is present in a web resource.
//!
//! ```text
//! check_string --url https://www.example.com --str "Welcome"
//! ```
use std::process::ExitCode;

use web_checks::console::plugins::string;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    string::run().await
}
