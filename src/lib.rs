//! Nagios plugins that probe web resources.
//!
//! Every plugin follows the Nagios plugin contract: it prints exactly one line
//! to standard output and exits with one of the codes `0` (OK), `1`
//! (WARNING), `2` (CRITICAL) or `3` (UNKNOWN).
//!
//! There are three plugins, each one shipped as its own binary:
//!
//! - `check_freshness`: fetches a JSON document and checks how old the
//!   timestamp held in one of its fields is. See [`checks::freshness`].
//! - `check_string`: fetches a resource and checks a string is present in
//!   its body. See [`checks::string`].
//! - `check_fonts`: checks a set of sub-resources under a base URL all
//!   answer `200 OK`. See [`checks::fonts`].
//!
//! All of them are built from the same steps, in [`probe`]:
//!
//! ```text
//! Fetch -> Extract -> Evaluate -> Report
//! ```
//!
//! Any failing step short-circuits to the report with the [`probe::status::Verdict`]
//! for that failure. Nothing is retried: the monitoring scheduler that
//! invokes the plugin provides the cadence.
//!
//! # Configuration
//!
//! Defaults can be changed with a TOML file or environment variables. See
//! [`config`].
//!
//! ```text
//! check_freshness https://example.com/status.json --warning 64800 --critical 86400
//! check_string --url https://example.com --str "Welcome"
//! check_fonts https://cdn.example.com/fonts/bentonsans/
//! ```
pub mod bootstrap;
pub mod checks;
pub mod config;
pub mod console;
pub mod probe;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = web_checks_clock::clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = web_checks_clock::clock::Stopped;
