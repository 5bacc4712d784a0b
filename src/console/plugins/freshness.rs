//! `check_freshness`: is the timestamp in a JSON document recent enough?
//!
//! ```text
//! check_freshness https://mirror.example.com/status.json
//! check_freshness https://mirror.example.com/status.json -w 64800 -c 86400 -f meta.finished_at --label Backup
//! ```
//!
//! Thresholds, fields and label default to the `freshness` section of the
//! configuration.
use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;

use super::console::Console;
use super::{build_fetcher, invalid_arguments, load_configuration, parse_args, report, setup_failure, ConfigArgs, HttpArgs};
use crate::bootstrap::logging;
use crate::checks::freshness::{self, CheckInput};
use crate::config::Configuration;
use crate::probe::evaluate::Thresholds;
use crate::probe::fetch::parse_locator;
use crate::probe::status::Verdict;

#[derive(Parser, Debug)]
#[command(
    name = "check_freshness",
    author,
    version,
    about = "Checks the age of the timestamp in a JSON document",
    long_about = None
)]
struct Args {
    /// URL of the JSON document. Whitespace is removed.
    url: String,

    /// Maximum age in seconds before WARNING.
    #[arg(short, long, value_name = "SECONDS")]
    warning: Option<u64>,

    /// Maximum age in seconds before CRITICAL.
    #[arg(short, long, value_name = "SECONDS")]
    critical: Option<u64>,

    /// Timestamp field, or dotted path, to look for. Repeat to give several
    /// candidates; the first one present wins.
    #[arg(short = 'f', long = "field", value_name = "FIELD")]
    fields: Vec<String>,

    /// Name of the monitored job in the OK message.
    #[arg(long)]
    label: Option<String>,

    #[command(flatten)]
    http: HttpArgs,

    #[command(flatten)]
    config: ConfigArgs,
}

pub async fn run() -> ExitCode {
    let verdict = check(std::env::args_os()).await;

    report(&verdict, &Console::new())
}

/// Runs the plugin with the given command line, program name included.
pub async fn check<I, T>(args: I) -> Verdict
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Args = match parse_args(args) {
        Ok(args) => args,
        Err(err) => return invalid_arguments(&err),
    };

    let config = match load_configuration(&args.config) {
        Ok(config) => config,
        Err(err) => return setup_failure(&err),
    };

    logging::setup(&config.logging);

    let input = match build_input(&args, &config) {
        Ok(input) => input,
        Err(verdict) => return verdict,
    };

    let fetcher = match build_fetcher(&args.http, &config) {
        Ok(fetcher) => fetcher,
        Err(err) => return err.verdict(),
    };

    freshness::run(&fetcher, &input).await
}

fn build_input(args: &Args, config: &Configuration) -> Result<CheckInput, Verdict> {
    let url = parse_locator(&args.url).map_err(|err| err.verdict())?;

    let thresholds = Thresholds::new(
        args.warning.unwrap_or(config.freshness.warning_secs),
        args.critical.unwrap_or(config.freshness.critical_secs),
    )
    .map_err(|err| err.verdict())?;

    let fields = if args.fields.is_empty() {
        config.freshness.fields.clone()
    } else {
        args.fields.clone()
    };

    Ok(CheckInput {
        url,
        fields,
        thresholds,
        label: args.label.clone().unwrap_or_else(|| config.freshness.label.clone()),
    })
}
