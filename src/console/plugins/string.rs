//! `check_string`: is a string present in a resource?
//!
//! ```text
//! check_string --url https://www.example.com --str "Welcome"
//! ```
//!
//! Both options are required and nothing else is accepted, not even
//! `--help` or `--version`: any other command line is reported as UNKNOWN.
//!
//! The configuration is only read from the environment
//! (`WEB_CHECKS_CONFIG_TOML` or `WEB_CHECKS_CONFIG_TOML_PATH`), where
//! `string.stage_on_disk = true` stages the response in the system temporary
//! directory before searching it.
use std::env;
use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use super::console::Console;
use super::{build_fetcher, parse_args, report, setup_failure, HttpArgs};
use crate::bootstrap::logging;
use crate::checks::string::{self, CheckInput, Staging};
use crate::config::{Configuration, Info};
use crate::probe::fetch::parse_locator;
use crate::probe::status::Verdict;

pub const OPTIONS_NOT_SET: &str = "UNKNOWN - Options not set";

#[derive(Parser, Debug)]
#[command(
    name = "check_string",
    about = "Checks a string is present in a web resource",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// URL of the resource. Whitespace is removed.
    #[arg(long)]
    url: String,

    /// String that must be present in the response body.
    #[arg(long = "str", value_name = "STRING")]
    needle: String,
}

pub async fn run() -> ExitCode {
    let verdict = check(env::args_os()).await;

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
        Err(err) => {
            tracing::debug!(%err, "invalid arguments");
            return Verdict::unknown(OPTIONS_NOT_SET);
        }
    };

    if args.url.trim().is_empty() || args.needle.is_empty() {
        return Verdict::unknown(OPTIONS_NOT_SET);
    }

    let config = match load_configuration() {
        Ok(config) => config,
        Err(err) => return setup_failure(&err),
    };

    logging::setup(&config.logging);

    let url = match parse_locator(&args.url) {
        Ok(url) => url,
        Err(err) => return err.verdict(),
    };

    let fetcher = match build_fetcher(&HttpArgs::default(), &config) {
        Ok(fetcher) => fetcher,
        Err(err) => return err.verdict(),
    };

    let input = CheckInput {
        url,
        needle: args.needle,
        staging: staging(&config),
    };

    string::run(&fetcher, &input).await
}

fn load_configuration() -> anyhow::Result<Configuration> {
    let info = Info::from_env().context("can't read the configuration")?;

    Configuration::load(&info).context("invalid configuration")
}

fn staging(config: &Configuration) -> Staging {
    if config.string.stage_on_disk {
        Staging::TempFile { dir: env::temp_dir() }
    } else {
        Staging::InMemory
    }
}
