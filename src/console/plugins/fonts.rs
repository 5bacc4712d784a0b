//! `check_fonts`: do all the files of a web font answer `200 OK`?
//!
//! ```text
//! check_fonts https://cdn.example.com/fonts/bentonsans/
//! check_fonts https://cdn.example.com/fonts/inter/ -r regular=inter.woff2 -r css=inter.css
//! ```
//!
//! Without `--resource` the files come from the `fonts.resources` setting,
//! which defaults to the BentonSans set.
use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;

use super::console::Console;
use super::{build_fetcher, invalid_arguments, load_configuration, parse_args, report, setup_failure, ConfigArgs, HttpArgs};
use crate::bootstrap::logging;
use crate::checks::fonts::{self, CheckInput, Resource};
use crate::config::Configuration;
use crate::probe::fetch::parse_locator;
use crate::probe::status::Verdict;

#[derive(Parser, Debug)]
#[command(name = "check_fonts", author, version, about = "Checks every file of a web font is served", long_about = None)]
struct Args {
    /// URL the font files are under. Whitespace is removed.
    base_url: String,

    /// File to check, relative to the base URL. Repeat to check several;
    /// they replace the configured set.
    #[arg(short, long = "resource", value_name = "NAME=PATH")]
    resources: Vec<Resource>,

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

    fonts::run(&fetcher, &input).await
}

fn build_input(args: &Args, config: &Configuration) -> Result<CheckInput, Verdict> {
    let base_url = parse_locator(&args.base_url).map_err(|err| err.verdict())?;

    let resources = if args.resources.is_empty() {
        config.fonts.resources.clone()
    } else {
        args.resources.clone()
    };

    if resources.is_empty() {
        return Err(Verdict::unknown("UNKNOWN - No font resources to check"));
    }

    Ok(CheckInput::new(base_url, resources))
}
