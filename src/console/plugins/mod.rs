//! The plugin programs.
//!
//! Each plugin parses its arguments, loads the configuration, runs its check
//! and reports the [`Verdict`]: one line on `stdout` and the matching exit
//! code. Nothing that goes wrong on the way escapes as a panic or as a
//! second output line; it becomes an UNKNOWN verdict instead.
use std::ffi::OsString;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::Parser;

use self::printer::Printer;
use crate::config::{Configuration, Info, ENV_VAR_CONFIG_TOML, ENV_VAR_CONFIG_TOML_PATH};
use crate::probe::fetch::{self, Fetcher};
use crate::probe::status::Verdict;

pub mod console;
pub mod fonts;
pub mod freshness;
pub mod logger;
pub mod printer;
pub mod string;

/// Where to load the configuration from.
#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file.
    #[arg(long, env = ENV_VAR_CONFIG_TOML_PATH)]
    pub config_path: Option<Utf8PathBuf>,

    /// Direct configuration content in TOML.
    #[arg(long, env = ENV_VAR_CONFIG_TOML, hide_env_values = true)]
    pub config_content: Option<String>,
}

/// Request options shared by the plugins that take them on the command line.
#[derive(clap::Args, Debug, Default)]
pub struct HttpArgs {
    /// Seconds to wait for the connection and for the whole response.
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// `User-Agent` header. An empty value sends the HTTP client default.
    #[arg(short = 'A', long)]
    pub user_agent: Option<String>,
}

/// Prints the status line and returns the exit code for it.
pub fn report(verdict: &Verdict, printer: &impl Printer) -> ExitCode {
    printer.println(&verdict.status_line());

    ExitCode::from(verdict.exit_code())
}

/// Like [`Parser::try_parse_from`], but `--help` and `--version` still print
/// and exit right away.
fn parse_args<A, I, T>(args: I) -> Result<A, clap::Error>
where
    A: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    A::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => err,
    })
}

fn invalid_arguments(err: &clap::Error) -> Verdict {
    tracing::debug!(%err, "invalid arguments");

    Verdict::unknown(format!("UNKNOWN - Invalid arguments: {}", err.kind()))
}

fn setup_failure(err: &anyhow::Error) -> Verdict {
    Verdict::unknown(format!("UNKNOWN - {err:#}"))
}

fn load_configuration(args: &ConfigArgs) -> anyhow::Result<Configuration> {
    let info = Info::new(args.config_content.clone(), args.config_path.as_deref()).context("can't read the configuration")?;

    Configuration::load(&info).context("invalid configuration")
}

/// Command line options win over the configuration.
fn build_fetcher(args: &HttpArgs, config: &Configuration) -> Result<Fetcher, fetch::Error> {
    Fetcher::new(request_timeout(args, config), user_agent(args, config))
}

fn request_timeout(args: &HttpArgs, config: &Configuration) -> Duration {
    args.timeout.map_or_else(|| config.timeout(), Duration::from_secs)
}

fn user_agent<'a>(args: &'a HttpArgs, config: &'a Configuration) -> Option<&'a str> {
    match &args.user_agent {
        Some(user_agent) => Some(user_agent.as_str()).filter(|user_agent| !user_agent.is_empty()),
        None => config.user_agent(),
    }
}
