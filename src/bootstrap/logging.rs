//! Setup for the plugin logging.
//!
//! It redirects the log info to `stderr` with the threshold defined in the
//! configuration:
//!
//! - `Off` (default)
//! - `Error`
//! - `Warn`
//! - `Info`
//! - `Debug`
//! - `Trace`
//!
//! `stdout` is reserved for the status line the monitoring system reads, so
//! logs never go there. Refer to [`crate::config`] to know how to change the
//! threshold, for example with `WEB_CHECKS_LOGGING__THRESHOLD=debug`.
use std::sync::Once;

use tracing::level_filters::LevelFilter;

use crate::config::{Logging, Threshold};

static INIT: Once = Once::new();

/// It redirects the log info to `stderr` with the threshold defined in the configuration.
pub fn setup(cfg: &Logging) {
    let tracing_level = map_to_tracing_level_filter(cfg.threshold);

    if tracing_level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_stderr_init(tracing_level);
    });
}

fn map_to_tracing_level_filter(threshold: Threshold) -> LevelFilter {
    match threshold {
        Threshold::Off => LevelFilter::OFF,
        Threshold::Error => LevelFilter::ERROR,
        Threshold::Warn => LevelFilter::WARN,
        Threshold::Info => LevelFilter::INFO,
        Threshold::Debug => LevelFilter::DEBUG,
        Threshold::Trace => LevelFilter::TRACE,
    }
}

fn tracing_stderr_init(filter: LevelFilter) {
    let () = tracing_subscriber::fmt()
        .compact()
        .with_max_level(filter)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Logging initialized");
}
