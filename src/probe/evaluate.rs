//! Classifies the age of a timestamp.
//!
//! With `age = now - t`, compared exactly, fractions of a second included:
//!
//! ```text
//! t > now                   UNKNOWN   (3)  "ERROR - Reached End of File ..."
//! age <= warning            OK        (0)  "{label} last run: {t}"
//! age <= critical           WARNING   (1)  "WARNING - not run in the last {warning}h"
//! otherwise                 CRITICAL  (2)  "ERROR - not run in the last {critical}h"
//! ```
//!
//! A timestamp in the future means the monitored job and the monitoring host
//! disagree about the time, so no claim about freshness can be made.
use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use super::extract::ParsedTimestamp;
use super::status::Verdict;

/// Twelve hours.
pub const DEFAULT_WARNING_SECS: u64 = 12 * 3600;

/// Twenty-four hours.
pub const DEFAULT_CRITICAL_SECS: u64 = 24 * 3600;

/// The name of the monitored job used in the OK message.
pub const DEFAULT_LABEL: &str = "RSYNC";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("the warning threshold ({warning_secs}s) is above the critical threshold ({critical_secs}s)")]
    WarningAboveCritical { warning_secs: u64, critical_secs: u64 },
}

impl Error {
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::unknown(format!("UNKNOWN - {self}"))
    }
}

/// Maximum ages, in seconds, before a timestamp is WARNING or CRITICAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    warning_secs: u64,
    critical_secs: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_secs: DEFAULT_WARNING_SECS,
            critical_secs: DEFAULT_CRITICAL_SECS,
        }
    }
}

impl Thresholds {
    /// # Errors
    ///
    /// Will return an error if the warning threshold is above the critical one.
    pub fn new(warning_secs: u64, critical_secs: u64) -> Result<Self, Error> {
        if warning_secs > critical_secs {
            return Err(Error::WarningAboveCritical {
                warning_secs,
                critical_secs,
            });
        }

        Ok(Self {
            warning_secs,
            critical_secs,
        })
    }

    #[must_use]
    pub fn warning_secs(&self) -> u64 {
        self.warning_secs
    }

    #[must_use]
    pub fn critical_secs(&self) -> u64 {
        self.critical_secs
    }
}

#[must_use]
pub fn evaluate(timestamp: &ParsedTimestamp, now: DateTime<Utc>, thresholds: &Thresholds, label: &str) -> Verdict {
    if timestamp.at > now {
        tracing::debug!(at = %timestamp.at, %now, "timestamp in the future");

        return Verdict::unknown(format!(
            "ERROR - Reached End of File ({}: {})",
            timestamp.field, timestamp.raw
        ));
    }

    let age = now - timestamp.at;

    tracing::debug!(%age, ?thresholds, "timestamp age");

    if age <= max_age(thresholds.warning_secs) {
        Verdict::ok(format!("{label} last run: {}", timestamp.raw))
    } else if age <= max_age(thresholds.critical_secs) {
        Verdict::warning(format!(
            "WARNING - not run in the last {}",
            format_hours(thresholds.warning_secs)
        ))
    } else {
        Verdict::critical(format!(
            "ERROR - not run in the last {}",
            format_hours(thresholds.critical_secs)
        ))
    }
}

/// Thresholds too large for a `TimeDelta` are never exceeded.
fn max_age(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

/// `43200` is `12h`, `5400` is `1.5h`.
fn format_hours(secs: u64) -> String {
    if secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else {
        let tenths = secs.saturating_mul(10).saturating_add(1800) / 3600;
        format!("{}.{}h", tenths / 10, tenths % 10)
    }
}
