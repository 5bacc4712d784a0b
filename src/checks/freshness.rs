//! Freshness check: how old is the timestamp a JSON document reports?
//!
//! The monitored job (an `rsync` mirror, a sync worker, a backup) publishes
//! a JSON document with the time it last completed. The probe fetches that
//! document and classifies the age of the timestamp with two thresholds.
//!
//! ```text
//! {"lastUpdated":"2026-10-19T07:00:00Z"}   warning=12h critical=24h   ->  OK - RSYNC last run: 2026-10-19T07:00:00Z
//! ```
use chrono::{DateTime, Utc};
use url::Url;
use web_checks_clock::clock::Time as _;
use web_checks_clock::conv::convert_from_timestamp_to_datetime_utc;

use crate::probe::evaluate::{evaluate, Thresholds};
use crate::probe::extract::extract_timestamp;
use crate::probe::fetch::Fetcher;
use crate::probe::status::Verdict;
use crate::CurrentClock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInput {
    pub url: Url,
    /// Candidate timestamp fields, the first one present wins.
    pub fields: Vec<String>,
    pub thresholds: Thresholds,
    /// Name of the monitored job, for the OK message.
    pub label: String,
}

/// Fetch, extract and evaluate.
pub async fn run(fetcher: &Fetcher, input: &CheckInput) -> Verdict {
    let payload = match fetcher.fetch_body(&input.url).await {
        Ok(payload) => payload,
        Err(err) => {
            tracing::debug!(%err, "fetch failed");
            return err.verdict();
        }
    };

    check_payload(&payload, input)
}

/// Extracts and evaluates a payload against the current time.
#[must_use]
pub fn check_payload(payload: &[u8], input: &CheckInput) -> Verdict {
    match convert_from_timestamp_to_datetime_utc(CurrentClock::now()) {
        Some(now) => check_payload_at(payload, input, now),
        None => Verdict::unknown("UNKNOWN - The system clock is out of range"),
    }
}

#[must_use]
pub fn check_payload_at(payload: &[u8], input: &CheckInput, now: DateTime<Utc>) -> Verdict {
    let verdict = match extract_timestamp(payload, &input.fields) {
        Ok(timestamp) => evaluate(&timestamp, now, &input.thresholds, &input.label),
        Err(err) => {
            tracing::debug!(%err, "no usable timestamp");
            err.verdict()
        }
    };

    tracing::debug!(state = %verdict.state(), exit_code = verdict.exit_code(), "freshness evaluated");

    verdict
}
