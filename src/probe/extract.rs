//! Reads a timestamp out of a JSON payload.
//!
//! The field holding the timestamp is configuration. Several candidate
//! fields can be given and the first one present wins, so documents that
//! call it `lastUpdated` and documents that call it `last_update` are both
//! handled by the default candidates ([`DEFAULT_TIMESTAMP_FIELDS`]).
//!
//! A candidate can be a dotted key path (`sync.lastUpdated`). A top-level key
//! that literally contains dots is tried before walking the path.
//!
//! Accepted values:
//!
//! ```text
//! 2026-10-19T07:00:00Z                RFC 3339 / ISO 8601
//! Mon, 19 Oct 2026 07:00:00 +0000     RFC 2822
//! 2026-10-19 07:00:00                 UTC when no offset is given
//! 2026-10-19 07:00:00.250 +01:00
//! 2026-10-19                          midnight UTC
//! 1792393200                          Unix epoch seconds (number or string)
//! ```
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use super::status::{ServiceState, Verdict};

pub const DEFAULT_TIMESTAMP_FIELDS: [&str; 2] = ["lastUpdated", "last_update"];

/// Message reported when no usable timestamp can be read from the payload.
pub const OBJECT_NOT_FOUND: &str = "Object Not found";

const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Error)]
pub enum Error {
    #[error("the payload is not valid JSON: {source}")]
    InvalidJson { source: serde_json::Error },

    #[error("none of the fields {fields:?} was found in the payload")]
    FieldNotFound { fields: Vec<String> },

    #[error("the field `{field}` does not hold a timestamp: {raw}")]
    Unparseable { field: String, raw: String },
}

impl Error {
    /// Every extraction failure is reported the same way: UNKNOWN, but with
    /// exit code `2`, which is how these plugins have always reported a
    /// document without a usable timestamp.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::unknown(OBJECT_NOT_FOUND).with_exit_code(ServiceState::Critical.exit_code())
    }
}

/// A timestamp read from a payload, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTimestamp {
    /// The candidate field that was found.
    pub field: String,
    /// The value as it appeared in the payload, without surrounding whitespace.
    pub raw: String,
    pub at: DateTime<Utc>,
}

/// # Errors
///
/// Will return an error if the payload is not JSON, if none of the `fields`
/// is present (or they are all `null`), or if the value found cannot be
/// parsed as a datetime.
pub fn extract_timestamp(payload: &[u8], fields: &[String]) -> Result<ParsedTimestamp, Error> {
    let document: Value = serde_json::from_slice(payload).map_err(|source| Error::InvalidJson { source })?;

    let (field, value) = fields
        .iter()
        .find_map(|field| lookup(&document, field).map(|value| (field, value)))
        .ok_or_else(|| Error::FieldNotFound { fields: fields.to_vec() })?;

    let raw = match value {
        Value::String(text) => text.trim().to_owned(),
        other => other.to_string(),
    };

    tracing::debug!(%field, %raw, "timestamp field found");

    let at = parse_datetime(&raw).ok_or_else(|| Error::Unparseable {
        field: field.clone(),
        raw: raw.clone(),
    })?;

    Ok(ParsedTimestamp {
        field: field.clone(),
        raw,
        at,
    })
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let found = match document.get(path) {
        Some(value) => Some(value),
        None => path.split('.').try_fold(document, |node, key| node.get(key)),
    };

    found.filter(|value| !value.is_null())
}

/// Parses the datetime formats listed in the module documentation.
#[must_use]
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if raw.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }

    if let Ok(datetime) = DateTime::parse_from_rfc2822(raw) {
        return Some(datetime.with_timezone(&Utc));
    }

    if let Some(datetime) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(datetime.with_timezone(&Utc));
    }

    if let Some(datetime) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(datetime.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|datetime| datetime.and_utc());
    }

    raw.parse::<i64>().ok().and_then(|secs| DateTime::from_timestamp(secs, 0))
}
