//! Where the probes get "now" from.
//!
//! The freshness probe compares a timestamp read from a remote document with
//! the current time. The current time is never read from the system
//! directly but through a clock implementing [`clock::Time`]:
//!
//! - [`clock::Working`] reads the system clock. The plugin binaries use it.
//! - [`clock::Stopped`] returns a time held in a thread-local, which tests set
//!   and move around.
//!
//! A crate picks one with a `CurrentClock` alias switched on `cfg(test)`, so
//! the same code runs against the stopped clock in its unit tests.
//!
//! Times are [`DurationSinceUnixEpoch`] values, independent of the time zone
//! of the monitoring host:
//!
//! ```text
//! 2026-10-19 08:00:00 UTC  ->  Duration::from_secs(1_792_396_800)
//! ```
use std::time::Duration;

pub mod clock;
pub mod conv;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
