//! The probes, one per plugin binary.
//!
//! Each probe takes its validated input and a [`Fetcher`](crate::probe::fetch::Fetcher)
//! and always returns a [`Verdict`](crate::probe::status::Verdict). Failures
//! never escape as errors: they are the verdict.
pub mod fonts;
pub mod freshness;
pub mod string;
