//! The steps a probe is made of.
//!
//! - [`fetch`]: one HTTP GET with a bounded timeout.
//! - [`extract`]: read a timestamp out of a JSON payload.
//! - [`evaluate`]: classify the age of a timestamp against two thresholds.
//! - [`status`]: the Nagios service states and the [`status::Verdict`] every
//!   step ends up producing.
pub mod evaluate;
pub mod extract;
pub mod fetch;
pub mod status;
