use std::time::SystemTime;

use crate::clock::{Time, Working};
use crate::DurationSinceUnixEpoch;

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct WorkingClock;

impl Time for Working {
    /// A host clock set before 1970 reads as the Unix Epoch.
    fn now() -> DurationSinceUnixEpoch {
        SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default()
    }

    fn dbg_clock_type() -> String {
        "Working".to_owned()
    }
}
