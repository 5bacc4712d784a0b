//! A clock that only moves when told to.
//!
//! Each thread has its own time, starting at the Unix Epoch, so tests
//! running in parallel do not see each other's settings.
use std::cell::Cell;
use std::num::IntErrorKind;
use std::time::Duration;

use crate::clock::{self, Time};
use crate::DurationSinceUnixEpoch;

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct StoppedClock;

thread_local! {
    static FIXED_TIME: Cell<DurationSinceUnixEpoch> = const { Cell::new(DurationSinceUnixEpoch::ZERO) };
}

#[allow(clippy::module_name_repetitions)]
pub trait Stopped: Time {
    fn local_set(unix_time: &DurationSinceUnixEpoch);

    /// # Errors
    ///
    /// Will return `IntErrorKind::PosOverflow` if the time would overflow.
    /// The clock is left unchanged.
    fn local_add(duration: &Duration) -> Result<(), IntErrorKind>;

    /// # Errors
    ///
    /// Will return `IntErrorKind::NegOverflow` if the time would go before the
    /// Unix Epoch. The clock is left unchanged.
    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind>;

    /// Back to the Unix Epoch.
    fn local_reset() {
        Self::local_set(&DurationSinceUnixEpoch::ZERO);
    }
}

impl Time for clock::Stopped {
    fn now() -> DurationSinceUnixEpoch {
        FIXED_TIME.with(Cell::get)
    }

    fn dbg_clock_type() -> String {
        "Stopped".to_owned()
    }
}

impl Stopped for clock::Stopped {
    fn local_set(unix_time: &DurationSinceUnixEpoch) {
        FIXED_TIME.with(|time| time.set(*unix_time));
    }

    fn local_add(duration: &Duration) -> Result<(), IntErrorKind> {
        let moved = Self::now_add(duration).ok_or(IntErrorKind::PosOverflow)?;
        Self::local_set(&moved);
        Ok(())
    }

    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind> {
        let moved = Self::now_sub(duration).ok_or(IntErrorKind::NegOverflow)?;
        Self::local_set(&moved);
        Ok(())
    }
}
