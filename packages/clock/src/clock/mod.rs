use std::marker::PhantomData;
use std::time::Duration;

use self::stopped::StoppedClock;
use self::working::WorkingClock;
use crate::DurationSinceUnixEpoch;

pub mod stopped;
pub mod working;

/// A clock, selected at compile time by its marker type.
#[derive(Debug)]
pub struct Clock<T> {
    clock: PhantomData<T>,
}

/// Reads the system clock.
pub type Working = Clock<WorkingClock>;

/// Stays at whatever time it was set to.
pub type Stopped = Clock<StoppedClock>;

pub trait Time: Sized {
    fn now() -> DurationSinceUnixEpoch;

    /// The clock name, to tell which one a `CurrentClock` alias resolved to.
    fn dbg_clock_type() -> String;

    /// `None` on overflow.
    #[must_use]
    fn now_add(add_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_add(*add_time)
    }

    /// `None` before the Unix Epoch.
    #[must_use]
    fn now_sub(sub_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_sub(*sub_time)
    }
}
