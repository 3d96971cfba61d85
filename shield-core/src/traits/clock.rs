//! Wall clock trait

use crate::clock::{HourStyle, WallTime};

/// Errors that can occur reading the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Clock hardware did not answer
    Unavailable,
    /// Clock is running but was never set
    NotSet,
}

/// Trait for the local time source
pub trait ClockSource {
    /// Read the current local hour and minute
    ///
    /// Takes `&mut self` because RTC reads typically require peripheral access.
    fn now(&mut self) -> Result<WallTime, ClockError>;

    /// User's 12/24-hour display preference
    fn hour_style(&self) -> HourStyle;
}
