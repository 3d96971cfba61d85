//! RTC-backed clock source

use defmt::*;
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc, RtcError};

use shield_core::clock::{HourStyle, WallTime};
use shield_core::traits::{ClockError, ClockSource};

/// Date the RTC is seeded with when it comes up stopped
const FALLBACK_DATETIME: DateTime = DateTime {
    year: 2024,
    month: 1,
    day: 1,
    day_of_week: DayOfWeek::Monday,
    hour: 12,
    minute: 0,
    second: 0,
};

/// Local time from the on-chip RTC
pub struct RtcClock {
    rtc: Rtc<'static, RTC>,
    style: HourStyle,
}

impl RtcClock {
    /// Wrap the RTC, starting it from a fixed date if it is not running
    pub fn new(mut rtc: Rtc<'static, RTC>, style: HourStyle) -> Self {
        if !rtc.is_running() {
            warn!("RTC not running, seeding fallback date");
            if let Err(e) = rtc.set_datetime(FALLBACK_DATETIME) {
                error!("Failed to set RTC: {:?}", Debug2Format(&e));
            }
        }
        Self { rtc, style }
    }

    /// Seconds until the RTC reaches the next whole minute
    ///
    /// Returns a full minute if the RTC cannot be read.
    pub fn seconds_to_next_minute(&mut self) -> u32 {
        match self.rtc.now() {
            Ok(now) => 60 - u32::from(now.second.min(59)),
            Err(_) => 60,
        }
    }
}

impl ClockSource for RtcClock {
    fn now(&mut self) -> Result<WallTime, ClockError> {
        match self.rtc.now() {
            Ok(now) => Ok(WallTime::new(now.hour, now.minute)),
            Err(RtcError::NotRunning) => Err(ClockError::NotSet),
            Err(_) => Err(ClockError::Unavailable),
        }
    }

    fn hour_style(&self) -> HourStyle {
        self.style
    }
}
