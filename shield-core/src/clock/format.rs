//! Fixed-width time text
//!
//! The face shows hours and minutes only. Both fields are zero padded in
//! either style, so the text is always five characters wide.

use core::fmt::Write;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of "HH:MM"
pub const TIME_TEXT_LEN: usize = 5;

/// Rendered time text
pub type TimeText = String<TIME_TEXT_LEN>;

/// Local hour and minute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Minute of hour, 0-59
    pub minute: u8,
}

impl WallTime {
    /// Create a wall time (not validated; see [`format_time`])
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

/// Clock display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HourStyle {
    /// 00-23
    #[default]
    TwentyFour,
    /// 01-12
    Twelve,
}

impl HourStyle {
    /// Parse a config name (`24h`, `12h`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "24h" => Some(HourStyle::TwentyFour),
            "12h" => Some(HourStyle::Twelve),
            _ => None,
        }
    }
}

/// Errors formatting a wall time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// Hour above 23
    HourOutOfRange(u8),
    /// Minute above 59
    MinuteOutOfRange(u8),
    /// Text did not fit the buffer
    Overflow,
}

/// Render `time` as "HH:MM"
pub fn format_time(time: WallTime, style: HourStyle) -> Result<TimeText, FormatError> {
    if time.hour > 23 {
        return Err(FormatError::HourOutOfRange(time.hour));
    }
    if time.minute > 59 {
        return Err(FormatError::MinuteOutOfRange(time.minute));
    }

    let hour = match style {
        HourStyle::TwentyFour => time.hour,
        HourStyle::Twelve => match time.hour % 12 {
            0 => 12,
            h => h,
        },
    };

    let mut text = TimeText::new();
    write!(text, "{:02}:{:02}", hour, time.minute).map_err(|_| FormatError::Overflow)?;
    Ok(text)
}
