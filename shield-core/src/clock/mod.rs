//! Wall-clock time and its "HH:MM" rendering

pub mod format;

pub use format::{format_time, FormatError, HourStyle, TimeText, WallTime, TIME_TEXT_LEN};
