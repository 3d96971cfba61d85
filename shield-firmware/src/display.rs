//! Time text sink
//!
//! Reports the text through defmt. A panel driver would draw it on the text
//! layer underneath the shield instead.

use defmt::*;
use shield_core::clock::TimeText;
use shield_core::traits::TimeDisplay;

/// Time display that logs each update
#[derive(Default)]
pub struct LogDisplay {
    /// Text currently on the layer
    shown: TimeText,
}

impl LogDisplay {
    /// Create a display with no text shown yet
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeDisplay for LogDisplay {
    fn show_time(&mut self, text: &str) {
        if self.shown.as_str() == text {
            trace!("Time text unchanged: {}", text);
        } else {
            info!("Time: {}", text);
        }

        self.shown.clear();
        // Text is always HH:MM; anything longer is truncated by the buffer
        for c in text.chars() {
            if self.shown.push(c).is_err() {
                break;
            }
        }
    }
}
