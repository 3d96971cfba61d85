//! Easing curves over normalized progress
//!
//! All curves map 0 to 0 and [`PROGRESS_MAX`] to [`PROGRESS_MAX`] and are
//! monotonic in between. Integer math only.

use crate::geometry::PROGRESS_MAX;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Animation easing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Curve {
    /// Constant speed
    Linear,
    /// Slow start
    EaseIn,
    /// Slow finish
    EaseOut,
    /// Slow start and finish
    #[default]
    EaseInOut,
}

impl Curve {
    /// Map linear progress onto the curve
    pub fn apply(self, progress: u16) -> u16 {
        const MAX: u32 = PROGRESS_MAX as u32;
        let t = progress as u32;

        let eased = match self {
            Curve::Linear => t,
            Curve::EaseIn => t * t / MAX,
            Curve::EaseOut => {
                let rem = MAX - t;
                MAX - rem * rem / MAX
            }
            Curve::EaseInOut => {
                if t < MAX / 2 {
                    2 * t * t / MAX
                } else {
                    let rem = MAX - t;
                    MAX - 2 * rem * rem / MAX
                }
            }
        };

        eased.min(MAX) as u16
    }

    /// Parse a config name (`linear`, `ease_in`, `ease_out`, `ease_in_out`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Curve::Linear),
            "ease_in" => Some(Curve::EaseIn),
            "ease_out" => Some(Curve::EaseOut),
            "ease_in_out" => Some(Curve::EaseInOut),
            _ => None,
        }
    }
}
