//! Layer geometry and fixed-point interpolation
//!
//! Panel positions are plain pixel rectangles. Interpolation uses a
//! normalized 16-bit progress value so no floating point is needed on
//! the device.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normalized progress at the end of an animation
pub const PROGRESS_MAX: u16 = u16::MAX;

/// A layer frame in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge
    pub x: i16,
    /// Top edge (may be negative when the layer sits above the screen)
    pub y: i16,
    /// Width in pixels
    pub width: i16,
    /// Height in pixels
    pub height: i16,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Interpolate between `self` and `to`
    ///
    /// `progress` is normalized: 0 yields `self`, [`PROGRESS_MAX`] yields `to`.
    pub fn lerp(self, to: Rect, progress: u16) -> Rect {
        Rect {
            x: lerp_i16(self.x, to.x, progress),
            y: lerp_i16(self.y, to.y, progress),
            width: lerp_i16(self.width, to.width, progress),
            height: lerp_i16(self.height, to.height, progress),
        }
    }
}

#[inline]
fn lerp_i16(from: i16, to: i16, progress: u16) -> i16 {
    // Full i16 span times u16 progress does not fit in i32
    let delta = to as i64 - from as i64;
    let step = delta * progress as i64 / PROGRESS_MAX as i64;
    (from as i64 + step) as i16
}

/// Normalized progress of an animation `elapsed_ms` into `duration_ms`
///
/// Zero-length animations are complete immediately.
pub fn progress_at(elapsed_ms: u32, duration_ms: u32) -> u16 {
    if duration_ms == 0 || elapsed_ms >= duration_ms {
        return PROGRESS_MAX;
    }
    (elapsed_ms as u64 * PROGRESS_MAX as u64 / duration_ms as u64) as u16
}
