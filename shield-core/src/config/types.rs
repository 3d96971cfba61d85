//! Configuration type definitions
//!
//! Defaults reproduce the classic 144x168 shield face: two 144x66 panels
//! meeting over the time text, sliding 28 px off-screen to open.

use crate::animation::{Curve, PanelId, DEFAULT_DURATION_MS, PANEL_COUNT};
use crate::clock::HourStyle;
use crate::geometry::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Delay before the shield starts closing after a tick
pub const CLOSE_DELAY_MS: u32 = 0;

/// Pause between the time update and the shield opening
pub const OPEN_DELAY_MS: u32 = 2000;

/// Longest animation duration accepted from config
pub const MAX_DURATION_MS: u32 = 10_000;

/// How paired completion is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompletionPolicy {
    /// Wait for both panels to report a terminal state
    #[default]
    Join,
    /// Watch one panel per direction and assume the other stops with it
    Primary,
}

impl CompletionPolicy {
    /// Parse a config name (`join`, `primary`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "join" => Some(CompletionPolicy::Join),
            "primary" => Some(CompletionPolicy::Primary),
            _ => None,
        }
    }
}

/// What to do with a tick that arrives mid-cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TickPolicy {
    /// Discard it
    #[default]
    Drop,
    /// Remember one and start another cycle once back at idle
    Coalesce,
}

impl TickPolicy {
    /// Parse a config name (`drop`, `coalesce`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "drop" => Some(TickPolicy::Drop),
            "coalesce" => Some(TickPolicy::Coalesce),
            _ => None,
        }
    }
}

/// Rest frames of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelGeometry {
    /// Frame covering the time text
    pub closed: Rect,
    /// Off-screen frame
    pub open: Rect,
}

/// Face configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceConfig {
    /// Upper panel frames
    pub top: PanelGeometry,
    /// Lower panel frames
    pub bottom: PanelGeometry,
    /// Length of each panel move
    pub duration_ms: u32,
    /// Easing for panel moves
    pub curve: Curve,
    /// Paired completion detection
    pub completion: CompletionPolicy,
    /// Mid-cycle tick handling
    pub overlap: TickPolicy,
    /// Clock format when the host has no preference of its own
    pub clock_style: HourStyle,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            top: PanelGeometry {
                closed: Rect::new(0, 18, 144, 66),
                open: Rect::new(0, -10, 144, 66),
            },
            bottom: PanelGeometry {
                closed: Rect::new(0, 84, 144, 66),
                open: Rect::new(0, 112, 144, 66),
            },
            duration_ms: DEFAULT_DURATION_MS,
            curve: Curve::EaseInOut,
            completion: CompletionPolicy::Join,
            overlap: TickPolicy::Drop,
            clock_style: HourStyle::TwentyFour,
        }
    }
}

impl FaceConfig {
    /// Rest frames of a panel
    pub fn geometry(&self, panel: PanelId) -> &PanelGeometry {
        match panel {
            PanelId::Top => &self.top,
            PanelId::Bottom => &self.bottom,
        }
    }

    /// Layer frames the face starts with (shield open, time visible)
    pub fn initial_layers(&self) -> [Rect; PANEL_COUNT] {
        [self.top.open, self.bottom.open]
    }
}
