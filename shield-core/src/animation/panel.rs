//! Shield panels

use crate::geometry::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of shield panels
pub const PANEL_COUNT: usize = 2;

/// Panel identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PanelId {
    /// Upper half, slides up to open
    Top,
    /// Lower half, slides down to open
    Bottom,
}

impl PanelId {
    /// Both panels in scheduling order
    pub const ALL: [PanelId; PANEL_COUNT] = [PanelId::Top, PanelId::Bottom];

    /// Slot index for per-panel arrays
    pub const fn index(self) -> usize {
        match self {
            PanelId::Top => 0,
            PanelId::Bottom => 1,
        }
    }

    /// The other panel of the pair
    pub const fn other(self) -> Self {
        match self {
            PanelId::Top => PanelId::Bottom,
            PanelId::Bottom => PanelId::Top,
        }
    }
}

/// One shield panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Panel {
    /// Which panel this is
    pub id: PanelId,
    /// Where the layer currently rests
    pub frame: Rect,
    /// Frame covering the time text
    pub closed: Rect,
    /// Off-screen frame revealing the time text
    pub open: Rect,
}

impl Panel {
    /// Create a panel resting at `frame`
    pub const fn new(id: PanelId, frame: Rect, closed: Rect, open: Rect) -> Self {
        Self {
            id,
            frame,
            closed,
            open,
        }
    }

    /// Check if the panel rests at its covering frame
    pub fn is_closed(&self) -> bool {
        self.frame == self.closed
    }

    /// Check if the panel rests at its off-screen frame
    pub fn is_open(&self) -> bool {
        self.frame == self.open
    }
}
