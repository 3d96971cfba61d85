//! Animation requests and ownership handles

use super::curve::Curve;
use super::panel::PanelId;
use crate::geometry::Rect;
use crate::traits::AnimationSurface;

/// Surface-assigned identifier of a scheduled animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationId(pub u16);

/// A single panel move handed to the surface
///
/// Built per request and not retained after scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationRequest {
    /// Panel whose layer moves
    pub panel: PanelId,
    /// Frame at the start of the motion
    pub from: Rect,
    /// Frame at the end of the motion
    pub to: Rect,
    /// Wait before motion begins
    pub delay_ms: u32,
    /// Length of the motion
    pub duration_ms: u32,
    /// Easing applied to progress
    pub curve: Curve,
}

/// Ownership token for one in-flight animation
///
/// Not `Clone`: releasing consumes the handle, so it can only happen once.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationHandle {
    id: AnimationId,
    panel: PanelId,
    target: Rect,
}

impl AnimationHandle {
    pub(crate) fn new(id: AnimationId, request: &AnimationRequest) -> Self {
        Self {
            id,
            panel: request.panel,
            target: request.to,
        }
    }

    /// Surface id of the animation
    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Panel being moved
    pub fn panel(&self) -> PanelId {
        self.panel
    }

    /// Frame the panel rests at once the animation finishes
    pub fn target(&self) -> Rect {
        self.target
    }

    /// Hand the animation's resources back to the surface
    pub(crate) fn release<S: AnimationSurface>(self, surface: &mut S) {
        surface.release(self.id);
    }
}
