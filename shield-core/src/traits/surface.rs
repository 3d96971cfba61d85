//! Animation surface trait

use crate::animation::{AnimationId, AnimationRequest, PanelId};
use crate::geometry::Rect;

/// Errors the surface can return when scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// No free animation slot
    NoCapacity,
    /// Request rejected (e.g. panel unknown to the surface)
    InvalidRequest,
}

/// Trait for the rendering/animation surface
///
/// The surface owns the layer frames and drives interpolation frames on its
/// own schedule. It never calls back into the sequencer; instead the host
/// delivers an `AnimationStopped` event carrying the id returned from
/// [`schedule`](AnimationSurface::schedule) and whether the animation ran to
/// its end.
pub trait AnimationSurface {
    /// Schedule an animation, returning the id its stop notification will carry
    fn schedule(&mut self, request: &AnimationRequest) -> Result<AnimationId, SurfaceError>;

    /// Stop an animation early
    ///
    /// The surface reports the animation as not finished. Cancelling an
    /// animation that already stopped is a no-op.
    fn cancel(&mut self, id: AnimationId);

    /// Free the resources held for an animation
    ///
    /// Called exactly once per scheduled id, after it reached a terminal state.
    fn release(&mut self, id: AnimationId);

    /// Current frame of a panel's layer
    fn layer_frame(&self, panel: PanelId) -> Rect;
}
