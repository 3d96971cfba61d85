//! Shield panel animation
//!
//! Panels slide between a covering (closed) frame and an off-screen (open)
//! frame. Each move is a single animation tracked by an [`AnimationHandle`];
//! the [`ShieldAnimator`] schedules the two panels as a pair and reports when
//! the pair has come to rest.

pub mod animator;
pub mod curve;
pub mod panel;
pub mod request;
pub mod timeline;

pub use animator::{AnimateError, PairProgress, ShieldAnimator};
pub use curve::Curve;
pub use panel::{Panel, PanelId, PANEL_COUNT};
pub use request::{AnimationHandle, AnimationId, AnimationRequest};
pub use timeline::{AnimationStopped, Timeline, MAX_TRACKS};

/// Default animation duration in milliseconds
pub const DEFAULT_DURATION_MS: u32 = 250;
