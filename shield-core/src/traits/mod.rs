//! Host collaborator traits
//!
//! These traits define the interface between the sequencing logic and
//! whatever renders layers, keeps time, and shows the time text.

pub mod clock;
pub mod display;
pub mod surface;

pub use clock::{ClockError, ClockSource};
pub use display::TimeDisplay;
pub use surface::{AnimationSurface, SurfaceError};
