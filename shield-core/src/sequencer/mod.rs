//! Face sequencer
//!
//! Owns the panels, the animator, and the state machine, and turns host
//! events (ticks, animation stops, teardown) into panel requests and time
//! text updates.

pub mod face;
pub mod report;

pub use face::FaceSequencer;
pub use report::{Disposition, HostEvent, RefreshError, RefreshOutcome, Report, MAX_ENTERED};
