//! Board-agnostic core logic for the shield watchface
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Host collaborator traits (animation surface, clock, time text)
//! - Shield panel animation with per-panel single-flight handles
//! - State machine for the close/refresh/open cycle
//! - Face sequencer driving the state machine from host events
//! - "HH:MM" time formatting
//! - Configuration types and the `face.toml` parser
//!
//! # Testing
//!
//! Tests run on the host with `std` enabled (via `cfg_attr`), while device
//! builds are `no_std`:
//! ```bash
//! cargo test -p shield-core
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod clock;
pub mod config;
pub mod geometry;
pub mod sequencer;
pub mod state;
pub mod traits;

// Re-export commonly used items
pub use config::FaceConfig;
pub use geometry::Rect;
pub use sequencer::{FaceSequencer, HostEvent, Report};
pub use state::SequencerState;
