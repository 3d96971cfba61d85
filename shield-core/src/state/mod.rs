//! Sequencer state machine
//!
//! Defines the authoritative shield cycle. The state machine is explicit,
//! finite, and deterministic; entry actions live in the sequencer.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::SequencerState;
