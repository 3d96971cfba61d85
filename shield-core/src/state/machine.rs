//! State machine definition
//!
//! All panel requests and text updates are a function of the current state
//! and an event.

use super::events::Event;

/// Sequencer states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerState {
    /// Shield open, waiting for the next tick
    #[default]
    Idle,
    /// Panels moving to their covering frames
    Closing,
    /// Shield closed; time text is rewritten here
    Closed,
    /// Panels waiting out the reveal delay, then moving off-screen
    Opening,
}

impl SequencerState {
    /// Check if a cycle is in progress
    pub fn is_busy(&self) -> bool {
        !matches!(self, SequencerState::Idle)
    }

    /// Check if panels are expected to be moving (or about to)
    pub fn panels_in_motion(&self) -> bool {
        matches!(self, SequencerState::Closing | SequencerState::Opening)
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use SequencerState::*;

        match (self, event) {
            (Idle, Tick) => Closing,

            (Closing, ShieldClosed) => Closed,
            (Closing, Interrupted) => Idle,

            (Closed, TimeRefreshed) => Opening,

            (Opening, ShieldOpened) => Idle,
            (Opening, Interrupted) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
