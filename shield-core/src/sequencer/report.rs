//! Sequencer inputs and per-event reports

use heapless::Vec;

use crate::animation::{AnimateError, AnimationId};
use crate::clock::FormatError;
use crate::state::SequencerState;
use crate::traits::ClockError;

/// Most states one event can walk through (stop → Closed → Opening, then a
/// coalesced tick → Idle → Closing)
pub const MAX_ENTERED: usize = 4;

/// Events the host delivers to the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    /// Minute elapsed; the timestamp is informational only
    Tick {
        /// Host timestamp in seconds
        timestamp_s: u32,
    },
    /// The surface reports an animation reached a terminal state
    AnimationStopped {
        /// Animation that stopped
        id: AnimationId,
        /// False if it was cancelled before reaching its end frame
        finished: bool,
    },
    /// Host is shutting the face down
    Teardown,
}

/// What happened to the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Disposition {
    /// Event moved the cycle along
    #[default]
    Advanced,
    /// Event was valid but had no effect (e.g. first stop of a pair)
    Absorbed,
    /// Tick arrived mid-cycle and was discarded
    TickDropped,
    /// Tick arrived mid-cycle and was remembered for later
    TickDeferred,
    /// Stop notification for an animation not in flight
    Stale,
    /// Panel move was cut short; cycle abandoned
    Interrupted,
    /// Panel move could not be scheduled; cycle abandoned
    Faulted(AnimateError),
    /// Sequencer has been torn down; event discarded
    Discarded,
    /// Teardown completed, with this many handles cancelled
    TornDown(u8),
}

/// Why the time text was not refreshed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshError {
    /// Clock could not be read
    Clock(ClockError),
    /// Clock returned a time that cannot be shown
    Format(FormatError),
}

impl From<ClockError> for RefreshError {
    fn from(err: ClockError) -> Self {
        RefreshError::Clock(err)
    }
}

impl From<FormatError> for RefreshError {
    fn from(err: FormatError) -> Self {
        RefreshError::Format(err)
    }
}

/// Result of a time text refresh
pub type RefreshOutcome = Result<(), RefreshError>;

/// Everything one host event caused
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    /// States entered, in order
    pub entered: Vec<SequencerState, MAX_ENTERED>,
    /// Event disposition
    pub disposition: Disposition,
    /// Set if a time refresh was attempted
    pub refresh: Option<RefreshOutcome>,
}

impl Report {
    pub(crate) fn with(disposition: Disposition) -> Self {
        Self {
            disposition,
            ..Self::default()
        }
    }

    pub(crate) fn enter(&mut self, state: SequencerState) {
        // Bounded by the transition table; a full buffer only loses history
        let _ = self.entered.push(state);
    }

    /// Check if the time text was rewritten
    pub fn refreshed(&self) -> bool {
        matches!(self.refresh, Some(Ok(())))
    }
}
