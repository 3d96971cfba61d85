//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Minute tick accepted by the sequencer
    Tick,
    /// Both panels came to rest at their covering frames
    ShieldClosed,
    /// Time text refreshed (or the refresh was skipped)
    TimeRefreshed,
    /// Both panels came to rest off-screen
    ShieldOpened,
    /// A panel move was cut short or could not be scheduled
    Interrupted,
}
