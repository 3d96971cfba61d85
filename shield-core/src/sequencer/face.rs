//! Shield face sequencer
//!
//! One explicitly owned instance drives the whole face. Each host event is
//! handled to completion before the next one; nothing here blocks or waits.
//!
//! Cycle: a tick closes the shield immediately; once both panels rest at
//! their covering frames the time text is rewritten, then the shield opens
//! after [`OPEN_DELAY_MS`]. The text update therefore always lands strictly
//! between close completion and open scheduling.

use crate::animation::{PairProgress, Panel, PanelId, ShieldAnimator, PANEL_COUNT};
use crate::clock::{format_time, TimeText};
use crate::config::{FaceConfig, TickPolicy, CLOSE_DELAY_MS, OPEN_DELAY_MS};
use crate::state::{Event, SequencerState};
use crate::traits::{AnimationSurface, ClockSource, TimeDisplay};

use super::report::{Disposition, HostEvent, RefreshOutcome, Report};

/// Shield face sequencer
pub struct FaceSequencer<S, C, D>
where
    S: AnimationSurface,
    C: ClockSource,
    D: TimeDisplay,
{
    /// Current cycle state
    state: SequencerState,
    /// Panel mover
    animator: ShieldAnimator<S>,
    /// Local time source
    clock: C,
    /// Time text sink
    display: D,
    /// Both panels, indexed by `PanelId::index`
    panels: [Panel; PANEL_COUNT],
    /// Mid-cycle tick handling
    overlap: TickPolicy,
    /// Last text handed to the display
    displayed: TimeText,
    /// Tick remembered under `TickPolicy::Coalesce`
    pending_tick: bool,
    /// Set once teardown ran; all later events are discarded
    torn_down: bool,
    /// Cycles that reached Idle through a finished open
    cycles: u32,
}

impl<S, C, D> FaceSequencer<S, C, D>
where
    S: AnimationSurface,
    C: ClockSource,
    D: TimeDisplay,
{
    /// Create a sequencer
    ///
    /// Panels start wherever the surface currently shows their layers.
    pub fn new(config: &FaceConfig, surface: S, clock: C, display: D) -> Self {
        let panels = PanelId::ALL.map(|id| {
            let geometry = config.geometry(id);
            Panel::new(id, surface.layer_frame(id), geometry.closed, geometry.open)
        });

        Self {
            state: SequencerState::Idle,
            animator: ShieldAnimator::new(
                surface,
                config.duration_ms,
                config.curve,
                config.completion,
            ),
            clock,
            display,
            panels,
            overlap: config.overlap,
            displayed: TimeText::new(),
            pending_tick: false,
            torn_down: false,
            cycles: 0,
        }
    }

    /// Show the current time before the first tick
    pub fn start(&mut self) -> RefreshOutcome {
        self.refresh_time()
    }

    /// Get current state
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Last time text shown
    pub fn displayed_time(&self) -> &str {
        self.displayed.as_str()
    }

    /// Get a panel
    pub fn panel(&self, id: PanelId) -> &Panel {
        &self.panels[id.index()]
    }

    /// Number of completed close/open cycles
    pub fn cycles_completed(&self) -> u32 {
        self.cycles
    }

    /// Check if teardown has run
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Number of unreleased animation handles
    pub fn in_flight(&self) -> usize {
        self.animator.in_flight()
    }

    /// Check if a tick is waiting for the current cycle to end
    pub fn has_pending_tick(&self) -> bool {
        self.pending_tick
    }

    /// Access the animator
    pub fn animator(&self) -> &ShieldAnimator<S> {
        &self.animator
    }

    /// Mutable access to the surface (for hosts that step it)
    pub fn surface_mut(&mut self) -> &mut S {
        self.animator.surface_mut()
    }

    /// Access the display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Handle one host event
    pub fn handle(&mut self, event: HostEvent) -> Report {
        if self.torn_down {
            return Report::with(Disposition::Discarded);
        }

        match event {
            HostEvent::Tick { .. } => self.on_tick(),
            HostEvent::AnimationStopped { id, finished } => {
                match self.animator.on_stopped(id, finished, &mut self.panels) {
                    PairProgress::Ignored => Report::with(Disposition::Stale),
                    PairProgress::Pending => Report::with(Disposition::Absorbed),
                    PairProgress::Interrupted => self.on_interrupted(),
                    PairProgress::Finished => match self.state {
                        SequencerState::Closing => self.on_shield_closed(),
                        SequencerState::Opening => self.on_shield_opened(),
                        // Handles only exist while closing or opening
                        _ => Report::with(Disposition::Stale),
                    },
                }
            }
            HostEvent::Teardown => self.teardown(),
        }
    }

    fn on_tick(&mut self) -> Report {
        if self.state.is_busy() {
            return match self.overlap {
                TickPolicy::Drop => Report::with(Disposition::TickDropped),
                TickPolicy::Coalesce => {
                    self.pending_tick = true;
                    Report::with(Disposition::TickDeferred)
                }
            };
        }

        let mut report = Report::default();
        self.begin_cycle(&mut report);
        report
    }

    /// Idle → Closing, requesting both panels to cover the text
    fn begin_cycle(&mut self, report: &mut Report) {
        self.apply(Event::Tick, report);

        let targets = self.panels.map(|p| p.closed);
        if let Err(err) =
            self.animator
                .animate_pair(&self.panels, targets, CLOSE_DELAY_MS, PanelId::Top)
        {
            self.apply(Event::Interrupted, report);
            report.disposition = Disposition::Faulted(err);
        }
    }

    /// Closing → Closed → Opening
    fn on_shield_closed(&mut self) -> Report {
        let mut report = Report::default();
        self.apply(Event::ShieldClosed, &mut report);

        // A failed refresh leaves the old text; the shield still opens
        report.refresh = Some(self.refresh_time());
        self.apply(Event::TimeRefreshed, &mut report);

        let targets = self.panels.map(|p| p.open);
        if let Err(err) =
            self.animator
                .animate_pair(&self.panels, targets, OPEN_DELAY_MS, PanelId::Bottom)
        {
            self.apply(Event::Interrupted, &mut report);
            report.disposition = Disposition::Faulted(err);
        }

        report
    }

    /// Opening → Idle, then a coalesced tick if one is waiting
    fn on_shield_opened(&mut self) -> Report {
        let mut report = Report::default();
        self.apply(Event::ShieldOpened, &mut report);
        self.cycles = self.cycles.wrapping_add(1);

        if self.pending_tick {
            self.pending_tick = false;
            self.begin_cycle(&mut report);
        }

        report
    }

    fn on_interrupted(&mut self) -> Report {
        let mut report = Report::with(Disposition::Interrupted);
        self.pending_tick = false;
        self.apply(Event::Interrupted, &mut report);
        report
    }

    /// Cancel everything in flight and stop accepting events
    fn teardown(&mut self) -> Report {
        let cancelled = self.animator.cancel_all(&mut self.panels);
        let mut report = Report::with(Disposition::TornDown(cancelled as u8));

        self.pending_tick = false;
        if self.state.panels_in_motion() {
            self.apply(Event::Interrupted, &mut report);
        }
        self.torn_down = true;

        report
    }

    fn refresh_time(&mut self) -> RefreshOutcome {
        let time = self.clock.now()?;
        let text = format_time(time, self.clock.hour_style())?;

        self.display.show_time(&text);
        self.displayed = text;
        Ok(())
    }

    fn apply(&mut self, event: Event, report: &mut Report) {
        let next = self.state.transition(event);
        if next != self.state {
            self.state = next;
            report.enter(next);
        }
    }
}
