//! Paired panel animation
//!
//! The animator owns the surface and one handle slot per panel. A slot is
//! occupied from the moment a request is scheduled until its handle is
//! released, which enforces single-flight per panel.
//!
//! Pair completion follows the configured [`CompletionPolicy`]:
//! - `Join`: wait for every in-flight handle to stop, then release them all.
//! - `Primary`: watch only the designated panel; when it stops, release both
//!   handles without checking on the other one.

use super::curve::Curve;
use super::panel::{Panel, PanelId, PANEL_COUNT};
use super::request::{AnimationHandle, AnimationId, AnimationRequest};
use crate::config::CompletionPolicy;
use crate::geometry::Rect;
use crate::traits::{AnimationSurface, SurfaceError};

/// Errors returned when requesting an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimateError {
    /// Panel still holds an unreleased handle
    PanelBusy(PanelId),
    /// Surface refused the request
    Surface(SurfaceError),
}

impl From<SurfaceError> for AnimateError {
    fn from(err: SurfaceError) -> Self {
        AnimateError::Surface(err)
    }
}

/// Result of feeding a stop notification to the animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairProgress {
    /// Id not in flight (already released, or never ours)
    Ignored,
    /// Recorded, pair not complete yet
    Pending,
    /// Pair complete, every panel reached its target
    Finished,
    /// Pair complete, at least one animation was cut short
    Interrupted,
}

/// A scheduled handle and its terminal outcome once known
#[derive(Debug)]
struct Flight {
    handle: AnimationHandle,
    outcome: Option<bool>,
}

/// Drives the two shield panels
#[derive(Debug)]
pub struct ShieldAnimator<S: AnimationSurface> {
    surface: S,
    duration_ms: u32,
    curve: Curve,
    completion: CompletionPolicy,
    flights: [Option<Flight>; PANEL_COUNT],
    /// Panel observed under `CompletionPolicy::Primary`
    primary: Option<PanelId>,
}

impl<S: AnimationSurface> ShieldAnimator<S> {
    /// Create an animator around a surface
    pub fn new(surface: S, duration_ms: u32, curve: Curve, completion: CompletionPolicy) -> Self {
        Self {
            surface,
            duration_ms,
            curve,
            completion,
            flights: [None, None],
            primary: None,
        }
    }

    /// Access the surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface (for hosts that step it)
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Check if a panel holds an unreleased handle
    pub fn is_busy(&self, panel: PanelId) -> bool {
        self.flights[panel.index()].is_some()
    }

    /// Number of unreleased handles
    pub fn in_flight(&self) -> usize {
        self.flights.iter().filter(|f| f.is_some()).count()
    }

    /// Id of the animation currently moving a panel
    pub fn flight_id(&self, panel: PanelId) -> Option<AnimationId> {
        self.flights[panel.index()].as_ref().map(|f| f.handle.id())
    }

    /// Move one panel from where it rests to `target`
    ///
    /// Motion starts `delay_ms` after scheduling.
    pub fn animate(
        &mut self,
        panel: &Panel,
        target: Rect,
        delay_ms: u32,
    ) -> Result<AnimationId, AnimateError> {
        let slot = panel.id.index();
        if self.flights[slot].is_some() {
            return Err(AnimateError::PanelBusy(panel.id));
        }

        let request = AnimationRequest {
            panel: panel.id,
            from: panel.frame,
            to: target,
            delay_ms,
            duration_ms: self.duration_ms,
            curve: self.curve,
        };

        let id = self.surface.schedule(&request)?;
        self.flights[slot] = Some(Flight {
            handle: AnimationHandle::new(id, &request),
            outcome: None,
        });

        Ok(id)
    }

    /// Move both panels with the same delay
    ///
    /// Top is scheduled first, bottom immediately after. If bottom cannot be
    /// scheduled, top is cancelled and released so nothing is left in flight.
    /// `primary` is the panel observed under `CompletionPolicy::Primary`.
    pub fn animate_pair(
        &mut self,
        panels: &[Panel; PANEL_COUNT],
        targets: [Rect; PANEL_COUNT],
        delay_ms: u32,
        primary: PanelId,
    ) -> Result<(), AnimateError> {
        if let Some(busy) = PanelId::ALL.into_iter().find(|p| self.is_busy(*p)) {
            return Err(AnimateError::PanelBusy(busy));
        }

        let top = PanelId::Top.index();
        let bottom = PanelId::Bottom.index();

        self.animate(&panels[top], targets[top], delay_ms)?;
        if let Err(err) = self.animate(&panels[bottom], targets[bottom], delay_ms) {
            self.abandon(PanelId::Top);
            return Err(err);
        }

        self.primary = Some(primary);
        Ok(())
    }

    /// Record a stop notification from the surface
    ///
    /// Updates the stopped panel's resting frame and, when the pair is
    /// complete, releases its handles.
    pub fn on_stopped(
        &mut self,
        id: AnimationId,
        finished: bool,
        panels: &mut [Panel; PANEL_COUNT],
    ) -> PairProgress {
        let Some(slot) = self.flights.iter().position(|f| {
            f.as_ref()
                .is_some_and(|f| f.handle.id() == id && f.outcome.is_none())
        }) else {
            return PairProgress::Ignored;
        };

        let panel_id = PanelId::ALL[slot];
        if let Some(flight) = self.flights[slot].as_mut() {
            flight.outcome = Some(finished);
            panels[slot].frame = if finished {
                flight.handle.target()
            } else {
                self.surface.layer_frame(panel_id)
            };
        }

        match self.completion {
            CompletionPolicy::Join => {
                let all_stopped = self
                    .flights
                    .iter()
                    .flatten()
                    .all(|f| f.outcome.is_some());
                if !all_stopped {
                    return PairProgress::Pending;
                }
                let all_finished = self.flights.iter().flatten().all(|f| f.outcome == Some(true));
                self.release_all(panels);
                if all_finished {
                    PairProgress::Finished
                } else {
                    PairProgress::Interrupted
                }
            }
            CompletionPolicy::Primary => {
                let watched = self.primary.unwrap_or(PanelId::Top);
                if panel_id != watched && self.is_busy(watched) {
                    return PairProgress::Pending;
                }
                self.release_all(panels);
                if finished {
                    PairProgress::Finished
                } else {
                    PairProgress::Interrupted
                }
            }
        }
    }

    /// Cancel and release everything in flight without reporting completion
    ///
    /// Returns the number of handles released.
    pub fn cancel_all(&mut self, panels: &mut [Panel; PANEL_COUNT]) -> usize {
        let count = self.in_flight();
        self.release_all(panels);
        count
    }

    /// Release every occupied slot
    ///
    /// Animations that have not stopped are cancelled first and their panel
    /// frame taken from the surface.
    fn release_all(&mut self, panels: &mut [Panel; PANEL_COUNT]) {
        for panel_id in PanelId::ALL {
            let slot = panel_id.index();
            if let Some(flight) = self.flights[slot].take() {
                if flight.outcome.is_none() {
                    self.surface.cancel(flight.handle.id());
                    panels[slot].frame = self.surface.layer_frame(panel_id);
                }
                flight.handle.release(&mut self.surface);
            }
        }
        self.primary = None;
    }

    fn abandon(&mut self, panel: PanelId) {
        if let Some(flight) = self.flights[panel.index()].take() {
            self.surface.cancel(flight.handle.id());
            flight.handle.release(&mut self.surface);
        }
    }
}
