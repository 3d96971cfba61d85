//! Software animation surface
//!
//! Keeps the layer frames of both panels and steps every scheduled track
//! forward when the host calls [`Timeline::advance`]. Tracks are independent:
//! two tracks scheduled back-to-back with the same delay and duration move in
//! parallel but nothing synchronizes them.
//!
//! Stop notifications are returned from `advance` rather than delivered via
//! callback, so the host can feed them to the sequencer as events.

use heapless::Vec;

use super::curve::Curve;
use super::panel::{PanelId, PANEL_COUNT};
use super::request::{AnimationId, AnimationRequest};
use crate::geometry::{progress_at, Rect};
use crate::traits::{AnimationSurface, SurfaceError};

/// Maximum tracks held at once (scheduled, running, or stopped-unreleased)
pub const MAX_TRACKS: usize = 4;

/// Terminal notification for one animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationStopped {
    /// Animation that stopped
    pub id: AnimationId,
    /// True if it reached its end frame, false if cancelled
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackPhase {
    /// Waiting out the delay
    Delayed,
    /// Interpolating
    Running,
    /// Terminal, notification not yet handed out
    Stopping { finished: bool },
    /// Terminal and reported, waiting for release
    Stopped,
}

#[derive(Debug, Clone, Copy)]
struct Track {
    id: AnimationId,
    panel: PanelId,
    from: Rect,
    to: Rect,
    curve: Curve,
    delay_ms: u32,
    duration_ms: u32,
    scheduled_at_ms: u32,
    phase: TrackPhase,
}

impl Track {
    fn is_terminal(&self) -> bool {
        matches!(
            self.phase,
            TrackPhase::Stopping { .. } | TrackPhase::Stopped
        )
    }
}

/// Frame-stepped animation surface
#[derive(Debug, Clone)]
pub struct Timeline {
    /// Current layer frame per panel
    layers: [Rect; PANEL_COUNT],
    /// Tracks not yet released
    tracks: Vec<Track, MAX_TRACKS>,
    /// Time of the most recent `advance`
    now_ms: u32,
    /// Next id to hand out
    next_id: u16,
}

impl Timeline {
    /// Create a timeline with the given initial layer frames (top, bottom)
    pub fn new(layers: [Rect; PANEL_COUNT]) -> Self {
        Self {
            layers,
            tracks: Vec::new(),
            now_ms: 0,
            next_id: 0,
        }
    }

    /// Current host time as last seen by `advance`
    pub fn now_ms(&self) -> u32 {
        self.now_ms
    }

    /// Number of tracks still holding resources
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Check if any track is still delayed or moving
    pub fn is_animating(&self) -> bool {
        self.tracks.iter().any(|t| !t.is_terminal())
    }

    /// Step all tracks to `now_ms`
    ///
    /// Updates layer frames and returns the animations that reached a
    /// terminal state since the previous call (including cancellations).
    pub fn advance(&mut self, now_ms: u32) -> Vec<AnimationStopped, MAX_TRACKS> {
        self.now_ms = now_ms;
        let mut stopped = Vec::new();

        for track in self.tracks.iter_mut() {
            match track.phase {
                TrackPhase::Delayed | TrackPhase::Running => {
                    let elapsed = now_ms.wrapping_sub(track.scheduled_at_ms);
                    if elapsed < track.delay_ms {
                        continue;
                    }
                    track.phase = TrackPhase::Running;

                    let progress = progress_at(elapsed - track.delay_ms, track.duration_ms);
                    let eased = track.curve.apply(progress);
                    self.layers[track.panel.index()] = track.from.lerp(track.to, eased);

                    if elapsed - track.delay_ms >= track.duration_ms {
                        self.layers[track.panel.index()] = track.to;
                        track.phase = TrackPhase::Stopped;
                        // Capacity equals MAX_TRACKS, cannot overflow
                        let _ = stopped.push(AnimationStopped {
                            id: track.id,
                            finished: true,
                        });
                    }
                }
                TrackPhase::Stopping { finished } => {
                    track.phase = TrackPhase::Stopped;
                    let _ = stopped.push(AnimationStopped {
                        id: track.id,
                        finished,
                    });
                }
                TrackPhase::Stopped => {}
            }
        }

        stopped
    }

    fn find_mut(&mut self, id: AnimationId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }
}

impl AnimationSurface for Timeline {
    fn schedule(&mut self, request: &AnimationRequest) -> Result<AnimationId, SurfaceError> {
        if self.tracks.is_full() {
            return Err(SurfaceError::NoCapacity);
        }

        let id = AnimationId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.tracks
            .push(Track {
                id,
                panel: request.panel,
                from: request.from,
                to: request.to,
                curve: request.curve,
                delay_ms: request.delay_ms,
                duration_ms: request.duration_ms,
                scheduled_at_ms: self.now_ms,
                phase: TrackPhase::Delayed,
            })
            .map_err(|_| SurfaceError::NoCapacity)?;

        Ok(id)
    }

    fn cancel(&mut self, id: AnimationId) {
        if let Some(track) = self.find_mut(id) {
            if !track.is_terminal() {
                track.phase = TrackPhase::Stopping { finished: false };
            }
        }
    }

    fn release(&mut self, id: AnimationId) {
        self.tracks.retain(|t| t.id != id);
    }

    fn layer_frame(&self, panel: PanelId) -> Rect {
        self.layers[panel.index()]
    }
}
