//! Face controller task
//!
//! Owns the face sequencer and its software surface. Steps the surface on a
//! frame ticker, feeds stop notifications back to the sequencer, and hands
//! host events from the channel to it one at a time.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};

use shield_core::animation::{PanelId, Timeline};
use shield_core::sequencer::Disposition;
use shield_core::traits::AnimationSurface;
use shield_core::{FaceConfig, FaceSequencer, HostEvent, Report};

use crate::channels::EVENT_CHANNEL;
use crate::clock::RtcClock;
use crate::display::LogDisplay;

/// Frame interval while stepping the surface (~30 fps)
pub const FRAME_INTERVAL_MS: u64 = 33;

type Face = FaceSequencer<Timeline, RtcClock, LogDisplay>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: FaceConfig, clock: RtcClock) {
    info!("Controller task started");

    let surface = Timeline::new(config.initial_layers());
    let mut face = FaceSequencer::new(&config, surface, clock, LogDisplay::new());

    if let Err(e) = face.start() {
        warn!("Initial time refresh failed: {:?}", e);
    }

    let mut frames = Ticker::every(Duration::from_millis(FRAME_INTERVAL_MS));

    loop {
        match select(frames.next(), EVENT_CHANNEL.receive()).await {
            Either::First(()) => {
                step(&mut face);
            }
            Either::Second(event) => {
                // Bring the surface up to date so new tracks start from now
                step(&mut face);

                debug!("Event: {:?}", event);
                let report = face.handle(event);
                log_report(&report);

                if face.is_torn_down() {
                    info!("Face torn down, controller stopping");
                    return;
                }
            }
        }
    }
}

/// Advance the surface to the current time and deliver any stops
fn step(face: &mut Face) {
    let now_ms = Instant::now().as_millis() as u32;
    let timeline = face.surface_mut();
    let animating = timeline.is_animating();
    let stopped = timeline.advance(now_ms);

    if animating {
        let timeline = face.animator().surface();
        trace!(
            "Frame {}ms: top={:?} bottom={:?}",
            now_ms,
            timeline.layer_frame(PanelId::Top),
            timeline.layer_frame(PanelId::Bottom)
        );
    }

    for stop in stopped {
        let report = face.handle(HostEvent::AnimationStopped {
            id: stop.id,
            finished: stop.finished,
        });
        log_report(&report);
    }
}

fn log_report(report: &Report) {
    for state in report.entered.iter() {
        info!("State -> {:?}", state);
    }

    match report.disposition {
        Disposition::Advanced | Disposition::Absorbed => {}
        Disposition::TickDropped => debug!("Tick dropped mid-cycle"),
        Disposition::TickDeferred => debug!("Tick deferred until cycle ends"),
        Disposition::Stale => trace!("Stale stop notification"),
        Disposition::Interrupted => warn!("Panel move cut short, cycle abandoned"),
        Disposition::Faulted(e) => error!("Panel move failed: {:?}", e),
        Disposition::Discarded => debug!("Event discarded after teardown"),
        Disposition::TornDown(cancelled) => info!("Teardown cancelled {} animations", cancelled),
    }

    if let Some(Err(e)) = report.refresh {
        warn!("Time refresh failed: {:?}", e);
    }
}
