//! End-to-end shield cycles against a journaling surface
//!
//! The surface and display write into one shared journal so the relative
//! order of panel requests, releases, and time text updates can be checked.

use std::cell::RefCell;
use std::rc::Rc;

use shield_core::animation::{
    AnimateError, AnimationId, AnimationRequest, Panel, PanelId, ShieldAnimator, Timeline,
};
use shield_core::clock::{HourStyle, WallTime};
use shield_core::config::{CompletionPolicy, FaceConfig, CLOSE_DELAY_MS, OPEN_DELAY_MS};
use shield_core::sequencer::Disposition;
use shield_core::traits::{AnimationSurface, ClockError, ClockSource, SurfaceError, TimeDisplay};
use shield_core::{FaceSequencer, HostEvent, Rect, SequencerState};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Schedule(AnimationRequest),
    Cancel(AnimationId),
    Release(AnimationId),
    Show(String),
}

type Journal = Rc<RefCell<Vec<Op>>>;

struct JournalSurface {
    journal: Journal,
    layers: [Rect; 2],
    next_id: u16,
    refuse: bool,
}

impl AnimationSurface for JournalSurface {
    fn schedule(&mut self, request: &AnimationRequest) -> Result<AnimationId, SurfaceError> {
        if self.refuse {
            return Err(SurfaceError::NoCapacity);
        }
        self.journal.borrow_mut().push(Op::Schedule(*request));
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        Ok(id)
    }

    fn cancel(&mut self, id: AnimationId) {
        self.journal.borrow_mut().push(Op::Cancel(id));
    }

    fn release(&mut self, id: AnimationId) {
        self.journal.borrow_mut().push(Op::Release(id));
    }

    fn layer_frame(&self, panel: PanelId) -> Rect {
        self.layers[panel.index()]
    }
}

struct JournalDisplay {
    journal: Journal,
}

impl TimeDisplay for JournalDisplay {
    fn show_time(&mut self, text: &str) {
        self.journal.borrow_mut().push(Op::Show(text.to_string()));
    }
}

struct SteppedClock {
    minute: u8,
    style: HourStyle,
}

impl ClockSource for SteppedClock {
    fn now(&mut self) -> Result<WallTime, ClockError> {
        let time = WallTime::new(10, self.minute);
        self.minute += 1;
        Ok(time)
    }

    fn hour_style(&self) -> HourStyle {
        self.style
    }
}

type Face = FaceSequencer<JournalSurface, SteppedClock, JournalDisplay>;

fn face(config: FaceConfig) -> (Face, Journal) {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let surface = JournalSurface {
        journal: journal.clone(),
        layers: config.initial_layers(),
        next_id: 0,
        refuse: false,
    };
    let clock = SteppedClock {
        minute: 5,
        style: HourStyle::TwentyFour,
    };
    let display = JournalDisplay {
        journal: journal.clone(),
    };
    (FaceSequencer::new(&config, surface, clock, display), journal)
}

fn stop(face: &mut Face, id: u16, finished: bool) -> shield_core::Report {
    face.handle(HostEvent::AnimationStopped {
        id: AnimationId(id),
        finished,
    })
}

fn schedules(journal: &Journal) -> Vec<AnimationRequest> {
    journal
        .borrow()
        .iter()
        .filter_map(|op| match op {
            Op::Schedule(req) => Some(*req),
            _ => None,
        })
        .collect()
}

#[test]
fn close_targets_cover_and_open_targets_hide() {
    let (mut face, journal) = face(FaceConfig::default());

    face.handle(HostEvent::Tick { timestamp_s: 0 });
    stop(&mut face, 0, true);
    stop(&mut face, 1, true);

    let requests = schedules(&journal);
    assert_eq!(requests.len(), 4);

    // Close: top then bottom, to the covering frames, no delay
    assert_eq!(requests[0].panel, PanelId::Top);
    assert_eq!(requests[0].from, Rect::new(0, -10, 144, 66));
    assert_eq!(requests[0].to, Rect::new(0, 18, 144, 66));
    assert_eq!(requests[1].panel, PanelId::Bottom);
    assert_eq!(requests[1].from, Rect::new(0, 112, 144, 66));
    assert_eq!(requests[1].to, Rect::new(0, 84, 144, 66));

    // Open: from the covering frames back off-screen
    assert_eq!(requests[2].from, Rect::new(0, 18, 144, 66));
    assert_eq!(requests[2].to, Rect::new(0, -10, 144, 66));
    assert_eq!(requests[3].from, Rect::new(0, 84, 144, 66));
    assert_eq!(requests[3].to, Rect::new(0, 112, 144, 66));
}

#[test]
fn delays_are_fixed() {
    let (mut face, journal) = face(FaceConfig::default());

    for cycle in 0..3u16 {
        let base = cycle * 4;
        face.handle(HostEvent::Tick {
            timestamp_s: cycle as u32 * 60,
        });
        stop(&mut face, base, true);
        stop(&mut face, base + 1, true);
        stop(&mut face, base + 2, true);
        stop(&mut face, base + 3, true);
    }

    let requests = schedules(&journal);
    assert_eq!(requests.len(), 12);
    for pair in requests.chunks(4) {
        assert_eq!(pair[0].delay_ms, CLOSE_DELAY_MS);
        assert_eq!(pair[1].delay_ms, CLOSE_DELAY_MS);
        assert_eq!(pair[2].delay_ms, OPEN_DELAY_MS);
        assert_eq!(pair[3].delay_ms, OPEN_DELAY_MS);
        assert_eq!(pair[0].delay_ms, 0);
        assert_eq!(pair[2].delay_ms, 2000);
        // Paired moves share duration
        assert_eq!(pair[0].duration_ms, pair[1].duration_ms);
        assert_eq!(pair[2].duration_ms, pair[3].duration_ms);
    }
}

#[test]
fn time_update_sits_between_close_release_and_open_schedule() {
    let (mut face, journal) = face(FaceConfig::default());

    face.handle(HostEvent::Tick { timestamp_s: 0 });
    let first = stop(&mut face, 0, true);
    assert_eq!(first.disposition, Disposition::Absorbed);
    assert!(journal.borrow().iter().all(|op| !matches!(op, Op::Show(_))));

    let second = stop(&mut face, 1, true);
    assert!(second.refreshed());

    let ops = journal.borrow().clone();
    let show = ops
        .iter()
        .position(|op| matches!(op, Op::Show(_)))
        .unwrap();
    let last_close_release = ops
        .iter()
        .rposition(|op| matches!(op, Op::Release(AnimationId(0 | 1))))
        .unwrap();
    let first_open_schedule = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| matches!(op, Op::Schedule(_)))
        .nth(2)
        .map(|(i, _)| i)
        .unwrap();

    assert!(last_close_release < show);
    assert!(show < first_open_schedule);
    assert_eq!(ops[show], Op::Show("10:05".to_string()));
}

#[test]
fn each_handle_released_once() {
    let (mut face, journal) = face(FaceConfig::default());

    face.handle(HostEvent::Tick { timestamp_s: 0 });
    for id in 0..4 {
        stop(&mut face, id, true);
    }
    // Duplicate notifications are stale and release nothing
    assert_eq!(stop(&mut face, 3, true).disposition, Disposition::Stale);

    let ops = journal.borrow();
    for id in 0..4 {
        let releases = ops
            .iter()
            .filter(|op| **op == Op::Release(AnimationId(id)))
            .count();
        assert_eq!(releases, 1, "handle {id}");
    }
    assert!(ops.iter().all(|op| !matches!(op, Op::Cancel(_))));
}

#[test]
fn unfinished_close_stops_the_cycle() {
    let (mut face, journal) = face(FaceConfig::default());

    face.handle(HostEvent::Tick { timestamp_s: 0 });
    stop(&mut face, 0, false);
    let report = stop(&mut face, 1, true);

    assert_eq!(report.disposition, Disposition::Interrupted);
    assert_eq!(report.entered.as_slice(), [SequencerState::Idle]);
    assert!(report.refresh.is_none());
    assert_eq!(schedules(&journal).len(), 2);
    assert!(journal.borrow().iter().all(|op| !matches!(op, Op::Show(_))));
}

#[test]
fn unfinished_open_returns_to_idle() {
    let (mut face, journal) = face(FaceConfig::default());

    face.handle(HostEvent::Tick { timestamp_s: 0 });
    stop(&mut face, 0, true);
    stop(&mut face, 1, true);
    stop(&mut face, 2, false);
    let report = stop(&mut face, 3, false);

    assert_eq!(report.disposition, Disposition::Interrupted);
    assert_eq!(face.state(), SequencerState::Idle);
    assert_eq!(face.cycles_completed(), 0);
    // No follow-on request after the interruption
    assert_eq!(schedules(&journal).len(), 4);
}

#[test]
fn teardown_while_closing_is_silent() {
    let (mut face, journal) = face(FaceConfig::default());

    face.handle(HostEvent::Tick { timestamp_s: 0 });
    let report = face.handle(HostEvent::Teardown);
    assert_eq!(report.disposition, Disposition::TornDown(2));

    // Cancelled animations later report not finished; nothing follows
    assert_eq!(stop(&mut face, 0, false).disposition, Disposition::Discarded);
    assert_eq!(stop(&mut face, 1, false).disposition, Disposition::Discarded);
    for minute in 1..5 {
        let tick = face.handle(HostEvent::Tick {
            timestamp_s: minute * 60,
        });
        assert_eq!(tick.disposition, Disposition::Discarded);
    }

    let ops = journal.borrow();
    assert_eq!(schedules(&journal).len(), 2);
    assert!(ops.iter().all(|op| !matches!(op, Op::Show(_))));
    assert!(ops.contains(&Op::Cancel(AnimationId(0))));
    assert!(ops.contains(&Op::Cancel(AnimationId(1))));
    assert!(ops.contains(&Op::Release(AnimationId(0))));
    assert!(ops.contains(&Op::Release(AnimationId(1))));
    assert_ne!(face.state(), SequencerState::Opening);
}

#[test]
fn surface_refusal_abandons_cycle() {
    let (mut face, journal) = face(FaceConfig::default());
    face.surface_mut().refuse = true;

    let report = face.handle(HostEvent::Tick { timestamp_s: 0 });
    assert_eq!(
        report.entered.as_slice(),
        [SequencerState::Closing, SequencerState::Idle]
    );
    assert!(matches!(report.disposition, Disposition::Faulted(_)));
    assert_eq!(face.in_flight(), 0);
    assert!(schedules(&journal).is_empty());

    // Recovers once the surface accepts requests again
    face.surface_mut().refuse = false;
    let report = face.handle(HostEvent::Tick { timestamp_s: 60 });
    assert_eq!(report.entered.as_slice(), [SequencerState::Closing]);
}

// Primary-only watching releases the secondary handle without a stop from it.
#[test]
fn primary_policy_trusts_one_panel() {
    let config = FaceConfig {
        completion: CompletionPolicy::Primary,
        ..FaceConfig::default()
    };
    let (mut face, journal) = face(config);

    face.handle(HostEvent::Tick { timestamp_s: 0 });
    // Top is watched while closing
    let report = stop(&mut face, 0, true);
    assert_eq!(
        report.entered.as_slice(),
        [SequencerState::Closed, SequencerState::Opening]
    );
    // Bottom never reported; it was cancelled and released on top's word
    assert!(journal.borrow().contains(&Op::Cancel(AnimationId(1))));
    assert!(journal.borrow().contains(&Op::Release(AnimationId(1))));
    assert_eq!(stop(&mut face, 1, true).disposition, Disposition::Stale);

    // Bottom is watched while opening
    assert_eq!(stop(&mut face, 2, true).disposition, Disposition::Absorbed);
    let report = stop(&mut face, 3, true);
    assert_eq!(report.entered.as_slice(), [SequencerState::Idle]);
}

#[test]
fn start_follows_clock_style() {
    let (mut face, journal) = face(FaceConfig::default());
    face.start().unwrap();
    assert_eq!(face.displayed_time(), "10:05");
    assert_eq!(*journal.borrow(), [Op::Show("10:05".to_string())]);

    let config = FaceConfig::default();
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut face = FaceSequencer::new(
        &config,
        JournalSurface {
            journal: journal.clone(),
            layers: config.initial_layers(),
            next_id: 0,
            refuse: false,
        },
        FixedEvening,
        JournalDisplay {
            journal: journal.clone(),
        },
    );
    face.start().unwrap();
    assert_eq!(face.displayed_time(), "07:45");
}

struct FixedEvening;

impl ClockSource for FixedEvening {
    fn now(&mut self) -> Result<WallTime, ClockError> {
        Ok(WallTime::new(19, 45))
    }

    fn hour_style(&self) -> HourStyle {
        HourStyle::Twelve
    }
}

// Same cycle on the software surface, stepped every 10 ms like a frame loop.
#[test]
fn timeline_layers_move_monotonically() {
    let config = FaceConfig::default();
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut face = FaceSequencer::new(
        &config,
        Timeline::new(config.initial_layers()),
        FixedEvening,
        JournalDisplay {
            journal: journal.clone(),
        },
    );

    face.handle(HostEvent::Tick { timestamp_s: 0 });

    let mut top_y = Vec::new();
    let mut shown_at = None;
    for now in (0..=3_000u32).step_by(10) {
        let stopped = face.surface_mut().advance(now);
        for stop in stopped {
            let report = face.handle(HostEvent::AnimationStopped {
                id: stop.id,
                finished: stop.finished,
            });
            if report.refreshed() {
                shown_at = Some(now);
            }
        }
        top_y.push(face.animator().surface().layer_frame(PanelId::Top).y);
    }

    // Closing: 0..=250 ms, top slides down onto the text
    let closing = &top_y[..=25];
    assert!(closing.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(closing[25], config.top.closed.y);

    // Text rewritten the moment the shield closed
    assert_eq!(shown_at, Some(250));
    assert_eq!(*journal.borrow(), [Op::Show("07:45".to_string())]);

    // Resting closed through the open delay
    assert!(top_y[25..=225].iter().all(|y| *y == config.top.closed.y));

    // Opening: slides back up and ends off-screen
    let opening = &top_y[225..=250];
    assert!(opening.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(*top_y.last().unwrap(), config.top.open.y);

    assert_eq!(face.state(), SequencerState::Idle);
    assert_eq!(face.cycles_completed(), 1);
    assert_eq!(face.in_flight(), 0);
}

#[test]
fn busy_panel_rejects_second_request() {
    let config = FaceConfig::default();
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let surface = JournalSurface {
        journal: journal.clone(),
        layers: config.initial_layers(),
        next_id: 0,
        refuse: false,
    };
    let mut animator = ShieldAnimator::new(
        surface,
        config.duration_ms,
        config.curve,
        CompletionPolicy::Join,
    );
    let top = Panel::new(PanelId::Top, config.top.open, config.top.closed, config.top.open);

    animator.animate(&top, config.top.closed, 0).unwrap();
    assert_eq!(
        animator.animate(&top, config.top.closed, 0),
        Err(AnimateError::PanelBusy(PanelId::Top))
    );
    // The rejected request never reached the surface
    assert_eq!(schedules(&journal).len(), 1);
}
