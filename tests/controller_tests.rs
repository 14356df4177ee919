//! End-to-end tests for the event loop.
//!
//! These tests drive a full `Controller` with scripted keys, an in-memory
//! display and a mock notifier, using the real monotonic clock with
//! shortened intervals:
//! - Session completion without Quit
//! - Pause freezes remaining time
//! - Reset restarts from the first work interval
//! - Quit tears the display down once
//! - Notification failures are not fatal
//! - Display refresh restores the screen

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use focus_timer::controller::{Controller, LoopState, RunOutcome, TimerEvent};
use focus_timer::display::{
    counter_width, DisplayCall, Dimensions, Layout, RecordingDisplay, Region, FOOTER_HINTS,
};
use focus_timer::input::ScriptedInput;
use focus_timer::sound::MockNotifier;
use focus_timer::timer::{monotonic, SessionPlan};
use focus_timer::types::{IntervalKind, Key, LoopConfig, TimerConfig};

// ============================================================================
// Test Helpers
// ============================================================================

type TestController = Controller<RecordingDisplay, ScriptedInput, MockNotifier>;

const POLL: Duration = Duration::from_millis(10);
const HOLD: Duration = Duration::from_millis(20);

/// Loop settings with a short tick and hold.
fn fast_loop() -> LoopConfig {
    LoopConfig::default()
        .with_poll_interval(POLL)
        .with_hold_delay(HOLD)
        .with_sound_path("/opt/focus-timer/sound.mp3")
}

fn create_plan(intervals: u32, work: Duration, rest: Duration) -> SessionPlan {
    let config = TimerConfig::new(NonZeroU32::new(intervals).unwrap(), work, rest);
    SessionPlan::new(&config, monotonic())
}

/// Creates a controller wired to an event channel.
fn create_controller(
    plan: SessionPlan,
    input: ScriptedInput,
    notifier: MockNotifier,
) -> (TestController, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = Controller::new(plan, RecordingDisplay::new(), input, notifier, fast_loop())
        .with_events(tx);
    (controller, rx)
}

/// Drains every event sent so far.
fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn started(events: &[TimerEvent]) -> Vec<(IntervalKind, u32, Duration)> {
    events
        .iter()
        .filter_map(|event| match event {
            TimerEvent::IntervalStarted {
                kind,
                index,
                remaining,
            } => Some((*kind, *index, *remaining)),
            _ => None,
        })
        .collect()
}

fn completed(events: &[TimerEvent]) -> Vec<(IntervalKind, u32)> {
    events
        .iter()
        .filter_map(|event| match event {
            TimerEvent::IntervalCompleted { kind, index } => Some((*kind, *index)),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Session completion
// ============================================================================

/// Two work intervals run Work, Break, Work and finish on their own.
#[tokio::test]
async fn test_session_completes_without_quit() {
    let plan = create_plan(2, Duration::from_millis(150), Duration::from_millis(150));
    let (mut controller, mut rx) =
        create_controller(plan, ScriptedInput::default(), MockNotifier::new());

    let outcome = controller.run().await.unwrap();
    let events = drain(&mut rx);

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(
        completed(&events),
        vec![
            (IntervalKind::Work, 1),
            (IntervalKind::Break, 1),
            (IntervalKind::Work, 2),
        ]
    );
    assert_eq!(events.last(), Some(&TimerEvent::SessionCompleted));
    assert!(controller.plan().is_complete());
    assert_eq!(controller.state(), LoopState::Terminated);
    assert_eq!(controller.notifier().play_count(), 3);
    assert_eq!(controller.display().teardown_count(), 1);
}

/// Each interval starts at its full length.
#[tokio::test]
async fn test_intervals_start_at_full_length() {
    let work = Duration::from_millis(60);
    let rest = Duration::from_millis(30);
    let plan = create_plan(3, work, rest);
    let (mut controller, mut rx) =
        create_controller(plan, ScriptedInput::default(), MockNotifier::new());

    controller.run().await.unwrap();
    let events = drain(&mut rx);

    assert_eq!(
        started(&events),
        vec![
            (IntervalKind::Work, 1, work),
            (IntervalKind::Break, 1, rest),
            (IntervalKind::Work, 2, work),
            (IntervalKind::Break, 2, rest),
            (IntervalKind::Work, 3, work),
        ]
    );
}

/// The sound is played with the configured path after every interval.
#[tokio::test]
async fn test_notifier_receives_sound_path() {
    let plan = create_plan(1, Duration::from_millis(20), Duration::from_millis(20));
    let (mut controller, _rx) =
        create_controller(plan, ScriptedInput::default(), MockNotifier::new());

    controller.run().await.unwrap();

    let calls = controller.notifier().get_play_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].ends_with("sound.mp3"));
}

/// Completion holds for the configured delay before moving on.
#[tokio::test]
async fn test_completion_holds_before_advancing() {
    let plan = create_plan(2, Duration::ZERO, Duration::ZERO);
    let (mut controller, _rx) =
        create_controller(plan, ScriptedInput::default(), MockNotifier::new());

    let start = Instant::now();
    controller.run().await.unwrap();

    assert!(start.elapsed() >= HOLD * 3);
}

/// The last countdown frame of an interval shows zero.
#[tokio::test]
async fn test_countdown_reaches_zero() {
    let plan = create_plan(1, Duration::from_millis(50), Duration::ZERO);
    let (mut controller, _rx) =
        create_controller(plan, ScriptedInput::default(), MockNotifier::new());

    controller.run().await.unwrap();

    assert_eq!(
        controller.display().last_render(Region::Countdown).as_deref(),
        Some("00:00")
    );
}

// ============================================================================
// Pause / resume
// ============================================================================

/// Toggling twice with idle ticks in between leaves remaining time
/// unchanged.
#[tokio::test]
async fn test_pause_freezes_remaining_time() {
    let plan = create_plan(1, Duration::from_secs(10), Duration::from_secs(10));
    let input = ScriptedInput::from_chars("p..p..q");
    let (mut controller, mut rx) = create_controller(plan, input, MockNotifier::new());

    controller.run().await.unwrap();
    let events = drain(&mut rx);

    let paused = events.iter().find_map(|event| match event {
        TimerEvent::Paused { remaining } => Some(*remaining),
        _ => None,
    });
    let resumed = events.iter().find_map(|event| match event {
        TimerEvent::Resumed { remaining } => Some(*remaining),
        _ => None,
    });
    let (paused, resumed) = (paused.unwrap(), resumed.unwrap());

    assert!(paused >= resumed);
    assert!(
        paused - resumed < Duration::from_millis(5),
        "paused at {:?}, resumed at {:?}",
        paused,
        resumed
    );
}

/// While paused every countdown frame is identical.
#[tokio::test]
async fn test_paused_countdown_does_not_move() {
    let plan = create_plan(1, Duration::from_millis(1500), Duration::ZERO);
    // Pause right away, then idle for well over a second.
    let input = ScriptedInput::from_chars("P").idle(150).then(Key::Char('q'));
    let (mut controller, _rx) = create_controller(plan, input, MockNotifier::new());

    controller.run().await.unwrap();

    let frames = controller.display().renders_of(Region::Countdown);
    assert!(frames.len() > 100);
    assert!(frames.iter().all(|frame| frame == "00:01" || frame == "00:02"));
    assert_eq!(frames.last().map(String::as_str), Some(frames[2].as_str()));
    assert_eq!(controller.notifier().play_count(), 0);
}

// ============================================================================
// Reset
// ============================================================================

/// Reset mid-work rewinds to the first work interval at full length.
#[tokio::test]
async fn test_reset_mid_interval_restarts_session() {
    let work = Duration::from_secs(10);
    let plan = create_plan(3, work, Duration::from_secs(5));
    let input = ScriptedInput::from_chars("...r.q");
    let (mut controller, mut rx) = create_controller(plan, input, MockNotifier::new());

    controller.run().await.unwrap();
    let events = drain(&mut rx);

    let reset_at = events
        .iter()
        .position(|event| *event == TimerEvent::Reset)
        .unwrap();
    assert_eq!(
        started(&events[reset_at..]),
        vec![(IntervalKind::Work, 1, work)]
    );
    assert_eq!(controller.plan().current_index(), 1);
    assert_eq!(controller.plan().current_kind(), IntervalKind::Work);
}

/// Reset during a later break discards both timers' progress.
#[tokio::test]
async fn test_reset_during_break() {
    let work = Duration::from_secs(10);
    let rest = Duration::from_secs(5);
    let mut plan = create_plan(3, work, rest);
    plan.advance();
    plan.advance();
    plan.advance();
    assert_eq!(plan.current_kind(), IntervalKind::Break);
    assert_eq!(plan.current_index(), 2);

    let input = ScriptedInput::from_chars("..R.q");
    let (mut controller, mut rx) = create_controller(plan, input, MockNotifier::new());

    controller.run().await.unwrap();
    let events = drain(&mut rx);

    assert_eq!(
        started(&events),
        vec![(IntervalKind::Break, 2, rest), (IntervalKind::Work, 1, work)]
    );
    let break_timer = controller.plan().timer(IntervalKind::Break);
    assert!(!break_timer.is_running());
    assert_eq!(break_timer.remaining(), rest);
}

/// Reset shows the confirmation frame for the first work interval.
#[tokio::test]
async fn test_reset_renders_confirmation_frame() {
    let plan = create_plan(12, Duration::from_secs(90), Duration::from_secs(5));
    let input = ScriptedInput::from_chars("r").then(Key::Char('q'));
    let (mut controller, _rx) = create_controller(plan, input, MockNotifier::new());

    controller.run().await.unwrap();

    let display = controller.display();
    assert!(display.renders_of(Region::Countdown).contains(&"01:30".to_string()));
    assert_eq!(display.last_render(Region::Counter).as_deref(), Some("01/12"));
    assert_eq!(display.last_render(Region::Title).as_deref(), Some("Focus Time"));
}

/// Many resets in a row restart iteratively and finish normally.
#[tokio::test]
async fn test_repeated_resets() {
    let plan = create_plan(2, Duration::from_secs(10), Duration::from_secs(10));
    let input = ScriptedInput::from_chars(&"r".repeat(500)).then(Key::Char('q'));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = Controller::new(
        plan,
        RecordingDisplay::new(),
        input,
        MockNotifier::new(),
        fast_loop().with_hold_delay(Duration::ZERO),
    )
    .with_events(tx);

    let outcome = controller.run().await.unwrap();
    let events = drain(&mut rx);

    assert_eq!(outcome, RunOutcome::Quit);
    let resets = events.iter().filter(|e| **e == TimerEvent::Reset).count();
    assert_eq!(resets, 500);
    assert_eq!(controller.input().remaining(), 0);
    assert_eq!(controller.display().teardown_count(), 1);
}

// ============================================================================
// Quit
// ============================================================================

/// Quit ends the loop and tears the display down exactly once.
#[tokio::test]
async fn test_quit_tears_down_once() {
    let plan = create_plan(4, Duration::from_secs(60), Duration::from_secs(60));
    let input = ScriptedInput::from_chars("..Q");
    let (mut controller, mut rx) = create_controller(plan, input, MockNotifier::new());

    let outcome = controller.run().await.unwrap();
    let events = drain(&mut rx);

    assert_eq!(outcome, RunOutcome::Quit);
    assert_eq!(events.last(), Some(&TimerEvent::Quit));
    assert_eq!(controller.state(), LoopState::Terminated);
    assert_eq!(controller.display().teardown_count(), 1);
    assert_eq!(
        controller.display().calls().last(),
        Some(&DisplayCall::Teardown)
    );
    assert_eq!(controller.input().polls(), 3);
}

/// Ctrl-C behaves like Quit.
#[tokio::test]
async fn test_interrupt_quits() {
    let plan = create_plan(1, Duration::from_secs(60), Duration::from_secs(60));
    let input = ScriptedInput::default().idle(1).then(Key::Interrupt);
    let (mut controller, _rx) = create_controller(plan, input, MockNotifier::new());

    assert_eq!(controller.run().await.unwrap(), RunOutcome::Quit);
}

// ============================================================================
// Failures and display refresh
// ============================================================================

/// A failing sound shows a diagnostic and the session still completes.
#[tokio::test]
async fn test_notify_failure_is_not_fatal() {
    let plan = create_plan(2, Duration::from_millis(30), Duration::from_millis(30));
    let notifier = MockNotifier::new();
    notifier.set_should_fail(true);
    let (mut controller, mut rx) = create_controller(plan, ScriptedInput::default(), notifier);

    let outcome = controller.run().await.unwrap();
    let events = drain(&mut rx);

    assert_eq!(outcome, RunOutcome::Completed);
    let failures = events
        .iter()
        .filter(|e| matches!(e, TimerEvent::NotifyFailed { .. }))
        .count();
    assert_eq!(failures, 3);

    let status = controller.display().renders_of(Region::Status);
    assert!(status[0].starts_with("Could not play"));
    assert!(status[0].contains("sound.mp3"));
    // Cleared when the next interval starts.
    assert_eq!(status[1], "");
}

/// The diagnostic for a missing sound beside a typical install fits on a
/// standard terminal.
#[tokio::test]
async fn test_notify_failure_status_fits_standard_terminal() {
    let plan = create_plan(2, Duration::ZERO, Duration::ZERO);
    let notifier = MockNotifier::new();
    notifier.set_should_fail(true);
    let mut display = RecordingDisplay::new();
    display.set_dimensions(Dimensions::new(80, 24));
    let mut controller = Controller::new(
        plan,
        display,
        ScriptedInput::default(),
        notifier,
        fast_loop().with_sound_path("/home/user/.cargo/bin/sound.mp3"),
    );

    controller.run().await.unwrap();

    let layout = Layout::compute(Dimensions::new(80, 24), counter_width(2), &FOOTER_HINTS);
    let position = layout.position(Region::Status).unwrap();
    let status = controller.display().renders_of(Region::Status);
    assert_eq!(status[0], "Could not play sound.mp3 (file not found)");
    assert!(status.iter().all(|text| layout.fits(position, text)));
}

/// A resize rebuilds the surface and redraws title, counter and
/// countdown.
#[tokio::test]
async fn test_resize_rebuilds_display() {
    let plan = create_plan(3, Duration::from_secs(60), Duration::from_secs(60));
    let input = ScriptedInput::default()
        .idle(1)
        .then(Key::Resize)
        .then(Key::Char('q'));
    let mut display = RecordingDisplay::new();
    display.set_dimensions(Dimensions::new(120, 40));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller =
        Controller::new(plan, display, input, MockNotifier::new(), fast_loop()).with_events(tx);

    controller.run().await.unwrap();
    let events = drain(&mut rx);

    assert!(events.contains(&TimerEvent::DisplayRebuilt {
        dimensions: Dimensions::new(120, 40)
    }));

    let calls = controller.display().calls();
    let rebuilt_at = calls
        .iter()
        .position(|call| *call == DisplayCall::Rebuild(Dimensions::new(120, 40)))
        .unwrap();
    let redrawn: Vec<Region> = calls[rebuilt_at..]
        .iter()
        .filter_map(|call| match call {
            DisplayCall::Render { region, .. } => Some(*region),
            _ => None,
        })
        .collect();
    assert!(redrawn.contains(&Region::Title));
    assert!(redrawn.contains(&Region::Counter));
    assert!(redrawn.contains(&Region::Countdown));
    assert_eq!(controller.display().rebuild_count(), 1);
}

/// Refreshing while paused keeps the timer paused.
#[tokio::test]
async fn test_update_key_while_paused() {
    let plan = create_plan(1, Duration::from_secs(30), Duration::from_secs(30));
    let input = ScriptedInput::from_chars("pu..q");
    let (mut controller, mut rx) = create_controller(plan, input, MockNotifier::new());

    controller.run().await.unwrap();
    let events = drain(&mut rx);

    assert!(!events
        .iter()
        .any(|e| matches!(e, TimerEvent::Resumed { .. })));
    assert!(!controller.plan().active_timer().is_running());
    assert_eq!(controller.display().rebuild_count(), 1);
}
