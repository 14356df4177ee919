//! Event loop for the focus timer.
//!
//! The controller owns the session plan, the display surface, the input
//! source and the notifier. Each tick it:
//! 1. polls one key (non-blocking) and dispatches the resulting command
//! 2. re-renders the countdown
//! 3. on expiry, notifies, holds, and advances the plan
//! 4. sleeps for the poll interval
//!
//! A reset restarts the session by iterating the outer loop again, so
//! repeated resets never grow the stack.

mod event;

pub use event::TimerEvent;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::display::{format_countdown, format_counter, DisplaySurface, Region, Style};
use crate::input::InputSource;
use crate::sound::{failure_status, Notifier};
use crate::timer::SessionPlan;
use crate::types::{Command, IntervalKind, LoopConfig};

// ============================================================================
// LoopState / RunOutcome
// ============================================================================

/// State of the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Created, not yet running
    #[default]
    Idle,
    /// Active timer counting down
    Running,
    /// Active timer stopped by the user
    Paused,
    /// Showing the reset confirmation frame
    Resetting,
    /// Interval finished; sound playing, holding for the user
    TransitioningToNotify,
    /// Display surface being rebuilt
    Resizing,
    /// Display torn down, loop exited
    Terminated,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every interval of the plan ran
    Completed,
    /// The user quit
    Quit,
}

/// What the outer loop does after a tick.
enum Flow {
    Continue,
    Expired,
    Restart,
    Quit,
}

// ============================================================================
// Controller
// ============================================================================

/// Drives a session plan on a display surface.
pub struct Controller<D, I, N> {
    plan: SessionPlan,
    display: D,
    input: I,
    notifier: N,
    config: LoopConfig,
    state: LoopState,
    /// Diagnostic currently shown in the status region
    status: Option<String>,
    events: Option<mpsc::UnboundedSender<TimerEvent>>,
}

impl<D, I, N> Controller<D, I, N>
where
    D: DisplaySurface,
    I: InputSource,
    N: Notifier,
{
    /// Creates a controller. The plan is run from its current position.
    pub fn new(plan: SessionPlan, display: D, input: I, notifier: N, config: LoopConfig) -> Self {
        Self {
            plan,
            display,
            input,
            notifier,
            config,
            state: LoopState::Idle,
            status: None,
            events: None,
        }
    }

    /// Sends every `TimerEvent` to `events`.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn plan(&self) -> &SessionPlan {
        &self.plan
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Runs the session until every interval has completed or the user
    /// quits, then tears the display down.
    ///
    /// # Errors
    ///
    /// Returns an error only if the display cannot be torn down. Render,
    /// input and sound failures are logged and the loop carries on.
    pub async fn run(&mut self) -> Result<RunOutcome> {
        let outcome = self.run_session().await;

        self.state = LoopState::Terminated;
        self.display
            .teardown()
            .context("Failed to restore the terminal")?;

        match outcome {
            RunOutcome::Completed => {
                info!("Session completed");
                self.emit(TimerEvent::SessionCompleted);
            }
            RunOutcome::Quit => {
                info!("Session quit by user");
                self.emit(TimerEvent::Quit);
            }
        }
        Ok(outcome)
    }

    async fn run_session(&mut self) -> RunOutcome {
        'session: loop {
            while !self.plan.is_complete() {
                self.begin_interval();
                loop {
                    match self.tick().await {
                        Flow::Continue => sleep(self.config.poll_interval).await,
                        Flow::Expired => break,
                        Flow::Restart => continue 'session,
                        Flow::Quit => return RunOutcome::Quit,
                    }
                }
                self.complete_interval().await;
            }
            return RunOutcome::Completed;
        }
    }

    /// One poll-dispatch-render cycle.
    async fn tick(&mut self) -> Flow {
        match self.input.poll_command() {
            Command::Quit => return Flow::Quit,
            Command::ToggleRun => self.toggle_run(),
            Command::Reset => {
                self.reset().await;
                return Flow::Restart;
            }
            Command::RefreshDisplay => self.refresh_display(),
            Command::None => {}
        }

        self.render_countdown();

        if self.plan.active_timer().is_expired() {
            Flow::Expired
        } else {
            Flow::Continue
        }
    }

    /// Lays out the active interval and starts its timer from full length.
    fn begin_interval(&mut self) {
        let timer = self.plan.active_timer_mut();
        timer.reset();
        let kind = timer.kind();
        let remaining = timer.remaining();
        let index = self.plan.current_index();

        if self.status.take().is_some() {
            self.draw(Region::Status, "", Style::Normal);
        }
        self.render_labels();

        info!(%kind, index, ?remaining, "Interval started");
        self.emit(TimerEvent::IntervalStarted {
            kind,
            index,
            remaining,
        });

        self.plan.active_timer_mut().start();
        self.state = LoopState::Running;
    }

    fn toggle_run(&mut self) {
        let timer = self.plan.active_timer_mut();
        if timer.is_running() {
            timer.stop();
            let remaining = timer.remaining();
            self.state = LoopState::Paused;
            debug!(?remaining, "Paused");
            self.emit(TimerEvent::Paused { remaining });
        } else {
            timer.start();
            let remaining = timer.remaining();
            self.state = LoopState::Running;
            debug!(?remaining, "Resumed");
            self.emit(TimerEvent::Resumed { remaining });
        }
    }

    /// Discards all progress, shows the first interval and holds.
    async fn reset(&mut self) {
        self.state = LoopState::Resetting;
        self.plan.reset_all();
        info!("Session reset");
        self.emit(TimerEvent::Reset);

        let total = self.plan.interval_count();
        let work = self.plan.timer(IntervalKind::Work).to_string();
        self.draw(Region::Counter, &format_counter(1, total), Style::Normal);
        self.draw(Region::Title, IntervalKind::Work.title(), Style::Underline);
        self.draw(Region::Countdown, &work, Style::Standout);

        sleep(self.config.hold_delay).await;
    }

    /// Rebuilds the surface for the current terminal size and restores
    /// everything shown on it.
    fn refresh_display(&mut self) {
        let previous = self.state;
        self.state = LoopState::Resizing;

        match self.display.dimensions() {
            Ok(dimensions) => match self.display.rebuild(dimensions) {
                Ok(()) => {
                    debug!(?dimensions, "Display rebuilt");
                    self.emit(TimerEvent::DisplayRebuilt { dimensions });
                }
                Err(e) => warn!("Failed to rebuild display: {}", e),
            },
            Err(e) => warn!("Failed to query display size: {}", e),
        }

        self.render_labels();
        if let Some(status) = self.status.clone() {
            self.draw(Region::Status, &status, Style::Normal);
        }
        self.state = previous;
    }

    /// Notifies, holds, then moves the plan on.
    async fn complete_interval(&mut self) {
        self.state = LoopState::TransitioningToNotify;
        let kind = self.plan.current_kind();
        let index = self.plan.current_index();
        info!(%kind, index, "Interval completed");
        self.emit(TimerEvent::IntervalCompleted { kind, index });

        if let Err(e) = self.notifier.play(&self.config.sound_path) {
            warn!(
                "Failed to play {}: {} ({})",
                self.config.sound_path.display(),
                e,
                e.suggestion()
            );
            let message = failure_status(&self.config.sound_path, &e);
            self.draw(Region::Status, &message, Style::Normal);
            self.status = Some(message.clone());
            self.emit(TimerEvent::NotifyFailed { message });
        }

        sleep(self.config.hold_delay).await;
        self.plan.advance();
    }

    fn render_labels(&mut self) {
        let kind = self.plan.current_kind();
        let counter = format_counter(self.plan.current_index(), self.plan.interval_count());
        self.draw(Region::Counter, &counter, Style::Normal);
        self.draw(Region::Title, kind.title(), Style::Underline);
        self.render_countdown();
    }

    fn render_countdown(&mut self) {
        let text = format_countdown(self.plan.active_timer().remaining());
        self.draw(Region::Countdown, &text, Style::Standout);
    }

    /// Renders one region; failures are logged and otherwise ignored.
    fn draw(&mut self, region: Region, text: &str, style: Style) {
        if let Err(e) = self.display.render(region, text, style) {
            warn!("Failed to draw {}: {}", region, e);
        }
    }

    fn emit(&self, event: TimerEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }
}

impl<D, I, N> std::fmt::Debug for Controller<D, I, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("plan", &self.plan)
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
