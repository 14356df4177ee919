//! Messages printed on the normal screen, before the timer takes over the
//! terminal or after it has been restored.

use crate::controller::RunOutcome;
use crate::display::format_countdown;
use crate::timer::SessionPlan;
use crate::types::IntervalKind;

/// Output helpers for the CLI.
pub struct Messages;

impl Messages {
    /// Shows the closing line of a run.
    pub fn show_outcome(outcome: RunOutcome, plan: &SessionPlan) {
        println!("{}", Self::outcome_line(outcome, plan));
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    fn outcome_line(outcome: RunOutcome, plan: &SessionPlan) -> String {
        let total = plan.interval_count();
        match outcome {
            RunOutcome::Completed => {
                let work = plan.timer(IntervalKind::Work).duration();
                format!(
                    "Finished {} focus session{} of {}. Have fun =)",
                    total,
                    if total == 1 { "" } else { "s" },
                    format_countdown(work)
                )
            }
            RunOutcome::Quit => format!(
                "Stopped during {} {}/{}",
                plan.current_kind(),
                plan.current_index(),
                total
            ),
        }
    }
}
