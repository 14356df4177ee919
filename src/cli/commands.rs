//! Command-line definition for the focus timer.
//!
//! Uses clap derive macro for argument parsing.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Parser;

use crate::types::{validate_minutes, TimerConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// Focus Timer - work/break intervals in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "focus-timer",
    version,
    about = "A basic focus timer which uses an interval of work and pause time to maximise productivity.",
    after_help = "Keys: [P]ause/[C]ontinue, [R]eset, [U]pdate display, [Q]uit"
)]
pub struct Cli {
    /// Number of focus sessions wanted
    #[arg(required_unless_present = "completions")]
    pub intervals: Option<NonZeroU32>,

    /// Time spent working on the task in minutes
    #[arg(
        short,
        long,
        default_value = "25",
        num_args = 0..=1,
        default_missing_value = "25",
        value_parser = parse_minutes
    )]
    pub worktime: f64,

    /// Length of the break between the focus sessions in minutes
    #[arg(
        short,
        long,
        default_value = "5",
        num_args = 0..=1,
        default_missing_value = "5",
        value_parser = parse_minutes
    )]
    pub breaktime: f64,

    /// Sound played when an interval ends [default: sound.mp3 next to the binary]
    #[arg(long, value_name = "PATH")]
    pub sound: Option<PathBuf>,

    /// Disable notification sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Builds the timer configuration, or `None` if no intervals were given.
    pub fn timer_config(&self) -> Option<Result<TimerConfig, String>> {
        self.intervals
            .map(|intervals| TimerConfig::from_minutes(intervals, self.worktime, self.breaktime))
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a minute value; must be a finite number within range.
fn parse_minutes(s: &str) -> Result<f64, String> {
    let minutes: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number of minutes"))?;
    validate_minutes(minutes)
}

// ============================================================================
// Tests
// ============================================================================
