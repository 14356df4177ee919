//! Focus Timer CLI - work/break intervals in the terminal
//!
//! Runs `intervals` focus sessions separated by breaks:
//! - 25 minutes of focused work by default
//! - 5 minutes of break in between
//! - a sound when each interval ends

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use focus_timer::cli::{Cli, Messages};
use focus_timer::controller::{Controller, TimerEvent};
use focus_timer::display::TerminalDisplay;
use focus_timer::input::TerminalInput;
use focus_timer::sound::{create_notifier, resolve_sound_path};
use focus_timer::timer::{monotonic, SessionPlan};
use focus_timer::types::{LoopConfig, DEFAULT_SOUND_FILE};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments (exits with a usage error on bad input)
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = init_tracing(&cli) {
        Messages::show_error(&format!("{e:#}"));
        std::process::exit(1);
    }

    // Execute command
    if let Err(e) = execute(cli).await {
        Messages::show_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr unless `--log-file` is given. On stderr only errors
/// are shown by default so the timer screen stays readable.
fn init_tracing(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if cli.verbose {
        "debug"
    } else if cli.log_file.is_some() {
        "warn"
    } else {
        "error"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .without_time()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    let config = cli
        .timer_config()
        .context("Number of intervals is required")?
        .map_err(anyhow::Error::msg)?;
    tracing::info!(
        intervals = config.intervals.get(),
        work = ?config.work,
        rest = ?config.rest,
        "Starting focus timer"
    );

    let sound_path = resolve_sound_path(cli.sound.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("{}; falling back to ./{}", e, DEFAULT_SOUND_FILE);
        PathBuf::from(DEFAULT_SOUND_FILE)
    });
    let loop_config = LoopConfig::default().with_sound_path(sound_path);

    // Open audio before taking over the screen so driver chatter stays
    // on the normal terminal.
    let notifier = create_notifier(cli.no_sound);
    let display = TerminalDisplay::new(config.intervals.get())
        .context("Failed to set up the terminal")?;
    let plan = SessionPlan::new(&config, monotonic());

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let event_logger = tokio::spawn(log_events(events_rx));

    let mut controller =
        Controller::new(plan, display, TerminalInput::new(), notifier, loop_config)
            .with_events(events_tx);
    let outcome = controller.run().await?;
    Messages::show_outcome(outcome, controller.plan());

    drop(controller);
    finish_event_log(event_logger).await;
    Ok(())
}

/// Waits for the event logger to drain.
async fn finish_event_log(logger: JoinHandle<()>) {
    if let Err(e) = logger.await {
        tracing::debug!("Event logger ended abnormally: {}", e);
    }
}

/// Forwards controller events to the debug log.
async fn log_events(mut events: mpsc::UnboundedReceiver<TimerEvent>) {
    while let Some(event) = events.recv().await {
        tracing::debug!(?event, "Timer event");
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
