//! Display surface for the focus timer.
//!
//! The controller decides *what* to show (title, interval counter,
//! countdown, diagnostics); a `DisplaySurface` decides *where* and *how*.
//!
//! - `TerminalDisplay`: crossterm-backed full-screen surface
//! - `RecordingDisplay`: in-memory surface for tests
//! - `layout`: placement arithmetic used by the terminal surface

mod error;
pub mod layout;
mod terminal;

pub use error::DisplayError;
pub use layout::{Layout, Position};
pub use terminal::TerminalDisplay;

use std::time::Duration;

/// Key hints shown in the footer.
pub const FOOTER_HINTS: [&str; 4] = ["[P]ause/[C]ontinue", "[R]eset", "[U]pdate", "[Q]uit"];

/// Area of the screen a piece of text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Phase label above the countdown
    Title,
    /// `index/total` interval counter below the countdown
    Counter,
    /// `MM:SS` remaining time
    Countdown,
    /// Diagnostic line (e.g. a sound that failed to play)
    Status,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Title => "title",
            Region::Counter => "counter",
            Region::Countdown => "countdown",
            Region::Status => "status",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Normal,
    /// Used for the title
    Underline,
    /// Reverse video, used for the countdown
    Standout,
}

/// Terminal size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

impl Dimensions {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Abstract surface the controller renders onto.
pub trait DisplaySurface {
    /// Draws `text` in `region`, replacing what was there.
    fn render(&mut self, region: Region, text: &str, style: Style) -> Result<(), DisplayError>;

    /// Blanks the whole surface.
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Returns the current size of the underlying terminal.
    fn dimensions(&self) -> Result<Dimensions, DisplayError>;

    /// Discards the current screen and lays it out again for `dimensions`.
    fn rebuild(&mut self, dimensions: Dimensions) -> Result<(), DisplayError>;

    /// Restores the terminal. Later calls are no-ops.
    fn teardown(&mut self) -> Result<(), DisplayError>;
}

/// Formats a remaining time as `MM:SS`, rounding to the nearest second.
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.as_secs_f64().round() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Formats the interval counter, zero-padding the index to the width of
/// the total (`03/12`).
pub fn format_counter(index: u32, total: u32) -> String {
    let width = total.to_string().len();
    format!("{index:0width$}/{total}")
}

/// Width of the counter text for a session of `total` work intervals.
pub fn counter_width(total: u32) -> u16 {
    let digits = total.to_string().len() as u16;
    digits * 2 + 2
}

// ============================================================================
// RecordingDisplay
// ============================================================================

/// A call received by `RecordingDisplay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    Render {
        region: Region,
        text: String,
        style: Style,
    },
    Clear,
    Rebuild(Dimensions),
    Teardown,
}

/// In-memory display surface for testing.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    calls: Vec<DisplayCall>,
    dimensions: Dimensions,
    fail_renders: bool,
}

impl RecordingDisplay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size reported by `dimensions()`.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    /// Makes every `render` call fail with `OutOfBounds`.
    pub fn set_fail_renders(&mut self, fail: bool) {
        self.fail_renders = fail;
    }

    #[must_use]
    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    /// Returns every text rendered in `region`, oldest first.
    #[must_use]
    pub fn renders_of(&self, region: Region) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DisplayCall::Render { region: r, text, .. } if *r == region => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the most recent text rendered in `region`.
    #[must_use]
    pub fn last_render(&self, region: Region) -> Option<String> {
        self.renders_of(region).pop()
    }

    #[must_use]
    pub fn teardown_count(&self) -> usize {
        self.count(|call| matches!(call, DisplayCall::Teardown))
    }

    #[must_use]
    pub fn rebuild_count(&self) -> usize {
        self.count(|call| matches!(call, DisplayCall::Rebuild(_)))
    }

    fn count(&self, predicate: impl Fn(&DisplayCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl DisplaySurface for RecordingDisplay {
    fn render(&mut self, region: Region, text: &str, style: Style) -> Result<(), DisplayError> {
        if self.fail_renders {
            return Err(DisplayError::OutOfBounds {
                region,
                row: self.dimensions.height,
                column: 0,
            });
        }
        self.calls.push(DisplayCall::Render {
            region,
            text: text.to_string(),
            style,
        });
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.calls.push(DisplayCall::Clear);
        Ok(())
    }

    fn dimensions(&self) -> Result<Dimensions, DisplayError> {
        Ok(self.dimensions)
    }

    fn rebuild(&mut self, dimensions: Dimensions) -> Result<(), DisplayError> {
        self.calls.push(DisplayCall::Rebuild(dimensions));
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), DisplayError> {
        self.calls.push(DisplayCall::Teardown);
        Ok(())
    }
}
