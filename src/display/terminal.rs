//! Full-screen terminal surface built on crossterm.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tracing::{debug, warn};

use super::layout::Layout;
use super::{counter_width, DisplayError, DisplaySurface, Dimensions, Region, Style, FOOTER_HINTS};

/// Terminal display on the alternate screen, in raw mode with the cursor
/// hidden.
///
/// The terminal is restored by `teardown()`, or on drop if teardown never
/// ran.
pub struct TerminalDisplay {
    out: Stdout,
    counter_width: u16,
    layout: Layout,
    active: bool,
}

impl TerminalDisplay {
    /// Switches the terminal into timer mode and draws the footer.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be put into raw mode or
    /// queried for its size (e.g. stdout is not a TTY).
    pub fn new(intervals: u32) -> Result<Self, DisplayError> {
        let mut out = io::stdout();
        enable_raw_mode()?;
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let width = counter_width(intervals);
        let mut display = Self {
            out,
            counter_width: width,
            layout: Layout::compute(Dimensions::default(), width, &FOOTER_HINTS),
            active: true,
        };
        let dimensions = display.dimensions()?;
        display.rebuild(dimensions)?;

        debug!(?dimensions, "Terminal display initialized");
        Ok(display)
    }

    fn draw_footer(&mut self) -> Result<(), DisplayError> {
        for (position, line) in self.layout.footer() {
            queue!(self.out, MoveTo(position.column, position.row), Print(line))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Runs `restore` if the terminal is still in timer mode.
///
/// `active` is cleared only after `restore` succeeds, so a failed attempt
/// is retried by the next call (e.g. from `Drop`). Returns whether the
/// restore ran.
fn restore_once(
    active: &mut bool,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<bool, DisplayError> {
    if !*active {
        return Ok(false);
    }
    restore()?;
    *active = false;
    Ok(true)
}

fn attribute(style: Style) -> Option<Attribute> {
    match style {
        Style::Normal => None,
        Style::Underline => Some(Attribute::Underlined),
        Style::Standout => Some(Attribute::Reverse),
    }
}

impl DisplaySurface for TerminalDisplay {
    fn render(&mut self, region: Region, text: &str, style: Style) -> Result<(), DisplayError> {
        let position = self
            .layout
            .position(region)
            .ok_or(DisplayError::OutOfBounds {
                region,
                row: 0,
                column: 0,
            })?;
        let text = match region {
            Region::Status => self.layout.clip(position, text),
            _ => text,
        };
        if !self.layout.fits(position, text) {
            return Err(DisplayError::OutOfBounds {
                region,
                row: position.row,
                column: position.column,
            });
        }

        queue!(self.out, MoveTo(position.column, position.row))?;
        if let Some(attr) = attribute(style) {
            queue!(self.out, SetAttribute(attr))?;
        }
        queue!(
            self.out,
            Print(text),
            SetAttribute(Attribute::Reset),
            Clear(ClearType::UntilNewLine)
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        execute!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    fn dimensions(&self) -> Result<Dimensions, DisplayError> {
        let (width, height) = terminal::size()?;
        Ok(Dimensions::new(width, height))
    }

    fn rebuild(&mut self, dimensions: Dimensions) -> Result<(), DisplayError> {
        self.layout = Layout::compute(dimensions, self.counter_width, &FOOTER_HINTS);
        self.clear()?;
        self.draw_footer()
    }

    fn teardown(&mut self) -> Result<(), DisplayError> {
        let restored = restore_once(&mut self.active, || {
            execute!(self.out, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen)?;
            disable_raw_mode()
        })?;
        if restored {
            debug!("Terminal restored");
        }
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

impl std::fmt::Debug for TerminalDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalDisplay")
            .field("layout", &self.layout)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
