//! Display error types.
//!
//! Every display error is recoverable: the controller logs it and keeps
//! rendering subsequent frames.

use thiserror::Error;

use super::Region;

/// Errors that can occur while drawing on the display surface.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Writing to the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The text would land outside the terminal.
    #[error("{region} does not fit the terminal at row {row}, column {column}")]
    OutOfBounds {
        /// Region that was drawn
        region: Region,
        /// Target row
        row: u16,
        /// Target column
        column: u16,
    },
}

impl DisplayError {
    /// Returns true if the terminal is simply too small.
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Io(_) => "Check that the program runs in an interactive terminal",
            Self::OutOfBounds { .. } => "Enlarge the terminal window and press U",
        }
    }
}
