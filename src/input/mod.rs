//! Keyboard input for the focus timer.
//!
//! Input is polled once per tick and must never block the tick. Raw keys
//! are normalized into `Command`s by `Command::from_key`.

mod terminal;

pub use terminal::TerminalInput;

use std::collections::VecDeque;
use std::io;

use crate::types::{Command, Key};

/// Non-blocking key source.
pub trait InputSource {
    /// Returns the next pending key, or `None` when nothing is pending.
    ///
    /// A terminal resize is surfaced as `Key::Resize`.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;

    /// Polls one key and normalizes it. Read failures count as no input.
    fn poll_command(&mut self) -> Command {
        match self.poll_key() {
            Ok(key) => Command::from(key),
            Err(e) => {
                tracing::warn!("Failed to read input: {}", e);
                Command::None
            }
        }
    }
}

/// Scripted key source for testing.
///
/// Each poll consumes one scripted entry; `None` entries stand for ticks
/// without input. Once the script runs out every poll yields `None`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    script: VecDeque<Option<Key>>,
    polls: usize,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            polls: 0,
        }
    }

    /// Builds a script from characters; `'.'` means a tick without input.
    #[must_use]
    pub fn from_chars(script: &str) -> Self {
        Self::new(script.chars().map(|c| match c {
            '.' => None,
            c => Some(Key::Char(c)),
        }))
    }

    /// Appends `ticks` polls without input.
    #[must_use]
    pub fn idle(mut self, ticks: usize) -> Self {
        self.script.extend(std::iter::repeat(None).take(ticks));
        self
    }

    /// Appends one key.
    #[must_use]
    pub fn then(mut self, key: Key) -> Self {
        self.script.push_back(Some(key));
        self
    }

    /// Number of polls served so far.
    #[must_use]
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Number of scripted entries not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        self.polls += 1;
        Ok(self.script.pop_front().flatten())
    }
}
