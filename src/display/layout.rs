//! Placement arithmetic for the terminal display.
//!
//! The countdown sits in the middle of the screen with the title one row
//! above and the interval counter one row below. Footer hints are spread
//! over the bottom row, or the bottom two rows on narrow terminals.

use super::{Dimensions, Region};

/// Columns reserved for the countdown text (`MM:SS`).
const COUNTDOWN_WIDTH: u16 = 5;

/// Columns reserved for the title text.
const TITLE_WIDTH: u16 = 10;

/// Top-left cell of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub column: u16,
    pub row: u16,
}

impl Position {
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

/// Where every region and footer line goes for a given terminal size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    dimensions: Dimensions,
    countdown: Option<Position>,
    title: Option<Position>,
    counter: Option<Position>,
    status: Option<Position>,
    footer: Vec<(Position, String)>,
}

impl Layout {
    /// Computes the layout.
    ///
    /// `counter_width` is the width of the `index/total` text.
    pub fn compute(dimensions: Dimensions, counter_width: u16, hints: &[&str]) -> Self {
        let (clock_column, clock_row) = centered(dimensions, COUNTDOWN_WIDTH);
        let (title_column, _) = centered(dimensions, TITLE_WIDTH);
        let (counter_column, _) = centered(dimensions, counter_width);

        let countdown = Some(Position::new(clock_column, clock_row));
        let title = clock_row
            .checked_sub(1)
            .map(|row| Position::new(title_column, row));
        let counter_row = clock_row.saturating_add(1);
        let counter = Some(Position::new(counter_column.saturating_add(1), counter_row));

        let footer: Vec<(Position, String)> = footer_lines(dimensions, hints)
            .map(|lines| {
                let first_row = dimensions.height.saturating_sub(lines.len() as u16);
                if first_row < counter_row {
                    return Vec::new();
                }
                lines
                    .into_iter()
                    .enumerate()
                    .map(|(i, line)| (Position::new(0, first_row + i as u16), line))
                    .collect()
            })
            .unwrap_or_default();

        // Two rows below the counter, pulled up above the footer if needed.
        let footer_top = footer
            .first()
            .map_or(dimensions.height, |(position, _)| position.row);
        let status_row = clock_row
            .saturating_add(3)
            .min(footer_top.saturating_sub(1));
        let status = (status_row > counter_row && status_row < footer_top)
            .then(|| Position::new(0, status_row));

        Self {
            dimensions,
            countdown,
            title,
            counter,
            status,
            footer,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns where a region starts, if it has a place at all.
    pub fn position(&self, region: Region) -> Option<Position> {
        match region {
            Region::Countdown => self.countdown,
            Region::Title => self.title,
            Region::Counter => self.counter,
            Region::Status => self.status,
        }
    }

    /// Returns true if `text` at `position` stays inside the terminal.
    pub fn fits(&self, position: Position, text: &str) -> bool {
        let end = usize::from(position.column) + text.chars().count();
        position.row < self.dimensions.height && end <= usize::from(self.dimensions.width)
    }

    /// Cuts `text` so that, drawn at `position`, it ends at the right edge.
    pub fn clip<'a>(&self, position: Position, text: &'a str) -> &'a str {
        let room = usize::from(self.dimensions.width.saturating_sub(position.column));
        match text.char_indices().nth(room) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }

    /// Footer lines with their positions; empty when the hints do not fit.
    pub fn footer(&self) -> &[(Position, String)] {
        &self.footer
    }
}

/// Top-left corner for text of `len` columns centred on the screen.
fn centered(dimensions: Dimensions, len: u16) -> (u16, u16) {
    let column = (dimensions.width / 2).saturating_sub(len / 2);
    let row = (dimensions.height / 2).saturating_sub(1);
    (column, row)
}

/// Splits the hints into one or two evenly spaced lines.
///
/// Returns `None` when even two lines would be too wide.
fn footer_lines(dimensions: Dimensions, hints: &[&str]) -> Option<Vec<String>> {
    if hints.is_empty() {
        return None;
    }
    let max_len = usize::from(dimensions.width).saturating_sub(1);
    let char_amount: usize = hints.iter().map(|h| h.chars().count()).sum();

    if char_amount < max_len {
        return Some(vec![spread(hints, max_len)]);
    }
    if char_amount / 2 < max_len {
        let (first, second) = hints.split_at(hints.len() / 2);
        return Some(vec![spread(first, max_len), spread(second, max_len)]);
    }
    None
}

/// Joins hints with equal gaps so the line spans `max_len` columns.
fn spread(hints: &[&str], max_len: usize) -> String {
    let char_amount: usize = hints.iter().map(|h| h.chars().count()).sum();
    let gaps = hints.len().saturating_sub(1).max(1);
    let gap = " ".repeat(max_len.saturating_sub(char_amount) / gaps);
    hints
        .iter()
        .map(|hint| format!("{hint}{gap}"))
        .collect::<String>()
        .trim()
        .to_string()
}
