//! # Table Navigator
//!
//! Cursor, search and highlight state over the two position grids.
//!
//! ## State
//! The navigator owns both grids and a single [`CursorState`]:
//! - the active grid (stopped or harmonic)
//! - the cursor `(row, col)`, always inside the active grid
//! - the search query, its match list and the current match
//! - an optional highlighted letter class
//!
//! ## Search Queries
//! | Query   | Matches                                        |
//! |---------|------------------------------------------------|
//! | `E4`    | cells with the same semitone index (`Fb4` too) |
//! | `E`     | every E-letter cell: E2, E3, Eb4 ...           |
//! | `C#`    | every cell in pitch class C#/Db                |
//!
//! Matches are ordered row by row, strings left to right.
//!
//! ## Example
//! ```rust
//! use guqin::{TableNavigator, Tuning};
//!
//! let mut nav = TableNavigator::new(&Tuning::standard());
//! let count = nav.search("C")?;
//! assert!(count > 1);
//! let first = nav.cursor().position();
//! nav.next_match()?;
//! assert_ne!(nav.cursor().position(), first);
//! # Ok::<(), guqin::GuqinError>(())
//! ```

use crate::error::GuqinError;
use crate::grid::{GridKind, PositionGrid, PositionTables};
use crate::pitch::{split_pitch_class, Accidental, Letter, Pitch};
use crate::tuning::Tuning;
use std::fmt;
use tracing::debug;

/// A parsed search query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteQuery {
    /// `E4`, `Db3`: matches by semitone index
    Exact(Pitch),
    /// `E`: matches by letter class, any accidental, any octave
    Letter(Letter),
    /// `C#`, `Eb`: matches by pitch class, any octave
    PitchClass { letter: Letter, accidental: Accidental },
}

impl NoteQuery {
    /// Parse `<Letter><Accidental?><Octave?>`, case-insensitively.
    pub fn parse(text: &str) -> Result<Self, GuqinError> {
        let (letter, accidental, rest) = split_pitch_class(text)?;
        if !rest.is_empty() {
            return Pitch::parse(text).map(NoteQuery::Exact);
        }
        Ok(match accidental {
            Accidental::Natural => NoteQuery::Letter(letter),
            _ => NoteQuery::PitchClass { letter, accidental },
        })
    }

    pub fn matches(&self, pitch: &Pitch) -> bool {
        match self {
            NoteQuery::Exact(target) => target.is_enharmonic(pitch),
            NoteQuery::Letter(letter) => pitch.letter_class() == *letter,
            NoteQuery::PitchClass { letter, accidental } => {
                let class = (letter.semitone_offset() + accidental.semitone_offset()).rem_euclid(12);
                pitch.pitch_class() == class
            }
        }
    }
}

/// Cursor motions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    Left,
    Right,
    FirstRow,
    LastRow,
    FirstCol,
    LastCol,
    HalfPageUp,
    HalfPageDown,
}

/// Behavior switches for the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigatorOptions {
    /// Drop the search when switching grids instead of re-running it
    pub clear_search_on_switch: bool,
}

/// Cursor and search state. Only the navigator mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorState {
    pub active: GridKind,
    pub row: usize,
    pub col: usize,
    pub query: Option<String>,
    pub matches: Vec<(usize, usize)>,
    /// Index into `matches` of the match last visited
    pub match_cursor: Option<usize>,
    pub highlighted: Option<Letter>,
}

impl CursorState {
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn reset_search(&mut self) {
        self.query = None;
        self.matches.clear();
        self.match_cursor = None;
    }
}

/// Result of stepping through matches: 1-based index and total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStep {
    pub index: usize,
    pub total: usize,
}

impl fmt::Display for MatchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}

/// Interactive state over both grids of one tuning
#[derive(Debug, Clone)]
pub struct TableNavigator {
    tables: PositionTables,
    cursor: CursorState,
    options: NavigatorOptions,
}

impl TableNavigator {
    pub fn new(tuning: &Tuning) -> Self {
        Self::with_options(tuning, NavigatorOptions::default())
    }

    pub fn with_options(tuning: &Tuning, options: NavigatorOptions) -> Self {
        Self {
            tables: PositionTables::new(tuning),
            cursor: CursorState::default(),
            options,
        }
    }

    pub fn tables(&self) -> &PositionTables {
        &self.tables
    }

    pub fn tuning(&self) -> &Tuning {
        self.tables.tuning()
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn active_kind(&self) -> GridKind {
        self.cursor.active
    }

    pub fn active_grid(&self) -> &PositionGrid {
        self.tables.grid(self.cursor.active)
    }

    /// Pitch under the cursor
    pub fn cell_under_cursor(&self) -> Pitch {
        self.active_grid().cell(self.cursor.row, self.cursor.col)
    }

    pub fn is_match(&self, row: usize, col: usize) -> bool {
        self.cursor.matches.contains(&(row, col))
    }

    pub fn is_current_match(&self, row: usize, col: usize) -> bool {
        self.cursor
            .match_cursor
            .and_then(|i| self.cursor.matches.get(i))
            .is_some_and(|&m| m == (row, col))
    }

    pub fn is_highlighted(&self, pitch: &Pitch) -> bool {
        self.cursor.highlighted == Some(pitch.letter_class())
    }

    /// Move the cursor, clamped to the active grid. Never wraps.
    pub fn move_cursor(&mut self, motion: Motion) {
        let last_row = self.active_grid().rows() - 1;
        let last_col = self.active_grid().cols() - 1;
        let half_page = (self.active_grid().rows() / 2).max(1);
        let c = &mut self.cursor;

        match motion {
            Motion::Up => c.row = c.row.saturating_sub(1),
            Motion::Down => c.row = (c.row + 1).min(last_row),
            Motion::Left => c.col = c.col.saturating_sub(1),
            Motion::Right => c.col = (c.col + 1).min(last_col),
            Motion::FirstRow => c.row = 0,
            Motion::LastRow => c.row = last_row,
            Motion::FirstCol => c.col = 0,
            Motion::LastCol => c.col = last_col,
            Motion::HalfPageUp => c.row = c.row.saturating_sub(half_page),
            Motion::HalfPageDown => c.row = (c.row + half_page).min(last_row),
        }
    }

    /// Toggle between the stopped and harmonic grids.
    pub fn switch_grid(&mut self) -> GridKind {
        self.cursor.active = self.cursor.active.toggle();
        self.clamp_cursor();

        if self.options.clear_search_on_switch {
            self.cursor.reset_search();
        } else if let Some(query) = self.cursor.query.clone() {
            // Old coordinates belong to the other grid
            self.cursor.matches = NoteQuery::parse(&query)
                .map(|q| self.collect_matches(&q))
                .unwrap_or_default();
            self.cursor.match_cursor = None;
        }

        self.cursor.active
    }

    /// Search the active grid. Returns the match count and moves to the first
    /// match; reports `NoMatch` without moving when nothing matches.
    pub fn search(&mut self, text: &str) -> Result<usize, GuqinError> {
        let text = text.trim();
        let query = NoteQuery::parse(text)?;
        let matches = self.collect_matches(&query);
        debug!(query = text, grid = %self.cursor.active, count = matches.len(), "search");

        self.cursor.query = Some(text.to_string());
        self.cursor.matches = matches;
        self.cursor.match_cursor = None;

        let Some(&(row, col)) = self.cursor.matches.first() else {
            return Err(GuqinError::NoMatch(text.to_string()));
        };
        self.cursor.match_cursor = Some(0);
        self.cursor.row = row;
        self.cursor.col = col;
        Ok(self.cursor.matches.len())
    }

    /// Advance to the next match, wrapping after the last.
    pub fn next_match(&mut self) -> Result<MatchStep, GuqinError> {
        let total = self.require_matches()?;
        let index = match self.cursor.match_cursor {
            Some(i) => (i + 1) % total,
            None => 0,
        };
        Ok(self.visit_match(index))
    }

    /// Step back to the previous match, wrapping before the first.
    pub fn prev_match(&mut self) -> Result<MatchStep, GuqinError> {
        let total = self.require_matches()?;
        let index = match self.cursor.match_cursor {
            Some(i) => (i + total - 1) % total,
            None => total - 1,
        };
        Ok(self.visit_match(index))
    }

    /// Highlight the letter class under the cursor, or clear it if it is already
    /// highlighted. Returns the new highlight.
    pub fn toggle_highlight(&mut self) -> Option<Letter> {
        let letter = self.cell_under_cursor().letter_class();
        self.cursor.highlighted = if self.cursor.highlighted == Some(letter) {
            None
        } else {
            Some(letter)
        };
        self.cursor.highlighted
    }

    /// Drop the search and the highlight together.
    pub fn clear(&mut self) {
        self.cursor.reset_search();
        self.cursor.highlighted = None;
    }

    /// Rebuild both grids for a new tuning. The search no longer applies to the
    /// new cells and is dropped; the highlight is kept.
    pub fn retune(&mut self, tuning: &Tuning) {
        self.tables = PositionTables::new(tuning);
        self.cursor.reset_search();
        self.clamp_cursor();
    }

    fn collect_matches(&self, query: &NoteQuery) -> Vec<(usize, usize)> {
        self.active_grid()
            .iter()
            .filter(|(_, _, pitch)| query.matches(pitch))
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    fn require_matches(&self) -> Result<usize, GuqinError> {
        match self.cursor.matches.len() {
            0 => Err(GuqinError::NoActiveSearch),
            n => Ok(n),
        }
    }

    fn visit_match(&mut self, index: usize) -> MatchStep {
        let (row, col) = self.cursor.matches[index];
        self.cursor.match_cursor = Some(index);
        self.cursor.row = row;
        self.cursor.col = col;
        MatchStep {
            index: index + 1,
            total: self.cursor.matches.len(),
        }
    }

    fn clamp_cursor(&mut self) {
        let rows = self.active_grid().rows();
        let cols = self.active_grid().cols();
        self.cursor.row = self.cursor.row.min(rows - 1);
        self.cursor.col = self.cursor.col.min(cols - 1);
    }
}
