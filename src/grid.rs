//! # Position Engine
//!
//! Computes the stopped-note and harmonic grids for a tuning.
//!
//! ## Layout
//! A [`PositionGrid`] is indexed `(row, col)`:
//! - `row` - stud position, 0-based, in table order (19 stopped, 17 harmonic)
//! - `col` - string, 0-based (一弦 = 0 ... 七弦 = 6)
//!
//! ## Pitch Derivation
//! - **Stopped**: open pitch transposed by the position's equal-tempered offset
//! - **Harmonic**: open pitch's concert frequency times the overtone ratio, mapped
//!   back to the nearest equal-tempered pitch
//!
//! Both grids use equal temperament, so the same tuning always yields the same
//! cells. The just-intonation frequency of any cell is available separately through
//! [`PositionGrid::just_frequency`].
//!
//! ## Example
//! ```rust
//! use guqin::{compute_stopped, Tuning};
//!
//! let tuning = Tuning::standard();
//! let grid = compute_stopped(&tuning);
//! assert_eq!(grid.rows(), 19);
//! assert_eq!(grid.cell(9, 0).to_string(), "C3"); // 七徽 on 一弦: octave above C2
//! ```

use crate::pitch::{concert_a, Pitch, CONCERT_A_HZ};
use crate::position::{Position, HARMONIC_POSITIONS, STOPPED_POSITIONS};
use crate::tuning::{Tuning, STRING_COUNT};
use std::fmt;
use tracing::debug;

/// Which table a grid holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridKind {
    #[default]
    Stopped,
    Harmonic,
}

impl GridKind {
    /// Position table backing this kind of grid
    pub fn positions(self) -> &'static [Position] {
        match self {
            GridKind::Stopped => &STOPPED_POSITIONS,
            GridKind::Harmonic => &HARMONIC_POSITIONS,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            GridKind::Stopped => GridKind::Harmonic,
            GridKind::Harmonic => GridKind::Stopped,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GridKind::Stopped => "stopped",
            GridKind::Harmonic => "harmonic",
        }
    }

    /// Chinese table title
    pub fn title(self) -> &'static str {
        match self {
            GridKind::Stopped => "按音音位表",
            GridKind::Harmonic => "泛音音位表",
        }
    }

    pub fn title_en(self) -> &'static str {
        match self {
            GridKind::Stopped => "Stopped Notes",
            GridKind::Harmonic => "Harmonics",
        }
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived pitches for every (position, string) pair of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGrid {
    kind: GridKind,
    tuning: Tuning,
    cells: Vec<[Pitch; STRING_COUNT]>,
}

impl PositionGrid {
    pub fn kind(&self) -> GridKind {
        self.kind
    }

    /// Tuning the grid was computed from
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Number of positions
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of strings
    pub fn cols(&self) -> usize {
        STRING_COUNT
    }

    /// Position metadata for a row
    pub fn position(&self, row: usize) -> &'static Position {
        &self.kind.positions()[row]
    }

    /// Pitch at `(row, col)`. Panics when out of bounds; use [`PositionGrid::get`]
    /// for checked access.
    pub fn cell(&self, row: usize, col: usize) -> Pitch {
        self.cells[row][col]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Pitch> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// One position across all seven strings
    pub fn row(&self, row: usize) -> &[Pitch; STRING_COUNT] {
        &self.cells[row]
    }

    /// All cells in row-major order with their coordinates
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Pitch)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, p)| (r, c, *p)))
    }

    /// Pure-ratio frequency of a cell: open string concert frequency times the
    /// position's just ratio.
    pub fn just_frequency(&self, row: usize, col: usize) -> Option<f64> {
        let open = self.tuning.string(col)?;
        let position = self.kind.positions().get(row)?;
        Some(open.concert_frequency() * position.frequency_ratio())
    }
}

/// Compute the 19-position stopped-note grid.
pub fn compute_stopped(tuning: &Tuning) -> PositionGrid {
    let cells: Vec<[Pitch; STRING_COUNT]> = STOPPED_POSITIONS
        .iter()
        .map(|position| {
            let offset = position.semitone_offset();
            tuning.strings().map(|open| open.transpose(offset))
        })
        .collect();

    debug!(tuning = %tuning, rows = cells.len(), "computed stopped grid");
    PositionGrid {
        kind: GridKind::Stopped,
        tuning: tuning.clone(),
        cells,
    }
}

/// Compute the 17-position harmonic grid.
pub fn compute_harmonic(tuning: &Tuning) -> PositionGrid {
    let reference = concert_a();
    let cells: Vec<[Pitch; STRING_COUNT]> = HARMONIC_POSITIONS
        .iter()
        .map(|position| {
            let ratio = position.frequency_ratio();
            tuning.strings().map(|open| {
                let sounding = open.concert_frequency() * ratio;
                Pitch::nearest_to_frequency(sounding, CONCERT_A_HZ, &reference)
            })
        })
        .collect();

    debug!(tuning = %tuning, rows = cells.len(), "computed harmonic grid");
    PositionGrid {
        kind: GridKind::Harmonic,
        tuning: tuning.clone(),
        cells,
    }
}

/// Both grids for one tuning, always built together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTables {
    pub stopped: PositionGrid,
    pub harmonic: PositionGrid,
}

impl PositionTables {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            stopped: compute_stopped(tuning),
            harmonic: compute_harmonic(tuning),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        self.stopped.tuning()
    }

    pub fn grid(&self, kind: GridKind) -> &PositionGrid {
        match kind {
            GridKind::Stopped => &self.stopped,
            GridKind::Harmonic => &self.harmonic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuqinError;

    fn names(grid: &PositionGrid, col: usize) -> Vec<String> {
        (0..grid.rows()).map(|r| grid.cell(r, col).to_string()).collect()
    }

    #[test]
    fn test_grid_dimensions() {
        let tables = PositionTables::new(&Tuning::standard());
        assert_eq!(tables.stopped.rows(), 19);
        assert_eq!(tables.stopped.cols(), 7);
        assert_eq!(tables.harmonic.rows(), 17);
        assert_eq!(tables.harmonic.cols(), 7);
        assert_eq!(tables.stopped.iter().count(), 7 * 19);
        assert_eq!(tables.harmonic.iter().count(), 7 * 17);
    }

    #[test]
    fn test_stopped_first_string_standard_tuning() {
        let grid = compute_stopped(&Tuning::standard());
        assert_eq!(
            names(&grid, 0),
            vec![
                "E4", "D4", "C4", "A3", "G3", "F3", "E3", "Eb3", "D3", "C3", "B2", "Bb2", "A2",
                "Ab2", "G2", "F2", "E2", "Eb2", "D2"
            ]
        );
    }

    #[test]
    fn test_harmonic_first_string_standard_tuning() {
        let grid = compute_harmonic(&Tuning::standard());
        assert_eq!(
            names(&grid, 0),
            vec![
                "A3", "C5", "Ab3", "G4", "E4", "C4", "G3", "E4", "C3", "E4", "G3", "C4", "E4",
                "G4", "Ab3", "C5", "A3"
            ]
        );
    }

    #[test]
    fn test_harmonic_octave_row_is_open_plus_octave() {
        let tuning = Tuning::standard();
        let grid = compute_harmonic(&tuning);
        assert_eq!(grid.position(8).hui, "七徽");
        for (col, open) in tuning.iter().enumerate() {
            assert_eq!(grid.cell(8, col).semitone_index(), open.semitone_index() + 12);
        }
    }

    #[test]
    fn test_cells_respelled_from_open_string() {
        // Open string typed as Db stays Db in the tuning, derived cells use C#
        let tuning = Tuning::parse(&["Db2", "D2", "F2", "G2", "A2", "C3", "D3"]).unwrap();
        let grid = compute_stopped(&tuning);
        assert_eq!(tuning.string(0).unwrap().to_string(), "Db2");
        assert_eq!(grid.cell(9, 0).to_string(), "C#3");
    }

    #[test]
    fn test_computation_is_deterministic() {
        let tuning = Tuning::parse(&["C2", "D2", "F2", "G2", "Bb2", "C3", "D3"]).unwrap();
        assert_eq!(compute_stopped(&tuning), compute_stopped(&tuning));
        assert_eq!(compute_harmonic(&tuning), compute_harmonic(&tuning));
        assert_eq!(PositionTables::new(&tuning), PositionTables::new(&tuning));
    }

    #[test]
    fn test_invalid_tuning_never_reaches_engine() {
        let result = Tuning::parse(&["C2", "D2"]).map(|t| PositionTables::new(&t));
        assert!(matches!(result, Err(GuqinError::InvalidTuningLength(2))));
    }

    #[test]
    fn test_checked_access() {
        let grid = compute_stopped(&Tuning::standard());
        assert!(grid.get(18, 6).is_some());
        assert!(grid.get(19, 0).is_none());
        assert!(grid.get(0, 7).is_none());
    }

    #[test]
    fn test_just_frequency() {
        let grid = compute_stopped(&Tuning::standard());
        // 九徽 (2/3 length) on C2: exactly 1.5x the open frequency
        let open = Tuning::standard().string(0).unwrap().concert_frequency();
        let just = grid.just_frequency(14, 0).unwrap();
        assert!((just - open * 1.5).abs() < 1e-9);
        assert!(grid.just_frequency(19, 0).is_none());
    }

    #[test]
    fn test_grid_kind_toggle() {
        assert_eq!(GridKind::Stopped.toggle(), GridKind::Harmonic);
        assert_eq!(GridKind::Harmonic.toggle(), GridKind::Stopped);
        assert_eq!(GridKind::Stopped.positions().len(), 19);
        assert_eq!(GridKind::Harmonic.positions().len(), 17);
    }
}
