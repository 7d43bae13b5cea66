//! # Public API
//!
//! One-call entry points for the guqin position library.
//!
//! ## Functions
//!
//! - [`calculate()`] - Both tables for seven pitch names
//! - [`calculate_preset()`] - Both tables for a named preset
//! - [`export_markdown()`] - Both tables rendered as a Markdown document
//!
//! ## Typical Usage
//!
//! ```rust
//! use guqin::calculate;
//!
//! let tables = calculate(&["C2", "D2", "F2", "G2", "A2", "C3", "D3"])?;
//! assert_eq!(tables.stopped.cell(0, 0).to_string(), "E4");
//! assert_eq!(tables.harmonic.cell(8, 0).to_string(), "C3");
//! # Ok::<(), guqin::GuqinError>(())
//! ```
//!
//! For interactive browsing, wrap the tuning in a [`TableNavigator`](crate::TableNavigator).

use crate::{AccidentalStyle, GuqinError, PositionTables, PresetBook, Tuning};

/// Compute the stopped and harmonic tables for seven open-string pitch names.
///
/// # Pipeline
/// 1. Check there are exactly seven names
/// 2. Parse each pitch name
/// 3. Compute both grids
///
/// # Errors
/// [`GuqinError::InvalidTuningLength`] or [`GuqinError::InvalidPitchFormat`].
pub fn calculate<S: AsRef<str>>(names: &[S]) -> Result<PositionTables, GuqinError> {
    let tuning = Tuning::parse(names)?;
    Ok(PositionTables::new(&tuning))
}

/// Compute both tables for a preset from `book`.
///
/// # Example
/// ```rust
/// use guqin::{calculate_preset, PresetBook};
///
/// let book = PresetBook::builtin()?;
/// let tables = calculate_preset(&book, "zheng")?;
/// assert_eq!(tables.tuning().to_string(), "C2 D2 F2 G2 A2 C3 D3");
/// # Ok::<(), guqin::GuqinError>(())
/// ```
pub fn calculate_preset(book: &PresetBook, name: &str) -> Result<PositionTables, GuqinError> {
    let tuning = book.tuning(name)?;
    Ok(PositionTables::new(&tuning))
}

/// Compute both tables and render them as Markdown under `title`.
///
/// # Example
/// ```rust
/// use guqin::{export_markdown, AccidentalStyle};
///
/// let md = export_markdown(
///     "F大调正调",
///     &["C2", "D2", "F2", "G2", "A2", "C3", "D3"],
///     AccidentalStyle::Ascii,
/// )?;
/// assert!(md.starts_with("# F大调正调"));
/// # Ok::<(), guqin::GuqinError>(())
/// ```
pub fn export_markdown<S: AsRef<str>>(
    title: &str,
    names: &[S],
    style: AccidentalStyle,
) -> Result<String, GuqinError> {
    let tables = calculate(names)?;
    Ok(crate::to_markdown(title, &tables, style))
}
