//! Markdown export of both position tables.
//!
//! The document has four parts:
//! 1. `# <title>`
//! 2. `## 调音方法` - the open strings
//! 3. `## 按音音位表` - stopped notes, one row per hui
//! 4. `## 泛音音位表` - harmonics, one row per hui
//!
//! Grid tables carry the open pitch in each string header (`一弦 (C2)`) and end
//! with the interval column.

use crate::error::GuqinError;
use crate::grid::{GridKind, PositionGrid, PositionTables};
use crate::pitch::AccidentalStyle;
use crate::tuning::{Tuning, STRING_NAMES};
use std::fs;
use std::path::Path;
use tracing::info;

/// Render a tuning and its tables as a Markdown document.
pub fn to_markdown(title: &str, tables: &PositionTables, style: AccidentalStyle) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", title));
    md.push_str(&tuning_section(tables.tuning(), style));

    for kind in [GridKind::Stopped, GridKind::Harmonic] {
        md.push('\n');
        md.push_str(&grid_section(tables.grid(kind), style));
    }

    md
}

/// Write the Markdown document to `path`.
pub fn write_markdown(
    path: &Path,
    title: &str,
    tables: &PositionTables,
    style: AccidentalStyle,
) -> Result<(), GuqinError> {
    fs::write(path, to_markdown(title, tables, style)).map_err(|source| GuqinError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "exported markdown");
    Ok(())
}

fn tuning_section(tuning: &Tuning, style: AccidentalStyle) -> String {
    let mut md = String::from("## 调音方法\n\n");

    md.push_str("| **弦名** |");
    for name in STRING_NAMES {
        md.push_str(&format!(" {} |", name));
    }
    md.push('\n');

    md.push_str("| --- |");
    md.push_str(&" --- |".repeat(STRING_NAMES.len()));
    md.push('\n');

    md.push_str("| **空弦音** |");
    for pitch in tuning.iter() {
        md.push_str(&format!(" {} |", pitch.format_with(style)));
    }
    md.push('\n');

    md
}

fn grid_section(grid: &PositionGrid, style: AccidentalStyle) -> String {
    let mut md = format!("## {}\n\n", grid.kind().title());

    md.push_str("| **徽位** |");
    for (name, open) in STRING_NAMES.iter().zip(grid.tuning().iter()) {
        md.push_str(&format!(" {} ({}) |", name, open.format_with(style)));
    }
    md.push_str(" **音程关系** |\n");

    md.push_str("| --- |");
    md.push_str(&" --- |".repeat(grid.cols() + 1));
    md.push('\n');

    for row in 0..grid.rows() {
        let position = grid.position(row);
        md.push_str(&format!("| **{}** |", position.hui));
        for pitch in grid.row(row) {
            md.push_str(&format!(" {} |", pitch.format_with(style)));
        }
        md.push_str(&format!(" {} |\n", position.interval));
    }

    md
}
