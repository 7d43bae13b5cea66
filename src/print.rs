//! Plain-terminal rendering of the position tables.
//!
//! Used by `guqin --show`. Each grid line lists the seven pitches in fixed-width
//! columns, followed by the hui and its interval. With color on, every pitch is
//! drawn in its letter-class color.

use crate::color::{classify, ColorCategory};
use crate::grid::{GridKind, PositionGrid, PositionTables};
use crate::pitch::{AccidentalStyle, Pitch};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

const COLUMN_WIDTH: usize = 6;

/// Write both tables for `tables` to `out`.
///
/// Escape sequences are emitted only when `color` is set.
pub fn write_tables<W: Write>(
    out: &mut W,
    title: &str,
    tables: &PositionTables,
    style: AccidentalStyle,
    color: bool,
) -> io::Result<()> {
    heading(out, title, color)?;
    write!(out, "  ")?;
    for open in tables.tuning().iter() {
        pitch_cell(out, open, style, color)?;
    }
    writeln!(out)?;

    for kind in [GridKind::Stopped, GridKind::Harmonic] {
        writeln!(out)?;
        grid_block(out, tables.grid(kind), style, color)?;
    }
    out.flush()
}

fn grid_block<W: Write>(
    out: &mut W,
    grid: &PositionGrid,
    style: AccidentalStyle,
    color: bool,
) -> io::Result<()> {
    let kind = grid.kind();
    heading(out, &format!("{} {}", kind.title(), kind.title_en()), color)?;

    for row in 0..grid.rows() {
        let position = grid.position(row);
        write!(out, "  ")?;
        for pitch in grid.row(row) {
            pitch_cell(out, pitch, style, color)?;
        }
        writeln!(out, "  {}  {}", position.hui, position.interval)?;
    }
    Ok(())
}

fn heading<W: Write>(out: &mut W, text: &str, color: bool) -> io::Result<()> {
    if color {
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            Print("\n")
        )
    } else {
        writeln!(out, "{}", text)
    }
}

fn pitch_cell<W: Write>(
    out: &mut W,
    pitch: &Pitch,
    style: AccidentalStyle,
    color: bool,
) -> io::Result<()> {
    let text = format!("{:<width$}", pitch.format_with(style), width = COLUMN_WIDTH);
    if color {
        queue!(
            out,
            SetForegroundColor(terminal_color(classify(pitch))),
            Print(text),
            ResetColor
        )
    } else {
        write!(out, "{}", text)
    }
}

fn terminal_color(category: ColorCategory) -> Color {
    match category {
        ColorCategory::Red => Color::Red,
        ColorCategory::Green => Color::Green,
        ColorCategory::Yellow => Color::Yellow,
        ColorCategory::Blue => Color::Blue,
        ColorCategory::Magenta => Color::Magenta,
        ColorCategory::Cyan => Color::Cyan,
        ColorCategory::White => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn render(color: bool) -> String {
        let tables = PositionTables::new(&Tuning::standard());
        let mut out = Vec::new();
        write_tables(&mut out, "F大调正调", &tables, AccidentalStyle::Ascii, color).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let text = render(false);
        assert!(!text.contains('\x1b'));
        assert!(text.starts_with("F大调正调\n"));
        assert!(text.contains("按音音位表"));
        assert!(text.contains("泛音音位表"));
        // 三徽 row of the stopped grid
        assert!(text.contains("  E4    F#4   "));
        assert!(text.contains("三徽  大十七度"));
    }

    #[test]
    fn test_line_count_matches_grids() {
        let text = render(false);
        // title, open strings, then blank + heading + rows for each grid
        assert_eq!(text.lines().count(), 2 + (2 + 19) + (2 + 17));
    }

    #[test]
    fn test_color_output_styles_each_pitch() {
        let text = render(true);
        assert!(text.contains('\x1b'));
        assert!(text.contains("E4"));
        // A pitch cell is wrapped in a color and a reset
        let red = format!("{}", SetForegroundColor(Color::Red));
        let reset = format!("{}", ResetColor);
        assert!(text.contains(&format!("{}C2    {}", red, reset)));
    }

    #[test]
    fn test_terminal_color_follows_category() {
        let c = Pitch::parse("C4").unwrap();
        let g = Pitch::parse("G4").unwrap();
        assert_eq!(terminal_color(classify(&c)), Color::Red);
        assert_ne!(terminal_color(classify(&c)), terminal_color(classify(&g)));
    }
}
