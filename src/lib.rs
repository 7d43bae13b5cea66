pub mod api;
pub mod color;
pub mod command;
pub mod config;
pub mod error;
pub mod grid;
pub mod markdown;
pub mod navigator;
pub mod pitch;
pub mod position;
pub mod print;
pub mod tui;
pub mod tuning;

pub use api::{calculate, calculate_preset, export_markdown};
pub use color::{classify, ColorCategory};
pub use command::{execute, run_line, Command, CommandHost, Outcome};
pub use config::{Preset, PresetBook};
pub use error::*;
pub use grid::{compute_harmonic, compute_stopped, GridKind, PositionGrid, PositionTables};
pub use markdown::{to_markdown, write_markdown};
pub use navigator::{CursorState, MatchStep, Motion, NavigatorOptions, NoteQuery, TableNavigator};
pub use pitch::{Accidental, AccidentalStyle, Letter, Pitch};
pub use position::{Position, HARMONIC_POSITIONS, STOPPED_POSITIONS};
pub use print::write_tables;
pub use tuning::{Tuning, STANDARD_TUNING, STANDARD_TUNING_NAME, STRING_COUNT, STRING_NAMES};
