//! # Error Types
//!
//! This module defines all error types for the guqin position calculator.
//!
//! Only tuning errors raised while starting up are fatal. Every other error is
//! reported to the user as a status message and the interactive session continues.
//!
//! ## Error Types
//! - `InvalidPitchFormat` - Pitch text that isn't `<Letter><Accidental?><Octave>`
//! - `InvalidTuningLength` - A tuning that doesn't have exactly seven strings
//! - `NoMatch` - A search that found nothing in the active grid
//! - `NoActiveSearch` - `n`/`N` pressed with no search results to cycle through
//! - `MissingArgument` - A command that needs an argument was given none
//! - `UnknownPreset` / `Config` - Preset lookup and preset file problems
//! - `Export` - Writing the Markdown export failed
//!
//! ## Usage
//! ```rust
//! use guqin::{GuqinError, Tuning};
//!
//! match Tuning::parse(&["C2", "D2", "F2"]) {
//!     Ok(_) => unreachable!(),
//!     Err(GuqinError::InvalidTuningLength(n)) => assert_eq!(n, 3),
//!     Err(e) => panic!("unexpected error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuqinError {
    /// Malformed pitch text.
    ///
    /// # Example
    /// ```
    /// # use guqin::GuqinError;
    /// let err = GuqinError::InvalidPitchFormat("H2".to_string());
    /// assert_eq!(err.to_string(), "Invalid pitch format: 'H2'");
    /// ```
    #[error("Invalid pitch format: '{0}'")]
    InvalidPitchFormat(String),

    /// A tuning must name exactly seven open strings.
    ///
    /// # Example
    /// ```
    /// # use guqin::GuqinError;
    /// let err = GuqinError::InvalidTuningLength(6);
    /// assert_eq!(err.to_string(), "A tuning needs exactly 7 strings, got 6");
    /// ```
    #[error("A tuning needs exactly 7 strings, got {0}")]
    InvalidTuningLength(usize),

    /// Search query matched no cell of the active grid.
    #[error("No match for '{0}'")]
    NoMatch(String),

    /// Next/previous match requested without any search results.
    #[error("No active search")]
    NoActiveSearch,

    /// Command given without its required argument.
    ///
    /// # Example
    /// ```
    /// # use guqin::GuqinError;
    /// let err = GuqinError::MissingArgument {
    ///     command: "export".to_string(),
    ///     argument: "path".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Missing argument for ':export': expected <path>");
    /// ```
    #[error("Missing argument for ':{command}': expected <{argument}>")]
    MissingArgument { command: String, argument: String },

    /// Preset name not present in the loaded preset book.
    #[error("Unknown preset: '{0}'")]
    UnknownPreset(String),

    /// Preset file could not be read or parsed.
    #[error("Invalid preset configuration: {0}")]
    Config(String),

    /// Markdown export could not be written.
    #[error("Failed to export to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
