//! Open-string tunings.
//!
//! A [`Tuning`] is exactly seven pitches, string 1 (lowest, nearest the player)
//! through string 7. The length is checked once, here, so the position engine can
//! rely on it.

use crate::error::GuqinError;
use crate::pitch::{Accidental, AccidentalStyle, Letter, Pitch};
use std::fmt;

/// Number of strings on the instrument
pub const STRING_COUNT: usize = 7;

/// Traditional string names, 一弦 through 七弦
pub const STRING_NAMES: [&str; STRING_COUNT] = ["一弦", "二弦", "三弦", "四弦", "五弦", "六弦", "七弦"];

/// Standard tuning (正调): C2 D2 F2 G2 A2 C3 D3
pub const STANDARD_TUNING: [&str; STRING_COUNT] = ["C2", "D2", "F2", "G2", "A2", "C3", "D3"];

/// Title used when the standard tuning is picked by default
pub const STANDARD_TUNING_NAME: &str = "F大调正调";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tuning {
    strings: [Pitch; STRING_COUNT],
}

impl Tuning {
    /// Build a tuning from already-parsed pitches.
    pub fn new(pitches: &[Pitch]) -> Result<Self, GuqinError> {
        let strings: [Pitch; STRING_COUNT] = pitches
            .try_into()
            .map_err(|_| GuqinError::InvalidTuningLength(pitches.len()))?;
        Ok(Self { strings })
    }

    /// Parse seven pitch names. The length is checked before any pitch is parsed,
    /// so a short list reports `InvalidTuningLength` rather than a pitch error.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, GuqinError> {
        if names.len() != STRING_COUNT {
            return Err(GuqinError::InvalidTuningLength(names.len()));
        }
        let pitches = names
            .iter()
            .map(|name| Pitch::parse(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&pitches)
    }

    /// The standard 正调 tuning
    pub fn standard() -> Self {
        let natural = |letter, octave| Pitch::new(letter, Accidental::Natural, octave);
        Self {
            strings: [
                natural(Letter::C, 2),
                natural(Letter::D, 2),
                natural(Letter::F, 2),
                natural(Letter::G, 2),
                natural(Letter::A, 2),
                natural(Letter::C, 3),
                natural(Letter::D, 3),
            ],
        }
    }

    pub fn strings(&self) -> &[Pitch; STRING_COUNT] {
        &self.strings
    }

    /// Open pitch of a string, 0-indexed
    pub fn string(&self, index: usize) -> Option<&Pitch> {
        self.strings.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pitch> {
        self.strings.iter()
    }

    /// Space-separated pitch names
    pub fn format_with(&self, style: AccidentalStyle) -> String {
        self.strings
            .iter()
            .map(|p| p.format_with(style))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(AccidentalStyle::Ascii))
    }
}
