//! # Pitch Model
//!
//! Note names with letter, accidental and octave, plus the semitone and frequency
//! math every other module builds on.
//!
//! ## Semitone Index
//! Pitches are ordered by an absolute semitone index using MIDI numbering:
//! - `C-1 = 0`, `C4 = 60`, `A4 = 69`
//! - `index = (octave + 1) * 12 + offset(letter) + offset(accidental)`
//!
//! Enharmonic spellings (`C#3` / `Db3`) share an index but stay distinct values,
//! so the spelling a user typed survives for display. Use [`Pitch::is_enharmonic`]
//! when two pitches should count as the same note.
//!
//! ## Spelling Derived Pitches
//! Pitches computed from a semitone index (transposition, nearest-frequency lookup)
//! are spelled with a fixed table that matches common guqin notation:
//! ```text
//! C  C#  D  Eb  E  F  F#  G  Ab  A  Bb  B
//! ```
//!
//! ## Example
//! ```rust
//! use guqin::{Pitch, Letter, Accidental};
//!
//! let p: Pitch = "F♯2".parse()?;
//! assert_eq!(p.letter, Letter::F);
//! assert_eq!(p.accidental, Accidental::Sharp);
//! assert_eq!(p.semitone_index(), 42);
//! assert_eq!(p.to_string(), "F#2");
//! # Ok::<(), guqin::GuqinError>(())
//! ```

use crate::error::GuqinError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Concert pitch reference: A4 = 440 Hz.
pub const CONCERT_A_HZ: f64 = 440.0;

/// Lowest octave accepted by [`Pitch::parse`]
pub const MIN_OCTAVE: i32 = -1;

/// Highest octave accepted by [`Pitch::parse`]
pub const MAX_OCTAVE: i32 = 9;

/// Note letters C through B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Letter {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in scale order.
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitone offset of the natural note from C
    pub fn semitone_offset(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Case-insensitive letter lookup
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accidentals: natural (none written), sharp, flat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp, // # or ♯
    Flat,  // b or ♭
}

impl Accidental {
    pub fn semitone_offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    /// Recognizes a single accidental token. The letter `b` counts as flat here,
    /// so callers must consume the note letter first.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' | '♯' => Some(Accidental::Sharp),
            'b' | '♭' => Some(Accidental::Flat),
            _ => None,
        }
    }

    fn symbol(self, style: AccidentalStyle) -> &'static str {
        match (self, style) {
            (Accidental::Natural, _) => "",
            (Accidental::Sharp, AccidentalStyle::Ascii) => "#",
            (Accidental::Flat, AccidentalStyle::Ascii) => "b",
            (Accidental::Sharp, AccidentalStyle::Unicode) => "♯",
            (Accidental::Flat, AccidentalStyle::Unicode) => "♭",
        }
    }
}

/// How accidentals are rendered when formatting a pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccidentalStyle {
    /// `#` and `b`
    #[default]
    Ascii,
    /// `♯` and `♭`
    Unicode,
}

/// A spelled pitch: letter + accidental + octave.
///
/// Equality is structural (spelling matters). Ordering sorts by semitone index
/// first, then by spelling, so it agrees with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub letter: Letter,
    pub accidental: Accidental,
    pub octave: i32,
}

impl Pitch {
    pub fn new(letter: Letter, accidental: Accidental, octave: i32) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// Parse pitch text like `C2`, `d#3`, `Bb4`, `F♯2` or `C-1`.
    ///
    /// Fails with [`GuqinError::InvalidPitchFormat`] on a missing octave, an octave
    /// outside [`MIN_OCTAVE`]..=[`MAX_OCTAVE`], an unknown letter, more than one
    /// accidental or trailing characters.
    pub fn parse(text: &str) -> Result<Self, GuqinError> {
        let (letter, accidental, rest) = split_pitch_class(text)?;
        if rest.is_empty() {
            return Err(invalid(text));
        }
        let octave = parse_octave(rest).ok_or_else(|| invalid(text))?;
        Ok(Self::new(letter, accidental, octave))
    }

    /// Absolute semitone index (MIDI numbering, C4 = 60).
    pub fn semitone_index(&self) -> i32 {
        (self.octave + 1) * 12 + self.letter.semitone_offset() + self.accidental.semitone_offset()
    }

    /// Semitone index within the octave, 0..12.
    pub fn pitch_class(&self) -> i32 {
        self.semitone_index().rem_euclid(12)
    }

    /// Letter class used for coloring and bare-letter search.
    pub fn letter_class(&self) -> Letter {
        self.letter
    }

    /// True when both pitches sound the same note, whatever their spelling.
    pub fn is_enharmonic(&self, other: &Pitch) -> bool {
        self.semitone_index() == other.semitone_index()
    }

    /// Spell a semitone index with the fixed derived-pitch table.
    pub fn from_semitone(index: i32) -> Self {
        let octave = index.div_euclid(12) - 1;
        let (letter, accidental) = match index.rem_euclid(12) {
            0 => (Letter::C, Accidental::Natural),
            1 => (Letter::C, Accidental::Sharp),
            2 => (Letter::D, Accidental::Natural),
            3 => (Letter::E, Accidental::Flat),
            4 => (Letter::E, Accidental::Natural),
            5 => (Letter::F, Accidental::Natural),
            6 => (Letter::F, Accidental::Sharp),
            7 => (Letter::G, Accidental::Natural),
            8 => (Letter::A, Accidental::Flat),
            9 => (Letter::A, Accidental::Natural),
            10 => (Letter::B, Accidental::Flat),
            11 => (Letter::B, Accidental::Natural),
            _ => unreachable!(),
        };
        Self::new(letter, accidental, octave)
    }

    /// Transpose by a number of semitones. The result is respelled.
    pub fn transpose(&self, semitones: i32) -> Self {
        Self::from_semitone(self.semitone_index() + semitones)
    }

    /// Equal-tempered frequency relative to a reference pitch:
    /// `reference_hz * 2^((self - reference) / 12)`
    pub fn frequency(&self, reference_hz: f64, reference: &Pitch) -> f64 {
        let steps = (self.semitone_index() - reference.semitone_index()) as f64;
        reference_hz * 2f64.powf(steps / 12.0)
    }

    /// Frequency with A4 = 440 Hz.
    pub fn concert_frequency(&self) -> f64 {
        self.frequency(CONCERT_A_HZ, &concert_a())
    }

    /// Nearest equal-tempered pitch to a frequency, spelled with the derived table.
    pub fn nearest_to_frequency(hz: f64, reference_hz: f64, reference: &Pitch) -> Self {
        let steps = (12.0 * (hz / reference_hz).log2()).round() as i32;
        Self::from_semitone(reference.semitone_index() + steps)
    }

    /// Render with the requested accidental symbols.
    pub fn format_with(&self, style: AccidentalStyle) -> String {
        format!(
            "{}{}{}",
            self.letter,
            self.accidental.symbol(style),
            self.octave
        )
    }
}

/// A4, the reference for concert frequencies
pub fn concert_a() -> Pitch {
    Pitch::new(Letter::A, Accidental::Natural, 4)
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semitone_index()
            .cmp(&other.semitone_index())
            .then(self.letter.cmp(&other.letter))
            .then(self.accidental.cmp(&other.accidental))
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(AccidentalStyle::Ascii))
    }
}

impl FromStr for Pitch {
    type Err = GuqinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::parse(s)
    }
}

/// Split `<Letter><Accidental?>` off the front of pitch text.
/// Returns the letter, the accidental and the unparsed remainder.
pub(crate) fn split_pitch_class(text: &str) -> Result<(Letter, Accidental, &str), GuqinError> {
    let trimmed = text.trim();
    let first = trimmed.chars().next().ok_or_else(|| invalid(text))?;
    let letter = Letter::from_char(first).ok_or_else(|| invalid(text))?;

    let mut rest = &trimmed[first.len_utf8()..];
    let mut accidental = Accidental::Natural;
    if let Some(c) = rest.chars().next() {
        if let Some(acc) = Accidental::from_char(c) {
            accidental = acc;
            rest = &rest[c.len_utf8()..];
            // A second accidental token is not allowed (no double sharps/flats)
            if rest.chars().next().and_then(Accidental::from_char).is_some() {
                return Err(invalid(text));
            }
        }
    }

    Ok((letter, accidental, rest))
}

/// Octave is an optionally negative decimal integer with nothing after it, within
/// the MIDI octave range
fn parse_octave(s: &str) -> Option<i32> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse()
        .ok()
        .filter(|octave| (MIN_OCTAVE..=MAX_OCTAVE).contains(octave))
}

fn invalid(text: &str) -> GuqinError {
    GuqinError::InvalidPitchFormat(text.to_string())
}
