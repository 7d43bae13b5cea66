//! Letter-class color categories.
//!
//! Every pitch is colored by its letter alone. Accidental and octave are ignored,
//! so C2, C3, C#4 and Cb5 all land in the same category. The renderer maps each
//! category to a terminal color.

use crate::pitch::{Letter, Pitch};

/// Display category, one per letter class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Red,     // C
    Green,   // D
    Yellow,  // E
    Blue,    // F
    Magenta, // G
    Cyan,    // A
    White,   // B
}

impl ColorCategory {
    pub fn for_letter(letter: Letter) -> Self {
        match letter {
            Letter::C => ColorCategory::Red,
            Letter::D => ColorCategory::Green,
            Letter::E => ColorCategory::Yellow,
            Letter::F => ColorCategory::Blue,
            Letter::G => ColorCategory::Magenta,
            Letter::A => ColorCategory::Cyan,
            Letter::B => ColorCategory::White,
        }
    }
}

/// Category for a pitch, from its letter class only
pub fn classify(pitch: &Pitch) -> ColorCategory {
    ColorCategory::for_letter(pitch.letter_class())
}
