//! # Stud Position Tables
//!
//! Fixed constants describing where notes are played on the guqin.
//!
//! ## Stopped Notes (按音)
//! 19 positions from 三徽 (nearest the head) to 徽外 (beyond the 13th stud). Each
//! entry stores the **vibrating-length ratio** of the stopped string, rising
//! monotonically from 1/5 to 8/9. The sounding note is the open string raised by
//! the equal-tempered interval nearest that ratio:
//! ```text
//! offset = round(12 * log2(1 / length))
//! 1/5 -> +28   1/2 -> +12   2/3 -> +7   8/9 -> +2
//! ```
//!
//! ## Harmonics (泛音)
//! 17 nodal positions from the dark stud past 13 (暗徽4) to the dark stud past 1
//! (暗徽1). Each entry stores the **overtone ratio** of the sounding note over the
//! open string: a node at 1/n of the string sounds the n-th partial, so 七徽 (1/2)
//! is 2/1, 九徽 (1/3) is 3/1, and 十三徽 (1/8) is 8/1. The dark studs use the
//! compound just intervals 27/8 (major ninth + fifth) and 16/5 (minor ninth + fifth).
//!
//! ## Related Modules
//! - `grid` - Applies these tables to a tuning
//! - `markdown` - Prints hui names and interval labels

use num_rational::Ratio;

/// Number of stopped-note positions
pub const STOPPED_POSITION_COUNT: usize = 19;

/// Number of harmonic positions
pub const HARMONIC_POSITION_COUNT: usize = 17;

/// How a position derives its sounding note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Stopped string; ratio of vibrating length to full length
    Stop { length: Ratio<u32> },
    /// Lightly touched node; frequency multiple of the open string
    Harmonic { overtone: Ratio<u32> },
}

/// One stud position with its labels and ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Hui (徽位) name, e.g. 七徽
    pub hui: &'static str,
    /// Interval above the open string, e.g. 八度
    pub interval: &'static str,
    /// English interval name
    pub interval_en: &'static str,
    pub node: Node,
}

impl Position {
    const fn stop(
        hui: &'static str,
        interval: &'static str,
        interval_en: &'static str,
        numer: u32,
        denom: u32,
    ) -> Self {
        Self {
            hui,
            interval,
            interval_en,
            node: Node::Stop {
                length: Ratio::new_raw(numer, denom),
            },
        }
    }

    const fn harmonic(
        hui: &'static str,
        interval: &'static str,
        interval_en: &'static str,
        numer: u32,
        denom: u32,
    ) -> Self {
        Self {
            hui,
            interval,
            interval_en,
            node: Node::Harmonic {
                overtone: Ratio::new_raw(numer, denom),
            },
        }
    }

    /// Just frequency ratio of the sounding note over the open string
    pub fn frequency_ratio(&self) -> f64 {
        match self.node {
            Node::Stop { length } => ratio_to_f64(length.recip()),
            Node::Harmonic { overtone } => ratio_to_f64(overtone),
        }
    }

    /// Size of the just interval in cents
    pub fn just_cents(&self) -> f64 {
        1200.0 * self.frequency_ratio().log2()
    }

    /// Nearest equal-tempered interval in semitones
    pub fn semitone_offset(&self) -> i32 {
        (self.just_cents() / 100.0).round() as i32
    }

    /// Just interval minus its tempered approximation, in cents
    pub fn just_cents_deviation(&self) -> f64 {
        self.just_cents() - 100.0 * self.semitone_offset() as f64
    }
}

fn ratio_to_f64(r: Ratio<u32>) -> f64 {
    *r.numer() as f64 / *r.denom() as f64
}

/// Stopped-note positions, head to tail
pub static STOPPED_POSITIONS: [Position; STOPPED_POSITION_COUNT] = [
    Position::stop("三徽", "大十七度", "major 17th", 1, 5),
    Position::stop("三徽半", "大十六度", "major 16th", 2, 9),
    Position::stop("四徽", "十五度", "double octave", 1, 4),
    Position::stop("四徽六分", "大十三度", "major 13th", 3, 10),
    Position::stop("五徽", "纯十二度", "perfect 12th", 1, 3),
    Position::stop("五徽六分", "纯十一度", "perfect 11th", 3, 8),
    Position::stop("六徽", "大十度", "major 10th", 2, 5),
    Position::stop("六徽二分", "小十度", "minor 10th", 5, 12),
    Position::stop("六徽半", "大九度", "major 9th", 4, 9),
    Position::stop("七徽", "八度", "octave", 1, 2),
    Position::stop("七徽三分", "大七度", "major 7th", 8, 15),
    Position::stop("七徽六分", "小七度", "minor 7th", 5, 9),
    Position::stop("七徽九分", "大六度", "major 6th", 3, 5),
    Position::stop("八徽半", "小六度", "minor 6th", 5, 8),
    Position::stop("九徽", "纯五度", "perfect 5th", 2, 3),
    Position::stop("十徽", "纯四度", "perfect 4th", 3, 4),
    Position::stop("十徽八分", "大三度", "major 3rd", 4, 5),
    Position::stop("十二徽", "小三度", "minor 3rd", 5, 6),
    Position::stop("徽外", "大二度", "major 2nd", 8, 9),
];

/// Harmonic positions, tail-side dark stud to head-side dark stud
pub static HARMONIC_POSITIONS: [Position; HARMONIC_POSITION_COUNT] = [
    Position::harmonic("暗徽4", "大九度+纯五度", "major 9th + 5th", 27, 8),
    Position::harmonic("十三徽", "纯二十二度", "triple octave", 8, 1),
    Position::harmonic("暗徽3", "小九度+纯五度", "minor 9th + 5th", 16, 5),
    Position::harmonic("十二徽", "纯十九度", "perfect 19th", 6, 1),
    Position::harmonic("十一徽", "大十七度", "major 17th", 5, 1),
    Position::harmonic("十徽", "十五度", "double octave", 4, 1),
    Position::harmonic("九徽", "纯十二度", "perfect 12th", 3, 1),
    Position::harmonic("八徽", "大十七度", "major 17th", 5, 1),
    Position::harmonic("七徽", "八度", "octave", 2, 1),
    Position::harmonic("六徽", "大十七度", "major 17th", 5, 1),
    Position::harmonic("五徽", "纯十二度", "perfect 12th", 3, 1),
    Position::harmonic("四徽", "十五度", "double octave", 4, 1),
    Position::harmonic("三徽", "大十七度", "major 17th", 5, 1),
    Position::harmonic("二徽", "纯十九度", "perfect 19th", 6, 1),
    Position::harmonic("暗徽2", "小九度+纯五度", "minor 9th + 5th", 16, 5),
    Position::harmonic("一徽", "纯二十二度", "triple octave", 8, 1),
    Position::harmonic("暗徽1", "大九度+纯五度", "major 9th + 5th", 27, 8),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_offsets_match_interval_labels() {
        let offsets: Vec<i32> = STOPPED_POSITIONS.iter().map(|p| p.semitone_offset()).collect();
        assert_eq!(
            offsets,
            vec![28, 26, 24, 21, 19, 17, 16, 15, 14, 12, 11, 10, 9, 8, 7, 5, 4, 3, 2]
        );
    }

    #[test]
    fn test_harmonic_offsets_match_interval_labels() {
        let offsets: Vec<i32> = HARMONIC_POSITIONS.iter().map(|p| p.semitone_offset()).collect();
        assert_eq!(
            offsets,
            vec![21, 36, 20, 31, 28, 24, 19, 28, 12, 28, 19, 24, 28, 31, 20, 36, 21]
        );
    }

    #[test]
    fn test_stopped_lengths_increase_monotonically() {
        let lengths: Vec<Ratio<u32>> = STOPPED_POSITIONS
            .iter()
            .map(|p| match p.node {
                Node::Stop { length } => length,
                Node::Harmonic { .. } => panic!("stopped table holds only stops"),
            })
            .collect();
        assert!(lengths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_harmonic_table_is_symmetric() {
        let n = HARMONIC_POSITIONS.len();
        for i in 0..n {
            assert_eq!(
                HARMONIC_POSITIONS[i].node,
                HARMONIC_POSITIONS[n - 1 - i].node,
                "node {} should mirror node {}",
                i,
                n - 1 - i
            );
        }
    }

    #[test]
    fn test_just_cents_deviation() {
        // Octave is pure in both systems
        let octave = &STOPPED_POSITIONS[9];
        assert_eq!(octave.hui, "七徽");
        assert!(octave.just_cents_deviation().abs() < 1e-9);

        // Just major third (5/4) is about 13.7 cents flat of tempered
        let third = &STOPPED_POSITIONS[16];
        assert!((third.just_cents_deviation() + 13.686).abs() < 0.01);

        // Just fifth (3/2) is about 2 cents sharp
        let fifth = &STOPPED_POSITIONS[14];
        assert!((fifth.just_cents_deviation() - 1.955).abs() < 0.01);
    }
}
