//! # Tuning Presets
//!
//! Named open-string tunings read from YAML.
//!
//! ## File Format
//! ```yaml
//! presets:
//!   zheng:
//!     description: 正调
//!     tuning: [C2, D2, F2, G2, A2, C3, D3]
//! ```
//!
//! A built-in set ships inside the binary (see `presets.yaml` at the crate root).
//! A user file given with `--presets` replaces it entirely.
//!
//! Pitch names are kept as text when the file is read and validated by
//! [`Tuning::parse`] when a preset is used, so one bad preset doesn't make the
//! others unusable.

use crate::error::GuqinError;
use crate::tuning::Tuning;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_PRESETS: &str = include_str!("../presets.yaml");

/// One named tuning
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub description: String,
    pub tuning: Vec<String>,
}

/// All presets, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PresetBook {
    presets: BTreeMap<String, Preset>,
}

impl PresetBook {
    /// The presets compiled into the binary
    pub fn builtin() -> Result<Self, GuqinError> {
        Self::from_yaml(BUILTIN_PRESETS)
    }

    pub fn from_yaml(content: &str) -> Result<Self, GuqinError> {
        serde_yaml::from_str(content).map_err(|e| GuqinError::Config(e.to_string()))
    }

    /// Read a preset file from disk.
    pub fn load(path: &Path) -> Result<Self, GuqinError> {
        let content = fs::read_to_string(path)
            .map_err(|e| GuqinError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    pub fn get(&self, name: &str) -> Result<&Preset, GuqinError> {
        self.presets
            .get(name)
            .ok_or_else(|| GuqinError::UnknownPreset(name.to_string()))
    }

    /// Parsed tuning of a named preset
    pub fn tuning(&self, name: &str) -> Result<Tuning, GuqinError> {
        Tuning::parse(&self.get(name)?.tuning)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Preset)> {
        self.presets.iter().map(|(name, preset)| (name.as_str(), preset))
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_presets_parse() {
        let book = PresetBook::builtin().unwrap();
        assert!(book.len() >= 4);
        for name in book.names() {
            assert!(book.tuning(name).is_ok(), "preset {} should be valid", name);
        }
        assert_eq!(book.tuning("zheng").unwrap(), Tuning::standard());
    }

    #[test]
    fn test_names_are_sorted() {
        let book = PresetBook::builtin().unwrap();
        let names: Vec<&str> = book.names().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_unknown_preset() {
        let book = PresetBook::builtin().unwrap();
        assert!(matches!(
            book.get("nope"),
            Err(GuqinError::UnknownPreset(ref name)) if name == "nope"
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            PresetBook::from_yaml("presets: [not, a, map"),
            Err(GuqinError::Config(_))
        ));
        assert!(matches!(
            PresetBook::from_yaml("presets:\n  x:\n    description: no tuning\n"),
            Err(GuqinError::Config(_))
        ));
    }

    #[test]
    fn test_bad_preset_fails_only_on_use() {
        let yaml = "presets:\n  short:\n    tuning: [C2, D2]\n  ok:\n    tuning: [C2, D2, F2, G2, A2, C3, D3]\n";
        let book = PresetBook::from_yaml(yaml).unwrap();
        assert!(matches!(
            book.tuning("short"),
            Err(GuqinError::InvalidTuningLength(2))
        ));
        assert!(book.tuning("ok").is_ok());
        assert_eq!(book.get("ok").unwrap().description, "");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "presets:\n  mine:\n    description: test\n    tuning: [D2, E2, G2, A2, B2, D3, E3]"
        )
        .unwrap();

        let book = PresetBook::load(file.path()).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.tuning("mine").unwrap().to_string(), "D2 E2 G2 A2 B2 D3 E3");

        let missing = file.path().with_extension("missing");
        assert!(matches!(PresetBook::load(&missing), Err(GuqinError::Config(_))));
    }
}
