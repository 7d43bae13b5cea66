//! # Command Interpreter
//!
//! Parses the `:` command line and dispatches it to a [`CommandHost`].
//!
//! ## Commands
//! | Command                 | Alias | Effect                                  |
//! |-------------------------|-------|-----------------------------------------|
//! | `export <path>`         | `e`   | Write both tables as Markdown           |
//! | `retune <7 pitches>`    | `r`   | Recompute the tables for a new tuning   |
//! | `load <preset>`         | `l`   | Retune from a named preset              |
//! | `help`                  | `h`   | Show the key and command reference      |
//! | `quit`                  | `q`   | Leave the session                       |
//!
//! Command words are case-sensitive. A leading `:` is ignored, so `:q` and `q`
//! parse the same. Anything else parses to [`Command::Unknown`]; parsing never
//! panics, whatever the input.
//!
//! ## Example
//! ```rust
//! use guqin::{Command, GuqinError};
//!
//! assert_eq!(Command::parse(":q")?, Command::Quit);
//! assert_eq!(Command::parse("export out.md")?, Command::Export("out.md".into()));
//! assert!(matches!(
//!     Command::parse("export"),
//!     Err(GuqinError::MissingArgument { .. })
//! ));
//! # Ok::<(), GuqinError>(())
//! ```

use crate::error::GuqinError;
use std::path::Path;
use tracing::warn;

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Export(String),
    Help,
    Quit,
    Retune(Vec<String>),
    Load(String),
    /// Blank input
    Noop,
    /// Unrecognized command word, with the raw input
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, GuqinError> {
        let trimmed = line.trim();
        let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed).trim_start();

        let (word, argument) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        let command = match word {
            "" => Command::Noop,
            "export" | "e" => Command::Export(require(argument, "export", "path")?.to_string()),
            "help" | "h" => Command::Help,
            "quit" | "q" => Command::Quit,
            "retune" | "r" => {
                let pitches = require(argument, "retune", "pitches")?;
                Command::Retune(pitches.split_whitespace().map(String::from).collect())
            }
            "load" | "l" => Command::Load(require(argument, "load", "preset")?.to_string()),
            _ => Command::Unknown(trimmed.to_string()),
        };
        Ok(command)
    }
}

fn require<'a>(argument: &'a str, command: &str, name: &str) -> Result<&'a str, GuqinError> {
    if argument.is_empty() {
        Err(GuqinError::MissingArgument {
            command: command.to_string(),
            argument: name.to_string(),
        })
    } else {
        Ok(argument)
    }
}

/// What the session should do after a command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Status(String),
    ShowHelp,
    Quit,
}

/// Side effects a command can ask for. Implemented by the interactive app and by
/// test doubles.
pub trait CommandHost {
    fn export(&mut self, path: &Path) -> Result<(), GuqinError>;
    fn retune(&mut self, pitches: &[String]) -> Result<(), GuqinError>;
    fn load_preset(&mut self, name: &str) -> Result<(), GuqinError>;
}

/// Run a parsed command against a host.
pub fn execute<H: CommandHost>(command: Command, host: &mut H) -> Result<Outcome, GuqinError> {
    match command {
        Command::Export(path) => {
            host.export(Path::new(&path))?;
            Ok(Outcome::Status(format!("Exported to {}", path)))
        }
        Command::Retune(pitches) => {
            host.retune(&pitches)?;
            Ok(Outcome::Status(format!("Retuned to {}", pitches.join(" "))))
        }
        Command::Load(name) => {
            host.load_preset(&name)?;
            Ok(Outcome::Status(format!("Loaded preset '{}'", name)))
        }
        Command::Help => Ok(Outcome::ShowHelp),
        Command::Quit => Ok(Outcome::Quit),
        Command::Noop => Ok(Outcome::Status(String::new())),
        Command::Unknown(text) => {
            warn!(command = %text, "unknown command");
            Ok(Outcome::Status(format!("Unknown command: {}", text)))
        }
    }
}

/// Parse and run one command line.
pub fn run_line<H: CommandHost>(line: &str, host: &mut H) -> Result<Outcome, GuqinError> {
    let command = Command::parse(line).inspect_err(|e| warn!(error = %e, "rejected command"))?;
    execute(command, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingHost {
        exported: Vec<PathBuf>,
        tunings: Vec<Vec<String>>,
        presets: Vec<String>,
    }

    impl CommandHost for RecordingHost {
        fn export(&mut self, path: &Path) -> Result<(), GuqinError> {
            self.exported.push(path.to_path_buf());
            Ok(())
        }

        fn retune(&mut self, pitches: &[String]) -> Result<(), GuqinError> {
            Tuning::parse(pitches)?;
            self.tunings.push(pitches.to_vec());
            Ok(())
        }

        fn load_preset(&mut self, name: &str) -> Result<(), GuqinError> {
            if name != "zheng" {
                return Err(GuqinError::UnknownPreset(name.to_string()));
            }
            self.presets.push(name.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_parse_export() {
        assert_eq!(
            Command::parse("export out.md").unwrap(),
            Command::Export("out.md".to_string())
        );
        assert_eq!(
            Command::parse(":e   tables/guqin.md  ").unwrap(),
            Command::Export("tables/guqin.md".to_string())
        );
    }

    #[test]
    fn test_parse_export_without_path() {
        for line in ["export", "export   ", ":e"] {
            match Command::parse(line) {
                Err(GuqinError::MissingArgument { command, argument }) => {
                    assert_eq!(command, "export");
                    assert_eq!(argument, "path");
                }
                other => panic!("expected MissingArgument for {:?}, got {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("help").unwrap(), Command::Help);
        assert_eq!(Command::parse(":h").unwrap(), Command::Help);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse(":q").unwrap(), Command::Quit);
        assert_eq!(Command::parse("").unwrap(), Command::Noop);
        assert_eq!(Command::parse(" : ").unwrap(), Command::Noop);
    }

    #[test]
    fn test_parse_retune_and_load() {
        assert_eq!(
            Command::parse("retune C2 D2 F2 G2 A2 C3 D3").unwrap(),
            Command::Retune(
                ["C2", "D2", "F2", "G2", "A2", "C3", "D3"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            )
        );
        assert_eq!(
            Command::parse("l man-san").unwrap(),
            Command::Load("man-san".to_string())
        );
        assert!(matches!(
            Command::parse("retune"),
            Err(GuqinError::MissingArgument { .. })
        ));
        assert!(matches!(
            Command::parse("load"),
            Err(GuqinError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            Command::parse("EXPORT out.md").unwrap(),
            Command::Unknown("EXPORT out.md".to_string())
        );
        assert_eq!(
            Command::parse("Quit").unwrap(),
            Command::Unknown("Quit".to_string())
        );
    }

    #[test]
    fn test_parse_never_panics() {
        for line in ["::", "e\u{0}", "日本", "   \t  ", ":::q", "x y z", "\u{3000}"] {
            let _ = Command::parse(line);
        }
    }

    #[test]
    fn test_execute_dispatches_to_host() {
        let mut host = RecordingHost::default();

        let outcome = execute(Command::Export("a.md".to_string()), &mut host).unwrap();
        assert_eq!(outcome, Outcome::Status("Exported to a.md".to_string()));
        assert_eq!(host.exported, vec![PathBuf::from("a.md")]);

        let outcome = execute(Command::Load("zheng".to_string()), &mut host).unwrap();
        assert!(matches!(outcome, Outcome::Status(_)));
        assert_eq!(host.presets, vec!["zheng".to_string()]);

        assert_eq!(execute(Command::Help, &mut host).unwrap(), Outcome::ShowHelp);
        assert_eq!(execute(Command::Quit, &mut host).unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_execute_unknown_is_not_fatal() {
        let mut host = RecordingHost::default();
        let outcome = execute(Command::Unknown("frobnicate".to_string()), &mut host).unwrap();
        assert_eq!(
            outcome,
            Outcome::Status("Unknown command: frobnicate".to_string())
        );
    }

    #[test]
    fn test_run_line_propagates_host_errors() {
        let mut host = RecordingHost::default();
        assert!(matches!(
            run_line("load nowhere", &mut host),
            Err(GuqinError::UnknownPreset(_))
        ));
        assert!(matches!(
            run_line("retune C2 D2", &mut host),
            Err(GuqinError::InvalidTuningLength(2))
        ));
        assert!(host.tunings.is_empty());

        run_line(":r C2 D2 F2 G2 A2 C3 D3", &mut host).unwrap();
        assert_eq!(host.tunings.len(), 1);
    }
}
