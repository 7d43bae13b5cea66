//! Interactive session state and key handling.

use crate::command::{run_line, CommandHost, Outcome};
use crate::config::PresetBook;
use crate::error::GuqinError;
use crate::markdown::write_markdown;
use crate::navigator::{Motion, NavigatorOptions, TableNavigator};
use crate::pitch::AccidentalStyle;
use crate::tuning::Tuning;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;
use tracing::info;

/// Title given to tunings entered with `:retune`
pub const CUSTOM_TUNING_NAME: &str = "自定义调弦";

/// What the bottom input line is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Command,
}

pub struct App {
    navigator: TableNavigator,
    presets: PresetBook,
    title: String,
    style: AccidentalStyle,
    mode: InputMode,
    input: String,
    pending_g: bool,
    status: Option<String>,
    help_visible: bool,
}

impl App {
    pub fn new(tuning: &Tuning, title: impl Into<String>, presets: PresetBook) -> Self {
        Self {
            navigator: TableNavigator::new(tuning),
            presets,
            title: title.into(),
            style: AccidentalStyle::default(),
            mode: InputMode::Normal,
            input: String::new(),
            pending_g: false,
            status: None,
            help_visible: false,
        }
    }

    pub fn with_style(mut self, style: AccidentalStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_options(mut self, options: NavigatorOptions) -> Self {
        self.navigator = TableNavigator::with_options(self.navigator.tuning(), options);
        self
    }

    pub fn navigator(&self) -> &TableNavigator {
        &self.navigator
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn style(&self) -> AccidentalStyle {
        self.style
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Handle one key press. Returns true when the session should end.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.help_visible {
            self.help_visible = false;
            return false;
        }

        match self.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search | InputMode::Command => self.handle_input_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        let pending_g = std::mem::take(&mut self.pending_g);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('d') if ctrl => self.navigator.move_cursor(Motion::HalfPageDown),
            KeyCode::Char('u') if ctrl => self.navigator.move_cursor(Motion::HalfPageUp),
            KeyCode::Char('q') => return true,
            KeyCode::Char('h') | KeyCode::Left => self.navigator.move_cursor(Motion::Left),
            KeyCode::Char('j') | KeyCode::Down => self.navigator.move_cursor(Motion::Down),
            KeyCode::Char('k') | KeyCode::Up => self.navigator.move_cursor(Motion::Up),
            KeyCode::Char('l') | KeyCode::Right => self.navigator.move_cursor(Motion::Right),
            KeyCode::Char('g') if pending_g => self.navigator.move_cursor(Motion::FirstRow),
            KeyCode::Char('g') => self.pending_g = true,
            KeyCode::Char('G') => self.navigator.move_cursor(Motion::LastRow),
            KeyCode::Char('0') | KeyCode::Home => self.navigator.move_cursor(Motion::FirstCol),
            KeyCode::Char('$') | KeyCode::End => self.navigator.move_cursor(Motion::LastCol),
            KeyCode::PageDown => self.navigator.move_cursor(Motion::HalfPageDown),
            KeyCode::PageUp => self.navigator.move_cursor(Motion::HalfPageUp),
            KeyCode::Tab | KeyCode::BackTab => {
                let kind = self.navigator.switch_grid();
                self.status = Some(format!("{} ({})", kind.title(), kind.title_en()));
            }
            KeyCode::Char('/') => self.begin_input(InputMode::Search, ""),
            KeyCode::Char(':') => self.begin_input(InputMode::Command, ""),
            KeyCode::Char('r') => self.begin_input(InputMode::Command, "retune "),
            KeyCode::Char('n') => self.step_match(true),
            KeyCode::Char('N') => self.step_match(false),
            KeyCode::Char('*') => {
                self.status = Some(match self.navigator.toggle_highlight() {
                    Some(letter) => format!("Highlighting {}", letter),
                    None => "Highlight cleared".to_string(),
                });
            }
            KeyCode::Char('?') => self.help_visible = true,
            KeyCode::Esc => {
                self.navigator.clear();
                self.status = None;
            }
            _ => {}
        }
        false
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => self.end_input(),
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                let mode = self.mode;
                self.end_input();
                return match mode {
                    InputMode::Search => {
                        self.submit_search(&line);
                        false
                    }
                    _ => self.submit_command(&line),
                };
            }
            KeyCode::Backspace => {
                if self.input.pop().is_none() {
                    self.end_input();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => {}
        }
        false
    }

    fn begin_input(&mut self, mode: InputMode, prefill: &str) {
        self.mode = mode;
        self.input = prefill.to_string();
    }

    fn end_input(&mut self) {
        self.mode = InputMode::Normal;
        self.input.clear();
    }

    fn submit_search(&mut self, query: &str) {
        if query.trim().is_empty() {
            return;
        }
        self.status = Some(match self.navigator.search(query) {
            Ok(count) => format!("{} matches for '{}'", count, query.trim()),
            Err(e) => e.to_string(),
        });
    }

    fn submit_command(&mut self, line: &str) -> bool {
        match run_line(line, self) {
            Ok(Outcome::Quit) => return true,
            Ok(Outcome::ShowHelp) => self.help_visible = true,
            Ok(Outcome::Status(message)) if message.is_empty() => {}
            Ok(Outcome::Status(message)) => self.status = Some(message),
            Err(e) => self.status = Some(e.to_string()),
        }
        false
    }

    fn step_match(&mut self, forward: bool) {
        let step = if forward {
            self.navigator.next_match()
        } else {
            self.navigator.prev_match()
        };
        self.status = Some(match step {
            Ok(step) => format!("Match {}", step),
            Err(e) => e.to_string(),
        });
    }

    fn apply_tuning(&mut self, tuning: &Tuning, title: &str) {
        self.navigator.retune(tuning);
        self.title = title.to_string();
        info!(tuning = %tuning, title, "retuned");
    }
}

impl CommandHost for App {
    fn export(&mut self, path: &Path) -> Result<(), GuqinError> {
        write_markdown(path, &self.title, self.navigator.tables(), self.style)
    }

    fn retune(&mut self, pitches: &[String]) -> Result<(), GuqinError> {
        let tuning = Tuning::parse(pitches)?;
        self.apply_tuning(&tuning, CUSTOM_TUNING_NAME);
        Ok(())
    }

    fn load_preset(&mut self, name: &str) -> Result<(), GuqinError> {
        let tuning = self.presets.tuning(name)?;
        self.apply_tuning(&tuning, name);
        Ok(())
    }
}
