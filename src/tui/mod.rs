//! # Terminal UI
//!
//! Full-screen browser for the position tables, built on ratatui and crossterm.
//!
//! ## Module Structure
//! - `app` - Session state ([`App`]), input modes and key handling
//! - `ui` - Frame rendering: title bar, grid table, cell info, input and status lines
//!
//! The loop draws a frame, waits for one key press and hands it to
//! [`App::handle_key`], which returns `true` to end the session. Errors from
//! searches and commands never leave the app; they are shown on the status line.

mod app;
mod ui;


pub use app::{App, InputMode, CUSTOM_TUNING_NAME};
pub use ui::render;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;

/// Run the interactive session until the user quits.
pub fn run(app: &mut App) -> Result<()> {
    install_panic_hook();
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .context("create terminal")
        .and_then(|mut terminal| event_loop(&mut terminal, app));

    // Restore the terminal even when the loop failed
    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Leave raw mode and the alternate screen before a panic message is printed.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
        previous(info);
    }));
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|frame| render(frame, app))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(200)).context("poll event")? {
            continue;
        }

        if let Event::Key(key) = event::read().context("read event")? {
            if key.kind == KeyEventKind::Press && app.handle_key(key) {
                return Ok(());
            }
        }
    }
}
