//! guqin - stopped-note and harmonic position tables for any guqin tuning
//!
//! Starts the interactive table browser by default. `--print` and `--output`
//! render the tables as Markdown instead and exit. `--show` prints them as
//! colored terminal text and exits.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use guqin::tui::{self, App, CUSTOM_TUNING_NAME};
use guqin::{
    to_markdown, write_markdown, write_tables, AccidentalStyle, NavigatorOptions, PositionTables, PresetBook,
    Tuning, STANDARD_TUNING_NAME,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for guqin
#[derive(Parser, Debug)]
#[command(name = "guqin")]
#[command(about = "Guqin stopped-note and harmonic position calculator")]
#[command(version)]
struct Args {
    /// Open-string pitches, 一弦 to 七弦 (default: C2 D2 F2 G2 A2 C3 D3)
    #[arg(short, long, num_args = 1.., value_name = "PITCH", conflicts_with = "preset")]
    tuning: Option<Vec<String>>,

    /// Named tuning preset
    #[arg(short, long)]
    preset: Option<String>,

    /// Title for the tables and Markdown export
    #[arg(short, long)]
    name: Option<String>,

    /// YAML preset file to use instead of the built-in presets
    #[arg(long, value_name = "FILE")]
    presets: Option<PathBuf>,

    /// Write the tables as Markdown to FILE and exit
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the tables as Markdown to stdout and exit
    #[arg(long)]
    print: bool,

    /// Print the tables to the terminal in color and exit
    #[arg(long)]
    show: bool,

    /// Show accidentals as ♯ and ♭
    #[arg(long)]
    unicode: bool,

    /// List the available presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Drop the search when switching between stopped and harmonic tables
    #[arg(long)]
    clear_search_on_switch: bool,

    /// Log file for the interactive session
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn interactive(&self) -> bool {
        !(self.print || self.show || self.list_presets || self.output.is_some())
    }

    fn style(&self) -> AccidentalStyle {
        if self.unicode {
            AccidentalStyle::Unicode
        } else {
            AccidentalStyle::Ascii
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.interactive(), args.log_file.as_deref())?;

    let presets = match &args.presets {
        Some(path) => PresetBook::load(path),
        None => PresetBook::builtin(),
    }
    .context("Failed to load presets")?;

    if args.list_presets {
        for (name, preset) in presets.iter() {
            println!("{:<12} {}  {}", name, preset.tuning.join(" "), preset.description);
        }
        return Ok(());
    }

    let (tuning, title) = select_tuning(&args, &presets)?;
    info!(tuning = %tuning, title = %title, "starting");

    if args.print || args.show || args.output.is_some() {
        let tables = PositionTables::new(&tuning);
        if let Some(path) = &args.output {
            write_markdown(path, &title, &tables, args.style())?;
            eprintln!("Wrote Markdown to {}", path.display());
        }
        if args.print {
            print!("{}", to_markdown(&title, &tables, args.style()));
        }
        if args.show {
            let stdout = io::stdout();
            let color = stdout.is_terminal();
            write_tables(&mut stdout.lock(), &title, &tables, args.style(), color)
                .context("Failed to print tables")?;
        }
        return Ok(());
    }

    let options = NavigatorOptions {
        clear_search_on_switch: args.clear_search_on_switch,
    };
    let mut app = App::new(&tuning, title, presets)
        .with_style(args.style())
        .with_options(options);
    tui::run(&mut app)
}

/// Startup tuning and its title. Bad tunings end the process here, before the
/// terminal is taken over.
fn select_tuning(args: &Args, presets: &PresetBook) -> Result<(Tuning, String)> {
    if let Some(names) = &args.tuning {
        let tuning = Tuning::parse(names).context("Invalid --tuning")?;
        let title = args.name.clone().unwrap_or_else(|| CUSTOM_TUNING_NAME.to_string());
        return Ok((tuning, title));
    }

    if let Some(preset) = &args.preset {
        let tuning = presets
            .tuning(preset)
            .with_context(|| format!("Invalid preset '{}'", preset))?;
        let title = args.name.clone().unwrap_or_else(|| preset.clone());
        return Ok((tuning, title));
    }

    let title = args
        .name
        .clone()
        .unwrap_or_else(|| STANDARD_TUNING_NAME.to_string());
    Ok((Tuning::standard(), title))
}

/// Log to stderr in batch modes. The interactive session owns the terminal, so
/// it only logs when given a file.
fn init_logging(interactive: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (interactive, log_file) {
        (_, Some(path)) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        (false, None) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        (true, None) => {}
    }
    Ok(())
}
