//! SoundWatch entrypoint: a two-view terminal front-end pairing ambient
//! sound detection with a grid-game board.
//!
//! The capture view toggles a microphone session that slices audio into
//! bounded segments and ships each one to a classification endpoint; the
//! board view runs the two-player grid game. Tab switches views.

mod event_loop;
mod ui;

use anyhow::Result;
use clap::Parser;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use soundwatch::audio::Recorder;
use soundwatch::config::AppConfig;
use soundwatch::terminal_restore::TerminalRestoreGuard;
use soundwatch::{init_logging, init_tracing, log_debug, log_file_path, App};
use std::io;

fn main() -> Result<()> {
    let config = AppConfig::parse();
    if config.list_input_devices {
        list_input_devices();
        return Ok(());
    }
    config.validate()?;

    init_logging(&config);
    init_tracing(&config);
    log_debug("=== SoundWatch started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));

    let mut app = App::new(config)?;

    let terminal_guard = TerminalRestoreGuard::new();
    terminal_guard.enable_raw_mode()?;
    let mut stdout = io::stdout();
    terminal_guard.enter_alt_screen(&mut stdout)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop::run(&mut terminal, &mut app);

    // Dropping the app tears down any live session before the guard resets
    // the terminal.
    drop(app);
    terminal_guard.restore();
    log_debug("=== SoundWatch exited ===");
    result
}

fn list_input_devices() {
    match Recorder::list_devices() {
        Ok(names) if names.is_empty() => println!("No audio input devices detected."),
        Ok(names) => {
            println!("Detected audio input devices:");
            for name in names {
                println!("  {name}");
            }
        }
        Err(err) => println!("Failed to list audio input devices: {err:#}"),
    }
}
