//! Core runtime loop coordinating key input, session events, and rendering.

use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::Terminal;
use soundwatch::{App, View};
use std::time::{Duration, Instant};

/// Poll cadence; also bounds how stale the notice expiry can get.
const IDLE_TICK_MS: u64 = 50;

pub(crate) fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        if app.take_redraw_request() {
            terminal.draw(|frame| ui::draw(frame, app))?;
        }
        if event::poll(Duration::from_millis(IDLE_TICK_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(app, key.code, key.modifiers) {
                        break;
                    }
                }
                Event::Resize(_, _) => app.request_redraw(),
                _ => {}
            }
        }
        app.poll_session();
        app.tick(Instant::now());
    }
    Ok(())
}

/// Dispatch one key press. Returns true when the app should exit.
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return true;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Tab => app.switch_view(),
        _ => match app.view() {
            View::Capture => match code {
                KeyCode::Char(' ') => app.toggle_listening(),
                KeyCode::Char(key @ '1'..='4') => {
                    app.push_test_key(key);
                }
                _ => {}
            },
            View::Board => match code {
                KeyCode::Left => app.move_cursor(0, -1),
                KeyCode::Right => app.move_cursor(0, 1),
                KeyCode::Up => app.move_cursor(-1, 0),
                KeyCode::Down => app.move_cursor(1, 0),
                KeyCode::Enter | KeyCode::Char(' ') => app.play_cursor(),
                KeyCode::Char('n') => app.new_game(),
                _ => {}
            },
        },
    }
    false
}
