//! Rendering for the two views.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};
use ratatui::Frame;
use soundwatch::audio::METER_FLOOR_DB;
use soundwatch::detections::{Notice, Severity};
use soundwatch::game::{evaluate_winner, Marker};
use soundwatch::{App, View};

pub(crate) fn draw(frame: &mut Frame, app: &App) {
    match app.view() {
        View::Capture => draw_capture(frame, app),
        View::Board => draw_board(frame, app),
    }
}

fn draw_capture(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(3),
        ])
        .split(frame.size());

    let toggle = if app.listening() {
        Span::styled(" LISTENING ", Style::default().fg(Color::Black).bg(Color::Green))
    } else {
        Span::styled(" OFF ", Style::default().fg(Color::Black).bg(Color::DarkGray))
    };
    let header = Paragraph::new(Line::from(vec![
        toggle,
        Span::raw("  "),
        Span::raw(app.status_text()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Real-Time Sound Detection"),
    );
    frame.render_widget(header, chunks[0]);

    draw_meter(frame, app, chunks[1]);
    draw_history(frame, app, chunks[2]);
    draw_notices(frame, app, chunks[3]);

    let help = Paragraph::new(vec![
        Line::from("Space toggle detection · Tab game board · q quit"),
        Line::from(Span::styled(
            "Testing mode: 1 Running Water · 2 Stove ON · 3 Front Door · 4 Stove OFF",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help, chunks[4]);
}

fn draw_meter(frame: &mut Frame, app: &App, area: Rect) {
    let db = app.meter_db().max(METER_FLOOR_DB);
    let ratio = f64::from((db - METER_FLOOR_DB) / -METER_FLOOR_DB).clamp(0.0, 1.0);
    let label = if app.listening() {
        format!("{db:.0} dBFS")
    } else {
        "mic idle".to_string()
    };
    let meter = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Input level"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(label);
    frame.render_widget(meter, area);
}

fn draw_history(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = if app.detections().is_empty() {
        vec![ListItem::new(Span::styled(
            "No sounds detected yet.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.detections()
            .iter()
            .map(|event| ListItem::new(event.label().to_string()))
            .collect()
    };
    let history = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Detection History ({})", app.detections().len())),
    );
    frame.render_widget(history, area);
}

fn draw_notices(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if let Some(notice) = app.detection_notice() {
        lines.push(notice_line(notice));
    }
    if let Some(notice) = app.status_notice() {
        lines.push(notice_line(notice));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn notice_line(notice: &Notice) -> Line<'_> {
    let color = match notice.severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    };
    Line::from(Span::styled(
        notice.message.as_str(),
        Style::default().fg(color),
    ))
}

fn draw_board(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let status_style = if evaluate_winner(app.board()).is_some() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let status = Paragraph::new(Span::styled(app.board_status(), status_style)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Tic-Tac-Toe Game"),
    );
    frame.render_widget(status, chunks[0]);

    let mut rows = Vec::with_capacity(5);
    for row in 0..3 {
        let mut spans = Vec::new();
        for col in 0..3 {
            let index = row * 3 + col;
            let text = match app.board().cell(index) {
                Some(Marker::X) => " X ",
                Some(Marker::O) => " O ",
                None => " . ",
            };
            let mut style = match app.board().cell(index) {
                Some(Marker::X) => Style::default().fg(Color::Yellow),
                Some(Marker::O) => Style::default().fg(Color::Magenta),
                None => Style::default().fg(Color::DarkGray),
            };
            if index == app.cursor() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
            if col < 2 {
                spans.push(Span::raw("|"));
            }
        }
        rows.push(Line::from(spans));
        if row < 2 {
            rows.push(Line::from("---+---+---"));
        }
    }
    let grid = Paragraph::new(rows)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(grid, chunks[1]);

    let help = Paragraph::new(Line::from(
        "Arrows move · Enter/Space place · n new game · Tab detection · q quit",
    ))
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help, chunks[2]);
}
