//! Results screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::client::state::{ClientApp, ClientState};

/// Render the results screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::Results { exhausted } = &app.state else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Length(9),
        Constraint::Percentage(30),
    ])
    .split(area);

    let score = app.score();
    let total = app.answered();
    let percentage = if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    let grade_color = match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let note = if *exhausted {
        "No more questions left in this category"
    } else {
        ""
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", score, total, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(note, Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(Span::styled(
            "r play again  ·  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
