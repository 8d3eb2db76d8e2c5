//! Screen selection for the quiz client.

mod categories;
mod quiz;
mod results;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::client::state::{ClientApp, ClientState};

const TITLE: &str = "TRIVIA";

pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.state {
        ClientState::Connecting => render_notice(
            frame,
            area,
            Span::styled(
                format!("Fetching categories from {}", app.server_addr()),
                Style::default().fg(Color::Yellow),
            ),
            "[Q] cancel",
        ),
        ClientState::CategorySelect { .. } => categories::render(frame, area, app),
        ClientState::Quiz { .. } => quiz::render(frame, area, app),
        ClientState::Results { .. } => results::render(frame, area, app),
        ClientState::Disconnected { message } => render_notice(
            frame,
            area,
            Span::styled(message.as_str(), Style::default().fg(Color::Red).bold()),
            "[Enter] or [Esc] leave",
        ),
    }
}

fn title_line() -> Line<'static> {
    Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold()))
}

/// Title, one status line and a key hint, centred on screen.
fn render_notice(frame: &mut Frame, area: Rect, status: Span<'_>, hint: &'static str) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .areas(area);

    let lines = vec![
        title_line(),
        Line::from(""),
        Line::from(status),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}
