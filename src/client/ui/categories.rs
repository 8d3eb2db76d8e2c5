//! Category picker shown before each round.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::client::state::{ClientApp, ClientState};

use super::title_line;

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::CategorySelect { selected } = &app.state else {
        return;
    };

    let labels = app.choice_labels();
    let height = u16::try_from(labels.len() + 8).unwrap_or(u16::MAX);

    let chunks = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Length(height),
        Constraint::Percentage(30),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        title_line(),
        Line::from(""),
        Line::from(Span::styled(
            format!("Pick a category  ·  {} questions per round", app.rounds()),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    for (index, label) in labels.iter().enumerate() {
        let is_selected = index == *selected;
        let style = if is_selected {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { "> " } else { "  " };
        content.push(Line::from(Span::styled(format!("{}{}", marker, label), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "j/k navigate  ·  enter play  ·  q quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
