//! Quiz screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::client::state::{ClientApp, ClientState};

/// Render the quiz screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::Quiz {
        category,
        question,
        revealed,
    } = &app.state
    else {
        return;
    };

    let Some(question) = question else {
        let waiting = Paragraph::new("Waiting for question...")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(waiting, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Progress
        Constraint::Length(7), // Question text
        Constraint::Min(5),    // Answer
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    let label = if category.kind == crate::service::ALL_CATEGORIES {
        "All categories"
    } else {
        category.kind.as_str()
    };

    render_progress(frame, chunks[0], label, app.answered(), app.rounds());
    render_question_text(frame, chunks[1], &question.question, question.difficulty);
    render_answer(frame, chunks[2], &question.answer, *revealed);
    render_controls(frame, chunks[3], *revealed);
}

fn render_progress(frame: &mut Frame, area: Rect, category: &str, answered: usize, rounds: usize) {
    let progress_text = format!("{}  ·  Question {} of {}", category, answered + 1, rounds);

    let widget = Paragraph::new(progress_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());

    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str, difficulty: i64) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Difficulty {} ", difficulty))
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_answer(frame: &mut Frame, area: Rect, answer: &str, revealed: bool) {
    let (text, style) = if revealed {
        (answer, Style::default().fg(Color::Green).bold())
    } else {
        ("?", Style::default().fg(Color::DarkGray))
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Answer ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, revealed: bool) {
    let hint = if revealed {
        "y got it  ·  n missed it  ·  q quit"
    } else {
        "Enter/Space reveal answer  ·  q quit"
    };

    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
