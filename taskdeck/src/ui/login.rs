//! Login screen rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, LoginField};

/// Render the centered login form.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(10),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(48),
            Constraint::Min(1),
        ])
        .split(vertical[1]);
    let form_area = horizontal[1];

    let email_focused = app.login.focus == Some(LoginField::Email);
    let password_focused = app.login.focus == Some(LoginField::Password);

    // Passwords render as bullets, never as plaintext.
    let masked: String = app.login.password.chars().map(|_| '•').collect();

    let mut lines = vec![
        Line::from(Span::styled("Sign in", theme::bold())),
        Line::from(""),
        field_line("Email", &app.login.email, email_focused),
        error_line(app.login.errors.get("email")),
        field_line("Password", &masked, password_focused),
        error_line(app.login.errors.get("password")),
    ];
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter to sign in",
        theme::dimmed(),
    )));

    let block = Block::default()
        .title(Span::styled("TaskDeck", theme::panel_title(theme::BOARD_TITLE)))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), form_area);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label}: "), theme::dimmed()),
        Span::styled(
            format!("{value}{cursor}"),
            if focused { theme::highlighted() } else { theme::normal() },
        ),
    ])
}

fn error_line(message: Option<&'static str>) -> Line<'static> {
    message.map_or_else(
        || Line::from(""),
        |m| Line::from(Span::styled(m, theme::normal().fg(theme::ERROR))),
    )
}
