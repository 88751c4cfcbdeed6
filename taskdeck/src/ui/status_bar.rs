//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus, Screen, ToastKind};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match &app.screen {
        Screen::Login => "Tab: switch field | Enter: sign in | Esc: quit",
        Screen::Board if app.task_input.is_some() => "type the task title | Enter: create | Esc: cancel",
        Screen::Board if app.focus == PanelFocus::Sidebar => {
            "Tab: board | ↑↓/jk: navigate | Enter: open project | a: all tasks | q: quit"
        }
        Screen::Board => {
            "←→/hl: column | ↑↓/jk: task | [ ]: move | c: new | x: delete | Enter: details | n: notifications | r: refresh | q: quit"
        }
        Screen::TaskDetail(_) => "↑↓/jk: comments | l: like | d: dislike | i: comment | Esc: back",
        Screen::Notifications => "↑↓/jk: navigate | Enter: mark read | a: mark all read | Esc: back",
    };

    let identity = app.user.as_ref().map_or_else(
        || "signed out".to_string(),
        |user| user.full_name(),
    );

    let mut spans = vec![
        Span::styled("TaskDeck v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::raw(identity),
        Span::raw(" | "),
    ];

    if app.loading {
        spans.push(Span::styled("loading…", theme::dimmed()));
        spans.push(Span::raw(" | "));
    }

    if let Some(input) = &app.task_input {
        spans.push(Span::styled(
            format!("New task: {input}▏"),
            theme::highlighted(),
        ));
        spans.push(Span::raw(" | "));
    }

    if let Some(toast) = &app.toast {
        let color = match toast.kind {
            ToastKind::Success => theme::SUCCESS,
            ToastKind::Error => theme::ERROR,
        };
        spans.push(Span::styled(toast.message.clone(), theme::normal().fg(color)));
        spans.push(Span::raw(" | "));
    }

    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
