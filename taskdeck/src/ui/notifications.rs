//! Notification list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use taskdeck_api::datetime::format_date_time;

use super::theme;
use crate::app::App;

/// Render the notification list.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .notifications
        .all()
        .iter()
        .enumerate()
        .map(|(idx, notification)| {
            let is_selected = idx == app.selected_notification;
            let marker = if notification.is_read { "  " } else { "● " };

            let header_style = if is_selected {
                theme::selected()
            } else if notification.is_read {
                theme::dimmed()
            } else {
                theme::bold()
            };

            let lines = vec![
                Line::from(vec![
                    Span::styled(marker, theme::unread_badge()),
                    Span::styled(notification.title.clone(), header_style),
                    Span::raw("  "),
                    Span::styled(format_date_time(&notification.created_at), theme::dimmed()),
                ]),
                Line::from(Span::raw(format!("  {}", notification.message))),
            ];
            ListItem::new(lines)
        })
        .collect();

    let title = format!(
        "Notifications ({} unread)",
        app.notifications.unread_count()
    );
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::BOARD_TITLE)))
        .borders(Borders::ALL);
    frame.render_widget(List::new(items).block(block), area);
}
