//! Sidebar rendering for the project list.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the sidebar with the project list and unread badge.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Sidebar;

    let items: Vec<ListItem> = app
        .projects
        .all()
        .iter()
        .enumerate()
        .map(|(idx, project)| {
            let is_selected = idx == app.selected_project;
            let is_scoped = app.scope.as_ref() == Some(&project.id);

            let marker = if is_scoped { "* " } else { "  " };
            let line = Line::from(vec![
                Span::raw(marker),
                Span::raw(project.name.clone()),
            ]);

            let style = if is_selected && is_focused {
                theme::selected()
            } else if is_selected {
                theme::highlighted()
            } else {
                theme::normal()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let unread = app.notifications.unread_count();
    let title = if unread > 0 {
        Line::from(vec![
            Span::styled("Projects", theme::panel_title(theme::SIDEBAR_TITLE)),
            Span::raw(" "),
            Span::styled(format!("({unread} unread)"), theme::unread_badge()),
        ])
    } else {
        Line::from(Span::styled(
            "Projects",
            theme::panel_title(theme::SIDEBAR_TITLE),
        ))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(List::new(items).block(block), area);
}
