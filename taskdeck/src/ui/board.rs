//! Kanban board rendering: one column per status.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use taskdeck_api::board::{BOARD_COLUMNS, column_tasks};
use taskdeck_api::datetime::is_overdue;
use taskdeck_api::labels::{priority_label, status_label, truncate};
use taskdeck_api::task::Task;

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the board with its five status columns.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let constraints: Vec<Constraint> = BOARD_COLUMNS
        .iter()
        .map(|_| Constraint::Ratio(1, BOARD_COLUMNS.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (idx, status) in BOARD_COLUMNS.iter().enumerate() {
        let tasks = column_tasks(app.tasks.all(), *status);
        let is_selected_column = idx == app.selected_column && app.focus == PanelFocus::Board;

        let items: Vec<ListItem> = tasks
            .iter()
            .enumerate()
            .map(|(row, task)| card(task, is_selected_column && row == app.selected_row))
            .collect();

        let title = format!("{} ({})", status_label(status.as_str()), tasks.len());
        let block = Block::default()
            .title(Span::styled(
                title,
                theme::panel_title(theme::status_color(*status)),
            ))
            .borders(Borders::ALL)
            .border_style(if is_selected_column {
                theme::highlighted()
            } else {
                theme::normal()
            });

        let list = List::new(items).block(block);
        frame.render_widget(list, columns[idx]);
    }
}

/// One task card: title line plus a metadata line.
fn card(task: &Task, is_selected: bool) -> ListItem<'static> {
    let now = chrono::Local::now().naive_local();
    let overdue = is_overdue(task.due_date.as_deref(), task.status, now);

    let mut meta = vec![Span::styled(
        priority_label(task.priority.as_str()).to_string(),
        theme::normal().fg(theme::priority_color(task.priority)),
    )];
    if let Some(due) = &task.due_date {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(
            format!("due {}", taskdeck_api::form::format_date_for_input(due)),
            if overdue {
                theme::normal().fg(theme::OVERDUE)
            } else {
                theme::dimmed()
            },
        ));
    }

    let title_style = if is_selected { theme::selected() } else { theme::bold() };
    let lines = vec![
        Line::from(Span::styled(truncate(&task.title, 40), title_style)),
        Line::from(meta),
    ];
    ListItem::new(lines)
}
