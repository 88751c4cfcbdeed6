//! Task detail screen: task fields plus its comment thread.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use taskdeck_api::comment::Comment;
use taskdeck_api::datetime::format_date_time;
use taskdeck_api::labels::{priority_label, status_label};
use taskdeck_api::reaction::Reaction;
use taskdeck_api::task::TaskId;

use super::theme;
use crate::app::App;

/// Render the task detail screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App, task_id: &TaskId) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    render_task(frame, chunks[0], app, task_id);
    render_comments(frame, chunks[1], app);
    render_compose(frame, chunks[2], app);
}

fn render_task(frame: &mut Frame, area: Rect, app: &App, task_id: &TaskId) {
    let lines = app.tasks.get(task_id).map_or_else(
        || vec![Line::from(Span::styled("Task not loaded", theme::dimmed()))],
        |task| {
            let mut lines = vec![
                Line::from(Span::styled(task.title.clone(), theme::bold())),
                Line::from(vec![
                    Span::styled(
                        status_label(task.status.as_str()).to_string(),
                        theme::normal().fg(theme::status_color(task.status)),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        priority_label(task.priority.as_str()).to_string(),
                        theme::normal().fg(theme::priority_color(task.priority)),
                    ),
                ]),
            ];
            if let Some(due) = &task.due_date {
                lines.push(Line::from(Span::styled(
                    format!("Due {}", format_date_time(due)),
                    theme::dimmed(),
                )));
            }
            if let Some(description) = &task.description {
                lines.push(Line::from(description.clone()));
            }
            lines
        },
    );

    let block = Block::default()
        .title(Span::styled("Task", theme::panel_title(theme::BOARD_TITLE)))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_comments(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .comments
        .all()
        .iter()
        .enumerate()
        .map(|(idx, comment)| comment_item(comment, idx == app.selected_comment))
        .collect();

    let title = format!("Comments ({})", app.comments.all().len());
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::SIDEBAR_TITLE)))
        .borders(Borders::ALL);
    frame.render_widget(List::new(items).block(block), area);
}

fn comment_item(comment: &Comment, is_selected: bool) -> ListItem<'static> {
    let author = comment
        .author
        .as_ref()
        .map_or_else(|| comment.author_id.to_string(), |a| a.full_name());

    let like_style = if comment.user_reaction == Some(Reaction::Like) {
        theme::normal().fg(theme::SUCCESS)
    } else {
        theme::dimmed()
    };
    let dislike_style = if comment.user_reaction == Some(Reaction::Dislike) {
        theme::normal().fg(theme::ERROR)
    } else {
        theme::dimmed()
    };

    let header = Line::from(vec![
        Span::styled(author, if is_selected { theme::selected() } else { theme::bold() }),
        Span::raw("  "),
        Span::styled(format_date_time(&comment.created_at), theme::dimmed()),
        Span::raw("  "),
        Span::styled(format!("▲{}", comment.likes_count), like_style),
        Span::raw(" "),
        Span::styled(format!("▼{}", comment.dislikes_count), dislike_style),
    ]);
    ListItem::new(vec![header, Line::from(comment.text.clone())])
}

fn render_compose(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = app.comment_input.as_ref().map_or_else(
        || ("press i to comment".to_string(), theme::dimmed()),
        |input| (format!("{input}▏"), theme::normal()),
    );

    let block = Block::default().title("New comment").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Span::styled(text, style)).block(block), area);
}
