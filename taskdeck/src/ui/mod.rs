//! Terminal UI rendering.

pub mod board;
pub mod detail;
pub mod login;
pub mod notifications;
pub mod sidebar;
pub mod status_bar;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::{App, Screen};

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Status bar pinned to the bottom on every screen.
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    match &app.screen {
        Screen::Login => login::render(frame, content_area, app),
        Screen::Board => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(20), Constraint::Percentage(80)])
                .split(content_area);
            sidebar::render(frame, content_chunks[0], app);
            board::render(frame, content_chunks[1], app);
        }
        Screen::TaskDetail(task_id) => detail::render(frame, content_area, app, task_id),
        Screen::Notifications => notifications::render(frame, content_area, app),
    }

    status_bar::render(frame, status_area, app);
}
