//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

use taskdeck_api::task::{TaskPriority, TaskStatus};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning indicator color.
pub const WARNING: Color = Color::Yellow;

/// Error indicator color.
pub const ERROR: Color = Color::Red;

/// Overdue due-date color.
pub const OVERDUE: Color = Color::LightRed;

/// Panel title color for the board.
pub const BOARD_TITLE: Color = Color::Cyan;

/// Panel title color for the sidebar.
pub const SIDEBAR_TITLE: Color = Color::Blue;

/// Color of a board column header.
#[must_use]
pub const fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => Color::Gray,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::InReview => Color::Yellow,
        TaskStatus::Done => Color::Green,
        TaskStatus::Cancelled => Color::Red,
    }
}

/// Color of a priority badge.
#[must_use]
pub const fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::Low => Color::Gray,
        TaskPriority::Medium => Color::Blue,
        TaskPriority::High => Color::Rgb(255, 165, 0),
        TaskPriority::Urgent => Color::Red,
    }
}

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (timestamps, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background.
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Style for unread count badges.
#[must_use]
pub fn unread_badge() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
