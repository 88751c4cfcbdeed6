//! Display labels for wire-form enum values.
//!
//! Unknown values fall back to the input unchanged, so stale clients
//! render whatever the server sent rather than breaking.

/// Human-readable label for a task status key.
#[must_use]
pub fn status_label(status: &str) -> &str {
    match status {
        "TODO" => "To Do",
        "IN_PROGRESS" => "In Progress",
        "IN_REVIEW" => "In Review",
        "DONE" => "Done",
        "CANCELLED" => "Cancelled",
        other => other,
    }
}

/// Human-readable label for a task priority key.
#[must_use]
pub fn priority_label(priority: &str) -> &str {
    match priority {
        "LOW" => "Low",
        "MEDIUM" => "Medium",
        "HIGH" => "High",
        "URGENT" => "Urgent",
        other => other,
    }
}

/// Human-readable label for a project role key.
#[must_use]
pub fn role_label(role: &str) -> &str {
    match role {
        "OWNER" => "Owner",
        "EDITOR" => "Editor",
        "VIEWER" => "Viewer",
        other => other,
    }
}

/// Truncates text to `max_length` characters, appending an ellipsis when
/// anything was cut.
#[must_use]
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_length).collect();
    format!("{cut}...")
}
