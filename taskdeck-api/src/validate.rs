//! Form validation.
//!
//! Pure functions mapping candidate field values to a field-to-message
//! map; an empty map means the form is valid. Nothing here panics, and
//! whitespace-only input is treated as empty, so `"   "` fails any
//! minimum-length check.

use std::collections::BTreeMap;

use crate::form::{ProjectForm, RegisterForm, TaskForm};

/// Per-field validation error messages. Absence of a key means the field
/// is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    /// Records an error message for a field.
    fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    /// Returns the error message for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    /// Whether every field passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Whether the string is a plausible email address: a non-empty local
/// part, `@`, and a domain containing an interior dot, with no
/// whitespace or further `@` anywhere.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let bad = |c: char| c.is_whitespace() || c == '@';
    if local.is_empty() || local.chars().any(bad) || domain.chars().any(bad) {
        return false;
    }
    // At least one dot that is neither the first nor the last character.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Whether the password meets the minimum length of 6 characters.
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 6
}

/// Whether the name has at least 2 characters after trimming.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

/// Validates a login form.
#[must_use]
pub fn validate_login_form(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.insert("email", "Invalid email format");
    }

    if password.is_empty() {
        errors.insert("password", "Password is required");
    }

    errors
}

/// Validates a registration form, including password confirmation.
#[must_use]
pub fn validate_register_form(form: &RegisterForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if !is_valid_name(&form.first_name) {
        errors.insert("firstName", "First name must be at least 2 characters");
    }

    if !is_valid_name(&form.last_name) {
        errors.insert("lastName", "Last name must be at least 2 characters");
    }

    if form.email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(&form.email) {
        errors.insert("email", "Invalid email format");
    }

    if form.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if !is_valid_password(&form.password) {
        errors.insert("password", "Password must be at least 6 characters");
    }

    if form.password != form.confirm_password {
        errors.insert("confirmPassword", "Passwords do not match");
    }

    errors
}

/// Validates a project form: name at least 3 characters, description at
/// least 10, both after trimming.
#[must_use]
pub fn validate_project_form(form: &ProjectForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.name.trim().chars().count() < 3 {
        errors.insert("name", "Project name must be at least 3 characters");
    }

    if form.description.trim().chars().count() < 10 {
        errors.insert("description", "Description must be at least 10 characters");
    }

    errors
}

/// Validates a task form: title at least 3 characters after trimming;
/// project, status, and priority all required.
#[must_use]
pub fn validate_task_form(form: &TaskForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.title.trim().chars().count() < 3 {
        errors.insert("title", "Task title must be at least 3 characters");
    }

    if form.project_id.is_empty() {
        errors.insert("projectId", "Project is required");
    }

    if form.status.is_empty() {
        errors.insert("status", "Status is required");
    }

    if form.priority.is_empty() {
        errors.insert("priority", "Priority is required");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            email: "jo@example.com".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
        }
    }

    // --- is_valid_email ---

    #[test]
    fn email_accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn email_rejects_missing_parts() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@nodot"));
    }

    #[test]
    fn email_rejects_edge_dots() {
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@com."));
    }

    #[test]
    fn email_rejects_whitespace_and_double_at() {
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b c.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    // --- predicates ---

    #[test]
    fn password_minimum_length() {
        assert!(is_valid_password("abcdef"));
        assert!(!is_valid_password("abcde"));
        assert!(!is_valid_password(""));
    }

    #[test]
    fn name_minimum_length_after_trim() {
        assert!(is_valid_name("Jo"));
        assert!(is_valid_name("  Jo  "));
        assert!(!is_valid_name("J"));
        assert!(!is_valid_name("   "));
    }

    // --- validate_login_form ---

    #[test]
    fn login_valid_input_has_no_errors() {
        let errors = validate_login_form("a@b.com", "secret");
        assert!(errors.is_valid());
    }

    #[test]
    fn login_missing_fields() {
        let errors = validate_login_form("", "");
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn login_malformed_email() {
        let errors = validate_login_form("not-an-email", "secret");
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert!(errors.get("password").is_none());
    }

    // --- validate_register_form ---

    #[test]
    fn register_valid_input_has_no_errors() {
        assert!(validate_register_form(&register_form()).is_valid());
    }

    #[test]
    fn register_short_names() {
        let mut form = register_form();
        form.first_name = "J".to_string();
        form.last_name = " ".to_string();
        let errors = validate_register_form(&form);
        assert_eq!(
            errors.get("firstName"),
            Some("First name must be at least 2 characters")
        );
        assert_eq!(
            errors.get("lastName"),
            Some("Last name must be at least 2 characters")
        );
    }

    #[test]
    fn register_short_password() {
        let mut form = register_form();
        form.password = "abc".to_string();
        form.confirm_password = "abc".to_string();
        let errors = validate_register_form(&form);
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn register_password_mismatch() {
        let mut form = register_form();
        form.confirm_password = "different".to_string();
        let errors = validate_register_form(&form);
        assert_eq!(
            errors.get("confirmPassword"),
            Some("Passwords do not match")
        );
    }

    // --- validate_project_form ---

    #[test]
    fn project_valid_input_has_no_errors() {
        let form = ProjectForm {
            name: "Website".to_string(),
            description: "Refresh the marketing site".to_string(),
            color: String::new(),
        };
        assert!(validate_project_form(&form).is_valid());
    }

    #[test]
    fn project_whitespace_only_name_is_invalid() {
        let form = ProjectForm {
            name: "   ".to_string(),
            description: "Long enough description".to_string(),
            color: String::new(),
        };
        let errors = validate_project_form(&form);
        assert_eq!(
            errors.get("name"),
            Some("Project name must be at least 3 characters")
        );
    }

    #[test]
    fn project_short_description() {
        let form = ProjectForm {
            name: "Website".to_string(),
            description: "too short".to_string(),
            color: String::new(),
        };
        let errors = validate_project_form(&form);
        assert_eq!(
            errors.get("description"),
            Some("Description must be at least 10 characters")
        );
    }

    // --- validate_task_form ---

    #[test]
    fn task_valid_input_has_no_errors() {
        let form = TaskForm {
            title: "Fix the build".to_string(),
            project_id: "p-1".to_string(),
            status: "TODO".to_string(),
            priority: "MEDIUM".to_string(),
            ..TaskForm::default()
        };
        assert!(validate_task_form(&form).is_valid());
    }

    #[test]
    fn task_missing_required_fields() {
        let errors = validate_task_form(&TaskForm::default());
        assert_eq!(
            errors.get("title"),
            Some("Task title must be at least 3 characters")
        );
        assert_eq!(errors.get("projectId"), Some("Project is required"));
        assert_eq!(errors.get("status"), Some("Status is required"));
        assert_eq!(errors.get("priority"), Some("Priority is required"));
    }

    #[test]
    fn task_whitespace_title_is_invalid() {
        let form = TaskForm {
            title: "   ".to_string(),
            project_id: "p-1".to_string(),
            status: "TODO".to_string(),
            priority: "LOW".to_string(),
            ..TaskForm::default()
        };
        let errors = validate_task_form(&form);
        assert_eq!(
            errors.get("title"),
            Some("Task title must be at least 3 characters")
        );
    }

    #[test]
    fn errors_iterate_in_field_order() {
        let errors = validate_task_form(&TaskForm::default());
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["priority", "projectId", "status", "title"]);
    }
}
