//! Property tests for the validation and normalization rules.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;

use taskdeck_api::form::{ProjectForm, TaskForm, format_date_for_input};
use taskdeck_api::labels::status_label;
use taskdeck_api::validate::{validate_project_form, validate_task_form};

const VALID_DESCRIPTION: &str = "A description comfortably over ten characters";

proptest! {
    /// Any name with fewer than 3 characters after trimming yields a
    /// `name` error; anything longer is accepted.
    #[test]
    fn project_name_length_gate(name in ".{0,20}") {
        let form = ProjectForm {
            name: name.clone(),
            description: VALID_DESCRIPTION.to_string(),
            color: String::new(),
        };
        let errors = validate_project_form(&form);
        if name.trim().chars().count() < 3 {
            prop_assert_eq!(errors.get("name"), Some("Project name must be at least 3 characters"));
        } else {
            prop_assert!(errors.get("name").is_none());
        }
    }

    /// The description gate is independent of the name gate.
    #[test]
    fn project_description_length_gate(description in ".{0,30}") {
        let form = ProjectForm {
            name: "Valid name".to_string(),
            description: description.clone(),
            color: String::new(),
        };
        let errors = validate_project_form(&form);
        prop_assert_eq!(
            errors.get("description").is_some(),
            description.trim().chars().count() < 10
        );
    }

    /// Task titles behave like project names with the same threshold.
    #[test]
    fn task_title_length_gate(title in ".{0,20}") {
        let form = TaskForm {
            title: title.clone(),
            project_id: "p-1".to_string(),
            status: "TODO".to_string(),
            priority: "LOW".to_string(),
            ..TaskForm::default()
        };
        let errors = validate_task_form(&form);
        prop_assert_eq!(
            errors.get("title").is_some(),
            title.trim().chars().count() < 3
        );
    }

    /// Validators never panic, whatever the input.
    #[test]
    fn validators_are_total(title in ".*", project in ".*", status in ".*", priority in ".*") {
        let form = TaskForm {
            title,
            project_id: project,
            status,
            priority,
            ..TaskForm::default()
        };
        let _ = validate_task_form(&form);
    }

    /// Unknown status keys come back unchanged from the label lookup.
    #[test]
    fn unknown_status_labels_are_identity(key in "[A-Z_]{1,12}") {
        prop_assume!(!matches!(
            key.as_str(),
            "TODO" | "IN_PROGRESS" | "IN_REVIEW" | "DONE" | "CANCELLED"
        ));
        prop_assert_eq!(status_label(&key), key.as_str());
    }

    /// Date-only inputs survive the normalize/format round trip exactly.
    #[test]
    fn due_date_round_trips(year in 1970u32..2200, month in 1u32..=12, day in 1u32..=28) {
        let date = format!("{year:04}-{month:02}-{day:02}");
        let form = TaskForm {
            due_date: date.clone(),
            ..TaskForm::default()
        };
        let payload = form.to_payload();
        let due = payload.due_date.unwrap();
        prop_assert_eq!(due.clone(), format!("{date}T00:00:00"));
        prop_assert_eq!(format_date_for_input(&due), date.as_str());
    }

    /// Blank or whitespace hour fields are always omitted; parseable
    /// ones always parse to the same float.
    #[test]
    fn hours_normalization(hours in prop_oneof![
        Just(String::new()),
        "\\s{1,4}",
        (0.0f64..10_000.0).prop_map(|h| format!("{h}")),
    ]) {
        let form = TaskForm {
            estimated_hours: hours.clone(),
            ..TaskForm::default()
        };
        let payload = form.to_payload();
        match hours.trim().parse::<f64>() {
            Ok(expected) => prop_assert_eq!(payload.estimated_hours, Some(expected)),
            Err(_) => prop_assert!(payload.estimated_hours.is_none()),
        }
    }

    /// Blank optional fields never appear in the serialized payload.
    #[test]
    fn blank_optionals_never_serialize(assignee in prop_oneof![Just(String::new()), "u-[0-9]{1,4}"]) {
        let form = TaskForm {
            title: "Valid title".to_string(),
            assigned_to_id: assignee.clone(),
            ..TaskForm::default()
        };
        let json = serde_json::to_value(form.to_payload()).unwrap();
        let map = json.as_object().unwrap();
        prop_assert_eq!(map.contains_key("assignedToId"), !assignee.is_empty());
        prop_assert!(!map.contains_key("dueDate"));
        prop_assert!(!map.contains_key("estimatedHours"));
        prop_assert!(!map.contains_key("actualHours"));
        prop_assert!(!map.contains_key("description"));
    }
}
