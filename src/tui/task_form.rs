//! Task form handling for the dashboard.
//!
//! `TaskForm` backs both the add and the edit screen. Text fields and the
//! priority selector share one focus order.

use chrono::NaiveDate;

use crate::display::parse_due_input;
use crate::fields::Priority;
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::tui::input::InputField;

/// Focus order of the form fields.
pub const TITLE_ORDER: usize = 0;
pub const SUBJECT_ORDER: usize = 1;
pub const DUE_ORDER: usize = 2;
pub const PRIORITY_ORDER: usize = 3;
pub const DESCRIPTION_ORDER: usize = 4;
const FIELD_COUNT: usize = 5;

pub const PRIORITIES: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

/// Form state for creating or editing a task.
pub struct TaskForm {
    pub title: InputField,
    pub subject: InputField,
    pub due: InputField,
    pub description: InputField,
    pub priority: usize,
    pub current_field: usize,
}

impl TaskForm {
    /// Empty form, priority medium, focus on the title.
    pub fn new() -> Self {
        let mut form = Self {
            title: InputField::new(),
            subject: InputField::new(),
            due: InputField::new(),
            description: InputField::new(),
            priority: 1,
            current_field: TITLE_ORDER,
        };
        form.update_active_field();
        form
    }

    /// Form prefilled for a new task in `subject`.
    pub fn with_subject(subject: &str) -> Self {
        let mut form = Self::new();
        form.subject = InputField::with_value(subject);
        form
    }

    /// Form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.title = InputField::with_value(&task.title);
        form.subject = InputField::with_value(&task.subject);
        form.due = InputField::with_value(&task.due_date.to_string());
        form.description = InputField::with_value(&task.description);
        form.priority = PRIORITIES.iter().position(|&p| p == task.priority).unwrap_or(1);
        form.update_active_field();
        form
    }

    pub fn selected_priority(&self) -> Priority {
        PRIORITIES[self.priority % PRIORITIES.len()]
    }

    fn parse_due(&self, today: NaiveDate) -> Result<Option<NaiveDate>, String> {
        let raw = self.due.value.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        parse_due_input(raw, today)
            .map(Some)
            .ok_or_else(|| format!("Could not understand due date '{raw}'"))
    }

    /// Build a draft; the store performs the mandatory-field check.
    pub fn to_draft(&self, today: NaiveDate) -> Result<TaskDraft, String> {
        Ok(TaskDraft {
            title: self.title.value.clone(),
            subject: self.subject.value.clone(),
            description: self.description.value.clone(),
            priority: self.selected_priority(),
            due_date: self.parse_due(today)?,
            sub_tasks: Vec::new(),
        })
    }

    /// Build a patch carrying every form field.
    pub fn to_patch(&self, today: NaiveDate) -> Result<TaskPatch, String> {
        let Some(due_date) = self.parse_due(today)? else {
            return Err("Due date is required".to_string());
        };
        Ok(TaskPatch {
            title: Some(self.title.value.clone()),
            subject: Some(self.subject.value.clone()),
            description: Some(self.description.value.clone()),
            priority: Some(self.selected_priority()),
            due_date: Some(due_date),
            ..TaskPatch::default()
        })
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_ORDER => Some(&mut self.title),
            SUBJECT_ORDER => Some(&mut self.subject),
            DUE_ORDER => Some(&mut self.due),
            DESCRIPTION_ORDER => Some(&mut self.description),
            _ => None,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        for field in [
            &mut self.title,
            &mut self.subject,
            &mut self.due,
            &mut self.description,
        ] {
            field.active = false;
        }
        if let Some(f) = self.active_input() {
            f.active = true;
        }
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(f) = self.active_input() {
            f.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(f) = self.active_input() {
            f.handle_backspace();
        }
    }

    /// Move the cursor, or cycle the priority selector.
    pub fn handle_left_right(&mut self, right: bool) {
        if self.current_field == PRIORITY_ORDER {
            let n = PRIORITIES.len();
            self.priority = if right {
                (self.priority + 1) % n
            } else {
                (self.priority + n - 1) % n
            };
            return;
        }
        if let Some(f) = self.active_input() {
            if right {
                f.move_cursor_right();
            } else {
                f.move_cursor_left();
            }
        }
    }
}
