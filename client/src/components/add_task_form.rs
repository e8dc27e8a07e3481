use chrono::{DateTime, NaiveDate, Utc};

use crate::api::TaskApi;
use crate::error::ClientError;
use crate::hooks::TaskHooks;
use crate::models::{CreateTaskRequest, Task, TaskPriority, TaskStatus};

/// Raw form input. Every field is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

impl TaskDraft {
    pub fn to_request(&self) -> Result<CreateTaskRequest, ClientError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.due_date.trim().is_empty() {
            missing.push("dueDate");
        }
        if self.priority.is_none() {
            missing.push("priority");
        }
        if self.status.is_none() {
            missing.push("status");
        }

        match (parse_due_date(&self.due_date), self.priority, self.status) {
            (Some(due_date), Some(priority), Some(status)) if missing.is_empty() => Ok(CreateTaskRequest {
                title: self.title.clone(),
                description: self.description.clone(),
                due_date,
                priority,
                status,
            }),
            (None, _, _) if missing.is_empty() => Err(ClientError::Invalid(format!(
                "dueDate is not a valid date: {}",
                self.due_date
            ))),
            _ => Err(ClientError::Invalid(format!("required: {}", missing.join(", ")))),
        }
    }
}

fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub struct AddTaskForm<A: TaskApi> {
    hooks: TaskHooks<A>,
    open: bool,
    draft: TaskDraft,
}

impl<A: TaskApi> AddTaskForm<A> {
    pub fn new(hooks: TaskHooks<A>) -> Self {
        Self {
            hooks,
            open: false,
            draft: TaskDraft::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.draft = TaskDraft::default();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.draft = TaskDraft::default();
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    pub fn hooks(&self) -> &TaskHooks<A> {
        &self.hooks
    }

    /// Creates the drafted task. The draft is cleared once the request is
    /// sent; the form closes only when the create succeeded.
    pub fn submit(&mut self) -> Result<Task, ClientError> {
        let request = self.draft.to_request()?;
        let result = self.hooks.create_task(&request);
        self.draft = TaskDraft::default();
        if result.is_ok() {
            self.open = false;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::cache::QueryCache;
    use crate::testing::{timestamp, FakeApi};

    fn form(api: FakeApi) -> (Rc<FakeApi>, AddTaskForm<FakeApi>) {
        let api = Rc::new(api);
        let hooks = TaskHooks::new(Rc::clone(&api), QueryCache::shared());
        (api, AddTaskForm::new(hooks))
    }

    fn fill(draft: &mut TaskDraft) {
        draft.title = "E2E Test Task".into();
        draft.description = "Created by test".into();
        draft.due_date = "2025-01-01".into();
        draft.priority = Some(TaskPriority::Medium);
        draft.status = Some(TaskStatus::Pending);
    }

    #[test]
    fn toggle_opens_with_a_clean_draft() {
        let (_, mut form) = form(FakeApi::default());
        form.draft_mut().title = "left over".into();

        form.toggle();

        assert!(form.is_open());
        assert_eq!(form.draft(), &TaskDraft::default());
    }

    #[test]
    fn missing_fields_are_reported_without_a_request() {
        let (api, mut form) = form(FakeApi::default());
        form.toggle();
        form.draft_mut().title = "Only a title".into();

        let err = form.submit().unwrap_err();

        assert!(err.to_string().contains("description, dueDate, priority, status"));
        assert_eq!(api.count_calls("POST"), 0);
        assert!(form.is_open());
        assert_eq!(form.draft().title, "Only a title");
    }

    #[test]
    fn successful_submit_closes_and_resets() {
        let (api, mut form) = form(FakeApi::default());
        form.toggle();
        fill(form.draft_mut());

        let task = form.submit().unwrap();

        assert_eq!(task.title, "E2E Test Task");
        assert_eq!(task.due_date, timestamp("2025-01-01T00:00:00Z"));
        assert!(!form.is_open());
        assert_eq!(form.draft(), &TaskDraft::default());
        assert_eq!(api.count_calls("POST"), 1);
    }

    #[test]
    fn failed_submit_stays_open() {
        let api = FakeApi::default();
        api.unavailable.set(true);
        let (_, mut form) = form(api);
        form.toggle();
        fill(form.draft_mut());

        assert!(form.submit().is_err());
        assert!(form.is_open());
        assert!(form.hooks().create_state().is_error());
    }

    #[test]
    fn due_date_accepts_dates_and_timestamps() {
        assert_eq!(parse_due_date("2025-03-04"), Some(timestamp("2025-03-04T00:00:00Z")));
        assert_eq!(
            parse_due_date("2025-03-04T12:30:00+02:00"),
            Some(timestamp("2025-03-04T10:30:00Z"))
        );
        assert_eq!(parse_due_date("next week"), None);
    }
}
