use std::fmt;

use chrono::{DateTime, Utc};

use crate::api::TaskApi;
use crate::error::ClientError;
use crate::hooks::TaskHooks;
use crate::models::{Task, TaskPriority, TaskStatus, UpdateTaskRequest};

/// What a row shows for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRowView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: &'static str,
    pub status: &'static str,
    pub selected: bool,
}

impl TaskRowView {
    pub fn new(task: &Task, selected: bool) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
            priority: task.priority.label(),
            status: task.status.label(),
            selected,
        }
    }
}

impl fmt::Display for TaskRowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.selected { "x" } else { " " };
        write!(
            f,
            "[{mark}] {} | {} | {} | {}",
            self.title, self.due_date, self.priority, self.status
        )
    }
}

/// Pending edits for one task. Only fields that differ from the task are sent.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

impl EditForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
            status: task.status,
        }
    }

    pub fn changes(&self, task: &Task) -> UpdateTaskRequest {
        UpdateTaskRequest {
            title: (self.title != task.title).then(|| self.title.clone()),
            description: (self.description != task.description).then(|| self.description.clone()),
            due_date: (self.due_date != task.due_date).then_some(self.due_date),
            priority: (self.priority != task.priority).then_some(self.priority),
            status: (self.status != task.status).then_some(self.status),
        }
    }
}

pub struct TaskRow<A: TaskApi> {
    task: Task,
    hooks: TaskHooks<A>,
    edit: Option<EditForm>,
}

impl<A: TaskApi> TaskRow<A> {
    pub fn new(task: Task, hooks: TaskHooks<A>) -> Self {
        Self {
            task,
            hooks,
            edit: None,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn hooks(&self) -> &TaskHooks<A> {
        &self.hooks
    }

    pub fn view(&self, selected: bool) -> TaskRowView {
        TaskRowView::new(&self.task, selected)
    }

    /// Sends a single update carrying only the new status.
    pub fn change_status(&mut self, status: TaskStatus) -> Result<Task, ClientError> {
        let updated = self
            .hooks
            .update_task(&self.task.id, &UpdateTaskRequest::status(status))?;
        self.task = updated.clone();
        Ok(updated)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn toggle_edit(&mut self) {
        self.edit = match self.edit {
            Some(_) => None,
            None => Some(EditForm::from_task(&self.task)),
        };
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut EditForm> {
        self.edit.as_mut()
    }

    /// Patches every edited field in one request and collapses the form.
    /// Returns `Ok(None)` without a request when nothing changed.
    pub fn submit_edit(&mut self) -> Result<Option<Task>, ClientError> {
        let Some(form) = &self.edit else {
            return Ok(None);
        };
        let changes = form.changes(&self.task);
        if changes.is_empty() {
            self.edit = None;
            return Ok(None);
        }
        if changes.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ClientError::Invalid("title is required".into()));
        }

        let updated = self.hooks.update_task(&self.task.id, &changes)?;
        self.task = updated.clone();
        self.edit = None;
        Ok(Some(updated))
    }
}
