use chrono::{DateTime, Utc};

use crate::{task_priority::TaskPriority, task_status::TaskStatus};

/// A create payload that has already passed the task schema.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}
