use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    create_task_request::CreateTaskRequest, task_priority::TaskPriority, task_status::TaskStatus,
    timestamp, update_task_request::UpdateTaskRequest,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(with = "timestamp::iso_millis")]
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(with = "timestamp::iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(request: CreateTaskRequest) -> Self {
        let now = timestamp::now();
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            priority: request.priority,
            status: request.status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn edit(self, request: UpdateTaskRequest) -> Self {
        Self {
            id: self.id,
            title: request.title.unwrap_or(self.title),
            description: request.description.unwrap_or(self.description),
            due_date: request.due_date.unwrap_or(self.due_date),
            priority: request.priority.unwrap_or(self.priority),
            status: request.status.unwrap_or(self.status),
            created_at: self.created_at,
            updated_at: timestamp::next_after(self.updated_at),
        }
    }
}



#[cfg(test)]
mod prop {
    use proptest::prelude::*;

    use super::strategies::{any_create_request, any_update_request};
    use super::*;

    proptest! {
        #[test]
        fn new_echoes_every_supplied_field(request in any_create_request()) {
            let task = Task::new(request.clone());
            prop_assert_eq!(&task.title, &request.title);
            prop_assert_eq!(&task.description, &request.description);
            prop_assert_eq!(task.due_date, request.due_date);
            prop_assert_eq!(task.priority, request.priority);
            prop_assert_eq!(task.status, request.status);
            prop_assert_eq!(task.created_at, task.updated_at);
        }

        #[test]
        fn edit_changes_exactly_the_supplied_fields(request in any_create_request(), update in any_update_request()) {
            let task = Task::new(request);
            let edited = task.clone().edit(update.clone());

            prop_assert_eq!(edited.id, task.id);
            prop_assert_eq!(edited.created_at, task.created_at);
            prop_assert!(edited.updated_at > task.updated_at);
            prop_assert_eq!(edited.title, update.title.unwrap_or(task.title));
            prop_assert_eq!(edited.description, update.description.unwrap_or(task.description));
            prop_assert_eq!(edited.due_date, update.due_date.unwrap_or(task.due_date));
            prop_assert_eq!(edited.priority, update.priority.unwrap_or(task.priority));
            prop_assert_eq!(edited.status, update.status.unwrap_or(task.status));
        }
    }
}
