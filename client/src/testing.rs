use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::api::TaskApi;
use crate::error::ClientError;
use crate::models::{CreateTaskRequest, Task, TaskPriority, TaskStatus, UpdateTaskRequest};

pub fn timestamp(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

pub fn sample_task(id: &str, title: &str) -> Task {
    let at = timestamp("2025-01-01T10:00:00Z");
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        due_date: timestamp("2025-01-01T00:00:00Z"),
        priority: TaskPriority::Medium,
        status: TaskStatus::Pending,
        created_at: at,
        updated_at: at,
    }
}

/// In-memory stand-in for the REST API that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub tasks: RefCell<Vec<Task>>,
    pub calls: RefCell<Vec<String>>,
    pub failing_ids: RefCell<HashSet<String>>,
    pub unavailable: Cell<bool>,
    next_id: Cell<u32>,
}

impl FakeApi {
    pub fn with_tasks(titles: &[&str]) -> Self {
        let api = FakeApi::default();
        for title in titles {
            let id = api.fresh_id();
            api.tasks.borrow_mut().push(sample_task(&id, title));
        }
        api
    }

    pub fn fail_on(&self, id: &str) {
        self.failing_ids.borrow_mut().insert(id.to_string());
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn ids(&self) -> Vec<String> {
        self.tasks.borrow().iter().map(|t| t.id.clone()).collect()
    }

    fn fresh_id(&self) -> String {
        let next = self.next_id.get() + 1;
        self.next_id.set(next);
        format!("task-{next}")
    }

    fn check(&self, call: String, id: Option<&str>) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(call);
        let failing = id.map_or(false, |id| self.failing_ids.borrow().contains(id));
        if self.unavailable.get() || failing {
            return Err(ClientError::Http {
                status: 500,
                body: "Internal server error".into(),
            });
        }
        Ok(())
    }

    fn not_found() -> ClientError {
        ClientError::Http {
            status: 404,
            body: "Task not found".into(),
        }
    }
}

impl TaskApi for FakeApi {
    fn get_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.check("GET".into(), None)?;
        Ok(self.tasks.borrow().clone())
    }

    fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ClientError> {
        self.check("POST".into(), None)?;
        let mut task = sample_task(&self.fresh_id(), &request.title);
        task.description = request.description.clone();
        task.due_date = request.due_date;
        task.priority = request.priority;
        task.status = request.status;
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    fn update_task(&self, id: &str, request: &UpdateTaskRequest) -> Result<Task, ClientError> {
        self.check(format!("PATCH {id}"), Some(id))?;
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks.iter_mut().find(|t| t.id == id).ok_or_else(Self::not_found)?;
        if let Some(title) = &request.title {
            task.title = title.clone();
        }
        if let Some(description) = &request.description {
            task.description = description.clone();
        }
        if let Some(due_date) = request.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = request.priority {
            task.priority = priority;
        }
        if let Some(status) = request.status {
            task.status = status;
        }
        Ok(task.clone())
    }

    fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        self.check(format!("DELETE {id}"), Some(id))?;
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}
