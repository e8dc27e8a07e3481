use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
    create_task_request::CreateTaskRequest,
    task::Task,
    task_repository::{StoreError, TaskRepository},
    update_task_request::UpdateTaskRequest,
};

/// Sits between the controllers and the repository. Calls are forwarded
/// as-is; this is where logging happens.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub fn create(&self, request: CreateTaskRequest) -> Result<Task, StoreError> {
        debug!(title = %request.title, "creating task");
        self.repository
            .create(request)
            .inspect(|task| info!(task_id = %task.id, "task created"))
            .inspect_err(|e| error!(error = %e, "failed to create task"))
    }

    pub fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        self.repository
            .find_all()
            .inspect(|tasks| debug!(count = tasks.len(), "listed tasks"))
            .inspect_err(|e| error!(error = %e, "failed to list tasks"))
    }

    pub fn find_one(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let found = self
            .repository
            .find_one(id)
            .inspect_err(|e| error!(task_id = id, error = %e, "failed to look up task"))?;
        debug!(task_id = id, found = found.is_some(), "looked up task");
        Ok(found)
    }

    pub fn update(&self, id: &str, request: UpdateTaskRequest) -> Result<Option<Task>, StoreError> {
        debug!(task_id = id, ?request, "updating task");
        if request.is_empty() {
            debug!(task_id = id, "update carries no fields, only updatedAt moves");
        }
        let updated = self
            .repository
            .update(id, request)
            .inspect_err(|e| error!(task_id = id, error = %e, "failed to update task"))?;
        match &updated {
            Some(_) => info!(task_id = id, "task updated"),
            None => warn!(task_id = id, "task to update was not found"),
        }
        Ok(updated)
    }

    pub fn remove(&self, id: &str) -> Result<Option<Task>, StoreError> {
        debug!(task_id = id, "removing task");
        let removed = self
            .repository
            .remove(id)
            .inspect_err(|e| error!(task_id = id, error = %e, "failed to remove task"))?;
        match &removed {
            Some(_) => info!(task_id = id, "task removed"),
            None => warn!(task_id = id, "task to remove was not found"),
        }
        Ok(removed)
    }
}
