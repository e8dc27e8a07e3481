use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::{
    create_task_request::CreateTaskRequest,
    task::Task,
    task_repository::{parse_id, StoreError, TaskRepository},
    update_task_request::UpdateTaskRequest,
};

/// Process-local store. Tasks live in a Vec so creation order falls out of
/// push order.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Task>>, StoreError> {
        self.tasks.read().map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Task>>, StoreError> {
        self.tasks.write().map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.write()?.clear();
        debug!("cleared in-memory task store");
        Ok(())
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn seed(&self, requests: Vec<CreateTaskRequest>) -> Result<Vec<Task>, StoreError> {
        requests.into_iter().map(|request| self.create(request)).collect()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create(&self, fields: CreateTaskRequest) -> Result<Task, StoreError> {
        let task = Task::new(fields);
        self.write()?.push(task.clone());
        Ok(task)
    }

    fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.read()?.clone())
    }

    fn find_one(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let Some(id) = parse_id(id) else { return Ok(None) };
        Ok(self.read()?.iter().find(|t| t.id == id).cloned())
    }

    fn update(&self, id: &str, partial: UpdateTaskRequest) -> Result<Option<Task>, StoreError> {
        let Some(id) = parse_id(id) else { return Ok(None) };
        let mut tasks = self.write()?;
        let Some(slot) = tasks.iter_mut().find(|t| t.id == id) else { return Ok(None) };
        let edited = slot.clone().edit(partial);
        *slot = edited.clone();
        Ok(Some(edited))
    }

    fn remove(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let Some(id) = parse_id(id) else { return Ok(None) };
        let mut tasks = self.write()?;
        Ok(tasks
            .iter()
            .position(|t| t.id == id)
            .map(|index| tasks.remove(index)))
    }
}
