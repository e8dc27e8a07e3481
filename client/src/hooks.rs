use std::rc::Rc;

use tracing::{debug, warn};

use crate::api::TaskApi;
use crate::cache::{SharedCache, TASKS_QUERY_KEY};
use crate::error::ClientError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};

/// Snapshot of the task list query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub data: Option<Vec<Task>>,
    pub error: Option<String>,
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    pub status: MutationStatus,
    pub error: Option<String>,
}

impl MutationState {
    pub fn is_error(&self) -> bool {
        self.status == MutationStatus::Error
    }

    pub fn is_success(&self) -> bool {
        self.status == MutationStatus::Success
    }
}

/// Data hooks over the task API. Every instance built on the same cache sees
/// the same task list; mutation state is per instance.
pub struct TaskHooks<A: TaskApi> {
    api: Rc<A>,
    cache: SharedCache,
    create: MutationState,
    update: MutationState,
    delete: MutationState,
}

impl<A: TaskApi> TaskHooks<A> {
    pub fn new(api: Rc<A>, cache: SharedCache) -> Self {
        Self {
            api,
            cache,
            create: MutationState::default(),
            update: MutationState::default(),
            delete: MutationState::default(),
        }
    }

    /// Another hook instance sharing this one's API and cache.
    pub fn sibling(&self) -> Self {
        Self::new(Rc::clone(&self.api), Rc::clone(&self.cache))
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// The cached task list, fetched first when missing or stale.
    pub fn todos(&self) -> QueryState {
        if self.cache.borrow().needs_fetch(TASKS_QUERY_KEY) {
            self.refetch();
        }
        let cache = self.cache.borrow();
        cache
            .get(TASKS_QUERY_KEY)
            .map(|entry| QueryState {
                data: entry.data.clone(),
                error: entry.error.clone(),
            })
            .unwrap_or_default()
    }

    pub fn refetch(&self) {
        debug!("fetching {TASKS_QUERY_KEY}");
        match self.api.get_tasks() {
            Ok(tasks) => self.cache.borrow_mut().store(TASKS_QUERY_KEY, tasks),
            Err(e) => {
                warn!("fetching {TASKS_QUERY_KEY} failed: {e}");
                self.cache.borrow_mut().store_error(TASKS_QUERY_KEY, e.to_string());
            }
        }
    }

    pub fn create_task(&mut self, request: &CreateTaskRequest) -> Result<Task, ClientError> {
        let result = self.api.create_task(request);
        settle(&mut self.create, &self.cache, result)
    }

    pub fn update_task(&mut self, id: &str, request: &UpdateTaskRequest) -> Result<Task, ClientError> {
        let result = self.api.update_task(id, request);
        settle(&mut self.update, &self.cache, result)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<(), ClientError> {
        let result = self.api.delete_task(id);
        settle(&mut self.delete, &self.cache, result)
    }

    pub fn create_state(&self) -> &MutationState {
        &self.create
    }

    pub fn update_state(&self) -> &MutationState {
        &self.update
    }

    pub fn delete_state(&self) -> &MutationState {
        &self.delete
    }
}

fn settle<T>(
    state: &mut MutationState,
    cache: &SharedCache,
    result: Result<T, ClientError>,
) -> Result<T, ClientError> {
    match &result {
        Ok(_) => {
            state.status = MutationStatus::Success;
            state.error = None;
            cache.borrow_mut().invalidate(TASKS_QUERY_KEY);
        }
        Err(e) => {
            warn!("task mutation failed: {e}");
            state.status = MutationStatus::Error;
            state.error = Some(e.to_string());
        }
    }
    result
}
