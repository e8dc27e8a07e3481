use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    create_task_request::CreateTaskRequest, data_context::DataContext,
    in_memory_task_repository::InMemoryTaskRepository, task::Task,
    update_task_request::UpdateTaskRequest,
};

pub const MEMORY_SCHEME: &str = "memory://";
pub const REDB_SCHEME: &str = "redb://";

/// Store-facing CRUD contract. "Not found" is `Ok(None)`, never an error;
/// `Err` is reserved for the store itself failing.
pub trait TaskRepository: Send + Sync {
    fn create(&self, fields: CreateTaskRequest) -> Result<Task, StoreError>;

    /// Every task in creation order.
    fn find_all(&self) -> Result<Vec<Task>, StoreError>;

    fn find_one(&self, id: &str) -> Result<Option<Task>, StoreError>;

    fn update(&self, id: &str, partial: UpdateTaskRequest) -> Result<Option<Task>, StoreError>;

    /// Deletes the task and hands back what was stored.
    fn remove(&self, id: &str) -> Result<Option<Task>, StoreError>;
}

/// Ids that do not parse can never match a stored task.
pub fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// `memory://` for a process-local store, `redb://<path>` (or a bare path)
/// for a redb file.
pub fn open_repository(database_url: &str) -> Result<Arc<dyn TaskRepository>, StoreError> {
    if database_url.starts_with(MEMORY_SCHEME) {
        return Ok(Arc::new(InMemoryTaskRepository::new()));
    }
    let path = database_url.strip_prefix(REDB_SCHEME).unwrap_or(database_url);
    Ok(Arc::new(DataContext::new(path)?))
}

/// Opens the store and reads it once. A store that cannot be read fails here
/// rather than on the first request.
pub fn open_and_count(database_url: &str) -> Result<(Arc<dyn TaskRepository>, usize), StoreError> {
    let repository = open_repository(database_url)?;
    let task_count = repository.find_all()?.len();
    Ok((repository, task_count))
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redb: {0}")]
    Redb(String),
    #[error("encode: {0}")]
    Encode(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// redb 2.x has many error types. Blanket them all into StoreError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for StoreError {
            fn from(e: $t) -> Self { StoreError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);
