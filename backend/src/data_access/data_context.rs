//! redb-backed task store.
//!
//! One row per task, keyed by the UUID bytes. Rows are postcard-encoded and
//! carry a creation sequence number so listing can return tasks in the
//! order they were created. The next sequence number lives in `task_meta`.

use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};
use tracing::debug;

use crate::{
    create_task_request::CreateTaskRequest,
    task::Task,
    task_repository::{parse_id, StoreError, TaskRepository},
    update_task_request::UpdateTaskRequest,
};

const TASKS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("tasks");
const TASK_META: TableDefinition<&str, u64> = TableDefinition::new("task_meta");
const NEXT_SEQUENCE: &str = "next_sequence";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTask {
    sequence: u64,
    task: Task,
}

fn encode(record: &StoredTask) -> Result<Vec<u8>, StoreError> {
    postcard::to_allocvec(record).map_err(|e| StoreError::Encode(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<StoredTask, StoreError> {
    postcard::from_bytes(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Thin handle to the redb file. Cloneable (Arc inside).
#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    /// Open (or create) the database file and make sure both tables exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref())?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TASKS_TABLE)?;
            let _ = write_txn.open_table(TASK_META)?;
        }
        write_txn.commit()?;
        debug!(path = %path.as_ref().display(), "opened task store");
        Ok(DataContext { db: Arc::new(db) })
    }
}

impl TaskRepository for DataContext {
    fn create(&self, fields: CreateTaskRequest) -> Result<Task, StoreError> {
        let task = Task::new(fields);
        let write_txn = self.db.begin_write()?;
        {
            let mut meta = write_txn.open_table(TASK_META)?;
            let sequence = meta.get(NEXT_SEQUENCE)?.map(|guard| guard.value()).unwrap_or(0);
            meta.insert(NEXT_SEQUENCE, sequence + 1)?;

            let mut tasks = write_txn.open_table(TASKS_TABLE)?;
            let bytes = encode(&StoredTask { sequence, task: task.clone() })?;
            tasks.insert(task.id.as_bytes().as_slice(), bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(task)
    }

    fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let mut records = Vec::new();
        for entry in tasks_table.iter()? {
            let (_, value) = entry?;
            records.push(decode(value.value())?);
        }

        records.sort_by_key(|record| record.sequence);
        Ok(records.into_iter().map(|record| record.task).collect())
    }

    fn find_one(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let Some(id) = parse_id(id) else { return Ok(None) };
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        match tasks_table.get(id.as_bytes().as_slice())? {
            Some(data) => Ok(Some(decode(data.value())?.task)),
            None => Ok(None),
        }
    }

    fn update(&self, id: &str, partial: UpdateTaskRequest) -> Result<Option<Task>, StoreError> {
        let Some(id) = parse_id(id) else { return Ok(None) };
        let write_txn = self.db.begin_write()?;
        let edited = {
            let mut tasks = write_txn.open_table(TASKS_TABLE)?;
            let existing = tasks
                .get(id.as_bytes().as_slice())?
                .map(|data| decode(data.value()))
                .transpose()?;

            match existing {
                Some(record) => {
                    let edited = StoredTask {
                        sequence: record.sequence,
                        task: record.task.edit(partial),
                    };
                    tasks.insert(id.as_bytes().as_slice(), encode(&edited)?.as_slice())?;
                    Some(edited.task)
                }
                None => None,
            }
        };

        match edited {
            Some(_) => write_txn.commit()?,
            None => write_txn.abort()?,
        }
        Ok(edited)
    }

    fn remove(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let Some(id) = parse_id(id) else { return Ok(None) };
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut tasks = write_txn.open_table(TASKS_TABLE)?;
            let result = tasks.remove(id.as_bytes().as_slice())?;
            result.map(|data| decode(data.value())).transpose()?
        };

        match removed {
            Some(_) => write_txn.commit()?,
            None => write_txn.abort()?,
        }
        Ok(removed.map(|record| record.task))
    }
}

// ── Tests ──────────────────────────────────────────────────────
