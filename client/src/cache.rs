use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::Task;

/// Key under which the task list is cached.
pub const TASKS_QUERY_KEY: &str = "todos";

pub type SharedCache = Rc<RefCell<QueryCache>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryEntry {
    pub data: Option<Vec<Task>>,
    pub stale: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<String, QueryEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedCache {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn get(&self, key: &str) -> Option<&QueryEntry> {
        self.entries.get(key)
    }

    /// Missing and stale entries must be fetched before they are read.
    pub fn needs_fetch(&self, key: &str) -> bool {
        self.entries.get(key).map_or(true, |entry| entry.stale)
    }

    pub fn store(&mut self, key: &str, data: Vec<Task>) {
        self.entries.insert(
            key.to_string(),
            QueryEntry {
                data: Some(data),
                stale: false,
                error: None,
            },
        );
    }

    /// Records a failed fetch. Previously fetched data stays readable.
    pub fn store_error(&mut self, key: &str, error: String) {
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.stale = false;
        entry.error = Some(error);
    }

    /// Marks the entry stale so the next read refetches it.
    pub fn invalidate(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entries_need_fetching() {
        let cache = QueryCache::new();
        assert!(cache.needs_fetch(TASKS_QUERY_KEY));
    }

    #[test]
    fn invalidate_marks_existing_entries_stale() {
        let mut cache = QueryCache::new();
        cache.store(TASKS_QUERY_KEY, Vec::new());
        assert!(!cache.needs_fetch(TASKS_QUERY_KEY));

        assert!(cache.invalidate(TASKS_QUERY_KEY));
        assert!(cache.needs_fetch(TASKS_QUERY_KEY));
        assert!(!cache.invalidate("other"));
    }

    #[test]
    fn failed_fetch_keeps_previous_data() {
        let mut cache = QueryCache::new();
        cache.store(TASKS_QUERY_KEY, Vec::new());
        cache.invalidate(TASKS_QUERY_KEY);
        cache.store_error(TASKS_QUERY_KEY, "http 500".into());

        let entry = cache.get(TASKS_QUERY_KEY).unwrap();
        assert_eq!(entry.data, Some(Vec::new()));
        assert_eq!(entry.error.as_deref(), Some("http 500"));
        assert!(!entry.stale);
    }
}
