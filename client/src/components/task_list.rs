use std::collections::BTreeSet;

use tracing::info;

use crate::api::TaskApi;
use crate::components::task_row::{TaskRow, TaskRowView};
use crate::hooks::TaskHooks;
use crate::models::Task;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkDeleteOutcome {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

pub struct TaskList<A: TaskApi> {
    hooks: TaskHooks<A>,
    selected: BTreeSet<String>,
}

impl<A: TaskApi> TaskList<A> {
    pub fn new(hooks: TaskHooks<A>) -> Self {
        Self {
            hooks,
            selected: BTreeSet::new(),
        }
    }

    pub fn rows(&self, tasks: &[Task]) -> Vec<TaskRowView> {
        tasks
            .iter()
            .map(|task| TaskRowView::new(task, self.is_selected(&task.id)))
            .collect()
    }

    pub fn row(&self, task: &Task) -> TaskRow<A> {
        TaskRow::new(task.clone(), self.hooks.sibling())
    }

    pub fn toggle_selected(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn hooks(&self) -> &TaskHooks<A> {
        &self.hooks
    }

    /// Issues one delete per selected task. A failing delete does not stop
    /// the others; the selection is cleared afterwards either way.
    pub fn delete_selected(&mut self) -> BulkDeleteOutcome {
        let mut outcome = BulkDeleteOutcome::default();
        for id in std::mem::take(&mut self.selected) {
            match self.hooks.delete_task(&id) {
                Ok(()) => outcome.deleted.push(id),
                Err(_) => outcome.failed.push(id),
            }
        }
        info!(
            "bulk delete: {} deleted, {} failed",
            outcome.deleted.len(),
            outcome.failed.len()
        );
        outcome
    }
}
