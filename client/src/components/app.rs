use std::rc::Rc;

use crate::api::TaskApi;
use crate::cache::QueryCache;
use crate::components::add_task_form::AddTaskForm;
use crate::components::task_list::TaskList;
use crate::components::task_row::TaskRowView;
use crate::hooks::TaskHooks;

pub const LOAD_ERROR_MESSAGE: &str = "Unable to load tasks. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum AppView {
    Loading,
    Error(String),
    Ready { rows: Vec<TaskRowView> },
}

/// Top-level view. Owns the query cache every child hook shares.
pub struct App<A: TaskApi> {
    hooks: TaskHooks<A>,
    task_list: TaskList<A>,
    add_task_form: AddTaskForm<A>,
}

impl<A: TaskApi> App<A> {
    pub fn new(api: A) -> Self {
        let hooks = TaskHooks::new(Rc::new(api), QueryCache::shared());
        Self {
            task_list: TaskList::new(hooks.sibling()),
            add_task_form: AddTaskForm::new(hooks.sibling()),
            hooks,
        }
    }

    pub fn view(&self) -> AppView {
        let todos = self.hooks.todos();
        if todos.is_error() {
            return AppView::Error(LOAD_ERROR_MESSAGE.to_string());
        }
        match todos.data {
            Some(tasks) => AppView::Ready {
                rows: self.task_list.rows(&tasks),
            },
            None => AppView::Loading,
        }
    }

    pub fn task_list(&mut self) -> &mut TaskList<A> {
        &mut self.task_list
    }

    pub fn add_task_form(&mut self) -> &mut AddTaskForm<A> {
        &mut self.add_task_form
    }

    pub fn refresh(&self) {
        self.hooks.refetch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskStatus};
    use crate::testing::FakeApi;

    #[test]
    fn unreachable_api_shows_error_message() {
        let api = FakeApi::default();
        api.unavailable.set(true);
        let app = App::new(api);

        assert_eq!(app.view(), AppView::Error(LOAD_ERROR_MESSAGE.to_string()));
    }

    #[test]
    fn created_task_appears_in_the_list() {
        let mut app = App::new(FakeApi::with_tasks(&["first"]));
        assert!(matches!(app.view(), AppView::Ready { ref rows } if rows.len() == 1));

        let form = app.add_task_form();
        form.toggle();
        let draft = form.draft_mut();
        draft.title = "second".into();
        draft.description = "d".into();
        draft.due_date = "2025-01-01".into();
        draft.priority = Some(TaskPriority::Low);
        draft.status = Some(TaskStatus::Pending);
        form.submit().unwrap();

        let AppView::Ready { rows } = app.view() else {
            panic!("expected tasks");
        };
        let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert_eq!(rows[1].priority, "Low");
    }

    #[test]
    fn status_change_from_a_row_refreshes_the_view() {
        let mut app = App::new(FakeApi::with_tasks(&["first"]));
        let AppView::Ready { rows } = app.view() else {
            panic!("expected tasks");
        };
        assert_eq!(rows[0].status, "Pending");

        let task = app.task_list().hooks().todos().data.unwrap()[0].clone();
        let mut row = app.task_list().row(&task);
        row.change_status(TaskStatus::Completed).unwrap();

        let AppView::Ready { rows } = app.view() else {
            panic!("expected tasks");
        };
        assert_eq!(rows[0].status, "Completed");
    }
}
