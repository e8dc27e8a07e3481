pub mod add_task_form;
pub mod app;
pub mod task_list;
pub mod task_row;

pub use add_task_form::{AddTaskForm, TaskDraft};
pub use app::{App, AppView, LOAD_ERROR_MESSAGE};
pub use task_list::{BulkDeleteOutcome, TaskList};
pub use task_row::{EditForm, TaskRow, TaskRowView};
