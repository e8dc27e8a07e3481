//! Client side of the task manager: an HTTP API client, a query cache with
//! one well-known key, data hooks that invalidate it on mutation, and
//! headless components that drive the hooks.

pub mod api;
pub mod cache;
pub mod components;
pub mod error;
pub mod hooks;
pub mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{HttpTaskApi, TaskApi};
pub use cache::{QueryCache, SharedCache, TASKS_QUERY_KEY};
pub use error::ClientError;
pub use hooks::{MutationState, QueryState, TaskHooks};
