use std::sync::Arc;

use crate::{rate_limiter::FixedWindowLimiter, task_service::TaskService};

pub struct AppState {
    pub task_service: TaskService,
    pub rate_limiter: FixedWindowLimiter,
}

pub type SharedState = Arc<AppState>;
