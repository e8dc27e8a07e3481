
//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
    pub mod api_error;
}

pub use web_api::routes::map_routes;
pub use web_api::controllers::*;
pub use web_api::api_error;
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
}

pub use shared::models::*;
pub use shared::dto::*;
//---------------------------------------

//---------------------------------------
pub mod services {
    pub mod task_service;
}

pub use services::task_service;
//---------------------------------------

//---------------------------------------
pub mod throttling {
    pub mod rate_limiter;
}

pub use throttling::rate_limiter;
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_context;
    pub mod in_memory_task_repository;
    pub mod task_repository;
}

pub use data_access::*;
//---------------------------------------

use std::{sync::Arc, time::Duration};

use crate::app_state::{AppState, SharedState};
use crate::rate_limiter::FixedWindowLimiter;
use crate::settings::Settings;
use crate::task_repository::TaskRepository;
use crate::task_service::TaskService;

/// Wires a repository and the limiter settings into shared state.
pub fn build_state(repository: Arc<dyn TaskRepository>, settings: &Settings) -> SharedState {
    Arc::new(AppState {
        task_service: TaskService::new(repository),
        rate_limiter: FixedWindowLimiter::new(
            settings.rate_limit_requests,
            Duration::from_secs(settings.rate_limit_window_in_seconds),
        ),
    })
}
