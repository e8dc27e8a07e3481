use axum::{middleware, routing::get, Router};

use crate::{app_state::SharedState, rate_limiter::rate_limit_middleware, task_controller::TaskController};

pub const ROUTER_PATH: &str = "/tasks";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(TaskController::find_all).post(TaskController::create))
        .route(
            format!("{}/", ROUTER_PATH).as_str(),
            get(TaskController::missing_id)
                .patch(TaskController::missing_id)
                .delete(TaskController::missing_id),
        )
        .route(
            format!("{}/:id", ROUTER_PATH).as_str(),
            get(TaskController::find_one)
                .patch(TaskController::update)
                .delete(TaskController::remove),
        )
        .layer(middleware::from_fn_with_state(app_state.clone(), rate_limit_middleware))
        .with_state(app_state)
}
