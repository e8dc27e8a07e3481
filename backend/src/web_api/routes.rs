pub mod health_routes;
pub mod task_routes;

use axum::{
    http::{header, HeaderValue},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::app_state::SharedState;

pub const API_PREFIX: &str = "/api";

pub fn map_routes(app_state: SharedState) -> Router {
    let api = Router::new()
        .merge(health_routes::get_router())
        .merge(task_routes::get_router(app_state));

    Router::new()
        .nest(API_PREFIX, api)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
