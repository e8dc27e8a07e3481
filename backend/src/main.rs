use std::net::SocketAddr;

use anyhow::Context;
use tasks_server::{build_state, map_routes, settings::Settings, task_repository::open_and_count};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tasks_server=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // ── Settings ───────────────────────────────────────────────
    let settings = Settings::load().context("Failed to load settings")?;

    // ── Store ──────────────────────────────────────────────────
    let (repository, task_count) = open_and_count(&settings.database_url)
        .with_context(|| format!("Failed to open task store at {}", settings.database_url))?;
    info!(database_url = %settings.database_url, task_count, "task store ready");

    // ── Router ─────────────────────────────────────────────────
    let state = build_state(repository, &settings);
    let app = map_routes(state);

    // ── Start ──────────────────────────────────────────────────
    let address = settings.socket_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on http://{address}");
    info!("  Tasks: http://{address}/api/tasks");
    if settings.rate_limit_requests > 0 {
        info!(
            requests = settings.rate_limit_requests,
            window_secs = settings.rate_limit_window_in_seconds,
            "rate limiting enabled"
        );
    }

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("Server error")?;
    Ok(())
}
