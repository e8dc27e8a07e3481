//! Fixed-window request limiter in front of the task routes.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};
use tracing::warn;

use crate::{api_error::ApiError, app_state::SharedState};

const PRUNE_THRESHOLD: usize = 1024;
const ANONYMOUS: &str = "anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// At most `limit` requests per accessor inside each `window`.
/// A zero limit or a zero window turns limiting off.
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        self.limit > 0 && !self.window.is_zero()
    }

    pub fn check(&self, accessor: &str) -> RateDecision {
        self.check_at(accessor, Instant::now())
    }

    pub fn check_at(&self, accessor: &str, now: Instant) -> RateDecision {
        if !self.is_enabled() {
            return RateDecision::Allowed { remaining: u32::MAX };
        }

        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        if windows.len() >= PRUNE_THRESHOLD {
            let period = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < period);
        }

        let window = windows
            .entry(accessor.to_string())
            .or_insert(Window { started: now, count: 0 });
        if now.duration_since(window.started) >= self.window {
            *window = Window { started: now, count: 0 };
        }

        if window.count >= self.limit {
            let elapsed = now.duration_since(window.started);
            return RateDecision::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }

        window.count += 1;
        RateDecision::Allowed {
            remaining: self.limit - window.count,
        }
    }
}

/// Peer address when the server was started with connect info, else the
/// first X-Forwarded-For hop.
pub fn accessor_key(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .unwrap_or(ANONYMOUS)
        .to_string()
}

pub async fn rate_limit_middleware(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let accessor = accessor_key(&request);
    match state.rate_limiter.check(&accessor) {
        RateDecision::Allowed { .. } => Ok(next.run(request).await),
        RateDecision::Limited { retry_after } => {
            warn!(accessor = %accessor, "rate limit exceeded");
            Err(ApiError::TooManyRequests {
                retry_after_secs: retry_after.as_secs_f64().ceil() as u64,
            })
        }
    }
}
