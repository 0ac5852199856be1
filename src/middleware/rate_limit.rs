use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::config::RateLimitConfig;
use crate::error::ApiError;
use crate::AppState;

/// Sliding-window rate limiter keyed by client identity.
///
/// Each identity owns a queue of admit timestamps. A request is admitted
/// when, after pruning entries older than the window, fewer than
/// `max_requests` remain; rejected requests are not recorded, so they
/// never consume quota. Prune, count and record happen under one lock,
/// which keeps concurrent requests from the same identity from slipping
/// past the quota together.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    clients: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            window,
            max_requests,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(Duration::from_secs(config.window_secs), config.max_requests)
    }

    pub fn try_acquire(&self, identity: &str) -> bool {
        self.try_acquire_at(identity, Instant::now())
    }

    /// Window check against an explicit clock reading, for deterministic tests
    pub fn try_acquire_at(&self, identity: &str, now: Instant) -> bool {
        let mut clients = self
            .clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Drop identities whose newest admit has aged out of the window,
        // so a rotating identity stream cannot grow the map unboundedly
        clients.retain(|_, window| {
            window
                .back()
                .is_some_and(|&newest| now.duration_since(newest) < self.window)
        });

        let window = clients.entry(identity.to_string()).or_default();

        while let Some(&oldest) = window.front() {
            if now.duration_since(oldest) >= self.window {
                window.pop_front();
            } else {
                break;
            }
        }

        if window.len() >= self.max_requests {
            return false;
        }
        window.push_back(now);
        true
    }
}

/// Resolve the identity that keys rate-limit state: the first address in
/// x-forwarded-for, else the peer address from the connection.
pub fn client_identity(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|addr| addr.trim().to_string())
        .filter(|addr| !addr.is_empty())
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let identity = client_identity(request.headers(), peer);

    if !state.limiter.try_acquire(&identity) {
        tracing::warn!("Rate limit exceeded for client {}", identity);
        return Err(ApiError::too_many_requests(
            "Too many requests, please try again later",
        ));
    }

    Ok(next.run(request).await)
}
