pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use middleware::RateLimiter;
use store::UserStore;

/// Shared application state: the store, the rate limiter and the API key
/// secret, all injectable so tests can swap them out
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub limiter: Arc<RateLimiter>,
    pub api_key: Arc<str>,
}

/// Build the application router.
///
/// The /users surface carries the request pipeline as ordered layers,
/// outermost first: API key auth, then rate limiting, then the handler.
/// Payload validation for the mutating routes runs at the head of each
/// handler, before any store call. Rejection at any stage is terminal.
pub fn app(state: AppState) -> Router {
    let users = Router::new()
        .route("/users", post(handlers::users::create_user).get(handlers::users::list_users))
        .route("/users/stats", get(handlers::users::user_stats))
        .route(
            "/users/:id",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::api_key_auth_middleware,
        ));

    Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(users)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
