pub mod auth;
pub mod rate_limit;

pub use auth::api_key_auth_middleware;
pub use rate_limit::{client_identity, rate_limit_middleware, RateLimiter};
