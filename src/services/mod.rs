pub mod user_service;

pub use user_service::{UserService, UserPage, UserStats, DEFAULT_LIMIT, DEFAULT_PAGE};
