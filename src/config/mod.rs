use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret compared verbatim against the x-api-key header
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub max_requests: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        Self::defaults(environment).with_env_overrides()
    }

    fn defaults(environment: Environment) -> Self {
        Self {
            environment,
            server: ServerConfig { port: 3000 },
            security: SecurityConfig {
                api_key: String::new(),
            },
            rate_limit: RateLimitConfig {
                // 100 requests per 15 minutes
                window_secs: 15 * 60,
                max_requests: 100,
            },
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("API_KEY") {
            self.security.api_key = v;
        }
        if let Ok(v) = env::var("RATE_LIMIT_WINDOW_SECS") {
            self.rate_limit.window_secs = v.parse().unwrap_or(self.rate_limit.window_secs);
        }
        if let Ok(v) = env::var("RATE_LIMIT_MAX_REQUESTS") {
            self.rate_limit.max_requests = v.parse().unwrap_or(self.rate_limit.max_requests);
        }
        self
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
