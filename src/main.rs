use std::net::SocketAddr;
use std::sync::Arc;

use user_directory_api::config;
use user_directory_api::middleware::RateLimiter;
use user_directory_api::store::{MemoryUserStore, PgUserStore, UserStore};
use user_directory_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up API_KEY, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_directory_api=info,tower_http=info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting user directory API in {:?} mode", config.environment);

    if config.security.api_key.is_empty() {
        tracing::warn!("API_KEY is not set; all authenticated requests will be rejected");
    }

    let store: Arc<dyn UserStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = PgUserStore::connect(&url).await?;
            tracing::info!("Using Postgres user store");
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory user store");
            Arc::new(MemoryUserStore::new())
        }
    };

    let state = AppState {
        store,
        limiter: Arc::new(RateLimiter::from_config(&config.rate_limit)),
        api_key: config.security.api_key.as_str().into(),
    };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", bind_addr);

    // ConnectInfo feeds the rate limiter peer addresses when no
    // x-forwarded-for header is present
    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
