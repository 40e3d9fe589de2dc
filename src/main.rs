mod app;
mod auth;
mod config;
mod error;
mod state;

use tracing_subscriber::EnvFilter;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::debug!(
        host = %config.host,
        port = config.port,
        hash_memory_kib = config.hash.memory_kib,
        hash_iterations = config.hash.iterations,
        hash_parallelism = config.hash.parallelism,
        "configuration loaded"
    );

    let state = AppState::init(&config).await?;
    app::serve(app::build_app(state), &config).await
}

/// `RUST_LOG` picks the filter; `LOG_FORMAT=json` switches to one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("authgate=debug,axum=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.with_target(false).json().init(),
        _ => builder.init(),
    }
}
