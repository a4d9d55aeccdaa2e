mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use mandi_catalog::FileCatalog;
use mandi_recipes::{RecipeClient, RetryPolicy};

use crate::api::{build_app, AppState};
use crate::middleware::RateLimitState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mandi_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, "starting mandi-server");

    let catalog = Arc::new(FileCatalog::load(&config.catalog_path)?);

    let recipes = match &config.recipe_base_url {
        Some(base_url) => RecipeClient::with_base_url(
            config.recipe_api_key.as_deref(),
            config.recipe_request_timeout_secs,
            base_url,
        )?,
        None => RecipeClient::new(
            config.recipe_api_key.as_deref(),
            config.recipe_request_timeout_secs,
        )?,
    };

    let state = AppState {
        catalog,
        recipes: Arc::new(recipes),
        retry: RetryPolicy {
            max_retries: config.recipe_max_retries,
            backoff_base_ms: config.recipe_retry_backoff_base_ms,
        },
    };

    let rate_limit = RateLimitState::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    );

    let app = build_app(state, rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
