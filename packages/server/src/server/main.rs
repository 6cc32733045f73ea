// Main entry point for API server

use anyhow::{Context, Result};
use fact_check_core::{
    server::{build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first: it decides the log format
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(config.debug);

    tracing::info!(
        version = %config.app_version,
        model = %config.gemini_model,
        "Starting {}",
        config.app_name
    );
    if config.gemini_api_key.trim().is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; analysis requests will fail until it is configured");
    }

    let addr = config.bind_addr();
    let port = config.port;
    let app = build_app(AppState::new(config));

    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Human-readable output in debug mode, JSON lines otherwise.
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            "debug,hyper=info,reqwest=info".into()
        } else {
            "info,fact_check_core=debug,gemini_client=info,tower_http=info".into()
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    if debug {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
