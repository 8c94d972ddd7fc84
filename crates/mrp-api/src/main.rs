//! # mrp-api -- Binary Entry Point
//!
//! Loads configuration, then serves the API on `0.0.0.0:$PORT`.

use mrp_api::config::AppConfig;
use mrp_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `.env` may carry RUST_LOG / LOG_FORMAT, so load before the subscriber.
    let config = AppConfig::load();
    init_tracing();

    let config = config.map_err(|e| {
        tracing::error!("Configuration failed: {e}");
        e
    })?;
    tracing::info!(
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        "upstream configured"
    );

    let port = config.port;
    let state = AppState::from_config(config).map_err(|e| {
        tracing::error!("Failed to create upstream client: {e}");
        e
    })?;

    let app = mrp_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("MRP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` filters (default `info`); `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
