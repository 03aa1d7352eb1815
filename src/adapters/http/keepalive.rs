//! Keep-alive HTTP listener.
//!
//! A minimal router answering uptime-monitor pings so the host keeps the
//! bot process alive. Not part of any workflow.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the keep-alive router.
pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
}

/// Binds and serves the keep-alive listener until the process exits.
pub async fn serve(addr: std::net::SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "keep-alive listener up");
    axum::serve(listener, router()).await
}

async fn root() -> &'static str {
    "Bot is running."
}

async fn health() -> &'static str {
    "ok"
}
