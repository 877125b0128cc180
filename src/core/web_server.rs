//! Health-check web server.
//!
//! Hosting platforms poll `/` and `/ping` to decide whether the process is
//! alive. Both routes answer with constant text and never touch bot state.

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::error::AppResult;

/// Body served on `/`
pub const ROOT_RESPONSE: &str = "Bot is running!";

/// Body served on `/ping`
pub const PING_RESPONSE: &str = "pong";

/// Builds the health router.
pub fn health_router() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/ping", get(ping_handler))
}

/// Start the health web server on `0.0.0.0:{port}`.
pub async fn start_web_server(port: u16) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    serve(listener).await
}

/// Serves the health router on an already bound listener.
pub async fn serve(listener: TcpListener) -> AppResult<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Starting web server on http://{}", addr);
        log::info!("  /      - Status text");
        log::info!("  /ping  - Liveness check");
    }

    axum::serve(listener, health_router()).await?;
    Ok(())
}

/// GET /: static status text.
async fn root_handler() -> &'static str {
    ROOT_RESPONSE
}

/// GET /ping: liveness check.
async fn ping_handler() -> &'static str {
    PING_RESPONSE
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_body(uri: &str) -> (StatusCode, String) {
        let response = health_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_returns_running_text() {
        let (status, body) = get_body("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Bot is running!");
    }

    #[tokio::test]
    async fn test_ping_returns_pong() {
        let (status, body) = get_body("/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "pong");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = get_body("/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
