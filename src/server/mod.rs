//! Read-only HTTP API over the article store.

pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::app::Result;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/articles", get(handlers::list_articles))
        .route("/articles/{id}", get(handlers::get_article))
        .with_state(state)
}

/// Serve until the token is cancelled.
pub async fn run(addr: SocketAddr, state: AppState, token: CancellationToken) -> Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await?;

    Ok(())
}
