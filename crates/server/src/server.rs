use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use engine::Engine;

use crate::{Messages, establishments, releases, statements};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub messages: Arc<Messages>,
}

/// Builds the API router over `state`.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/api/establishments",
            get(establishments::list).post(establishments::create),
        )
        .route(
            "/api/establishments/{id}",
            put(establishments::update).delete(establishments::remove),
        )
        .route("/api/releases", get(releases::list).post(releases::create))
        .route(
            "/api/releases/{id}",
            put(releases::update).delete(releases::remove),
        )
        .route("/api/statements", get(statements::list))
        .with_state(state)
}

pub async fn run(engine: Engine, messages: Messages) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, messages, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    messages: Messages,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        messages: Arc::new(messages),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    messages: Messages,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, messages, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
