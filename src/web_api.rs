use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::Response,
    routing::any,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dispatch::InteractionDispatcher;

pub const INTERACTIONS_PATH: &str = "/interactions";

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<InteractionDispatcher>,
}

impl AppState {
    pub fn new(dispatcher: InteractionDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

// Every method is routed here so the dispatcher owns the 405 response.
async fn interactions(State(state): State<AppState>, request: Request) -> Response {
    state.dispatcher.dispatch(request).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(INTERACTIONS_PATH, any(interactions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_http_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, "interactions endpoint listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal");
}
