//! Server startup wiring: router construction and the serve loop.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use ordex_server_interface::auth::middleware::require_auth;
use ordex_server_interface::http::{create_order, get_profile, login, register_user};
use ordex_server_interface::state::AppState;
use ordex_server_interface::websocket::ws_handler;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Build the application router over the shared state.
///
/// `/api/profile` and `/ws` sit behind the authentication gate; the gate
/// rejects before the handler (and for `/ws`, before the handshake) runs.
pub fn build_router(state: AppState) -> Router {
    let auth = from_fn_with_state(state.clone(), require_auth);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/users", post(register_user))
        .route("/api/login", post(login))
        .route("/order", post(create_order))
        .route("/api/profile", get(get_profile).route_layer(auth.clone()))
        .route("/ws", get(ws_handler).route_layer(auth))
        .layer(cors)
        .with_state(state)
}

/// Serve until interrupted.
pub async fn run(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install shutdown signal handler");
        return;
    }
    info!("shutting down gracefully...");
}
