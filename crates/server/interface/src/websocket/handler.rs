//! Upgrade handling and per-connection lifecycle.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use ordex_server_infrastructure::realtime::{
    ConnectionRegistry, SUBSCRIBER_CHANNEL_CAPACITY, Subscriber,
};

use crate::auth::middleware::AuthenticatedUser;
use crate::state::AppState;

/// Unregisters the subscriber when the connection task ends, whatever the
/// exit path — peer close, read error, or a panic unwinding the task.
struct RegistrationGuard {
    registry: Arc<ConnectionRegistry>,
    id: String,
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        self.registry.unregister(&self.id);
    }
}

/// `GET /ws` — upgrade an authenticated request to a push connection.
///
/// The gate has already verified the credential; an unauthenticated
/// caller is rejected before this handler runs, so the handshake is never
/// performed for one.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Response {
    let subject = user.claims.sub.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, state, subject))
}

async fn handle_socket(socket: WebSocket, state: AppState, subject: String) {
    let subscriber_id = Uuid::new_v4().to_string();
    info!(subscriber_id = %subscriber_id, subject = %subject, "push connection established");

    let (tx, mut rx) = mpsc::channel::<String>(SUBSCRIBER_CHANNEL_CAPACITY);
    state
        .registry
        .register(Arc::new(Subscriber::new(subscriber_id.clone(), subject, tx)));
    let _guard = RegistrationGuard {
        registry: state.registry.clone(),
        id: subscriber_id.clone(),
    };

    let (mut sender, mut receiver) = socket.split();

    // Forward queued notifications to the socket.
    let forward_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sender.send(Message::Text(message.into())).await.is_err() {
                break;
            }
        }
    });

    // Inbound frames are read only to detect liveness; their content is
    // discarded.
    loop {
        match receiver.next().await {
            Some(Ok(Message::Close(_))) | None => {
                debug!(subscriber_id = %subscriber_id, "peer closed connection");
                break;
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                warn!(subscriber_id = %subscriber_id, error = %e, "read failed, dropping connection");
                break;
            }
        }
    }

    forward_task.abort();
    info!(subscriber_id = %subscriber_id, "push connection closed");
}
