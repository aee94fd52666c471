//! End-to-end tests over a real server socket.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::StreamExt;
use ordex_server_interface::auth::jwt::JwtCodec;
use ordex_server_interface::state::AppState;
use ordex_shared::realtime::OrderNotification;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite;

use crate::startup::build_router;

fn test_state() -> AppState {
    AppState::new(JwtCodec::new("e2e-secret").unwrap())
}

async fn spawn_server(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not reached within 2s");
}

#[tokio::test]
async fn authenticated_subscriber_receives_order_notification() {
    let state = test_state();
    let notifier = state.notifier.clone();
    let registry = state.registry.clone();
    let token = state.codec.issue("alice").unwrap();
    let addr = spawn_server(state).await;

    let url = format!("ws://{addr}/ws?token={token}");
    let (mut socket, response) = tokio_tungstenite::connect_async(url.as_str()).await.unwrap();
    assert_eq!(
        response.status(),
        tungstenite::http::StatusCode::SWITCHING_PROTOCOLS
    );

    // Registration happens on the server's connection task after the
    // handshake completes.
    wait_for(|| registry.len() == 1).await;

    let event = OrderNotification {
        order_id: "1".to_string(),
        item_code: "IC001".to_string(),
        item: "Widget".to_string(),
        quantity: 2,
    };
    assert_eq!(notifier.notify(&event).unwrap(), 1);

    let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let text = match frame {
        tungstenite::Message::Text(text) => text,
        other => panic!("expected a text frame, got {other:?}"),
    };

    let value: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "orderID": "1",
            "itemCode": "IC001",
            "item": "Widget",
            "quantity": 2,
        })
    );

    socket.close(None).await.unwrap();
    wait_for(|| registry.is_empty()).await;
}

#[tokio::test]
async fn upgrade_without_token_is_refused_before_any_handshake() {
    let state = test_state();
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let url = format!("ws://{addr}/ws");
    let err = tokio_tungstenite::connect_async(url.as_str())
        .await
        .unwrap_err();

    match err {
        tungstenite::Error::Http(response) => {
            assert_eq!(
                response.status(),
                tungstenite::http::StatusCode::UNAUTHORIZED
            );
        }
        other => panic!("expected an HTTP rejection, got {other:?}"),
    }
    assert!(registry.is_empty());
}

#[tokio::test]
async fn upgrade_with_invalid_token_is_refused() {
    let state = test_state();
    let registry = state.registry.clone();
    // Signed under a different secret.
    let foreign_token = JwtCodec::new("other-secret")
        .unwrap()
        .issue("alice")
        .unwrap();
    let addr = spawn_server(state).await;

    let url = format!("ws://{addr}/ws?token={foreign_token}");
    let err = tokio_tungstenite::connect_async(url.as_str())
        .await
        .unwrap_err();

    match err {
        tungstenite::Error::Http(response) => {
            assert_eq!(
                response.status(),
                tungstenite::http::StatusCode::UNAUTHORIZED
            );
        }
        other => panic!("expected an HTTP rejection, got {other:?}"),
    }
    assert!(registry.is_empty());
}

#[tokio::test]
async fn disconnected_peer_leaves_the_registry() {
    let state = test_state();
    let registry = state.registry.clone();
    let token = state.codec.issue("alice").unwrap();
    let addr = spawn_server(state).await;

    let url = format!("ws://{addr}/ws?token={token}");
    let (socket, _) = tokio_tungstenite::connect_async(url.as_str()).await.unwrap();
    wait_for(|| registry.len() == 1).await;

    // Abrupt drop, no close frame: the server's read fails and the
    // connection unregisters itself.
    drop(socket);
    wait_for(|| registry.is_empty()).await;
}
