//! Order creation and the notification trigger.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

use ordex_server_infrastructure::store::Order;
use ordex_shared::realtime::OrderNotification;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub item_code: String,
    pub item: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

/// `POST /order` — store the order, then fan the created event out to
/// every live subscriber.
///
/// Broadcast problems are logged, never surfaced: order creation does not
/// depend on anyone listening.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Response {
    let order = state.orders.insert(Order {
        id: 0,
        item_code: request.item_code,
        item: request.item,
        quantity: request.quantity,
        price: request.price,
        image: request.image,
    });

    let event = OrderNotification {
        order_id: order.id.to_string(),
        item_code: order.item_code.clone(),
        item: order.item.clone(),
        quantity: order.quantity,
    };
    if let Err(e) = state.notifier.notify(&event) {
        warn!(order_id = order.id, error = %e, "order notification broadcast incomplete");
    }

    (StatusCode::CREATED, Json(order)).into_response()
}
