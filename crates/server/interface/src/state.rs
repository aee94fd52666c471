//! Shared application state threaded through the router.

use std::sync::Arc;

use ordex_server_infrastructure::realtime::{ConnectionRegistry, OrderNotifier};
use ordex_server_infrastructure::store::{OrderStore, UserStore};

use crate::auth::jwt::JwtCodec;

/// State shared by every route handler and the authentication gate.
#[derive(Debug, Clone)]
pub struct AppState {
    pub codec: JwtCodec,
    pub registry: Arc<ConnectionRegistry>,
    pub notifier: OrderNotifier,
    pub users: Arc<UserStore>,
    pub orders: Arc<OrderStore>,
}

impl AppState {
    pub fn new(codec: JwtCodec) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        Self {
            codec,
            notifier: OrderNotifier::new(registry.clone()),
            registry,
            users: Arc::new(UserStore::new()),
            orders: Arc::new(OrderStore::new()),
        }
    }
}
