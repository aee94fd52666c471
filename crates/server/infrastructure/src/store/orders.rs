//! Order records with store-assigned identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Assigned by the store on insert.
    #[serde(default)]
    pub id: u64,
    pub item_code: String,
    pub item: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug)]
pub struct OrderStore {
    orders: DashMap<u64, Order>,
    next_id: AtomicU64,
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store the order under the next identifier and return the stored
    /// record.
    pub fn insert(&self, mut order: Order) -> Order {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        order.id = id;
        self.orders.insert(id, order.clone());
        order
    }

    pub fn get(&self, id: u64) -> Option<Order> {
        self.orders.get(&id).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(item: &str) -> Order {
        Order {
            id: 0,
            item_code: "IC001".to_string(),
            item: item.to_string(),
            quantity: 1,
            price: 9.5,
            image: String::new(),
        }
    }

    #[test]
    fn ids_are_assigned_sequentially() {
        let store = OrderStore::new();

        let first = store.insert(order("Widget"));
        let second = store.insert(order("Gadget"));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.get(2).unwrap().item, "Gadget");
    }
}
