//! # Out-of-Stock Events
//!
//! Products announce the moment their stock reaches exactly zero.
//!
//! ## Delivery Model
//! ```text
//! product.deduct_stock(2)        stock: 2 → 0
//!      │
//!      ▼
//! OutOfStockListeners::notify(&event)
//!      │
//!      ├──► listener #1   (registration order)
//!      ├──► listener #2
//!      └──► ...           all run before deduct_stock returns
//! ```
//!
//! Delivery is synchronous; there is no queue and no background thread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Emitted once when a deduction brings a product's stock to exactly zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfStockEvent {
    pub product_id: String,
    pub product_name: String,
    /// `"{name} is now out of stock!"`
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl OutOfStockEvent {
    pub fn new(product_id: &str, product_name: &str) -> Self {
        OutOfStockEvent {
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            message: format!("{} is now out of stock!", product_name),
            occurred_at: Utc::now(),
        }
    }
}

impl fmt::Display for OutOfStockEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

type Listener = Box<dyn Fn(&OutOfStockEvent)>;

/// Ordered registry of out-of-stock callbacks for one product.
#[derive(Default)]
pub struct OutOfStockListeners {
    listeners: Vec<Listener>,
}

impl OutOfStockListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&OutOfStockEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Invokes every listener in registration order.
    pub fn notify(&self, event: &OutOfStockEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for OutOfStockListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutOfStockListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
