// src/asset.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single fixed-price listing.
///
/// Invariants:
/// - `id`, `name`, `price` and `seller` are immutable after creation
/// - `buyer` is set exactly once, by a completed purchase, and never unset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    pub price: u64,
    pub seller: Uuid,
    pub buyer: Option<Uuid>,
    pub listed_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(id: u64, name: &str, price: u64, seller: Uuid) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            seller,
            buyer: None,
            listed_at: Utc::now(),
        }
    }

    pub fn is_sold(&self) -> bool {
        self.buyer.is_some()
    }
}
