// src/event.rs
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Buffered events per subscriber before a slow receiver starts lagging.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Observable notifications emitted by the market.
///
/// `NewAsset` is the authoritative way for an external observer to learn the
/// id assigned to a listing submitted concurrently with others.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum MarketEvent {
    NewAsset { seller: Uuid, name: String, id: u64 },
}

pub(crate) struct EventSink {
    tx: broadcast::Sender<MarketEvent>,
}

impl EventSink {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.tx.subscribe()
    }

    /// Emit to all current subscribers. A send error only means there are no
    /// receivers; emission must never fail a committed transition.
    pub(crate) fn emit(&self, event: MarketEvent) {
        let _ = self.tx.send(event);
    }
}
