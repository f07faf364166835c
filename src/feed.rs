//! Fan-out of order-list snapshots to connected admin dashboards.
//!
//! The feed carries no state of its own: every message is a complete,
//! consistent snapshot of the store at commit time, so a subscriber that
//! drops or lags simply renders the next snapshot it receives.

use tokio::sync::broadcast;

use crate::domain::order::Order;

const FEED_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct OrderFeed {
    tx: broadcast::Sender<Vec<Order>>,
}

impl OrderFeed {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(FEED_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Vec<Order>> {
        self.tx.subscribe()
    }

    /// Publishes a snapshot to every connected subscriber. A send error only
    /// means no admin is currently connected.
    pub fn publish(&self, snapshot: Vec<Order>) {
        if self.tx.send(snapshot).is_err() {
            tracing::trace!("no admin feed subscribers connected");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for OrderFeed {
    fn default() -> Self {
        Self::new()
    }
}
