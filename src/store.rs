//! In-memory order store. The single source of truth for the process
//! lifetime; orders are never deleted.

use anyhow::{Result, anyhow};
use std::sync::{Arc, RwLock};

use crate::domain::order::{LineItem, Order};

/// Thread-safe collection of all orders, in insertion order.
///
/// Ids are assigned from a counter under the write lock, so they are unique
/// and monotonically increasing within the process. `update` is an atomic
/// read-modify-write: callers can never interleave two transitions on the
/// same order.
#[derive(Clone)]
pub struct OrderStore {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    orders: Vec<Order>,
    next_id: u64,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                orders: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Creates and inserts a fresh `pending` order, assigning its id.
    pub fn create(
        &self,
        customer_name: String,
        customer_phone: String,
        delivery_address: String,
        items: Vec<LineItem>,
    ) -> Result<Order> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = inner.next_id;
        inner.next_id += 1;

        let order = Order::new(id, customer_name, customer_phone, delivery_address, items);
        inner.orders.push(order.clone());

        Ok(order)
    }

    pub fn get(&self, id: u64) -> Result<Option<Order>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(inner.orders.iter().find(|order| order.id == id).cloned())
    }

    /// Runs `mutate` against the stored order while holding the write lock
    /// and returns its result. `None` means the id is unknown.
    pub fn update<F, T>(&self, id: u64, mutate: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Order) -> T,
    {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(inner
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .map(mutate))
    }

    /// A consistent clone of every order, in insertion order.
    pub fn snapshot(&self) -> Result<Vec<Order>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(inner.orders.clone())
    }

    pub fn len(&self) -> Result<usize> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(inner.orders.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}
