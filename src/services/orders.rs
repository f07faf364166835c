//! Order lifecycle operations: placement, admin decisions, payment marking.
//!
//! Every committed mutation publishes a fresh full-list snapshot to the
//! admin feed, so the dashboard never has to poll.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::domain::order::{Decision, InvalidTransition, LineItem, Order, OrderStatus};
use crate::error::AppError;
use crate::feed::OrderFeed;
use crate::store::OrderStore;
use crate::validation::{
    CUSTOMER_NAME_MAX_LEN, CUSTOMER_PHONE_MAX_LEN, DELIVERY_ADDRESS_MAX_LEN, sanitize_string,
    validate_max_len, validate_required,
};

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    #[serde(default)]
    pub dish_ids: Vec<u32>,
}

/// The customer-facing polling view: just enough to drive the order page.
#[derive(Debug, Clone, Serialize)]
pub struct OrderStatusView {
    pub status: OrderStatus,
    pub paid: bool,
}

#[derive(Clone)]
pub struct OrderService {
    catalog: Arc<Catalog>,
    store: OrderStore,
    feed: OrderFeed,
}

impl OrderService {
    pub fn new(catalog: Arc<Catalog>, store: OrderStore, feed: OrderFeed) -> Self {
        Self {
            catalog,
            store,
            feed,
        }
    }

    /// Validates the submission and creates a `pending` order.
    ///
    /// Unknown dish ids are dropped rather than rejected (best-effort
    /// selection); an empty resolved set fails validation and creates
    /// nothing.
    pub fn place_order(&self, req: PlaceOrderRequest) -> Result<Order, AppError> {
        let customer_name = sanitize_string(&req.customer_name);
        validate_required("customer_name", &customer_name)?;
        validate_max_len("customer_name", &customer_name, CUSTOMER_NAME_MAX_LEN)?;

        let customer_phone = sanitize_string(&req.customer_phone);
        validate_required("customer_phone", &customer_phone)?;
        validate_max_len("customer_phone", &customer_phone, CUSTOMER_PHONE_MAX_LEN)?;

        let delivery_address = sanitize_string(&req.delivery_address);
        validate_required("delivery_address", &delivery_address)?;
        validate_max_len(
            "delivery_address",
            &delivery_address,
            DELIVERY_ADDRESS_MAX_LEN,
        )?;

        // Walking the catalog keeps line items in menu order and drops
        // duplicate selections along with unknown ids.
        let items: Vec<LineItem> = self
            .catalog
            .dishes()
            .iter()
            .filter(|dish| req.dish_ids.contains(&dish.id))
            .map(LineItem::from)
            .collect();

        if items.is_empty() {
            return Err(AppError::Validation("no dishes selected".to_string()));
        }

        let order = self
            .store
            .create(customer_name, customer_phone, delivery_address, items)?;

        tracing::info!(
            order_id = order.id,
            total = order.total,
            items = order.items.len(),
            "order placed"
        );
        self.broadcast_snapshot();

        Ok(order)
    }

    pub fn get(&self, id: u64) -> Result<Order, AppError> {
        self.store
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("order {}", id)))
    }

    pub fn status(&self, id: u64) -> Result<OrderStatusView, AppError> {
        let order = self.get(id)?;
        Ok(OrderStatusView {
            status: order.status,
            paid: order.paid,
        })
    }

    pub fn list(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.store.snapshot()?)
    }

    pub fn count(&self) -> Result<usize, AppError> {
        Ok(self.store.len()?)
    }

    /// Applies an admin accept/decline verdict.
    pub fn decide(&self, id: u64, decision: Decision) -> Result<Order, AppError> {
        let outcome = self
            .store
            .update(id, |order| {
                order.apply(decision)?;
                Ok::<_, InvalidTransition>(order.clone())
            })?
            .ok_or_else(|| AppError::NotFound(format!("order {}", id)))?;

        let order = outcome.map_err(|err| AppError::InvalidTransition(err.to_string()))?;

        tracing::info!(order_id = order.id, status = %order.status, "admin decision applied");
        self.broadcast_snapshot();

        Ok(order)
    }

    /// Marks an awaiting-payment order as paid after the admin verified the
    /// payment out of band.
    pub fn mark_paid(&self, id: u64) -> Result<Order, AppError> {
        let outcome = self
            .store
            .update(id, |order| {
                order.mark_paid()?;
                Ok::<_, InvalidTransition>(order.clone())
            })?
            .ok_or_else(|| AppError::NotFound(format!("order {}", id)))?;

        let order = outcome.map_err(|err| AppError::InvalidTransition(err.to_string()))?;

        tracing::info!(order_id = order.id, "order marked paid");
        self.broadcast_snapshot();

        Ok(order)
    }

    fn broadcast_snapshot(&self) {
        match self.store.snapshot() {
            Ok(snapshot) => self.feed.publish(snapshot),
            Err(err) => tracing::error!("failed to snapshot orders for feed: {}", err),
        }
    }
}
