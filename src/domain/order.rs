//! Order domain entity and its lifecycle state machine.
//! Framework-agnostic; the HTTP layer only ever sees snapshots of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::catalog::Dish;

/// Lifecycle status of an order.
///
/// ```text
/// pending --accept--> payment_pending --mark_paid--> paid
/// pending --decline--> declined
/// payment_pending --decline--> declined
/// ```
///
/// `declined` and `paid` are terminal. Acceptance has no separate status of
/// its own: an accepted order is immediately awaiting payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    PaymentPending,
    Declined,
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::PaymentPending => "payment_pending",
            OrderStatus::Declined => "declined",
            OrderStatus::Paid => "paid",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Declined | OrderStatus::Paid)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admin's verdict on a pending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Decline,
}

/// A dish copied out of the catalog at order-creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub dish_id: u32,
    pub name: String,
    pub price: u32,
}

impl From<&Dish> for LineItem {
    fn from(dish: &Dish) -> Self {
        Self {
            dish_id: dish.id,
            name: dish.name.clone(),
            price: dish.price,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot {action} an order in status {from}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub action: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub items: Vec<LineItem>,
    pub total: u32,
    pub status: OrderStatus,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a fresh order in `pending`. `total` is derived from the line
    /// items here and never independently mutated afterwards.
    pub fn new(
        id: u64,
        customer_name: String,
        customer_phone: String,
        delivery_address: String,
        items: Vec<LineItem>,
    ) -> Self {
        let total = items.iter().map(|item| item.price).sum();
        Self {
            id,
            customer_name,
            customer_phone,
            delivery_address,
            items,
            total,
            status: OrderStatus::Pending,
            paid: false,
            created_at: Utc::now(),
        }
    }

    // Transitions mutate only on success; an Err leaves the order untouched.

    pub fn accept(&mut self) -> Result<(), InvalidTransition> {
        match self.status {
            OrderStatus::Pending => {
                self.status = OrderStatus::PaymentPending;
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                action: "accept",
            }),
        }
    }

    pub fn decline(&mut self) -> Result<(), InvalidTransition> {
        match self.status {
            OrderStatus::Pending | OrderStatus::PaymentPending => {
                self.status = OrderStatus::Declined;
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                action: "decline",
            }),
        }
    }

    pub fn mark_paid(&mut self) -> Result<(), InvalidTransition> {
        match self.status {
            OrderStatus::PaymentPending => {
                self.status = OrderStatus::Paid;
                self.paid = true;
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                action: "mark paid",
            }),
        }
    }

    pub fn apply(&mut self, decision: Decision) -> Result<(), InvalidTransition> {
        match decision {
            Decision::Accept => self.accept(),
            Decision::Decline => self.decline(),
        }
    }
}
