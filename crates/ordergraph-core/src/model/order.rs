use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::delivery::{Delivery, DeliveryStatus};
use super::line_item::LineItem;
use super::member::Member;
use super::product::Product;
use crate::errors::{OrderGraphError, Result};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Placed,
    Cancelled,
}

impl OrderStatus {
    /// Column value stored in `orders.status`
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = OrderGraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PLACED" => Ok(OrderStatus::Placed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(OrderGraphError::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order - the root aggregate
///
/// An order exclusively owns its delivery and its line items. The member is
/// referenced by id only, and line items reference products by id, so the
/// graph has no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier (`None` until persisted)
    pub id: Option<i64>,

    /// Ordering member (immutable after creation)
    pub member_id: i64,

    /// Delivery created together with the order
    pub delivery: Delivery,

    /// Line items in creation order; never empty
    pub line_items: Vec<LineItem>,

    /// Creation instant shared by the order, its delivery and its line items
    pub order_date: DateTime<Utc>,

    pub status: OrderStatus,
}

impl Order {
    /// Place a new order for `member`
    ///
    /// The delivery address is copied from the member.
    ///
    /// # Errors
    ///
    /// - `EmptyOrder` if `line_items` is empty
    /// - `Internal` if the member was never persisted
    pub fn place(
        member: &Member,
        line_items: Vec<LineItem>,
        order_date: DateTime<Utc>,
    ) -> Result<Self> {
        let member_id = member.id.ok_or_else(|| OrderGraphError::Internal {
            message: format!("member '{}' has no id", member.name),
        })?;

        if line_items.is_empty() {
            return Err(OrderGraphError::EmptyOrder);
        }

        Ok(Self {
            id: None,
            member_id,
            delivery: Delivery::ready(member.address.clone()),
            line_items,
            order_date,
            status: OrderStatus::Placed,
        })
    }

    /// Cancel the order and return every line item's quantity to stock
    ///
    /// `products` must contain every product referenced by the line items.
    /// Nothing is mutated unless the whole cancellation succeeds.
    ///
    /// # Errors
    ///
    /// - `AlreadyCancelled` if the order is already cancelled
    /// - `DeliveryCompleted` if the delivery has completed
    /// - `ProductNotFound` if a referenced product is missing from `products`
    /// - `StockOverflow` if returning the stock would overflow
    pub fn cancel(&mut self, products: &mut BTreeMap<i64, Product>) -> Result<()> {
        let order_id = self.id.unwrap_or_default();

        if self.status == OrderStatus::Cancelled {
            return Err(OrderGraphError::AlreadyCancelled { order_id });
        }
        if self.delivery.is_completed() {
            return Err(OrderGraphError::DeliveryCompleted { order_id });
        }
        // a product may appear in several lines; check the summed return
        let mut returned: BTreeMap<i64, u32> = BTreeMap::new();
        for line in &self.line_items {
            let product = products
                .get(&line.product_id)
                .ok_or(OrderGraphError::ProductNotFound {
                    product_id: line.product_id,
                })?;
            let total = returned.entry(line.product_id).or_insert(0);
            *total = total
                .checked_add(line.count)
                .ok_or(OrderGraphError::StockOverflow {
                    product_id: line.product_id,
                    stock: product.stock_quantity,
                    quantity: line.count,
                })?;
            product.can_add_stock(*total)?;
        }

        for (product_id, quantity) in returned {
            if let Some(product) = products.get_mut(&product_id) {
                product.add_stock(quantity)?;
            }
        }
        self.status = OrderStatus::Cancelled;

        Ok(())
    }

    /// Mark the delivery as completed; completing twice is a no-op
    ///
    /// # Errors
    ///
    /// Returns `CancelledDelivery` if the order was cancelled.
    pub fn complete_delivery(&mut self) -> Result<()> {
        if self.status == OrderStatus::Cancelled {
            return Err(OrderGraphError::CancelledDelivery {
                order_id: self.id.unwrap_or_default(),
            });
        }
        self.delivery.status = DeliveryStatus::Completed;
        Ok(())
    }

    pub fn total_price(&self) -> i64 {
        self.line_items.iter().map(LineItem::total_price).sum()
    }
}
