//! Read-side views of the order aggregate.
//!
//! Nothing here holds a back-reference: headers and line-item views carry
//! plain ids and the scalar fields each loading strategy produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::address::Address;
use super::delivery::Delivery;
use super::member::Member;
use super::order::OrderStatus;
use super::product::Product;
use crate::errors::{OrderGraphError, Result};

// ========== Explicitly staged associations ==========

/// An association that has either been loaded or still needs a round trip
///
/// `key` is the identifier the store needs to resolve the association:
/// the foreign key for to-one associations, the owning order id for
/// collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association<T> {
    Unloaded { key: i64 },
    Loaded(T),
}

impl<T> Association<T> {
    pub fn unloaded(key: i64) -> Self {
        Association::Unloaded { key }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Association::Loaded(_))
    }

    /// Key to resolve with, or `None` once loaded
    pub fn pending_key(&self) -> Option<i64> {
        match self {
            Association::Unloaded { key } => Some(*key),
            Association::Loaded(_) => None,
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Association::Loaded(value) => Some(value),
            Association::Unloaded { .. } => None,
        }
    }

    /// Take the loaded value, failing if it was never resolved
    ///
    /// # Errors
    ///
    /// Returns `Internal` naming `what` if the association is still unloaded.
    pub fn into_loaded(self, what: &str) -> Result<T> {
        match self {
            Association::Loaded(value) => Ok(value),
            pending @ Association::Unloaded { .. } => Err(never_loaded(what, &pending)),
        }
    }
}

/// Order row as the bare root query returns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BareOrder {
    pub order_id: i64,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub member: Association<Member>,
    pub delivery: Association<Delivery>,
    pub line_items: Association<Vec<BareLineItem>>,
}

/// Line-item row whose product has not necessarily been fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BareLineItem {
    pub id: i64,
    pub order_id: i64,
    pub product: Association<Product>,
    pub order_price: i64,
    pub count: u32,
}

impl BareLineItem {
    /// # Errors
    ///
    /// Fails if the product was never resolved.
    pub fn into_view(self) -> Result<LineItemView> {
        let product = self.product.into_loaded("product")?;
        Ok(LineItemView {
            order_id: self.order_id,
            product_name: product.name,
            order_price: self.order_price,
            count: self.count,
        })
    }
}

impl BareOrder {
    /// Header built from the resolved member and delivery
    ///
    /// # Errors
    ///
    /// Fails if the member or delivery is unloaded.
    pub fn header(&self) -> Result<OrderHeader> {
        let member = self.member.loaded().ok_or_else(|| never_loaded("member", &self.member))?;
        let delivery = self
            .delivery
            .loaded()
            .ok_or_else(|| never_loaded("delivery", &self.delivery))?;

        Ok(OrderHeader {
            order_id: self.order_id,
            member_name: member.name.clone(),
            order_date: self.order_date,
            status: self.status,
            delivery_address: delivery.address.clone(),
        })
    }

    /// Collapse a fully resolved bare order into an aggregate
    ///
    /// # Errors
    ///
    /// Fails if any association (including a line item's product) is unloaded.
    pub fn into_aggregate(self) -> Result<OrderAggregate> {
        let header = self.header()?;
        let line_items = self
            .line_items
            .into_loaded("line_items")?
            .into_iter()
            .map(BareLineItem::into_view)
            .collect::<Result<Vec<_>>>()?;

        Ok(OrderAggregate { header, line_items })
    }
}

fn never_loaded<T>(what: &str, association: &Association<T>) -> OrderGraphError {
    OrderGraphError::Internal {
        message: format!(
            "{} association (key {}) was never loaded",
            what,
            association.pending_key().unwrap_or_default()
        ),
    }
}

// ========== Joined views ==========

/// Root header with every to-one association already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHeader {
    pub order_id: i64,
    pub member_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub delivery_address: Address,
}

impl OrderHeader {
    pub fn to_summary(&self) -> OrderSummaryDto {
        OrderSummaryDto {
            order_id: self.order_id,
            member_name: self.member_name.clone(),
            order_date: self.order_date,
            status: self.status,
            delivery_address: self.delivery_address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemView {
    pub order_id: i64,
    pub product_name: String,
    pub order_price: i64,
    pub count: u32,
}

/// One row of the flat five-table join
///
/// Header fields repeat on every line item of the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub order_id: i64,
    pub member_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub delivery_address: Address,
    pub product_name: String,
    pub order_price: i64,
    pub count: u32,
}

impl FlatRow {
    pub fn header(&self) -> OrderHeader {
        OrderHeader {
            order_id: self.order_id,
            member_name: self.member_name.clone(),
            order_date: self.order_date,
            status: self.status,
            delivery_address: self.delivery_address.clone(),
        }
    }

    pub fn line_item(&self) -> LineItemView {
        LineItemView {
            order_id: self.order_id,
            product_name: self.product_name.clone(),
            order_price: self.order_price,
            count: self.count,
        }
    }
}

/// A root header plus its line items, in load order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAggregate {
    pub header: OrderHeader,
    pub line_items: Vec<LineItemView>,
}

impl OrderAggregate {
    pub fn into_dto(self) -> OrderDto {
        let h = self.header;
        OrderDto {
            order_id: h.order_id,
            member_name: h.member_name,
            order_date: h.order_date,
            status: h.status,
            delivery_address: h.delivery_address,
            line_items: self
                .line_items
                .into_iter()
                .map(|line| LineItemDto {
                    product_name: line.product_name,
                    unit_price: line.order_price,
                    quantity: line.count,
                })
                .collect(),
        }
    }
}

// ========== Output DTOs ==========

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDto {
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: u32,
}

/// Fully populated order as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: i64,
    pub member_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub delivery_address: Address,
    pub line_items: Vec<LineItemDto>,
}

/// Order without its line items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryDto {
    pub order_id: i64,
    pub member_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub delivery_address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn seoul() -> Address {
        Address::new("Seoul", "Teheran-ro", "14464")
    }

    fn flat_row(product: &str, price: i64, count: u32) -> FlatRow {
        FlatRow {
            order_id: 4,
            member_name: "userA".to_string(),
            order_date: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            status: OrderStatus::Placed,
            delivery_address: seoul(),
            product_name: product.to_string(),
            order_price: price,
            count,
        }
    }

    #[test]
    fn test_flat_row_splits_into_header_and_line() {
        let row = flat_row("JPA1 BOOK", 10000, 1);
        assert_eq!(row.header().order_id, 4);
        assert_eq!(row.line_item().product_name, "JPA1 BOOK");
        assert_eq!(row.line_item().order_id, 4);
    }

    #[test]
    fn test_dto_serializes_camel_case() {
        let row = flat_row("JPA1 BOOK", 10000, 1);
        let dto = OrderAggregate {
            header: row.header(),
            line_items: vec![row.line_item()],
        }
        .into_dto();

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["orderId"], 4);
        assert_eq!(json["memberName"], "userA");
        assert_eq!(json["status"], "PLACED");
        assert_eq!(json["deliveryAddress"]["city"], "Seoul");
        assert_eq!(json["lineItems"][0]["productName"], "JPA1 BOOK");
        assert_eq!(json["lineItems"][0]["unitPrice"], 10000);
        assert_eq!(json["lineItems"][0]["quantity"], 1);
    }

    #[test]
    fn test_unloaded_association_refuses_to_collapse() {
        let bare = BareOrder {
            order_id: 4,
            order_date: Utc::now(),
            status: OrderStatus::Placed,
            member: Association::unloaded(1),
            delivery: Association::unloaded(5),
            line_items: Association::unloaded(4),
        };
        assert_eq!(bare.member.pending_key(), Some(1));
        assert!(!bare.delivery.is_loaded());

        let err = bare.into_aggregate().unwrap_err();
        assert!(matches!(err, OrderGraphError::Internal { .. }));
    }
}
