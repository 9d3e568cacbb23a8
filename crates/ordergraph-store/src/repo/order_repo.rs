//! Order aggregate persistence
//!
//! Each write loads the aggregate and the products it touches, applies the
//! domain rule in memory, then writes everything inside one transaction.
//! A rule violation returns before the first write, and any SQL failure
//! drops the transaction, which rolls it back.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ordergraph_core::errors::OrderGraphError;
use ordergraph_core::model::{Delivery, LineItem, Order, Product};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};

use crate::errors::{from_rusqlite, Result};
use crate::repo::{MemberRepo, ProductRepo};
use crate::rows;

/// One requested product line of a new order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i64,
    pub count: u32,
}

pub struct OrderRepo;

impl OrderRepo {
    /// Place an order for `member_id` and return its id
    ///
    /// The order, its delivery, its line items and every stock decrement
    /// commit together or not at all. A product may appear in several lines.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown member or product
    /// - `InvalidInput` for no lines or a zero count
    /// - `InsufficientStock` when a product cannot cover its lines
    pub fn create_order(
        conn: &mut Connection,
        member_id: i64,
        lines: &[OrderLine],
        order_date: DateTime<Utc>,
    ) -> Result<i64> {
        let tx = write_tx(conn)?;
        let order_id = Self::insert_order(&tx, member_id, lines, order_date)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(order_id, member_id, lines = lines.len(), "order created");
        Ok(order_id)
    }

    /// [`OrderRepo::create_order`] inside a transaction the caller owns
    pub fn insert_order(
        tx: &Connection,
        member_id: i64,
        lines: &[OrderLine],
        order_date: DateTime<Utc>,
    ) -> Result<i64> {
        let member =
            MemberRepo::find(tx, member_id)?.ok_or(OrderGraphError::MemberNotFound { member_id })?;
        if lines.is_empty() {
            return Err(OrderGraphError::EmptyOrder.into());
        }

        let mut products = load_products(tx, lines.iter().map(|l| l.product_id))?;

        let mut line_items = Vec::with_capacity(lines.len());
        for line in lines {
            let product = products
                .get_mut(&line.product_id)
                .ok_or(OrderGraphError::ProductNotFound {
                    product_id: line.product_id,
                })?;
            let price = product.price;
            line_items.push(LineItem::create(product, price, line.count)?);
        }

        let order = Order::place(&member, line_items, order_date)?;

        let delivery_id = insert_delivery(tx, &order.delivery)?;
        tx.execute(
            "INSERT INTO orders (member_id, delivery_id, order_date, status) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                order.member_id,
                delivery_id,
                rows::to_millis(&order.order_date),
                order.status.as_str(),
            ],
        )
        .map_err(from_rusqlite)?;
        let order_id = tx.last_insert_rowid();

        for line in &order.line_items {
            tx.execute(
                "INSERT INTO order_item (order_id, item_id, order_price, count) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![order_id, line.product_id, line.order_price, line.count],
            )
            .map_err(from_rusqlite)?;
        }

        for product in products.values() {
            ProductRepo::save(tx, product)?;
        }

        Ok(order_id)
    }

    /// Cancel an order and return its stock
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown order
    /// - `IllegalState` if the delivery completed or the order is already
    ///   cancelled; stock is not touched in either case
    pub fn cancel_order(conn: &mut Connection, order_id: i64) -> Result<()> {
        let tx = write_tx(conn)?;

        let mut order =
            Self::find_order(&tx, order_id)?.ok_or(OrderGraphError::OrderNotFound { order_id })?;
        let mut products = load_products(&tx, order.line_items.iter().map(|l| l.product_id))?;

        order.cancel(&mut products)?;

        tx.execute(
            "UPDATE orders SET status = ?1 WHERE order_id = ?2",
            rusqlite::params![order.status.as_str(), order_id],
        )
        .map_err(from_rusqlite)?;
        for product in products.values() {
            ProductRepo::save(&tx, product)?;
        }

        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(order_id, "order cancelled");
        Ok(())
    }

    /// Mark an order's delivery as completed
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown order, `IllegalState` for a cancelled one.
    pub fn complete_delivery(conn: &mut Connection, order_id: i64) -> Result<()> {
        let tx = write_tx(conn)?;

        let mut order =
            Self::find_order(&tx, order_id)?.ok_or(OrderGraphError::OrderNotFound { order_id })?;
        order.complete_delivery()?;

        tx.execute(
            "UPDATE delivery SET status = ?1 WHERE delivery_id = ?2",
            rusqlite::params![order.delivery.status.as_str(), order.delivery.id],
        )
        .map_err(from_rusqlite)?;

        tx.commit().map_err(from_rusqlite)?;
        Ok(())
    }

    /// Load the full write-side aggregate
    pub fn find_order(conn: &Connection, order_id: i64) -> Result<Option<Order>> {
        let order = conn
            .query_row(
                "SELECT o.order_id, o.member_id, o.order_date, o.status, \
                        d.delivery_id, d.city, d.street, d.zipcode, d.status \
                 FROM orders o JOIN delivery d ON d.delivery_id = o.delivery_id \
                 WHERE o.order_id = ?",
                [order_id],
                |row| {
                    Ok(Order {
                        id: Some(row.get(0)?),
                        member_id: row.get(1)?,
                        order_date: rows::datetime_at(row, 2)?,
                        status: rows::order_status_at(row, 3)?,
                        delivery: Delivery {
                            id: Some(row.get(4)?),
                            address: rows::address_at(row, 5)?,
                            status: rows::delivery_status_at(row, 8)?,
                        },
                        line_items: Vec::new(),
                    })
                },
            )
            .optional()
            .map_err(from_rusqlite)?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        let mut stmt = conn
            .prepare(
                "SELECT order_item_id, item_id, order_price, count FROM order_item \
                 WHERE order_id = ? ORDER BY order_item_id",
            )
            .map_err(from_rusqlite)?;
        order.line_items = stmt
            .query_map([order_id], |row| {
                Ok(LineItem {
                    id: Some(row.get(0)?),
                    product_id: row.get(1)?,
                    order_price: row.get(2)?,
                    count: row.get(3)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(Some(order))
    }
}

fn insert_delivery(conn: &Connection, delivery: &Delivery) -> Result<i64> {
    conn.execute(
        "INSERT INTO delivery (city, street, zipcode, status) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            delivery.address.city,
            delivery.address.street,
            delivery.address.zipcode,
            delivery.status.as_str(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(conn.last_insert_rowid())
}

/// Products by id; ids that do not exist are simply absent
fn load_products(
    conn: &Connection,
    product_ids: impl Iterator<Item = i64>,
) -> Result<BTreeMap<i64, Product>> {
    let mut products = BTreeMap::new();
    for product_id in product_ids {
        if products.contains_key(&product_id) {
            continue;
        }
        if let Some(product) = ProductRepo::find(conn, product_id)? {
            products.insert(product_id, product);
        }
    }
    Ok(products)
}

/// `BEGIN IMMEDIATE`: the write lock is taken at begin, under the busy timeout
fn write_tx(conn: &mut Connection) -> Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)
}
