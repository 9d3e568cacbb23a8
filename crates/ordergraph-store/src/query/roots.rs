//! Root query executor
//!
//! Both variants page over `orders` directly. To-one joins never multiply
//! root rows, so `LIMIT`/`OFFSET` here always counts orders.

#![allow(clippy::result_large_err)]

use ordergraph_core::errors::{ExError, ExErrorKind, OrderGraphError};
use ordergraph_core::model::{
    Association, BareLineItem, BareOrder, Delivery, OrderHeader,
};
use ordergraph_core::query::{OrderFilter, Page};
use rusqlite::types::Value;

use crate::errors::Result;
use crate::rows;
use crate::session::{to_values, Session};

fn page_sql(page: Option<Page>, params: &mut Vec<Value>) -> Result<&'static str> {
    let Some(page) = page else {
        return Ok("");
    };
    let bound = |value: u64| {
        i64::try_from(value).map_err(|_| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("page_sql")
                .with_message(format!("page bound {} exceeds i64", value))
        })
    };
    params.push(Value::Integer(bound(page.limit())?));
    params.push(Value::Integer(bound(page.offset())?));
    Ok(" LIMIT ? OFFSET ?")
}

/// Orders with member and delivery joined in, one round trip
pub fn fetch_roots_joined(
    session: &Session<'_>,
    filter: &OrderFilter,
    page: Option<Page>,
) -> Result<Vec<OrderHeader>> {
    let clause = filter.to_where_clause();
    let mut params = to_values(&clause.params);
    let limit = page_sql(page, &mut params)?;

    let sql = format!(
        "SELECT {} FROM orders o \
         JOIN member m ON m.member_id = o.member_id \
         JOIN delivery d ON d.delivery_id = o.delivery_id{} \
         ORDER BY o.order_id{}",
        rows::HEADER_COLUMNS,
        clause.sql,
        limit
    );

    session.query_rows(&sql, &params, |row| rows::header_at(row, 0))
}

/// Root columns only; every association is left `Unloaded`
///
/// `member` is joined solely so the name filter can be evaluated.
pub fn fetch_roots_bare(
    session: &Session<'_>,
    filter: &OrderFilter,
    page: Option<Page>,
) -> Result<Vec<BareOrder>> {
    let clause = filter.to_where_clause();
    let mut params = to_values(&clause.params);
    let limit = page_sql(page, &mut params)?;

    let sql = format!(
        "SELECT o.order_id, o.order_date, o.status, o.member_id, o.delivery_id FROM orders o \
         JOIN member m ON m.member_id = o.member_id{} \
         ORDER BY o.order_id{}",
        clause.sql, limit
    );

    session.query_rows(&sql, &params, |row| {
        let order_id: i64 = row.get(0)?;
        Ok(BareOrder {
            order_id,
            order_date: rows::datetime_at(row, 1)?,
            status: rows::order_status_at(row, 2)?,
            member: Association::unloaded(row.get(3)?),
            delivery: Association::unloaded(row.get(4)?),
            line_items: Association::unloaded(order_id),
        })
    })
}

// ---------------------------------------------------------------------------
// Lazy slow path: one round trip per call, no caching
// ---------------------------------------------------------------------------

/// Load the order's member if still unloaded
pub fn resolve_member(session: &Session<'_>, order: &mut BareOrder) -> Result<()> {
    let Some(member_id) = order.member.pending_key() else {
        return Ok(());
    };

    let member = session
        .query_opt(
            "SELECT member_id, name, city, street, zipcode FROM member WHERE member_id = ?",
            &[Value::Integer(member_id)],
            rows::member,
        )?
        .ok_or(OrderGraphError::MemberNotFound { member_id })?;

    order.member = Association::Loaded(member);
    Ok(())
}

/// Load the order's delivery if still unloaded
pub fn resolve_delivery(session: &Session<'_>, order: &mut BareOrder) -> Result<()> {
    let Some(delivery_id) = order.delivery.pending_key() else {
        return Ok(());
    };

    let delivery = session
        .query_opt(
            "SELECT delivery_id, city, street, zipcode, status FROM delivery WHERE delivery_id = ?",
            &[Value::Integer(delivery_id)],
            |row| {
                Ok(Delivery {
                    id: Some(row.get(0)?),
                    address: rows::address_at(row, 1)?,
                    status: rows::delivery_status_at(row, 4)?,
                })
            },
        )?
        .ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("resolve_delivery")
                .with_entity_id(delivery_id)
                .with_message(format!("Delivery not found for order {}", order.order_id))
        })?;

    order.delivery = Association::Loaded(delivery);
    Ok(())
}

/// Load the order's line items (products left unloaded) if still unloaded
pub fn resolve_line_items(session: &Session<'_>, order: &mut BareOrder) -> Result<()> {
    let Some(order_id) = order.line_items.pending_key() else {
        return Ok(());
    };

    let line_items = session.query_rows(
        "SELECT order_item_id, order_id, item_id, order_price, count FROM order_item \
         WHERE order_id = ? ORDER BY order_item_id",
        &[Value::Integer(order_id)],
        |row| {
            Ok(BareLineItem {
                id: row.get(0)?,
                order_id: row.get(1)?,
                product: Association::unloaded(row.get(2)?),
                order_price: row.get(3)?,
                count: row.get(4)?,
            })
        },
    )?;

    order.line_items = Association::Loaded(line_items);
    Ok(())
}

/// Load a line item's product if still unloaded
pub fn resolve_product(session: &Session<'_>, line_item: &mut BareLineItem) -> Result<()> {
    let Some(product_id) = line_item.product.pending_key() else {
        return Ok(());
    };

    let product = session
        .query_opt(
            "SELECT item_id, name, price, stock_quantity FROM item WHERE item_id = ?",
            &[Value::Integer(product_id)],
            rows::product,
        )?
        .ok_or(OrderGraphError::ProductNotFound { product_id })?;

    line_item.product = Association::Loaded(product);
    Ok(())
}
