//! Column decoding shared by the repositories and the read path
//!
//! Mappers take a column offset so the same decoding serves several
//! SELECT layouts.

use chrono::{DateTime, TimeZone, Utc};
use ordergraph_core::model::{
    Address, DeliveryStatus, FlatRow, LineItemView, Member, OrderHeader, OrderStatus, Product,
};
use rusqlite::types::Type;
use rusqlite::Row;
use std::str::FromStr;

/// `o.order_id, m.name, o.order_date, o.status, d.city, d.street, d.zipcode`
pub const HEADER_COLUMNS: &str =
    "o.order_id, m.name, o.order_date, o.status, d.city, d.street, d.zipcode";

/// `oi.order_id, i.name, oi.order_price, oi.count`
pub const LINE_ITEM_COLUMNS: &str = "oi.order_id, i.name, oi.order_price, oi.count";

pub fn to_millis(at: &DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub fn datetime_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {}", millis).into(),
        )
    })
}

fn parsed_at<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn order_status_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<OrderStatus> {
    parsed_at(row, idx)
}

pub fn delivery_status_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DeliveryStatus> {
    parsed_at(row, idx)
}

/// Three consecutive columns: city, street, zipcode
pub fn address_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Address> {
    Ok(Address {
        city: row.get(idx)?,
        street: row.get(idx + 1)?,
        zipcode: row.get(idx + 2)?,
    })
}

/// `member_id, name, city, street, zipcode`
pub fn member(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        address: address_at(row, 2)?,
    })
}

/// `item_id, name, price, stock_quantity`
pub fn product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        price: row.get(2)?,
        stock_quantity: row.get(3)?,
    })
}

/// [`HEADER_COLUMNS`] starting at `idx`
pub fn header_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<OrderHeader> {
    Ok(OrderHeader {
        order_id: row.get(idx)?,
        member_name: row.get(idx + 1)?,
        order_date: datetime_at(row, idx + 2)?,
        status: order_status_at(row, idx + 3)?,
        delivery_address: address_at(row, idx + 4)?,
    })
}

/// [`LINE_ITEM_COLUMNS`] starting at `idx`
pub fn line_item_view_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<LineItemView> {
    Ok(LineItemView {
        order_id: row.get(idx)?,
        product_name: row.get(idx + 1)?,
        order_price: row.get(idx + 2)?,
        count: row.get(idx + 3)?,
    })
}

/// Header columns followed by `i.name, oi.order_price, oi.count`
pub fn flat_row(row: &Row<'_>) -> rusqlite::Result<FlatRow> {
    let header = header_at(row, 0)?;
    Ok(FlatRow {
        order_id: header.order_id,
        member_name: header.member_name,
        order_date: header.order_date,
        status: header.status,
        delivery_address: header.delivery_address,
        product_name: row.get(7)?,
        order_price: row.get(8)?,
        count: row.get(9)?,
    })
}
