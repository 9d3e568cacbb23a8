//! Flat projection fetch
//!
//! One join across the whole graph. Order header columns repeat on every
//! line-item row, so the row count is the line-item count, not the order
//! count. That is why this function takes no page: a limit here would cut
//! line items, not orders. Orders without line items drop out of the inner
//! join.

#![allow(clippy::result_large_err)]

use ordergraph_core::model::FlatRow;
use ordergraph_core::query::OrderFilter;

use crate::errors::Result;
use crate::rows;
use crate::session::{to_values, Session};

pub fn fetch_flat(session: &Session<'_>, filter: &OrderFilter) -> Result<Vec<FlatRow>> {
    let clause = filter.to_where_clause();
    let sql = format!(
        "SELECT {}, i.name, oi.order_price, oi.count FROM orders o \
         JOIN member m ON m.member_id = o.member_id \
         JOIN delivery d ON d.delivery_id = o.delivery_id \
         JOIN order_item oi ON oi.order_id = o.order_id \
         JOIN item i ON i.item_id = oi.item_id{} \
         ORDER BY o.order_id, oi.order_item_id",
        rows::HEADER_COLUMNS,
        clause.sql
    );

    session.query_rows(&sql, &to_values(&clause.params), rows::flat_row)
}
