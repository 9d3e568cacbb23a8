//! Collection batch loader
//!
//! Turns N per-order child queries into one `IN (...)` query plus an
//! in-memory grouping pass.

#![allow(clippy::result_large_err)]

use std::collections::{BTreeSet, HashMap};

use ordergraph_core::assemble::group_by_order;
use ordergraph_core::errors::{ExError, ExErrorKind};
use ordergraph_core::model::LineItemView;
use rusqlite::types::Value;

use crate::errors::Result;
use crate::rows;
use crate::session::Session;

/// Most ids bound into one `IN (...)` clause
///
/// Stays under SQLite's default `SQLITE_MAX_VARIABLE_NUMBER` (32766).
pub const MAX_IN_PARAMS: usize = 30_000;

fn dedupe(root_ids: &[i64]) -> Vec<i64> {
    root_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn query_in(session: &Session<'_>, ids: &[i64]) -> Result<Vec<LineItemView>> {
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT {} FROM order_item oi JOIN item i ON i.item_id = oi.item_id \
         WHERE oi.order_id IN ({}) ORDER BY oi.order_item_id",
        rows::LINE_ITEM_COLUMNS,
        placeholders
    );
    let params: Vec<Value> = ids.iter().map(|id| Value::Integer(*id)).collect();

    session.query_rows(&sql, &params, |row| rows::line_item_view_at(row, 0))
}

/// Line items for every id in `root_ids`, grouped by order
///
/// One round trip for up to [`MAX_IN_PARAMS`] distinct ids, none at all when
/// `root_ids` is empty; larger sets are split into chunks of that size.
/// Orders without line items are absent from the map. Within a group rows
/// keep line-item id order.
pub fn load_children_for(
    session: &Session<'_>,
    root_ids: &[i64],
) -> Result<HashMap<i64, Vec<LineItemView>>> {
    let ids = dedupe(root_ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    if ids.len() > MAX_IN_PARAMS {
        return load_chunks(session, &ids, MAX_IN_PARAMS);
    }

    let rows = query_in(session, &ids)?;
    tracing::debug!(roots = ids.len(), rows = rows.len(), "batch loaded line items");
    Ok(group_by_order(rows))
}

/// Same as [`load_children_for`] with at most `batch_size` ids per query
///
/// `batch_size` is capped at [`MAX_IN_PARAMS`].
pub fn load_children_chunked(
    session: &Session<'_>,
    root_ids: &[i64],
    batch_size: usize,
) -> Result<HashMap<i64, Vec<LineItemView>>> {
    if batch_size == 0 {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("load_children_chunked")
            .with_message("batch size must be positive"));
    }

    load_chunks(session, &dedupe(root_ids), batch_size.min(MAX_IN_PARAMS))
}

fn load_chunks(
    session: &Session<'_>,
    ids: &[i64],
    chunk_size: usize,
) -> Result<HashMap<i64, Vec<LineItemView>>> {
    let mut grouped = HashMap::new();
    for chunk in ids.chunks(chunk_size) {
        // chunks are disjoint, so no key is ever extended twice
        grouped.extend(group_by_order(query_in(session, chunk)?));
    }
    tracing::debug!(
        roots = ids.len(),
        chunks = ids.len().div_ceil(chunk_size),
        "batch loaded line items in chunks"
    );
    Ok(grouped)
}

/// Line items of a single order (the per-root N+1 query)
pub fn fetch_line_items_for(session: &Session<'_>, order_id: i64) -> Result<Vec<LineItemView>> {
    let sql = format!(
        "SELECT {} FROM order_item oi JOIN item i ON i.item_id = oi.item_id \
         WHERE oi.order_id = ? ORDER BY oi.order_item_id",
        rows::LINE_ITEM_COLUMNS
    );
    session.query_rows(&sql, &[Value::Integer(order_id)], |row| {
        rows::line_item_view_at(row, 0)
    })
}
