//! One staged pipeline per loading strategy
//!
//! Stages run in order inside one session: roots first, then whatever the
//! strategy uses to resolve line items. Pages reaching this module have
//! already been admitted by the pagination coordinator.

#![allow(clippy::result_large_err)]

use std::collections::HashMap;

use ordergraph_core::assemble::{assemble, regroup};
use ordergraph_core::model::{Association, OrderAggregate};
use ordergraph_core::query::{LoadStrategy, OrderFilter, Page};
use ordergraph_store::errors::Result;
use ordergraph_store::query::{
    fetch_flat, fetch_line_items_for, fetch_roots_bare, fetch_roots_joined,
    load_children_chunked, load_children_for, resolve_delivery, resolve_line_items,
    resolve_member, resolve_product,
};
use ordergraph_store::Session;

/// Run `strategy`'s pipeline
///
/// `batch_size` only affects `BatchedCollections`.
pub fn run(
    session: &Session<'_>,
    strategy: LoadStrategy,
    filter: &OrderFilter,
    page: Option<Page>,
    batch_size: Option<usize>,
) -> Result<Vec<OrderAggregate>> {
    match strategy {
        LoadStrategy::LazyTraversal => lazy_traversal(session, filter, page),
        LoadStrategy::PerRootCollections => per_root_collections(session, filter, page),
        LoadStrategy::BatchedCollections => batched_collections(session, filter, page, batch_size),
        LoadStrategy::FlatProjection => flat_projection(session, filter),
    }
}

/// Slow path: bare roots, then one round trip per association per order
///
/// Issues `1 + 3N + (line items)` statements for N orders.
pub fn lazy_traversal(
    session: &Session<'_>,
    filter: &OrderFilter,
    page: Option<Page>,
) -> Result<Vec<OrderAggregate>> {
    let mut roots = fetch_roots_bare(session, filter, page)?;

    for order in &mut roots {
        resolve_member(session, order)?;
        resolve_delivery(session, order)?;
        resolve_line_items(session, order)?;
        if let Association::Loaded(line_items) = &mut order.line_items {
            for line_item in line_items.iter_mut() {
                resolve_product(session, line_item)?;
            }
        }
    }

    roots
        .into_iter()
        .map(|order| order.into_aggregate().map_err(Into::into))
        .collect()
}

/// Joined roots, then one child query per order (`1 + N` round trips)
pub fn per_root_collections(
    session: &Session<'_>,
    filter: &OrderFilter,
    page: Option<Page>,
) -> Result<Vec<OrderAggregate>> {
    let headers = fetch_roots_joined(session, filter, page)?;

    let mut children = HashMap::with_capacity(headers.len());
    for header in &headers {
        let line_items = fetch_line_items_for(session, header.order_id)?;
        if !line_items.is_empty() {
            children.insert(header.order_id, line_items);
        }
    }

    Ok(assemble(headers, children))
}

/// Joined roots, then one IN-clause child query (2 round trips)
///
/// With `batch_size` set, ids are split into IN-clauses of that size, adding
/// one round trip per extra chunk.
pub fn batched_collections(
    session: &Session<'_>,
    filter: &OrderFilter,
    page: Option<Page>,
    batch_size: Option<usize>,
) -> Result<Vec<OrderAggregate>> {
    let headers = fetch_roots_joined(session, filter, page)?;
    let ids: Vec<i64> = headers.iter().map(|h| h.order_id).collect();

    let children = match batch_size {
        Some(size) => load_children_chunked(session, &ids, size)?,
        None => load_children_for(session, &ids)?,
    };

    Ok(assemble(headers, children))
}

/// One five-table join regrouped in memory (1 round trip, never paginated)
pub fn flat_projection(
    session: &Session<'_>,
    filter: &OrderFilter,
) -> Result<Vec<OrderAggregate>> {
    let rows = fetch_flat(session, filter)?;
    tracing::debug!(rows = rows.len(), "flat projection fetched");
    Ok(regroup(rows))
}
