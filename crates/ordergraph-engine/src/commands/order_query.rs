//! Engine-level read-only order loading.
//!
//! `apply_order_query` is the single entry point for loading fully populated
//! orders. It never writes. The pagination coordinator runs first, so a page
//! sent to an unpaginated strategy fails before any statement is issued.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use ordergraph_core::model::{OrderDto, OrderSummaryDto};
use ordergraph_core::query::{
    LoadStrategy, OrderFilter, Page, PaginationCoordinator, ToOneResolution,
};
use ordergraph_core::{log_op_end, log_op_error, log_op_start};
use ordergraph_store::errors::Result;
use ordergraph_store::query::{
    fetch_roots_bare, fetch_roots_joined, resolve_delivery, resolve_member,
};
use ordergraph_store::Session;
use rusqlite::Connection;
use serde::Serialize;

use crate::pipelines;

/// What to load and how
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub strategy: LoadStrategy,
    pub filter: OrderFilter,
    /// Only legal for paginated strategies
    pub page: Option<Page>,
    /// IN-clause size cap for `BatchedCollections`
    pub batch_size: Option<usize>,
}

impl OrderQuery {
    pub fn new(strategy: LoadStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: OrderFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueryResult {
    pub strategy: LoadStrategy,
    pub round_trips: u64,
    pub orders: Vec<OrderDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryResult {
    pub round_trips: u64,
    pub orders: Vec<OrderSummaryDto>,
}

/// Load orders on a fresh session over `conn`
pub fn apply_order_query(query: OrderQuery, conn: &Connection) -> Result<OrderQueryResult> {
    apply_order_query_in(query, &Session::new(conn))
}

/// Load orders on a caller-provided session
///
/// `round_trips` in the result counts only this query's statements even if
/// the session was used before.
pub fn apply_order_query_in(query: OrderQuery, session: &Session<'_>) -> Result<OrderQueryResult> {
    let strategy = query.strategy;
    log_op_start!("order_query", strategy = strategy.as_str());
    let start = Instant::now();
    let before = session.round_trips();

    let result = order_query_impl(query, session).map_err(|e| {
        log_op_error!(
            "order_query",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            strategy = strategy.as_str()
        );
        e
    })?;

    let round_trips = session.round_trips() - before;
    log_op_end!(
        "order_query",
        duration_ms = start.elapsed().as_millis() as u64,
        strategy = strategy.as_str(),
        round_trips = round_trips,
        root_count = result.len()
    );

    Ok(OrderQueryResult {
        strategy,
        round_trips,
        orders: result,
    })
}

fn order_query_impl(query: OrderQuery, session: &Session<'_>) -> Result<Vec<OrderDto>> {
    let page = PaginationCoordinator::admit(query.strategy, query.page)?;

    let aggregates = pipelines::run(
        session,
        query.strategy,
        &query.filter,
        page,
        query.batch_size,
    )?;

    Ok(aggregates.into_iter().map(|a| a.into_dto()).collect())
}

/// Orders with member and delivery but without line items
///
/// Always paginable: no to-many association is involved. `Joined` takes one
/// round trip, `Lazy` takes `1 + 2N`.
pub fn load_order_summaries(
    conn: &Connection,
    resolution: ToOneResolution,
    filter: &OrderFilter,
    page: Option<Page>,
) -> Result<OrderSummaryResult> {
    log_op_start!("order_summaries", resolution = ?resolution);
    let start = Instant::now();
    let session = Session::new(conn);

    let orders = summaries_impl(&session, resolution, filter, page).map_err(|e| {
        log_op_error!(
            "order_summaries",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "order_summaries",
        duration_ms = start.elapsed().as_millis() as u64,
        round_trips = session.round_trips(),
        root_count = orders.len()
    );

    Ok(OrderSummaryResult {
        round_trips: session.round_trips(),
        orders,
    })
}

fn summaries_impl(
    session: &Session<'_>,
    resolution: ToOneResolution,
    filter: &OrderFilter,
    page: Option<Page>,
) -> Result<Vec<OrderSummaryDto>> {
    match resolution {
        ToOneResolution::Joined => Ok(fetch_roots_joined(session, filter, page)?
            .iter()
            .map(|h| h.to_summary())
            .collect()),
        ToOneResolution::Lazy => {
            let mut roots = fetch_roots_bare(session, filter, page)?;
            let mut summaries = Vec::with_capacity(roots.len());
            for order in &mut roots {
                resolve_member(session, order)?;
                resolve_delivery(session, order)?;
                summaries.push(order.header()?.to_summary());
            }
            Ok(summaries)
        }
    }
}
