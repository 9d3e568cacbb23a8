//! ordergraph engine - orchestration layer
//!
//! Runs the loading strategies as named pipelines over the store and
//! exposes two entry points: `apply_order_query` for reads and
//! `apply_order_command` for writes. Both own boundary logging.

pub mod commands;
pub mod pipelines;

pub use commands::order_command::{apply_order_command, OrderCommand, OrderCommandResult};
pub use commands::order_query::{
    apply_order_query, apply_order_query_in, load_order_summaries, OrderQuery, OrderQueryResult,
    OrderSummaryResult,
};
