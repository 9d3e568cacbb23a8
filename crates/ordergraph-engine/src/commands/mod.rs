//! Command orchestration
//!
//! - `order_query`: read-only loading under a chosen strategy
//! - `order_command`: member, product and order writes

pub mod order_command;
pub mod order_query;
