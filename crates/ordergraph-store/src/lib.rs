//! ordergraph store - SQLite persistence for the order aggregate
//!
//! Provides:
//! - Connection setup and embedded, checksummed migrations
//! - `Session`, the round-trip-counting adapter every read goes through
//! - Write repositories for members, products and orders
//! - Read-side query components: root query executor, collection batch
//!   loader and flat projection fetch
//! - YAML seed import

pub mod db;
pub mod errors;
pub mod migrations;
pub mod query;
pub mod repo;
pub mod rows;
pub mod seed;
pub mod session;

pub use errors::Result;
pub use session::Session;
