//! ordergraph core - pure domain layer
//!
//! - Order aggregate model (order, delivery, line items) with stock and
//!   cancellation rules
//! - Read-side views, explicitly staged associations and output DTOs
//! - Filter predicate builder, page type and pagination coordinator
//! - Aggregate assembly and flat-row regrouping
//! - Error facility (`OrderGraphError`, `ExError`) and logging facility
//!
//! No I/O happens in this crate.

pub mod assemble;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod query;

/// Logging field keys and event names, re-exported for the logging macros
pub use ordergraph_core_types::schema;

pub use errors::{ExError, ExErrorKind, OrderGraphError, Result};
pub use model::{Order, OrderAggregate, OrderDto, OrderHeader};
pub use query::{LoadStrategy, OrderFilter, Page};
