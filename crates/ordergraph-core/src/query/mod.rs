//! Query-side building blocks shared by the store and the engine.
//!
//! Everything here is pure: filters compile to SQL fragments with bound
//! parameters, and the pagination coordinator decides whether a page may be
//! applied to a strategy before any statement runs.

pub mod filter;
pub mod page;
pub mod pagination;
pub mod strategy;

pub use filter::{OrderFilter, Predicate, PredicateBuilder, SqlParam, WhereClause};
pub use page::Page;
pub use pagination::{PaginationCoordinator, PaginationMode};
pub use strategy::{LoadPlan, LoadStrategy, ToManyResolution, ToOneResolution};
