//! Read-side query components
//!
//! - [`roots`]: root query executor, bare and joined variants, plus the
//!   explicit per-association resolve calls of the lazy slow path
//! - [`batch`]: collection batch loader (IN-clause, grouped by order)
//! - [`flat`]: flat five-table join, to be regrouped in memory
//!
//! All statements run through a [`crate::session::Session`].

pub mod batch;
pub mod flat;
pub mod roots;

pub use batch::{fetch_line_items_for, load_children_chunked, load_children_for, MAX_IN_PARAMS};
pub use flat::fetch_flat;
pub use roots::{
    fetch_roots_bare, fetch_roots_joined, resolve_delivery, resolve_line_items, resolve_member,
    resolve_product,
};
