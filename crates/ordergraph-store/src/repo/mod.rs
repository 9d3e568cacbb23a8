//! Write-side repositories
//!
//! Each repository is a unit struct of associated functions over a
//! `rusqlite::Connection` (a `Transaction` derefs to one). Multi-row writes
//! open their own transaction and take `&mut Connection`.

pub mod member_repo;
pub mod order_repo;
pub mod product_repo;

pub use member_repo::MemberRepo;
pub use order_repo::{OrderLine, OrderRepo};
pub use product_repo::{ProductRepo, ProductUpdate};
