//! Structured logging facility
//!
//! - `init(profile)` installs the process-wide subscriber exactly once
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` mark operation boundaries
//! - `init_test_capture()` records events in memory for test assertions
//!
//! Only the engine emits boundary events. The store and the core log
//! statement-level detail with plain `tracing::debug!` / `tracing::warn!`.
//!
//! ```rust
//! use ordergraph_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
