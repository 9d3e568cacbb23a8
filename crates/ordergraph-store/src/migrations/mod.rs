//! Forward-only schema migrations
//!
//! Scripts are embedded at compile time, applied in order inside one
//! transaction each, and recorded in `schema_version` with a SHA-256
//! checksum. Re-running is a no-op unless a recorded checksum no longer
//! matches its script.

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
