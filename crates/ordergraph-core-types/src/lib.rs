//! Core types shared across ordergraph facilities
//!
//! This crate provides the canonical schema constants used by the logging
//! facility and by every crate that emits structured events:
//!
//! - **Field keys**: component, op, event, durations, entity ids, counters
//! - **Event names**: operation start / end / error boundaries

pub mod schema;
