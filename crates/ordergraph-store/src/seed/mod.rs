//! YAML seed import
//!
//! - [`format`]: seed document schema (version 0)
//! - [`parser`]: YAML parsing and validation
//! - [`importer`]: writes a validated seed in one transaction

pub mod format;
pub mod importer;
pub mod parser;

pub use format::Seed;
pub use importer::{import_seed, import_seed_str, SeedReport};
pub use parser::{parse_seed_file, parse_seed_str};

/// The bundled sample data set
pub const SAMPLE_SEED: &str = include_str!("../../seeds/sample.yaml");
