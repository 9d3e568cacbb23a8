pub mod member;
pub mod migrate;
pub mod order;
pub mod orders;
pub mod product;
pub mod seed;

use std::path::Path;

use rusqlite::Connection;
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the database, creating it and applying migrations as needed
pub fn open_store(db: &Path) -> Result<Connection, Box<dyn std::error::Error>> {
    let conn = ordergraph_store::db::open_and_migrate(db)?;
    tracing::debug!(db = %db.display(), "store opened");
    Ok(conn)
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
