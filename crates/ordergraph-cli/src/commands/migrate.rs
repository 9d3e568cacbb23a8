//! Schema migration command
//!
//! Usage: ordergraph migrate

use std::path::Path;

use serde::Serialize;

use super::{print_json, CliResult};

#[derive(Serialize)]
struct MigrateOutput {
    applied: Vec<String>,
}

pub fn execute(db: &Path) -> CliResult {
    let mut conn = ordergraph_store::db::open(db)?;
    ordergraph_store::migrations::apply_migrations(&mut conn)?;
    let applied = ordergraph_store::migrations::applied_migrations(&conn)?;

    print_json(&MigrateOutput { applied })
}
