//! Round-trip-counting view of a connection
//!
//! Every read-path statement goes through a `Session`, so a pipeline can
//! report exactly how many times it went to the store.

#![allow(clippy::result_large_err)]

use std::cell::Cell;

use ordergraph_core::query::SqlParam;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::errors::{from_rusqlite, Result};

/// Bind-ready form of a core `SqlParam`
pub fn to_value(param: &SqlParam) -> Value {
    match param {
        SqlParam::Text(s) => Value::Text(s.clone()),
        SqlParam::Int(i) => Value::Integer(*i),
    }
}

pub fn to_values(params: &[SqlParam]) -> Vec<Value> {
    params.iter().map(to_value).collect()
}

/// One pipeline's handle on the store
///
/// Not `Sync`: one session belongs to one pipeline run.
pub struct Session<'c> {
    conn: &'c Connection,
    round_trips: Cell<u64>,
}

impl<'c> Session<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            round_trips: Cell::new(0),
        }
    }

    /// Statements executed so far
    pub fn round_trips(&self) -> u64 {
        self.round_trips.get()
    }

    fn record(&self, sql: &str, params: &[Value]) {
        self.round_trips.set(self.round_trips.get() + 1);
        tracing::debug!(
            round_trip = self.round_trips.get(),
            params = params.len(),
            sql = sql,
            "store round trip"
        );
    }

    /// Run `sql` and map every row
    pub fn query_rows<T, F>(&self, sql: &str, params: &[Value], map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.record(sql, params);
        let mut stmt = self.conn.prepare(sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), map)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(from_rusqlite)?;
        Ok(rows)
    }

    /// Run `sql` and map the first row, if any
    pub fn query_opt<T, F>(&self, sql: &str, params: &[Value], map: F) -> Result<Option<T>>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.record(sql, params);
        self.conn
            .query_row(sql, rusqlite::params_from_iter(params.iter()), map)
            .optional()
            .map_err(from_rusqlite)
    }
}
