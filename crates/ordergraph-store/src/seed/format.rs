use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ordergraph_core::model::Address;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Must be 0
    pub schema_version: u32,

    #[serde(default)]
    pub members: Vec<SeedMember>,

    #[serde(default)]
    pub products: Vec<SeedProduct>,

    #[serde(default)]
    pub orders: Vec<SeedOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMember {
    pub name: String,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedProduct {
    /// Seed-local handle referenced by order lines
    pub key: String,
    pub name: String,
    pub price: i64,
    pub stock_quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOrder {
    /// Member name, from this seed or already in the database
    pub member: String,

    /// Defaults to the import time
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,

    pub lines: Vec<SeedOrderLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOrderLine {
    /// A `SeedProduct::key`
    pub product: String,
    pub count: u32,
}
