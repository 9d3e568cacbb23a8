#![allow(clippy::result_large_err)]

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use ordergraph_core::model::Product;
use rusqlite::Connection;
use serde::Serialize;

use crate::errors::{from_rusqlite, seed_validation, Result};
use crate::repo::{MemberRepo, OrderLine, OrderRepo, ProductRepo};
use crate::seed::format::Seed;
use crate::seed::parser::{parse_seed_file, parse_seed_str};

/// What an import created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub members: usize,
    pub products: usize,
    pub order_ids: Vec<i64>,
}

pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<SeedReport> {
    let seed = parse_seed_file(path)?;
    import(&seed, conn)
}

pub fn import_seed_str(content: &str, conn: &mut Connection) -> Result<SeedReport> {
    let seed = parse_seed_str(content)?;
    import(&seed, conn)
}

/// Members, then products, then orders, all in one transaction
///
/// Orders go through the same placement rules as any other order, so stock
/// is decremented and an oversized line fails the whole import.
fn import(seed: &Seed, conn: &mut Connection) -> Result<SeedReport> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let mut report = SeedReport::default();

    for member in &seed.members {
        MemberRepo::join(&tx, &member.name, member.address.clone())?;
        report.members += 1;
    }

    let mut product_ids: HashMap<&str, i64> = HashMap::new();
    for product in &seed.products {
        let stored = ProductRepo::register(
            &tx,
            Product::new(product.name.clone(), product.price, product.stock_quantity),
        )?;
        if let Some(id) = stored.id {
            product_ids.insert(product.key.as_str(), id);
        }
        report.products += 1;
    }

    let now = Utc::now();
    for order in &seed.orders {
        let member = MemberRepo::find_by_name(&tx, &order.member)?.ok_or_else(|| {
            seed_validation(&format!(
                "Order references unknown member '{}'",
                order.member
            ))
        })?;
        let member_id = member.id.unwrap_or_default();

        let lines = order
            .lines
            .iter()
            .map(|line| {
                product_ids
                    .get(line.product.as_str())
                    .map(|&product_id| OrderLine {
                        product_id,
                        count: line.count,
                    })
                    .ok_or_else(|| {
                        seed_validation(&format!("Unknown product key '{}'", line.product))
                    })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let order_id =
            OrderRepo::insert_order(&tx, member_id, &lines, order.order_date.unwrap_or(now))?;
        report.order_ids.push(order_id);
    }

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        members = report.members,
        products = report.products,
        orders = report.order_ids.len(),
        "seed imported"
    );
    Ok(report)
}
