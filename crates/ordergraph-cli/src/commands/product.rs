//! Product catalog commands
//!
//! Usage:
//!   ordergraph product add <NAME> --price <PRICE> --stock <QTY>
//!   ordergraph product update <ID> [--name <NAME>] [--price <PRICE>] [--stock <QTY>]
//!   ordergraph product list

use std::path::Path;

use clap::{Args, Subcommand};
use ordergraph_engine::{apply_order_command, OrderCommand};
use ordergraph_store::repo::{ProductRepo, ProductUpdate};

use super::{open_store, print_json, CliResult};

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Register a product
    Add(AddArgs),
    /// Change a product's name, price or stock
    Update(UpdateArgs),
    /// List the catalog
    List,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub name: String,

    #[arg(long)]
    pub price: i64,

    #[arg(long)]
    pub stock: u32,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub price: Option<i64>,

    #[arg(long)]
    pub stock: Option<u32>,
}

pub fn execute(args: ProductArgs, db: &Path) -> CliResult {
    let mut conn = open_store(db)?;

    let cmd = match args.command {
        ProductCommand::Add(add) => OrderCommand::RegisterProduct {
            name: add.name,
            price: add.price,
            stock_quantity: add.stock,
        },
        ProductCommand::Update(update) => OrderCommand::UpdateProduct {
            product_id: update.id,
            update: ProductUpdate {
                name: update.name,
                price: update.price,
                stock_quantity: update.stock,
            },
        },
        ProductCommand::List => return print_json(&ProductRepo::list(&conn)?),
    };

    print_json(&apply_order_command(cmd, &mut conn)?)
}
