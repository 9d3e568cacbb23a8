//! Order lifecycle commands
//!
//! Usage:
//!   ordergraph order create --member <ID> --item <PRODUCT_ID:COUNT>...
//!   ordergraph order cancel <ORDER_ID>
//!   ordergraph order complete-delivery <ORDER_ID>

use std::path::Path;

use clap::{Args, Subcommand};
use ordergraph_engine::{apply_order_command, OrderCommand};
use ordergraph_store::repo::OrderLine;

use super::{open_store, print_json, CliResult};

#[derive(Debug, Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum OrderSubcommand {
    /// Place an order
    Create(CreateArgs),
    /// Cancel an order and return its stock
    Cancel { order_id: i64 },
    /// Mark an order's delivery as completed
    CompleteDelivery { order_id: i64 },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub member: i64,

    /// PRODUCT_ID:COUNT, repeatable
    #[arg(long = "item", value_parser = parse_line, required = true)]
    pub items: Vec<OrderLine>,
}

fn parse_line(s: &str) -> Result<OrderLine, String> {
    let (product, count) = s
        .split_once(':')
        .ok_or_else(|| format!("expected PRODUCT_ID:COUNT, got '{}'", s))?;
    let product_id = product
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad product id '{}': {}", product, e))?;
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad count '{}': {}", count, e))?;
    Ok(OrderLine { product_id, count })
}

pub fn execute(args: OrderArgs, db: &Path) -> CliResult {
    let mut conn = open_store(db)?;

    let cmd = match args.command {
        OrderSubcommand::Create(create) => OrderCommand::CreateOrder {
            member_id: create.member,
            lines: create.items,
        },
        OrderSubcommand::Cancel { order_id } => OrderCommand::CancelOrder { order_id },
        OrderSubcommand::CompleteDelivery { order_id } => {
            OrderCommand::CompleteDelivery { order_id }
        }
    };

    print_json(&apply_order_command(cmd, &mut conn)?)
}
