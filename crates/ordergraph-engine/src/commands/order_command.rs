//! Write-side commands with boundary logging.
//!
//! The engine layer owns lifecycle logging for every command:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use chrono::Utc;
use ordergraph_core::model::{Address, Member, Product};
use ordergraph_core::{log_op_end, log_op_error, log_op_start};
use ordergraph_store::errors::Result;
use ordergraph_store::repo::{MemberRepo, OrderLine, OrderRepo, ProductRepo, ProductUpdate};
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderCommand {
    JoinMember {
        name: String,
        address: Address,
    },
    RegisterProduct {
        name: String,
        price: i64,
        stock_quantity: u32,
    },
    UpdateProduct {
        product_id: i64,
        update: ProductUpdate,
    },
    CreateOrder {
        member_id: i64,
        lines: Vec<OrderLine>,
    },
    CancelOrder {
        order_id: i64,
    },
    CompleteDelivery {
        order_id: i64,
    },
}

impl OrderCommand {
    /// Operation name used in logs
    pub fn op(&self) -> &'static str {
        match self {
            OrderCommand::JoinMember { .. } => "join_member",
            OrderCommand::RegisterProduct { .. } => "register_product",
            OrderCommand::UpdateProduct { .. } => "update_product",
            OrderCommand::CreateOrder { .. } => "create_order",
            OrderCommand::CancelOrder { .. } => "cancel_order",
            OrderCommand::CompleteDelivery { .. } => "complete_delivery",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OrderCommandResult {
    MemberJoined { member: Member },
    ProductRegistered { product: Product },
    ProductUpdated { product: Product },
    OrderCreated { order_id: i64 },
    OrderCancelled { order_id: i64 },
    DeliveryCompleted { order_id: i64 },
}

/// Apply one write command
///
/// # Errors
///
/// Whatever the underlying rule or repository reports, e.g.
/// `InsufficientStock`, `IllegalState`, `DuplicateMember`, `NotFound`.
pub fn apply_order_command(cmd: OrderCommand, conn: &mut Connection) -> Result<OrderCommandResult> {
    let op = cmd.op();
    log_op_start!(op);
    let start = Instant::now();

    let result = apply_impl(cmd, conn).map_err(|e| {
        log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
    Ok(result)
}

fn apply_impl(cmd: OrderCommand, conn: &mut Connection) -> Result<OrderCommandResult> {
    match cmd {
        OrderCommand::JoinMember { name, address } => {
            let member = MemberRepo::join(conn, &name, address)?;
            Ok(OrderCommandResult::MemberJoined { member })
        }
        OrderCommand::RegisterProduct {
            name,
            price,
            stock_quantity,
        } => {
            let product = ProductRepo::register(conn, Product::new(name, price, stock_quantity))?;
            Ok(OrderCommandResult::ProductRegistered { product })
        }
        OrderCommand::UpdateProduct { product_id, update } => {
            let product = ProductRepo::update(conn, product_id, update)?;
            Ok(OrderCommandResult::ProductUpdated { product })
        }
        OrderCommand::CreateOrder { member_id, lines } => {
            let order_id = OrderRepo::create_order(conn, member_id, &lines, Utc::now())?;
            Ok(OrderCommandResult::OrderCreated { order_id })
        }
        OrderCommand::CancelOrder { order_id } => {
            OrderRepo::cancel_order(conn, order_id)?;
            Ok(OrderCommandResult::OrderCancelled { order_id })
        }
        OrderCommand::CompleteDelivery { order_id } => {
            OrderRepo::complete_delivery(conn, order_id)?;
            Ok(OrderCommandResult::DeliveryCompleted { order_id })
        }
    }
}
