//! Order loading command
//!
//! Usage: ordergraph orders list [--strategy <S>] [--status <S>] [--member <NAME>]
//!        [--offset <N>] [--limit <N>] [--batch-size <N>] [--summary <joined|lazy>]

use std::path::Path;

use clap::{Args, Subcommand, ValueEnum};
use ordergraph_core::model::OrderStatus;
use ordergraph_core::query::{LoadStrategy, OrderFilter, Page, ToOneResolution};
use ordergraph_engine::{apply_order_query, load_order_summaries, OrderQuery};

use super::{open_store, print_json, CliResult};

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// Load orders with their member, delivery and line items
    List(ListArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SummaryMode {
    Joined,
    Lazy,
}

impl From<SummaryMode> for ToOneResolution {
    fn from(mode: SummaryMode) -> Self {
        match mode {
            SummaryMode::Joined => ToOneResolution::Joined,
            SummaryMode::Lazy => ToOneResolution::Lazy,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// lazy-traversal, per-root-collections, batched-collections or flat-projection
    #[arg(long, default_value = "batched-collections")]
    pub strategy: LoadStrategy,

    /// PLACED or CANCELLED
    #[arg(long)]
    pub status: Option<OrderStatus>,

    /// Member name substring
    #[arg(long)]
    pub member: Option<String>,

    #[arg(long)]
    pub offset: Option<u64>,

    #[arg(long)]
    pub limit: Option<u64>,

    /// IN-clause size cap for batched-collections
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Load orders without line items; `--strategy` is ignored
    #[arg(long, value_enum)]
    pub summary: Option<SummaryMode>,
}

pub fn execute(args: OrdersArgs, db: &Path) -> CliResult {
    match args.command {
        OrdersCommand::List(list) => execute_list(list, db),
    }
}

fn execute_list(args: ListArgs, db: &Path) -> CliResult {
    let conn = open_store(db)?;

    let mut filter = OrderFilter::default();
    if let Some(status) = args.status {
        filter = filter.with_status(status);
    }
    if let Some(member) = args.member {
        filter = filter.with_member_name(member);
    }
    let page = Page::from_parts(args.offset, args.limit)?;

    if let Some(mode) = args.summary {
        let result = load_order_summaries(&conn, mode.into(), &filter, page)?;
        return print_json(&result);
    }

    let mut query = OrderQuery::new(args.strategy).with_filter(filter);
    if let Some(page) = page {
        query = query.with_page(page);
    }
    if let Some(size) = args.batch_size {
        query = query.with_batch_size(size);
    }

    print_json(&apply_order_query(query, &conn)?)
}
