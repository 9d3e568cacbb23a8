//! ordergraph CLI
//!
//! Command-line interface for the order store

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ordergraph_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Dev,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "ordergraph")]
#[command(about = "ordergraph - Order aggregates over SQLite", long_about = None)]
struct Cli {
    /// Database file
    #[arg(long, global = true, default_value = ".ordergraph/store.db")]
    db: PathBuf,

    /// Log output on stderr
    #[arg(long, global = true, value_enum, default_value = "dev")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Member operations
    Member(commands::member::MemberArgs),
    /// Product catalog operations
    Product(commands::product::ProductArgs),
    /// Order lifecycle operations
    Order(commands::order::OrderArgs),
    /// Load orders with a chosen strategy
    Orders(commands::orders::OrdersArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Dev => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Migrate => commands::migrate::execute(&cli.db),
        Commands::Seed(args) => commands::seed::execute(args, &cli.db),
        Commands::Member(args) => commands::member::execute(args, &cli.db),
        Commands::Product(args) => commands::product::execute(args, &cli.db),
        Commands::Order(args) => commands::order::execute(args, &cli.db),
        Commands::Orders(args) => commands::orders::execute(args, &cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
