//! Member commands
//!
//! Usage:
//!   ordergraph member join <NAME> --city <CITY> --street <STREET> --zipcode <ZIP>
//!   ordergraph member list

use std::path::Path;

use clap::{Args, Subcommand};
use ordergraph_core::model::Address;
use ordergraph_engine::{apply_order_command, OrderCommand};
use ordergraph_store::repo::MemberRepo;

use super::{open_store, print_json, CliResult};

#[derive(Debug, Args)]
pub struct MemberArgs {
    #[command(subcommand)]
    pub command: MemberCommand,
}

#[derive(Debug, Subcommand)]
pub enum MemberCommand {
    /// Register a new member
    Join(JoinArgs),
    /// List all members
    List,
}

#[derive(Debug, Args)]
pub struct JoinArgs {
    pub name: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub street: String,

    #[arg(long)]
    pub zipcode: String,
}

pub fn execute(args: MemberArgs, db: &Path) -> CliResult {
    let mut conn = open_store(db)?;

    match args.command {
        MemberCommand::Join(join) => {
            let result = apply_order_command(
                OrderCommand::JoinMember {
                    name: join.name,
                    address: Address::new(join.city, join.street, join.zipcode),
                },
                &mut conn,
            )?;
            print_json(&result)
        }
        MemberCommand::List => print_json(&MemberRepo::list(&conn)?),
    }
}
