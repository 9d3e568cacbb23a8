//! Seed import command
//!
//! Usage: ordergraph seed import <PATH>

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use super::{open_store, print_json, CliResult};

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file, or every *.yaml/*.yml file of a directory
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

pub fn execute(args: SeedArgs, db: &Path) -> CliResult {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, db),
    }
}

fn execute_import(args: ImportArgs, db: &Path) -> CliResult {
    let mut conn = open_store(db)?;

    let seed_files = if args.path.is_dir() {
        // sorted for a deterministic id assignment
        let mut files: Vec<PathBuf> = std::fs::read_dir(&args.path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    } else {
        vec![args.path]
    };

    let mut reports = Vec::with_capacity(seed_files.len());
    for seed_file in &seed_files {
        let report = ordergraph_store::seed::import_seed(seed_file, &mut conn)?;
        reports.push(serde_json::json!({
            "path": seed_file.display().to_string(),
            "report": report,
        }));
    }

    print_json(&reports)
}
