//! Fundbook CLI - a community-fund ledger with an append-only audit trail.
//!
//! This is the command-line interface for Fundbook. It authenticates users
//! against the credential store and drives the core ledger service.

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use crate::cli::{Cli, Commands};
use crate::context::AppContext;

mod cli;
mod commands;
mod config;
mod context;
mod helpers;
mod output;
mod session;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Completions need no resolved paths.
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "fundbook", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = AppContext::resolve(&cli)?;
    match &cli.command {
        Commands::Init(args) => commands::init::run(&ctx, &cli, args),
        Commands::Add(args) => commands::entries::add(&ctx, &cli, args),
        Commands::List(args) => commands::entries::list(&ctx, args),
        Commands::Edit(args) => commands::entries::edit(&ctx, &cli, args),
        Commands::Delete(args) => commands::entries::delete(&ctx, &cli, args),
        Commands::Report { json } => commands::report::run(&ctx, *json),
        Commands::History(args) => commands::history::run(&ctx, args),
        Commands::Completions { .. } => Ok(()),
    }
}
