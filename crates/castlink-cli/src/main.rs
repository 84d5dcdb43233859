//! castlink - Command-line interface for finding cast receivers and playing media on them.
//!
//! Receivers are discovered over mDNS; `ls` streams them as they resolve and
//! `play` loads a media URL on one of them.

mod cli;
mod commands;
mod device;
mod error;
mod logging;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Ls(args) => commands::run_ls(args.clone(), &cli).await,
        Commands::Play(args) => commands::run_play(args.clone(), &cli).await,
    }
}
