//! minefuzz CLI - fuzz harness for repository-mining utilities.

mod cli;
mod commands;
mod console;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => commands::run::run(cli::RunArgs::default(), cli.verbose),

        Some(Commands::Run(args)) => commands::run::run(args, cli.verbose),

        Some(Commands::Campaigns { json }) => commands::campaigns::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
