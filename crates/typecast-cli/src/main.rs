// this_file: crates/typecast-cli/src/main.rs

//! Typecast CLI - Command-line interface for Typecast glyph layout

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Layout(args) => commands::layout::run(&args),
        Commands::Info(args) => commands::info::run(&args),
    }
}
