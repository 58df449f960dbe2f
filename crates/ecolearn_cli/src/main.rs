//! EcoLearn - environmental challenge games in the terminal.

#![warn(missing_docs)]

mod cli;
mod games;
mod runner;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries prompts and snapshot lines.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Command::Quiz {
            count,
            category,
            difficulty,
            bank,
        } => games::play_quiz(count, category, difficulty, bank, cli.seed, cli.json).await,
        Command::Escape => games::play_escape(cli.seed, cli.json).await,
        Command::Detective => games::play_detective(cli.seed, cli.json).await,
        Command::Sort => games::play_sort(cli.seed, cli.json).await,
        Command::Words => games::play_words(cli.seed, cli.json).await,
    }
}
