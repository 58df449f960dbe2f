//! Command-line interface for ecolearn.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// EcoLearn - environmental challenge games in the terminal
#[derive(Parser, Debug)]
#[command(name = "ecolearn")]
#[command(about = "Environmental challenge games in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Seed for reproducible item draws
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Emit machine-readable transition lines instead of prose
    #[arg(long, global = true)]
    pub json: bool,

    /// Game to play
    #[command(subcommand)]
    pub command: Command,
}

/// Available games
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Timed multiple-choice quiz battle
    Quiz {
        /// Number of questions to draw
        #[arg(short, long, default_value = "10")]
        count: usize,

        /// Restrict questions to one category
        #[arg(long)]
        category: Option<String>,

        /// Restrict questions to one difficulty
        #[arg(long)]
        difficulty: Option<String>,

        /// Load questions from a TOML bank instead of the built-in set
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Escape four eco-puzzle rooms before the clock runs out
    Escape,

    /// Solve pollution cases from the evidence
    Detective,

    /// Sort waste items into the right bins
    Sort,

    /// Find hidden environmental vocabulary
    Words,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_parse_after_the_subcommand() {
        let cli = Cli::try_parse_from(["ecolearn", "quiz", "--seed", "7", "--json"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert!(cli.json);
        match cli.command {
            Command::Quiz { count, .. } => assert_eq!(count, 10),
            other => panic!("parsed the wrong subcommand: {other:?}"),
        }
    }

    #[test]
    fn test_quiz_accepts_category_and_bank() {
        let cli = Cli::try_parse_from([
            "ecolearn",
            "quiz",
            "--count",
            "5",
            "--category",
            "energy",
            "--bank",
            "bank.toml",
        ])
        .unwrap();
        match cli.command {
            Command::Quiz {
                count,
                category,
                bank,
                ..
            } => {
                assert_eq!(count, 5);
                assert_eq!(category.as_deref(), Some("energy"));
                assert_eq!(bank, Some(PathBuf::from("bank.toml")));
            }
            other => panic!("parsed the wrong subcommand: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["ecolearn", "tycoon"]).is_err());
    }
}
