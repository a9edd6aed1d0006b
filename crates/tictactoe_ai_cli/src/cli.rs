//! Command-line interface for tictactoe-ai.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_ai::{Board, Mark, Strategy};

/// Tic-tac-toe against an exhaustive minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe-ai")]
#[command(about = "Play tic-tac-toe against a minimax AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine settings shared by all commands
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Engine overrides applied on top of the config file.
#[derive(Args, Debug)]
pub struct EngineArgs {
    /// Path to an engine config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Search strategy (exhaustive or alpha_beta)
    #[arg(long, global = true)]
    pub strategy: Option<Strategy>,

    /// Mark played by the AI (the human gets the other one)
    #[arg(long, global = true)]
    pub ai: Option<Mark>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the terminal
    Play,

    /// Print the AI's move for a board
    BestMove {
        /// Nine cells in row-major order: X, O and _ for empty
        board: Board,

        /// Also print the score of every candidate
        #[arg(long)]
        scores: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Pit the AI against a random opponent
    SelfPlay {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for the random opponent
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
}
