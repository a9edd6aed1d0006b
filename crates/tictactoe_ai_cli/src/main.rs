//! tictactoe-ai - terminal front end for the minimax engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, EngineArgs};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tictactoe_ai::{
    Board, EngineConfig, Game, Mark, MoveScore, Outcome, Position, SearchReport,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.engine)?;

    match cli.command {
        Command::Play => run_play(&config),
        Command::BestMove {
            board,
            scores,
            json,
        } => run_best_move(&config, &board, scores, json),
        Command::SelfPlay { games, seed } => run_self_play(&config, games, seed),
    }
}

/// Reads the config file, if any, and applies command-line overrides.
#[instrument(skip(args))]
fn load_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy);
    }
    if let Some(ai) = args.ai {
        config = config.with_ai_mark(ai).with_human_mark(ai.opponent());
    }
    config.validate()?;
    debug!(?config, "Engine configured");
    Ok(config)
}

/// Interactive game: the human types cells, the AI answers.
fn run_play(config: &EngineConfig) -> Result<()> {
    let mut game = Game::new(config)?;
    info!(ai = %game.ai_mark(), "Starting interactive game");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut out = io::stdout();

    println!(
        "You play {}. Enter a cell (1-9 or a name like \"center\"), r to reset, q to quit.",
        game.human_mark()
    );

    loop {
        if game.is_ai_turn() {
            let (index, _) = game.ai_move()?;
            let position = Position::from_index(index).context("engine chose an invalid cell")?;
            println!("AI plays {}", position);
        }

        println!("\n{}\n", game.board().display());
        println!("{}", game.status());
        if let Some(line) = game.winning_line() {
            let cells: Vec<_> = line
                .pattern()
                .cells()
                .iter()
                .filter_map(|&i| Position::from_index(i))
                .map(|p| p.label())
                .collect();
            println!("Winning line: {}", cells.join(", "));
        }
        if game.outcome().is_terminal() {
            println!("Press r to play again or q to quit.");
        }

        print!("> ");
        out.flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let input = line?;
        let input = input.trim();

        match input {
            "q" | "quit" => return Ok(()),
            "r" | "reset" => {
                game.reset();
                continue;
            }
            _ => {}
        }

        let Some(position) = Position::parse(input) else {
            let open: Vec<_> = Position::valid_moves(game.board())
                .iter()
                .map(|p| (p.to_index() + 1).to_string())
                .collect();
            println!("Unknown cell {:?}; open cells: {}", input, open.join(", "));
            continue;
        };
        if let Err(e) = game.human_move(position.to_index()) {
            println!("{}", e);
        }
    }
}

#[derive(Serialize)]
struct BestMoveOutput {
    board: String,
    ai_mark: Mark,
    report: SearchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<MoveScore>>,
}

/// Prints the engine's choice for a single board.
#[instrument(skip(config))]
fn run_best_move(config: &EngineConfig, board: &Board, scores: bool, json: bool) -> Result<()> {
    let ai = *config.ai_mark();
    let human = *config.human_mark();
    let searcher = config.searcher();

    let Some(report) = searcher.search(board, ai, human)? else {
        bail!("no empty cell on board {}", board);
    };
    let scores = if scores {
        Some(searcher.move_scores(board, ai, human)?)
    } else {
        None
    };

    if json {
        let output = BestMoveOutput {
            board: board.to_string(),
            ai_mark: ai,
            report,
            scores,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}\n", board.display());
    if let Some(scores) = &scores {
        for MoveScore { index, score } in scores {
            println!("  cell {} -> {:+}", index + 1, score);
        }
        println!();
    }
    let position = Position::from_index(report.index).context("engine chose an invalid cell")?;
    println!(
        "{} plays {} (index {}, score {:+}, {} positions searched)",
        ai, position, report.index, report.score, report.nodes
    );
    Ok(())
}

/// Tallies of a self-play run from the AI's side.
#[derive(Debug, Default)]
struct Tally {
    wins: u32,
    draws: u32,
    losses: u32,
}

/// Plays the AI against a uniformly random opponent.
#[instrument(skip(config))]
fn run_self_play(config: &EngineConfig, games: u32, seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = Game::new(config)?;
    let mut tally = Tally::default();

    for round in 0..games {
        game.reset();
        while !game.outcome().is_terminal() {
            if game.is_ai_turn() {
                game.ai_move()?;
            } else {
                let moves = game.board().empty_indices();
                let index = *moves.choose(&mut rng).context("no move for random player")?;
                game.human_move(index)?;
            }
        }

        match game.outcome() {
            Outcome::Draw => tally.draws += 1,
            won if won.winner() == Some(game.ai_mark()) => tally.wins += 1,
            _ => {
                tally.losses += 1;
                tracing::warn!(round, board = %game.board(), "AI lost a game");
            }
        }
        debug!(round, outcome = %game.outcome(), "Game finished");
    }

    info!(?tally, "Self-play finished");
    println!(
        "{} games as {}: {} won, {} drawn, {} lost",
        games,
        game.ai_mark(),
        tally.wins,
        tally.draws,
        tally.losses
    );
    Ok(())
}
