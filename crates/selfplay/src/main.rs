//! Ultimate tic-tac-toe driver.
//!
//! Plays a single game with the board printed after every move, or a match
//! of independent MCTS-vs-random games run in parallel.

mod arena;

use anyhow::{ensure, Context, Result};
use arena::{describe_result, play_match_game, MatchGame, Opponent, Tally};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;
use uttt_board::{Player, Position, Side};
use uttt_mcts::{MctsPlayer, DEFAULT_ITERATIONS, DEFAULT_SEED};

/// Ultimate tic-tac-toe with Monte Carlo Tree Search.
#[derive(Parser)]
#[command(name = "uttt-selfplay")]
#[command(about = "Play ultimate tic-tac-toe games with an MCTS player")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game, printing the board after every move.
    Play {
        /// MCTS iterations per move.
        #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Seed of the MCTS player.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Opponent of the MCTS player.
        #[arg(long, value_enum, default_value_t = Opponent::Random)]
        opponent: Opponent,

        /// Seed of the opponent.
        #[arg(long, default_value = "7")]
        opponent_seed: u64,

        /// Let the opponent move first.
        #[arg(long)]
        mcts_second: bool,
    },

    /// Play a match of MCTS against random moves and print the tally.
    Match {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// MCTS iterations per move.
        #[arg(short, long, default_value = "1000")]
        iterations: usize,

        /// Base seed; every game derives its own.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log filter: {}", level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

/// Run the play command.
fn cmd_play(
    iterations: usize,
    seed: u64,
    opponent: Opponent,
    opponent_seed: u64,
    mcts_second: bool,
) -> Result<()> {
    ensure!(iterations > 0, "--iterations must be at least 1");

    let mcts_side = if mcts_second {
        Side::Player2
    } else {
        Side::Player1
    };
    let mut mcts = MctsPlayer::with_seed(seed, iterations);
    let mut other = opponent.player(opponent_seed, iterations);

    println!(
        "MCTS ({} iterations, seed {}) plays {} against {:?}\n",
        iterations, seed, mcts_side, opponent
    );

    let mut position = Position::initial();
    println!("{}\n", position);

    let mut ply = 0;
    while !position.is_terminal() {
        let side = position.next_player();
        let start = Instant::now();
        let mv = if side == mcts_side {
            mcts.next_move(&position)
        } else {
            other.next_move(&position)
        };
        position
            .play(mv)
            .with_context(|| format!("{} returned an illegal move", side))?;
        ply += 1;

        if side == mcts_side {
            if let Some(search) = mcts.last_search() {
                let visits = search.visits_of(mv).unwrap_or(0);
                println!(
                    "{}. {} plays {} ({} of {} visits, {} nodes, {:.2}s)",
                    ply,
                    side,
                    mv,
                    visits,
                    search.root_visits,
                    search.tree_size,
                    start.elapsed().as_secs_f64()
                );
            }
        } else {
            println!("{}. {} plays {}", ply, side, mv);
        }
        println!("{}\n", position);
    }

    let result = position.overall_result();
    println!("Result after {} moves: {}", ply, describe_result(result));
    info!(moves = ply, result = describe_result(result), "game finished");
    Ok(())
}

/// Run the match command.
fn cmd_match(games: usize, iterations: usize, seed: u64) -> Result<()> {
    ensure!(games > 0, "--games must be at least 1");
    ensure!(iterations > 0, "--iterations must be at least 1");

    println!(
        "Playing {} games: MCTS ({} iterations) vs random, seed {}",
        games, iterations, seed
    );
    println!("================================================");

    let start = Instant::now();
    let results: Vec<MatchGame> = (0..games)
        .into_par_iter()
        .map(|i| play_match_game(i, iterations, seed))
        .collect::<Result<_>>()?;

    for game in &results {
        println!(
            "Game {}: MCTS as {}, {} in {} moves",
            game.index + 1,
            game.mcts_side,
            describe_result(game.record.result),
            game.record.moves.len()
        );
    }

    let total_moves: usize = results.iter().map(|g| g.record.moves.len()).sum();
    let tally: Tally = results.into_iter().collect();

    println!("------------------------------------------------");
    println!("MCTS: {}", tally);
    println!(
        "Completed in {:.2}s, average game length {:.1} moves",
        start.elapsed().as_secs_f64(),
        total_moves as f64 / games as f64
    );
    info!(
        games,
        wins = tally.wins,
        draws = tally.draws,
        losses = tally.losses,
        "match finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Play {
            iterations,
            seed,
            opponent,
            opponent_seed,
            mcts_second,
        } => cmd_play(iterations, seed, opponent, opponent_seed, mcts_second),
        Commands::Match {
            games,
            iterations,
            seed,
        } => cmd_match(games, iterations, seed),
    }
}
