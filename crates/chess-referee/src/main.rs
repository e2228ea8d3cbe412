//! Chess Referee - drives the rules engine from the command line.
//!
//! Replays games, lists valid moves, reports game status and runs perft.

mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::RefereeConfig;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chess-referee")]
#[command(about = "Checks chess moves and positions against the rules")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Start position as FEN (overrides the configuration file)
    #[arg(long, global = true)]
    fen: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play UCI moves in order, printing FEN and status after each
    Replay {
        /// Moves in UCI notation (e.g., e2e4 e7e5 e7e8q)
        moves: Vec<String>,
        /// Keep submitting moves after the game has ended
        #[arg(long)]
        keep_going: bool,
    },
    /// List the valid moves of the piece on a square
    Moves {
        /// Square in algebraic notation (e.g., e2)
        square: String,
    },
    /// Print side to move and check, checkmate and stalemate flags
    Status,
    /// Count leaf nodes to the given depth
    Perft {
        /// Search depth in plies
        depth: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = RefereeConfig::load(cli.config.as_deref())?;

    let level_text = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let level: Level = level_text
        .parse()
        .with_context(|| format!("Invalid log level: {}", level_text))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let fen = cli.fen.as_deref().or(config.start_fen.as_deref());
    let mut game = commands::starting_game(fen)?;
    tracing::info!("Starting position: {}", game.to_fen());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Replay { moves, keep_going } => {
            let stop_at_terminal = config.stop_at_terminal && !keep_going;
            commands::replay(&mut game, &moves, stop_at_terminal, &mut out)?;
        }
        Commands::Moves { square } => commands::moves(&game, &square, &mut out)?,
        Commands::Status => commands::status(&game, &mut out)?,
        Commands::Perft { depth } => {
            commands::perft(&game, depth, &mut out)?;
        }
    }
    Ok(())
}
