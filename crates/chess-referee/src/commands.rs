//! Subcommand implementations.
//!
//! Each command writes its report to the given writer so it can be checked
//! in tests without capturing stdout.

use anyhow::{bail, Context, Result};
use chess_core::{Color, Square};
use chess_engine::{perft_divide, Game};
use std::io::Write;

/// Builds the starting game from a FEN string, or the standard position.
pub fn starting_game(fen: Option<&str>) -> Result<Game> {
    match fen {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("Invalid start position: {}", fen)),
        None => Ok(Game::new()),
    }
}

/// Plays `moves` in order, reporting FEN and status after each.
///
/// An illegal move aborts the replay with the engine's reason. With
/// `stop_at_terminal`, moves after a finished position are not submitted.
pub fn replay(
    game: &mut Game,
    moves: &[String],
    stop_at_terminal: bool,
    out: &mut impl Write,
) -> Result<()> {
    for (ply, text) in moves.iter().enumerate() {
        let status = game.status();
        if stop_at_terminal && status.is_terminal() {
            tracing::warn!(
                "Game already finished ({}); ignoring {} remaining move(s)",
                status,
                moves.len() - ply
            );
            break;
        }

        let mv = game
            .make_move_uci(text)
            .with_context(|| format!("Move {} ({}) rejected", ply + 1, text))?;
        writeln!(out, "{}. {} -> {}", ply + 1, mv, game.to_fen())?;
        writeln!(out, "   {}", game.status())?;
    }
    Ok(())
}

/// Lists the valid moves of the piece on `square`.
pub fn moves(game: &Game, square: &str, out: &mut impl Write) -> Result<()> {
    let Some(sq) = Square::from_algebraic(square) else {
        bail!("Invalid square: {}", square);
    };
    let Some(piece) = game.board().get(sq) else {
        writeln!(out, "{}: empty", sq)?;
        return Ok(());
    };

    let list = game.valid_moves(sq);
    let mut texts: Vec<String> = list.iter().map(|m| m.to_uci()).collect();
    texts.sort();
    writeln!(out, "{} on {}: {} move(s)", piece, sq, texts.len())?;
    for text in texts {
        writeln!(out, "  {}", text)?;
    }
    Ok(())
}

/// Reports side to move and check, checkmate and stalemate flags.
pub fn status(game: &Game, out: &mut impl Write) -> Result<()> {
    writeln!(out, "fen: {}", game.to_fen())?;
    writeln!(out, "to move: {}", game.side_to_move())?;
    for color in Color::ALL {
        writeln!(
            out,
            "{}: check={} checkmate={} stalemate={}",
            color,
            game.is_in_check(color),
            game.is_in_checkmate(color),
            game.is_in_stalemate(color)
        )?;
    }
    writeln!(out, "status: {}", game.status())?;
    Ok(())
}

/// Counts leaf nodes to `depth`, broken down by root move.
pub fn perft(game: &Game, depth: u32, out: &mut impl Write) -> Result<u64> {
    if depth == 0 {
        writeln!(out, "Nodes: 1")?;
        return Ok(1);
    }
    let start = std::time::Instant::now();
    let results = perft_divide(game, depth);
    let total: u64 = results.iter().map(|(_, n)| n).sum();
    for (mv, nodes) in &results {
        writeln!(out, "{}: {}", mv, nodes)?;
    }
    writeln!(out)?;
    writeln!(out, "Nodes: {}", total)?;
    tracing::info!("perft {} finished in {:?}", depth, start.elapsed());
    Ok(total)
}
