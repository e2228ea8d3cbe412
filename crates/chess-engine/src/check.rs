//! Check detection.
//!
//! Attacks are found by scanning outward from the target square and asking
//! the first piece on each ray whether its own pseudo-legal moves reach the
//! target. The move generator stays the single source of truth for how a
//! piece moves, and a scan costs eight rays plus eight knight squares.

use crate::movegen::{first_piece, jumps, pseudo_legal_moves, ALL_DIRECTIONS, KNIGHT_OFFSETS};
use chess_core::{Board, Color, ColoredPiece, Piece, Square};
use thiserror::Error;

/// Faults found while inspecting a board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("no {0} king on the board")]
    MissingKing(Color),
}

/// Returns true if `color`'s king is attacked.
///
/// Fails with [`RulesError::MissingKing`] when the board has no such king.
pub fn is_king_attacked(board: &Board, color: Color) -> Result<bool, RulesError> {
    let king = board
        .king_square(color)
        .ok_or(RulesError::MissingKing(color))?;
    Ok(is_square_attacked(board, king, color.opposite()))
}

/// Returns true if a piece of color `by` could capture on `target`.
///
/// `target` should be empty or hold a piece of the other color. An empty
/// target is probed with a stand-in piece, since pawns only move diagonally
/// onto occupied squares.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    if board.is_empty(target) {
        let mut probe = board.clone();
        probe.place(target, ColoredPiece::new(by.opposite(), Piece::Pawn));
        return scan_attackers(&probe, target, by);
    }
    scan_attackers(board, target, by)
}

fn scan_attackers(board: &Board, target: Square, by: Color) -> bool {
    let ray_attack = ALL_DIRECTIONS.iter().any(|&dir| {
        first_piece(board, target, dir).is_some_and(|(sq, piece)| {
            piece.color == by && pseudo_legal_moves(board, sq).iter().any(|m| m.to() == target)
        })
    });
    if ray_attack {
        return true;
    }

    let enemy_knight = ColoredPiece::new(by, Piece::Knight);
    jumps(target, &KNIGHT_OFFSETS).any(|sq| board.get(sq) == Some(enemy_knight))
}
