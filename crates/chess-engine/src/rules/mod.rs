//! Game outcomes.
//!
//! [`GameStatus`] is what a [`Game`](crate::Game) reports after each move;
//! [`is_dead_position`] recognizes boards where neither side can mate.

mod material;

pub use material::is_dead_position;

use chess_core::Color;
use std::fmt;

/// The state of a game from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    /// Play continues; the given side is to move and not in check.
    InProgress(Color),
    /// The given side is to move and in check, with at least one escape.
    Check(Color),
    /// The side to move is mated.
    Checkmate { winner: Color },
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// Neither side has the material to force mate.
    DrawInsufficientMaterial,
}

impl GameStatus {
    /// Returns true once the game has ended.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate { .. } | GameStatus::Stalemate | GameStatus::DrawInsufficientMaterial
        )
    }

    /// Returns the winner, if the game ended in mate.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// Returns true for drawn outcomes.
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate | GameStatus::DrawInsufficientMaterial
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress(side) => write!(f, "{} to move", side),
            GameStatus::Check(side) => write!(f, "{} to move, in check", side),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::DrawInsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}
