//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and its
//! collaborators:
//! - [`Piece`], [`ColoredPiece`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates (row and column in `1..=8`)
//! - [`Move`] for move representation
//! - [`Board`], a mailbox of pieces with no rule knowledge
//! - FEN field parsing
//!
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` on the
//! value types.

mod board;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use board::{Board, BoardError};
pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::Move;
pub use piece::{ColoredPiece, Piece};
pub use square::Square;
