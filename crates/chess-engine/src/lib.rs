//! Chess rules engine on a mailbox board.
//!
//! This crate provides:
//! - [`Game`] - board, side to move, castling rights and the last move, with
//!   legal move generation and move application
//! - [`pseudo_legal_moves`] - per-piece movement patterns, ignoring self-check
//! - [`is_king_attacked`] / [`is_square_attacked`] - attack detection
//! - [`Transition`] - a move as a reversible board change
//! - [`GameStatus`] - check, checkmate, stalemate and dead-position draws
//! - [`perft`] - leaf counting for validating the generator
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameStatus};
//! use chess_core::Color;
//!
//! let mut game = Game::new();
//! for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     game.make_move_uci(m).unwrap();
//! }
//! assert!(game.is_in_checkmate(Color::White));
//! assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Black });
//! ```

mod castling;
mod check;
mod game;
pub mod movegen;
mod perft;
pub mod rules;
mod transition;

pub use castling::{CastleSide, CastlingRights};
pub use check::{is_king_attacked, is_square_attacked, RulesError};
pub use game::{Game, GameError, IllegalMoveReason, LastMove};
pub use movegen::{pseudo_legal_moves, MoveList};
pub use perft::{perft, perft_divide};
pub use rules::{is_dead_position, GameStatus};
pub use transition::Transition;
