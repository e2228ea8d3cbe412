//! Game state and turn management.
//!
//! [`Game`] owns the board together with everything the rules need beyond
//! piece placement: the side to move, castling rights and the previous move
//! (for en passant). It is the only place that decides legality, and it
//! changes state only through [`Game::make_move`], which either applies a
//! legal move completely or leaves the game untouched.
//!
//! A finished game still accepts calls; refusing moves after mate or a draw
//! is up to the caller.

use crate::castling::{CastleSide, CastlingRights};
use crate::check::{is_king_attacked, is_square_attacked};
use crate::movegen::{pseudo_legal_moves, MoveList};
use crate::rules::{is_dead_position, GameStatus};
use crate::transition::Transition;
use chess_core::{
    Board, BoardError, Color, ColoredPiece, FenError, FenParser, Move, Piece, Square,
};
use std::hash::{Hash, Hasher};
use thiserror::Error;
use tracing::{debug, trace};

/// Why a move was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    #[error("no piece on {0}")]
    NoPiece(Square),
    #[error("it is {expected}'s turn")]
    WrongSide { expected: Color },
    #[error("it would leave the king in check")]
    LeavesKingInCheck,
    #[error("the piece cannot move there")]
    NotLegal,
}

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move was refused; the game is unchanged.
    #[error("illegal move {mv}: {reason}")]
    IllegalMove {
        mv: Move,
        reason: IllegalMoveReason,
    },
    /// The text could not be read as a move.
    #[error("invalid move text: {0}")]
    InvalidMoveText(String),
    /// The board failed validation.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
    /// The FEN string could not be read.
    #[error(transparent)]
    InvalidFen(#[from] FenError),
}

/// The previous ply, kept for en-passant eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LastMove {
    pub mv: Move,
    pub piece: ColoredPiece,
}

impl LastMove {
    /// Returns true if this was a pawn advancing two rows.
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.piece == Piece::Pawn && self.mv.from().row().abs_diff(self.mv.to().row()) == 2
    }

    /// The square a pawn passed over, if this was a double push.
    pub fn en_passant_target(&self) -> Option<Square> {
        if !self.is_double_pawn_push() {
            return None;
        }
        let row = (self.mv.from().row() + self.mv.to().row()) / 2;
        Square::try_new(row, self.mv.to().col())
    }
}

/// A chess game under standard rules.
///
/// Equality and hashing consider only the board and the side to move, so
/// callers can count repeated positions themselves.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    last_move: Option<LastMove>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Game {
            board: Board::startpos(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            last_move: None,
        }
    }

    /// Creates a game from a FEN string.
    ///
    /// Castling letters become castling rights and an en-passant square
    /// becomes the double pawn push that produced it. The clocks are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed = FenParser::parse(fen)?;
        let board = Board::from_fen_placement(&parsed.piece_placement)?;
        board.validate()?;

        let last_move = match parsed.en_passant {
            Some(target) => Some(
                double_push_through(&board, target, parsed.active_color.opposite())
                    .ok_or_else(|| FenError::InvalidEnPassantSquare(target.to_algebraic()))?,
            ),
            None => None,
        };

        Ok(Game {
            board,
            side_to_move: parsed.active_color,
            castling: CastlingRights::from_fen(&parsed.castling),
            last_move,
        })
    }

    /// Returns the position as FEN, with clocks fixed at `0 1`.
    pub fn to_fen(&self) -> String {
        FenParser {
            piece_placement: self.board.fen_placement(),
            active_color: self.side_to_move,
            castling: self.castling.to_fen(),
            en_passant: self.last_move.and_then(|last| last.en_passant_target()),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
        .to_fen()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replaces the board, keeping side to move, castling rights and the
    /// last move.
    ///
    /// Fails, leaving the game unchanged, unless each side has exactly one
    /// king.
    pub fn set_board(&mut self, board: Board) -> Result<(), GameError> {
        board.validate()?;
        self.board = board;
        Ok(())
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Sets the side to move.
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Returns the castling rights.
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the previous move, if any.
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Returns the legal moves of the piece on `from`.
    ///
    /// An empty square has no moves. The piece's own color decides legality,
    /// whoever is to move.
    pub fn valid_moves(&self, from: Square) -> MoveList {
        let Some(piece) = self.board.get(from) else {
            return MoveList::new();
        };

        let mut moves = self.candidate_moves(from, piece);
        let mut scratch = self.board.clone();
        moves.retain(|&mv| !exposes_king(&mut scratch, mv, piece.color));
        trace!(square = %from, count = moves.len(), "valid moves");
        moves
    }

    /// Returns the legal moves of every piece of `color`.
    pub fn legal_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for (sq, _) in self.board.pieces_of(color) {
            moves.extend_from(&self.valid_moves(sq));
        }
        moves
    }

    /// Returns true if `color` has at least one legal move.
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .any(|(sq, _)| !self.valid_moves(sq).is_empty())
    }

    /// Plays `mv` for the side to move.
    ///
    /// On success the piece moves (with promotion, en-passant capture and
    /// the castling rook handled), castling rights are updated, the turn
    /// passes and the move is remembered for en passant. On failure nothing
    /// changes.
    pub fn make_move(&mut self, mv: Move) -> Result<(), GameError> {
        let Some(piece) = self.board.get(mv.from()) else {
            return Err(reject(mv, IllegalMoveReason::NoPiece(mv.from())));
        };
        if piece.color != self.side_to_move {
            return Err(reject(
                mv,
                IllegalMoveReason::WrongSide {
                    expected: self.side_to_move,
                },
            ));
        }
        if !self.valid_moves(mv.from()).contains(mv) {
            let reason = if self.candidate_moves(mv.from(), piece).contains(mv) {
                IllegalMoveReason::LeavesKingInCheck
            } else {
                IllegalMoveReason::NotLegal
            };
            return Err(reject(mv, reason));
        }

        self.apply(mv);
        debug!(mv = %mv, side = %piece.color, status = %self.status(), "move applied");
        Ok(())
    }

    /// Parses a UCI move (e.g., "e2e4", "e7e8q") and plays it.
    pub fn make_move_uci(&mut self, text: &str) -> Result<Move, GameError> {
        let mv = Move::from_uci(text).ok_or_else(|| GameError::InvalidMoveText(text.to_string()))?;
        self.make_move(mv)?;
        Ok(mv)
    }

    /// Applies a move already known to be legal.
    pub(crate) fn apply(&mut self, mv: Move) {
        let transition = Transition::new(&self.board, mv)
            .expect("internal inconsistency: applying a move from an empty square");
        transition.apply(&mut self.board);
        transition.update_rights(&mut self.castling);
        self.last_move = Some(LastMove {
            mv,
            piece: transition.moved,
        });
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Returns true if `color`'s king is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        king_attacked(&self.board, color)
    }

    /// Returns true if `color` is in check with no legal move.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Returns true if `color` is not in check and either has no legal move
    /// or the board is a dead position.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        if self.is_in_check(color) {
            return false;
        }
        !self.has_legal_move(color) || is_dead_position(&self.board)
    }

    /// Returns true if neither side can ever mate.
    pub fn is_dead_position(&self) -> bool {
        is_dead_position(&self.board)
    }

    /// Returns the status for the side to move.
    pub fn status(&self) -> GameStatus {
        let side = self.side_to_move;
        let in_check = self.is_in_check(side);
        if !self.has_legal_move(side) {
            return if in_check {
                GameStatus::Checkmate {
                    winner: side.opposite(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        if in_check {
            GameStatus::Check(side)
        } else if is_dead_position(&self.board) {
            GameStatus::DrawInsufficientMaterial
        } else {
            GameStatus::InProgress(side)
        }
    }

    /// Pseudo-legal moves plus en passant and castling, before the
    /// self-check filter. Captures of a king are never offered.
    fn candidate_moves(&self, from: Square, piece: ColoredPiece) -> MoveList {
        let mut moves = pseudo_legal_moves(&self.board, from);
        moves.retain(|mv| {
            self.board
                .get(mv.to())
                .map_or(true, |target| target.piece != Piece::King)
        });
        match piece.piece {
            Piece::Pawn => self.add_en_passant(from, piece.color, &mut moves),
            Piece::King => self.add_castling(from, piece.color, &mut moves),
            _ => {}
        }
        moves
    }

    fn add_en_passant(&self, from: Square, us: Color, moves: &mut MoveList) {
        let Some(last) = self.last_move else {
            return;
        };
        let their_pawn = ColoredPiece::new(us.opposite(), Piece::Pawn);
        if last.piece != their_pawn || !last.is_double_pawn_push() {
            return;
        }
        let passed = last.mv.to();
        if passed.row() != from.row()
            || passed.col().abs_diff(from.col()) != 1
            || self.board.get(passed) != Some(their_pawn)
        {
            return;
        }
        if let Some(to) = passed.offset(us.pawn_direction(), 0) {
            if self.board.is_empty(to) {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn add_castling(&self, from: Square, us: Color, moves: &mut MoveList) {
        if from != CastleSide::king_home(us) || self.castling.king_moved(us) {
            return;
        }
        let our_rook = ColoredPiece::new(us, Piece::Rook);
        for side in CastleSide::BOTH {
            if !self.castling.can_castle(us, side)
                || self.board.get(side.rook_home(us)) != Some(our_rook)
                || !side.between(us).all(|sq| self.board.is_empty(sq))
            {
                continue;
            }
            let path_attacked = side
                .king_path(us)
                .iter()
                .any(|&sq| is_square_attacked(&self.board, sq, us.opposite()));
            if !path_attacked {
                moves.push(Move::new(from, side.king_target(us)));
            }
        }
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board && self.side_to_move == other.side_to_move
    }
}

impl Eq for Game {}

impl Hash for Game {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
        self.side_to_move.hash(state);
    }
}

fn reject(mv: Move, reason: IllegalMoveReason) -> GameError {
    debug!(mv = %mv, %reason, "move rejected");
    GameError::IllegalMove { mv, reason }
}

/// A game board always holds both kings: `Game` validates every board it
/// accepts and never offers a king capture.
fn king_attacked(board: &Board, color: Color) -> bool {
    is_king_attacked(board, color).expect("internal inconsistency: king missing from game board")
}

/// Plays `mv` on the scratch board, checks the mover's king, and restores the board.
fn exposes_king(scratch: &mut Board, mv: Move, color: Color) -> bool {
    let Some(transition) = Transition::new(scratch, mv) else {
        return true;
    };
    transition.apply(scratch);
    let exposed = king_attacked(scratch, color);
    transition.revert(scratch);
    exposed
}

/// The double push by `mover` that passed over `target`, if the board agrees.
fn double_push_through(board: &Board, target: Square, mover: Color) -> Option<LastMove> {
    let dir = mover.pawn_direction();
    let from = target.offset(-dir, 0)?;
    let to = target.offset(dir, 0)?;
    let pawn = ColoredPiece::new(mover, Piece::Pawn);
    if from.row() != mover.pawn_row() || board.get(to) != Some(pawn) || !board.is_empty(target) {
        return None;
    }
    Some(LastMove {
        mv: Move::new(from, to),
        piece: pawn,
    })
}
