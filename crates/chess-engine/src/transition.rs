//! Moves as reversible board transitions.

use crate::castling::{CastleSide, CastlingRights};
use chess_core::{Board, ColoredPiece, Move, Piece, Square};

/// Every board change a move causes, captured before it is applied.
///
/// Because the record holds the full before-and-after picture (including an
/// en-passant victim and a castling rook), [`apply`](Transition::apply) and
/// [`revert`](Transition::revert) are exact inverses and do not depend on
/// the order of secondary effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub mv: Move,
    /// The piece leaving the start square.
    pub moved: ColoredPiece,
    /// The piece arriving on the destination (differs from `moved` on promotion).
    pub placed: ColoredPiece,
    /// The captured piece and where it stood.
    pub captured: Option<(Square, ColoredPiece)>,
    /// The castling rook's start and end squares.
    pub rook: Option<(Square, Square)>,
}

impl Transition {
    /// Works out what `mv` does on `board`, or `None` if its start square is empty.
    ///
    /// The move is not checked for legality. A pawn moving diagonally onto an
    /// empty square is read as en passant, and a king moving from its home
    /// square onto a castling target is read as castling.
    pub fn new(board: &Board, mv: Move) -> Option<Self> {
        let moved = board.get(mv.from())?;
        let placed = match mv.promotion() {
            Some(piece) => ColoredPiece::new(moved.color, piece),
            None => moved,
        };

        let mut captured = board.get(mv.to()).map(|piece| (mv.to(), piece));
        let mut rook = None;
        match moved.piece {
            Piece::Pawn if captured.is_none() && mv.from().col() != mv.to().col() => {
                let victim = Square::new(mv.from().row(), mv.to().col());
                captured = board.get(victim).map(|piece| (victim, piece));
            }
            Piece::King => {
                if let Some(side) = CastleSide::from_king_move(moved.color, mv.from(), mv.to()) {
                    rook = Some((side.rook_home(moved.color), side.rook_target(moved.color)));
                }
            }
            _ => {}
        }

        Some(Transition {
            mv,
            moved,
            placed,
            captured,
            rook,
        })
    }

    /// Performs the move on `board`.
    pub fn apply(&self, board: &mut Board) {
        board.set(self.mv.from(), None);
        if let Some((sq, _)) = self.captured {
            board.set(sq, None);
        }
        board.place(self.mv.to(), self.placed);
        if let Some((from, to)) = self.rook {
            let rook = board.take(from);
            board.set(to, rook);
        }
    }

    /// Undoes [`apply`](Transition::apply) on the same board.
    pub fn revert(&self, board: &mut Board) {
        if let Some((from, to)) = self.rook {
            let rook = board.take(to);
            board.set(from, rook);
        }
        board.set(self.mv.to(), None);
        if let Some((sq, piece)) = self.captured {
            board.place(sq, piece);
        }
        board.place(self.mv.from(), self.moved);
    }

    /// Clears the castling rights this move forfeits.
    pub fn update_rights(&self, rights: &mut CastlingRights) {
        rights.touch(self.mv.from());
        rights.touch(self.mv.to());
        if let Some((sq, _)) = self.captured {
            rights.touch(sq);
        }
    }
}
