//! Mailbox board: one slot per square, no rule knowledge.

use crate::{Color, ColoredPiece, FenError, Piece, Square};
use std::fmt;
use thiserror::Error;

/// Structural problems found by [`Board::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected exactly one {color} king, found {count}")]
    InvalidKingCount { color: Color, count: usize },
}

/// Piece storage for the 64 squares.
///
/// The board only stores pieces. It knows nothing about whose turn it is or
/// which moves are legal; that lives in the engine.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<ColoredPiece>; 64],
}

impl Board {
    /// The standard starting placement in FEN.
    pub const STARTPOS_PLACEMENT: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    const BACK_ROW: [Piece; 8] = [
        Piece::Rook,
        Piece::Knight,
        Piece::Bishop,
        Piece::Queen,
        Piece::King,
        Piece::Bishop,
        Piece::Knight,
        Piece::Rook,
    ];

    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates a board with the standard starting layout.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<ColoredPiece> {
        self.squares[sq.index()]
    }

    /// Places `piece` on `sq`, or empties the square when `piece` is `None`.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<ColoredPiece>) {
        self.squares[sq.index()] = piece;
    }

    /// Places a piece on `sq`, replacing whatever was there.
    #[inline]
    pub fn place(&mut self, sq: Square, piece: ColoredPiece) {
        self.set(sq, Some(piece));
    }

    /// Removes and returns the piece on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<ColoredPiece> {
        self.squares[sq.index()].take()
    }

    /// Returns true if no piece stands on `sq`.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Restores the standard starting layout.
    pub fn reset(&mut self) {
        self.clear();
        for color in Color::ALL {
            for (i, piece) in Self::BACK_ROW.iter().enumerate() {
                let col = i as u8 + 1;
                self.place(
                    Square::new(color.back_row(), col),
                    ColoredPiece::new(color, *piece),
                );
                self.place(
                    Square::new(color.pawn_row(), col),
                    ColoredPiece::new(color, Piece::Pawn),
                );
            }
        }
    }

    /// Removes every piece.
    pub fn clear(&mut self) {
        self.squares = [None; 64];
    }

    /// Iterates over occupied squares from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares and kinds of one color's pieces.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces()
            .filter(move |(_, p)| p.color == color)
            .map(|(sq, p)| (sq, p.piece))
    }

    /// Returns the number of pieces on the board.
    pub fn count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }

    /// Returns the square of `color`'s king, if there is one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = ColoredPiece::new(color, Piece::King);
        self.pieces().find(|(_, p)| *p == king).map(|(sq, _)| sq)
    }

    /// Checks that each side has exactly one king.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self
                .pieces_of(color)
                .filter(|(_, piece)| *piece == Piece::King)
                .count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }
        Ok(())
    }

    /// Builds a board from the piece-placement field of a FEN string.
    pub fn from_fen_placement(placement: &str) -> Result<Self, FenError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (i, text) in rows.iter().enumerate() {
            let row = 8 - i as u8;
            let mut col = 1u8;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    col += skip as u8;
                    if col > 9 {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "rank {} is too long",
                            row
                        )));
                    }
                    continue;
                }
                let piece = ColoredPiece::from_fen_char(c).ok_or_else(|| {
                    FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c, row
                    ))
                })?;
                let sq = Square::try_new(row, col).ok_or_else(|| {
                    FenError::InvalidPiecePlacement(format!("rank {} is too long", row))
                })?;
                board.place(sq, piece);
                col += 1;
            }
            if col != 9 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    row,
                    col - 1
                )));
            }
        }
        Ok(board)
    }

    /// Returns the piece-placement field of a FEN string.
    pub fn fen_placement(&self) -> String {
        let mut fen = String::new();
        for row in (1..=8).rev() {
            let mut empty = 0;
            for col in 1..=8 {
                match self.get(Square::new(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row > 1 {
                fen.push('/');
            }
        }
        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.fen_placement())
    }
}
