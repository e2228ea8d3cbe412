//! Castling geometry and rights.

use chess_core::{Color, Square};

/// Column the king starts on.
const KING_HOME_COL: u8 = 5;

/// The two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    const fn rook_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 8,
            CastleSide::Queenside => 1,
        }
    }

    const fn king_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 3,
        }
    }

    const fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 4,
        }
    }

    /// Where `color`'s king starts.
    pub const fn king_home(color: Color) -> Square {
        Square::new(color.back_row(), KING_HOME_COL)
    }

    /// Where this side's rook starts.
    pub const fn rook_home(self, color: Color) -> Square {
        Square::new(color.back_row(), self.rook_col())
    }

    /// Where the king lands.
    pub const fn king_target(self, color: Color) -> Square {
        Square::new(color.back_row(), self.king_target_col())
    }

    /// Where the rook lands.
    pub const fn rook_target(self, color: Color) -> Square {
        Square::new(color.back_row(), self.rook_target_col())
    }

    /// Squares strictly between king and rook. All must be empty.
    pub fn between(self, color: Color) -> impl Iterator<Item = Square> {
        let (lo, hi) = match self {
            CastleSide::Kingside => (KING_HOME_COL + 1, self.rook_col() - 1),
            CastleSide::Queenside => (self.rook_col() + 1, KING_HOME_COL - 1),
        };
        (lo..=hi).map(move |col| Square::new(color.back_row(), col))
    }

    /// Squares the king stands on, crosses and lands on. None may be attacked.
    pub fn king_path(self, color: Color) -> [Square; 3] {
        let row = color.back_row();
        let step = match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        };
        let home = Self::king_home(color);
        [
            home,
            Square::new(row, (KING_HOME_COL as i8 + step) as u8),
            self.king_target(color),
        ]
    }

    /// Recognizes a king move from its home square to a castling target.
    pub fn from_king_move(color: Color, from: Square, to: Square) -> Option<CastleSide> {
        if from != Self::king_home(color) {
            return None;
        }
        Self::BOTH
            .into_iter()
            .find(|side| side.king_target(color) == to)
    }

    /// FEN letter for `color` castling on this side.
    const fn fen_char(self, color: Color) -> char {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => 'K',
            (Color::White, CastleSide::Queenside) => 'Q',
            (Color::Black, CastleSide::Kingside) => 'k',
            (Color::Black, CastleSide::Queenside) => 'q',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct SideRights {
    king_moved: bool,
    kingside_rook_moved: bool,
    queenside_rook_moved: bool,
}

impl SideRights {
    const MOVED: SideRights = SideRights {
        king_moved: true,
        kingside_rook_moved: true,
        queenside_rook_moved: true,
    };

    fn rook_moved(&mut self, side: CastleSide) -> &mut bool {
        match side {
            CastleSide::Kingside => &mut self.kingside_rook_moved,
            CastleSide::Queenside => &mut self.queenside_rook_moved,
        }
    }
}

/// Which kings and rooks have left their starting squares.
///
/// Flags only ever change from "unmoved" to "moved"; nothing restores a right
/// once it is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    sides: [SideRights; 2],
}

impl CastlingRights {
    /// Every king and rook unmoved, as at the start of a game.
    pub const ALL: CastlingRights = CastlingRights {
        sides: [
            SideRights {
                king_moved: false,
                kingside_rook_moved: false,
                queenside_rook_moved: false,
            },
            SideRights {
                king_moved: false,
                kingside_rook_moved: false,
                queenside_rook_moved: false,
            },
        ],
    };

    /// No castling for either side.
    pub const NONE: CastlingRights = CastlingRights {
        sides: [SideRights::MOVED, SideRights::MOVED],
    };

    /// Returns true if `color`'s king has moved.
    #[inline]
    pub fn king_moved(&self, color: Color) -> bool {
        self.sides[color.index()].king_moved
    }

    /// Returns true if `color`'s rook for `side` has moved or been captured.
    #[inline]
    pub fn rook_moved(&self, color: Color, side: CastleSide) -> bool {
        let rights = &self.sides[color.index()];
        match side {
            CastleSide::Kingside => rights.kingside_rook_moved,
            CastleSide::Queenside => rights.queenside_rook_moved,
        }
    }

    /// Returns true if neither the king nor the rook for `side` has moved.
    #[inline]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, side)
    }

    /// Records that `color`'s king has moved.
    pub fn mark_king_moved(&mut self, color: Color) {
        self.sides[color.index()].king_moved = true;
    }

    /// Records that `color`'s rook for `side` has moved.
    pub fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        *self.sides[color.index()].rook_moved(side) = true;
    }

    /// Records activity on `sq`: a piece left it, arrived on it or was
    /// captured there. Touching a king or rook home square clears the
    /// matching right.
    pub fn touch(&mut self, sq: Square) {
        for color in Color::ALL {
            if sq == CastleSide::king_home(color) {
                self.mark_king_moved(color);
            }
            for side in CastleSide::BOTH {
                if sq == side.rook_home(color) {
                    self.mark_rook_moved(color, side);
                }
            }
        }
    }

    /// Reads the castling field of a FEN string.
    ///
    /// A color with neither letter is treated as having moved its king.
    pub fn from_fen(field: &str) -> Self {
        let mut rights = CastlingRights::NONE;
        for color in Color::ALL {
            for side in CastleSide::BOTH {
                if field.contains(side.fen_char(color)) {
                    let entry = &mut rights.sides[color.index()];
                    entry.king_moved = false;
                    *entry.rook_moved(side) = false;
                }
            }
        }
        rights
    }

    /// Writes the castling field of a FEN string.
    pub fn to_fen(&self) -> String {
        let mut field = String::new();
        for color in Color::ALL {
            for side in CastleSide::BOTH {
                if self.can_castle(color, side) {
                    field.push(side.fen_char(color));
                }
            }
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn geometry_white() {
        assert_eq!(CastleSide::king_home(Color::White), Square::E1);
        assert_eq!(CastleSide::Kingside.rook_home(Color::White), Square::H1);
        assert_eq!(CastleSide::Kingside.king_target(Color::White), Square::G1);
        assert_eq!(CastleSide::Kingside.rook_target(Color::White), Square::F1);
        assert_eq!(CastleSide::Queenside.rook_home(Color::White), Square::A1);
        assert_eq!(CastleSide::Queenside.king_target(Color::White), Square::C1);
        assert_eq!(CastleSide::Queenside.rook_target(Color::White), Square::D1);
    }

    #[test]
    fn geometry_black() {
        assert_eq!(CastleSide::king_home(Color::Black), Square::E8);
        assert_eq!(CastleSide::Kingside.king_target(Color::Black), Square::G8);
        assert_eq!(CastleSide::Queenside.rook_target(Color::Black), Square::D8);
    }

    #[test]
    fn between_squares() {
        let kingside: Vec<Square> = CastleSide::Kingside.between(Color::White).collect();
        assert_eq!(kingside, vec![Square::F1, Square::G1]);
        let queenside: Vec<Square> = CastleSide::Queenside.between(Color::Black).collect();
        assert_eq!(queenside, vec![Square::B8, Square::C8, Square::D8]);
    }

    #[test]
    fn king_path_excludes_b_file() {
        assert_eq!(
            CastleSide::Queenside.king_path(Color::White),
            [Square::E1, Square::D1, Square::C1]
        );
        assert_eq!(
            CastleSide::Kingside.king_path(Color::Black),
            [Square::E8, Square::F8, Square::G8]
        );
    }

    #[test]
    fn recognizes_castling_king_moves() {
        assert_eq!(
            CastleSide::from_king_move(Color::White, Square::E1, Square::G1),
            Some(CastleSide::Kingside)
        );
        assert_eq!(
            CastleSide::from_king_move(Color::Black, Square::E8, Square::C8),
            Some(CastleSide::Queenside)
        );
        assert_eq!(
            CastleSide::from_king_move(Color::White, Square::E1, Square::F1),
            None
        );
        assert_eq!(
            CastleSide::from_king_move(Color::White, sq("e2"), Square::G1),
            None
        );
    }

    #[test]
    fn touching_home_squares_is_monotonic() {
        let mut rights = CastlingRights::ALL;
        rights.touch(Square::H1);
        assert!(!rights.can_castle(Color::White, CastleSide::Kingside));
        assert!(rights.can_castle(Color::White, CastleSide::Queenside));

        rights.touch(Square::E8);
        assert!(rights.king_moved(Color::Black));
        assert!(!rights.can_castle(Color::Black, CastleSide::Queenside));

        // Nothing brings a right back.
        rights.touch(Square::H1);
        rights.touch(sq("e4"));
        assert!(!rights.can_castle(Color::White, CastleSide::Kingside));
        assert!(rights.can_castle(Color::White, CastleSide::Queenside));
    }

    #[test]
    fn fen_roundtrip() {
        for field in ["KQkq", "Kq", "k", "-", "KQ"] {
            assert_eq!(CastlingRights::from_fen(field).to_fen(), field);
        }
        assert_eq!(CastlingRights::ALL.to_fen(), "KQkq");
        assert_eq!(CastlingRights::NONE.to_fen(), "-");
    }

    #[test]
    fn fen_without_letters_means_king_moved() {
        let rights = CastlingRights::from_fen("kq");
        assert!(rights.king_moved(Color::White));
        assert!(!rights.king_moved(Color::Black));
    }
}
