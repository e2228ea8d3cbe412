//! Board square representation.

use std::fmt;

/// A square on the chess board, addressed by row and column in `1..=8`.
///
/// Row 1 is White's back rank and column 1 is the a-file. Internally the
/// square is stored as a 0-63 index in little-endian rank-file order:
/// - a1 = 0, b1 = 1, ..., h1 = 7
/// - a2 = 8, ..., h8 = 63
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `1..=8`. Use
    /// [`Square::try_new`] when the coordinates are not known to be valid.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(
            row >= 1 && row <= 8 && col >= 1 && col <= 8,
            "square coordinates out of range"
        );
        Square((row - 1) * 8 + (col - 1))
    }

    /// Creates a square from row and column, or `None` if out of range.
    #[inline]
    pub const fn try_new(row: u8, col: u8) -> Option<Self> {
        if row >= 1 && row <= 8 && col >= 1 && col <= 8 {
            Some(Square((row - 1) * 8 + (col - 1)))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square::new(rank - b'0', file - b'a' + 1))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the row (1-8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8 + 1
    }

    /// Returns the column (1-8).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8 + 1
    }

    /// Returns the square `dr` rows and `dc` columns away, if it is on the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if row < 1 || row > 8 || col < 1 || col > 8 {
            return None;
        }
        Some(Square::new(row as u8, col as u8))
    }

    /// Returns true for light squares (h1 is light, a1 is dark).
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.col() - 1) as char, self.row())
    }

    /// Iterates over all 64 squares from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_algebraic()
    }
}

impl TryFrom<String> for Square {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Square::from_algebraic(&s).ok_or_else(|| format!("invalid square: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(4, 5);
        assert_eq!(e4.row(), 4);
        assert_eq!(e4.col(), 5);
        assert_eq!(e4.index(), 28);
        assert_eq!(Square::new(1, 1), Square::A1);
        assert_eq!(Square::new(8, 8), Square::H8);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn square_new_out_of_range() {
        let _ = Square::new(9, 1);
    }

    #[test]
    fn square_try_new() {
        assert_eq!(Square::try_new(0, 1), None);
        assert_eq!(Square::try_new(1, 9), None);
        assert_eq!(Square::try_new(1, 5), Some(Square::E1));
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("e4"), Some(Square::new(4, 5)));
        assert_eq!(Square::from_algebraic("H8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::A1.to_algebraic(), "a1");
        assert_eq!(Square::H8.to_algebraic(), "h8");
        assert_eq!(Square::new(4, 5).to_algebraic(), "e4");
    }

    #[test]
    fn square_offset() {
        assert_eq!(Square::E1.offset(1, 0), Square::from_algebraic("e2"));
        assert_eq!(Square::E1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::A1.offset(2, 1), Square::from_algebraic("b3"));
    }

    #[test]
    fn square_color() {
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
        assert!(Square::A8.is_light());
        assert!(!Square::H8.is_light());
    }

    #[test]
    fn all_squares() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A1);
        assert_eq!(squares[63], Square::H8);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offset_stays_on_board(row in 1u8..=8, col in 1u8..=8, dr in -8i8..=8, dc in -8i8..=8) {
                let sq = Square::new(row, col);
                let target_row = row as i8 + dr;
                let target_col = col as i8 + dc;
                let on_board = (1..=8).contains(&target_row) && (1..=8).contains(&target_col);
                match sq.offset(dr, dc) {
                    Some(t) => {
                        prop_assert!(on_board);
                        prop_assert_eq!(t.row() as i8, target_row);
                        prop_assert_eq!(t.col() as i8, target_col);
                    }
                    None => prop_assert!(!on_board),
                }
            }

            #[test]
            fn neighbours_alternate_colour(row in 1u8..=8, col in 1u8..=7) {
                let sq = Square::new(row, col);
                let right = sq.offset(0, 1).unwrap();
                prop_assert_ne!(sq.is_light(), right.is_light());
            }
        }
    }
}
