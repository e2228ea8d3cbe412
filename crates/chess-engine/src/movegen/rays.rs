//! Movement directions and ray walking for every piece type.

use chess_core::{Board, ColoredPiece, Square};

/// A (row, column) step.
pub type Direction = (i8, i8);

/// Rook directions.
pub const ORTHOGONAL: [Direction; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop directions.
pub const DIAGONAL: [Direction; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Queen directions; also the king's single steps.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Knight jumps.
pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Squares from `from` (exclusive) to the board edge along `dir`.
pub fn ray(from: Square, dir: Direction) -> impl Iterator<Item = Square> {
    let (dr, dc) = dir;
    std::iter::successors(from.offset(dr, dc), move |sq| sq.offset(dr, dc))
}

/// The first piece met walking from `from` along `dir`.
pub fn first_piece(board: &Board, from: Square, dir: Direction) -> Option<(Square, ColoredPiece)> {
    ray(from, dir).find_map(|sq| board.get(sq).map(|piece| (sq, piece)))
}

/// Squares reached by applying each offset to `from`, skipping the ones off the board.
pub fn jumps(from: Square, offsets: &[Direction]) -> impl Iterator<Item = Square> + '_ {
    offsets
        .iter()
        .filter_map(move |&(dr, dc)| from.offset(dr, dc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Piece};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn ray_stops_at_edge() {
        let squares: Vec<Square> = ray(sq("e4"), (1, 0)).collect();
        assert_eq!(squares, vec![sq("e5"), sq("e6"), sq("e7"), sq("e8")]);
        assert_eq!(ray(Square::H8, (1, 1)).count(), 0);
        assert_eq!(ray(Square::A1, (1, 1)).count(), 7);
    }

    #[test]
    fn first_piece_on_ray() {
        let board = Board::startpos();
        assert_eq!(
            first_piece(&board, sq("e4"), (1, 0)),
            Some((sq("e7"), ColoredPiece::new(Color::Black, Piece::Pawn)))
        );
        assert_eq!(first_piece(&board, sq("e4"), (0, 1)), None);
    }

    #[test]
    fn knight_jumps_from_corner() {
        let mut targets: Vec<Square> = jumps(Square::A1, &KNIGHT_OFFSETS).collect();
        targets.sort();
        assert_eq!(targets, vec![sq("c2"), sq("b3")]);
        assert_eq!(jumps(sq("d4"), &KNIGHT_OFFSETS).count(), 8);
    }
}
