//! Pseudo-legal move generation.
//!
//! Moves produced here follow each piece's movement pattern but ignore
//! whether they expose the mover's own king. En passant and castling depend
//! on game history and are added by [`Game`](crate::Game).

mod rays;

use chess_core::{Board, Color, Move, Piece, Square};

pub use rays::{
    first_piece, jumps, ray, Direction, ALL_DIRECTIONS, DIAGONAL, KNIGHT_OFFSETS, ORTHOGONAL,
};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves a list can hold.
    pub const MAX_MOVES: usize = 256;

    const FILLER: Move = Move::new(Square::A1, Square::A1);

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Self::FILLER; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Appends every move of `other`.
    pub fn extend_from(&mut self, other: &MoveList) {
        for &m in other {
            self.push(m);
        }
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds `m`.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of the piece on `from`.
///
/// # Panics
///
/// Panics if `from` is empty. Callers decide what an empty square means;
/// the generator only knows how pieces move.
pub fn pseudo_legal_moves(board: &Board, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    generate_piece_moves(board, from, &mut moves);
    moves
}

/// Appends the pseudo-legal moves of the piece on `from` to `moves`.
///
/// # Panics
///
/// Panics if `from` is empty.
pub fn generate_piece_moves(board: &Board, from: Square, moves: &mut MoveList) {
    let Some(piece) = board.get(from) else {
        panic!("move generation requested for empty square {}", from);
    };
    let us = piece.color;
    match piece.piece {
        Piece::Pawn => generate_pawn_moves(board, from, us, moves),
        Piece::Knight => generate_jump_moves(board, from, us, &KNIGHT_OFFSETS, moves),
        Piece::Bishop => generate_slider_moves(board, from, us, &DIAGONAL, moves),
        Piece::Rook => generate_slider_moves(board, from, us, &ORTHOGONAL, moves),
        Piece::Queen => generate_slider_moves(board, from, us, &ALL_DIRECTIONS, moves),
        Piece::King => generate_jump_moves(board, from, us, &ALL_DIRECTIONS, moves),
    }
}

/// Walks each ray until the edge or the first piece, which is included only
/// if it belongs to the opponent.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    us: Color,
    directions: &[Direction],
    moves: &mut MoveList,
) {
    for &dir in directions {
        for to in ray(from, dir) {
            match board.get(to) {
                None => moves.push(Move::new(from, to)),
                Some(target) => {
                    if target.color != us {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
        }
    }
}

/// Single-step pieces (knight, king): every in-bounds offset not holding a friendly piece.
fn generate_jump_moves(
    board: &Board,
    from: Square,
    us: Color,
    offsets: &[Direction],
    moves: &mut MoveList,
) {
    for to in jumps(from, offsets) {
        if board.get(to).map_or(true, |target| target.color != us) {
            moves.push(Move::new(from, to));
        }
    }
}

fn generate_pawn_moves(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    let dir = us.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            push_pawn_move(from, one, us, moves);
            if from.row() == us.pawn_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.is_empty(two) {
                        moves.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    // Captures
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc) {
            if board.get(to).is_some_and(|target| target.color != us) {
                push_pawn_move(from, to, us, moves);
            }
        }
    }
}

/// Pushes a pawn move, expanding it into the four promotions on the last row.
fn push_pawn_move(from: Square, to: Square, us: Color, moves: &mut MoveList) {
    if to.row() == us.promotion_row() {
        for piece in Piece::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, piece));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::ColoredPiece;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(placement: &str) -> Board {
        Board::from_fen_placement(placement).unwrap()
    }

    fn targets(moves: &MoveList) -> Vec<String> {
        let mut out: Vec<String> = moves.iter().map(|m| m.to().to_algebraic()).collect();
        out.sort();
        out
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = Move::new(sq("e2"), sq("e4"));
        let m2 = Move::new(sq("d2"), sq("d4"));
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.contains(m2));
        assert!(!list.contains(Move::new(sq("c2"), sq("c4"))));
    }

    #[test]
    fn movelist_retain_and_clear() {
        let mut list = MoveList::new();
        list.push(Move::new(sq("e2"), sq("e3")));
        list.push(Move::new(sq("e2"), sq("e4")));
        list.push(Move::new(sq("e3"), sq("e4")));

        list.retain(|m| m.from() == sq("e2"));
        assert_eq!(list.len(), 2);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn movelist_extend() {
        let mut a = MoveList::new();
        a.push(Move::new(sq("a2"), sq("a3")));
        let mut b = MoveList::default();
        b.push(Move::new(sq("b2"), sq("b3")));
        a.extend_from(&b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn pawn_from_home_row() {
        let moves = pseudo_legal_moves(&Board::startpos(), sq("e2"));
        assert_eq!(targets(&moves), vec!["e3", "e4"]);

        let moves = pseudo_legal_moves(&Board::startpos(), sq("d7"));
        assert_eq!(targets(&moves), vec!["d5", "d6"]);
    }

    #[test]
    fn pawn_double_push_needs_both_squares_empty() {
        // Knight on e3 blocks both pushes; knight on d4 blocks only the double push.
        let b = board("4k3/8/8/8/3n4/4n3/3PP3/4K3");
        assert!(pseudo_legal_moves(&b, sq("e2")).is_empty());
        assert_eq!(targets(&pseudo_legal_moves(&b, sq("d2"))), vec!["d3", "e3"]);
    }

    #[test]
    fn pawn_blocked_pawn_has_no_push() {
        let b = board("4k3/8/8/8/8/4p3/4P3/4K3");
        assert!(pseudo_legal_moves(&b, sq("e2")).is_empty());
    }

    #[test]
    fn pawn_captures_only_enemies() {
        let b = board("4k3/8/8/3p1P2/4P3/8/8/4K3");
        assert_eq!(targets(&pseudo_legal_moves(&b, sq("e4"))), vec!["d5", "e5"]);
    }

    #[test]
    fn pawn_promotion_expands_to_four() {
        let b = board("1r2k3/P7/8/8/8/8/8/4K3");
        let moves = pseudo_legal_moves(&b, sq("a7"));
        assert_eq!(moves.len(), 8);
        for piece in Piece::PROMOTIONS {
            assert!(moves.contains(Move::with_promotion(sq("a7"), sq("a8"), piece)));
            assert!(moves.contains(Move::with_promotion(sq("a7"), sq("b8"), piece)));
        }
        assert!(moves.iter().all(|m| m.promotion().is_some()));
    }

    #[test]
    fn black_pawn_promotes_on_first_row() {
        let b = board("4k3/8/8/8/8/8/p7/4K3");
        let moves = pseudo_legal_moves(&b, sq("a2"));
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.to() == Square::A1));
    }

    #[test]
    fn knight_moves() {
        let moves = pseudo_legal_moves(&Board::startpos(), Square::G1);
        assert_eq!(targets(&moves), vec!["f3", "h3"]);

        let b = board("4k3/8/8/8/3N4/8/8/4K3");
        assert_eq!(pseudo_legal_moves(&b, sq("d4")).len(), 8);
    }

    #[test]
    fn sliders_stop_at_first_piece() {
        let b = board("4k3/8/8/1p6/8/3R1P2/8/4K3");
        let moves = pseudo_legal_moves(&b, sq("d3"));
        assert_eq!(
            targets(&moves),
            vec!["a3", "b3", "c3", "d1", "d2", "d4", "d5", "d6", "d7", "d8", "e3"]
        );
    }

    #[test]
    fn bishop_captures_enemy() {
        let b = board("4k3/8/8/1p6/8/3B4/8/4K3");
        let moves = pseudo_legal_moves(&b, sq("d3"));
        assert!(moves.contains(Move::new(sq("d3"), sq("b5"))));
        assert!(!moves.contains(Move::new(sq("d3"), sq("a6"))));
    }

    #[test]
    fn queen_in_open_center() {
        let b = board("4k3/8/8/8/3Q4/8/8/7K");
        assert_eq!(pseudo_legal_moves(&b, sq("d4")).len(), 27);
    }

    #[test]
    fn king_excludes_own_pieces() {
        let moves = pseudo_legal_moves(&Board::startpos(), Square::E1);
        assert!(moves.is_empty());

        let b = board("4k3/8/8/8/8/8/3P4/4K3");
        assert_eq!(targets(&pseudo_legal_moves(&b, Square::E1)), vec!["d1", "e2", "f1", "f2"]);
    }

    #[test]
    fn startpos_has_twenty_pseudo_moves_for_white() {
        let board = Board::startpos();
        let total: usize = board
            .pieces_of(Color::White)
            .map(|(sq, _)| pseudo_legal_moves(&board, sq).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    #[should_panic(expected = "empty square")]
    fn empty_square_is_a_contract_violation() {
        let _ = pseudo_legal_moves(&Board::startpos(), sq("e4"));
    }

    #[test]
    fn generator_ignores_check() {
        // The pinned rook still reports its moves off the pin line.
        let mut b = Board::empty();
        b.place(Square::E1, ColoredPiece::new(Color::White, Piece::King));
        b.place(sq("e2"), ColoredPiece::new(Color::White, Piece::Rook));
        b.place(Square::E8, ColoredPiece::new(Color::Black, Piece::Rook));
        let moves = pseudo_legal_moves(&b, sq("e2"));
        assert!(moves.contains(Move::new(sq("e2"), sq("a2"))));
    }
}
