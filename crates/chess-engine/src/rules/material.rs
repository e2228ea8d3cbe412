//! Dead-position detection.

use chess_core::{Board, Piece};

/// Returns true if the material on `board` can never produce mate.
///
/// Recognized cases, with kings on both sides:
/// - nothing else (K v K)
/// - a single knight or bishop on the board (K+N v K, K+B v K)
/// - only bishops, all on squares of one colour, on either side
/// - two knights on one side against a bare king (K+NN v K)
///
/// Any pawn, rook or queen means the position is alive.
pub fn is_dead_position(board: &Board) -> bool {
    let mut knights = [0usize; 2];
    let mut light_bishops = 0usize;
    let mut dark_bishops = 0usize;

    for (sq, piece) in board.pieces() {
        match piece.piece {
            Piece::King => {}
            Piece::Knight => knights[piece.color.index()] += 1,
            Piece::Bishop if sq.is_light() => light_bishops += 1,
            Piece::Bishop => dark_bishops += 1,
            Piece::Pawn | Piece::Rook | Piece::Queen => return false,
        }
    }

    let total_knights = knights[0] + knights[1];
    let total_bishops = light_bishops + dark_bishops;
    match (total_knights, total_bishops) {
        (0, 0) | (1, 0) => true,
        (0, _) => light_bishops == 0 || dark_bishops == 0,
        (2, 0) => knights[0] == 2 || knights[1] == 2,
        _ => false,
    }
}
