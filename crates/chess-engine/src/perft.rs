//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use crate::Game;

/// Counts the number of leaf nodes at the given depth.
///
/// Terminal positions are not special: a mated or stalemated side simply
/// contributes no children. Dead positions are still searched.
pub fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves(game.side_to_move());

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut next = game.clone();
        next.apply(*m);
        nodes += perft(&next, depth - 1);
    }
    nodes
}

/// Perft with divide - node count below each root move, sorted by UCI text.
pub fn perft_divide(game: &Game, depth: u32) -> Vec<(String, u64)> {
    let moves = game.legal_moves(game.side_to_move());
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut next = game.clone();
        next.apply(*m);
        let nodes = if depth > 1 {
            perft(&next, depth - 1)
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
