//! Property-based tests for game invariants.

use chess_core::{Color, Move, Piece, Square};
use chess_engine::{Game, GameError};
use proptest::prelude::*;

const POSITIONS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 1",
];

fn start_position() -> impl Strategy<Value = Game> {
    prop::sample::select(POSITIONS.to_vec()).prop_map(|fen| Game::from_fen(fen).unwrap())
}

fn king_count(game: &Game, color: Color) -> usize {
    game.board()
        .pieces_of(color)
        .filter(|(_, piece)| *piece == Piece::King)
        .count()
}

/// Plays up to `choices.len()` plies, each picking a legal move by index.
fn playout(mut game: Game, choices: &[usize]) -> Result<Game, TestCaseError> {
    for &choice in choices {
        let mover = game.side_to_move();
        let moves = game.legal_moves(mover);
        if moves.is_empty() {
            break;
        }
        let mv = moves[choice % moves.len()];
        game.make_move(mv)
            .map_err(|e| TestCaseError::fail(format!("legal move {} rejected: {}", mv, e)))?;

        prop_assert!(!game.is_in_check(mover), "{} left its king in check with {}", mover, mv);
        prop_assert_eq!(game.side_to_move(), mover.opposite());
        prop_assert_eq!(king_count(&game, Color::White), 1);
        prop_assert_eq!(king_count(&game, Color::Black), 1);
    }
    Ok(game)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_playouts_keep_invariants(
        game in start_position(),
        choices in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        playout(game, &choices)?;
    }

    #[test]
    fn rejected_moves_do_not_mutate(
        game in start_position(),
        choices in prop::collection::vec(any::<usize>(), 0..12),
        from in 0u8..64,
        to in 0u8..64,
    ) {
        let mut game = playout(game, &choices)?;
        let mv = Move::new(Square::from_index(from).unwrap(), Square::from_index(to).unwrap());
        let before = game.clone();
        let legal = game.legal_moves(game.side_to_move()).contains(mv);

        match game.make_move(mv) {
            Ok(()) => prop_assert!(legal),
            Err(GameError::IllegalMove { .. }) => {
                prop_assert!(!legal);
                prop_assert_eq!(&game, &before);
                prop_assert_eq!(game.castling_rights(), before.castling_rights());
                prop_assert_eq!(game.last_move(), before.last_move());
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn status_matches_predicates(
        game in start_position(),
        choices in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let game = playout(game, &choices)?;
        let side = game.side_to_move();
        let status = game.status();
        prop_assert_eq!(status.winner().is_some(), game.is_in_checkmate(side));
        prop_assert!(!(game.is_in_checkmate(side) && game.is_in_stalemate(side)));
        if game.is_in_stalemate(side) {
            prop_assert!(status.is_draw());
        }
    }
}
