//! Property-based tests using proptest.

use super::{assert_consistent, Snapshot};
use crate::board::{Board, Move, UnmoveData};
use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `num_moves` random legal moves, returning what was played.
fn random_playout(board: &mut Board, seed: u64, num_moves: usize) -> Vec<(Move, UnmoveData)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = Vec::with_capacity(num_moves);
    for _ in 0..num_moves {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        played.push((mv, board.make_move(mv)));
    }
    played
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: make_move followed by unmake_move restores board state exactly
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let initial = Snapshot::of(&board);

        let mut played = random_playout(&mut board, seed, num_moves);
        while let Some((mv, info)) = played.pop() {
            board.unmake_move(mv, info);
        }

        prop_assert_eq!(Snapshot::of(&board), initial);
    }

    /// Property: the incremental hash always matches a full recomputation
    #[test]
    fn prop_hash_matches_recomputation(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..num_moves {
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }
            board.make_move(moves[rng.gen_range(0..moves.len())]);
            prop_assert_eq!(board.hash(), board.calculate_hash());
            assert_consistent(&board);
        }
    }

    /// Property: FEN output parses back into the same position
    #[test]
    fn prop_fen_round_trip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);

        let fen = board.to_fen();
        let parsed = Board::try_from_fen(&fen).expect("own FEN parses");
        prop_assert_eq!(parsed.to_fen(), fen);
        prop_assert_eq!(parsed.hash(), board.hash());
    }

    /// Property: every generated move leaves the mover's king unattacked
    #[test]
    fn prop_generated_moves_are_legal(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);

        let us = board.side_to_move();
        for mv in board.generate_moves().iter().copied().collect::<Vec<_>>() {
            let info = board.make_move(mv);
            prop_assert!(!board.is_square_attacked(board.king_square(us), us.opponent()));
            board.unmake_move(mv, info);
        }
    }

    /// Property: tactical moves are exactly the legal captures and promotions
    #[test]
    fn prop_tactical_moves_match_filter(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);

        let them = board.side_to_move().opponent();
        let ep = board.en_passant_square();
        let mut expected: Vec<Move> = board
            .generate_moves()
            .iter()
            .copied()
            .filter(|mv| {
                mv.promotion().is_some()
                    || board.occupied_by(them).contains(mv.to())
                    || (Some(mv.to()) == ep
                        && board.piece_at(mv.from()).map(|(_, p)| p) == Some(crate::board::Piece::Pawn))
            })
            .collect();
        let mut tactical: Vec<Move> = board.generate_tactical_moves().iter().copied().collect();
        expected.sort_by_key(|mv| mv.as_u16());
        tactical.sort_by_key(|mv| mv.as_u16());
        prop_assert_eq!(tactical, expected);
    }
}
