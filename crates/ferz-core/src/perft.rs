//! Perft (performance test) for move generation correctness verification.

use crate::chess_move::{Move, PromotionPiece};
use crate::legality::legal_candidates;
use crate::position::Position;

/// Each legal move of the side to move, with every promotion expanded into its four pieces.
fn expanded_moves(position: &Position) -> Vec<(Move, Option<PromotionPiece>)> {
    position
        .pieces(position.side_to_move())
        .flat_map(|(from, _)| legal_candidates(position, from))
        .flat_map(|mv| {
            let choices: Vec<Option<PromotionPiece>> = if mv.is_promotion() {
                PromotionPiece::ALL.into_iter().map(Some).collect()
            } else {
                vec![None]
            };
            choices.into_iter().map(move |choice| (mv, choice))
        })
        .collect()
}

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without applying them.
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = expanded_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|(mv, choice)| {
            let child = position.make_move(mv, choice.unwrap_or_default());
            perft(&child, depth - 1)
        })
        .sum()
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(coordinate_move, node_count)` pairs sorted alphabetically.
pub fn divide(position: &Position, depth: usize) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = expanded_moves(position)
        .into_iter()
        .map(|(mv, choice)| {
            let child = position.make_move(mv, choice.unwrap_or_default());
            let count = if depth <= 1 { 1 } else { perft(&child, depth - 1) };
            (mv.to_coordinate(choice), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn parse(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    // --- Position 1: Starting position ---

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Position::starting_position(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Position::starting_position(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Position::starting_position(), 3), 8_902);
    }

    #[test]
    #[ignore] // slow
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Position::starting_position(), 4), 197_281);
    }

    // --- Position 2: Kiwipete ---

    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft(&parse(KIWIPETE), 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft(&parse(KIWIPETE), 2), 2_039);
    }

    #[test]
    #[ignore] // slow
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft(&parse(KIWIPETE), 3), 97_862);
    }

    // --- Position 3: rook and pawn endgame ---

    #[test]
    fn perft_pos3_depth_1() {
        assert_eq!(perft(&parse(POSITION_3), 1), 14);
    }

    #[test]
    fn perft_pos3_depth_2() {
        assert_eq!(perft(&parse(POSITION_3), 2), 191);
    }

    #[test]
    fn perft_pos3_depth_3() {
        assert_eq!(perft(&parse(POSITION_3), 3), 2_812);
    }

    #[test]
    #[ignore] // slow
    fn perft_pos3_depth_4() {
        assert_eq!(perft(&parse(POSITION_3), 4), 43_238);
    }

    // --- Position 4: promotions and castling ---

    #[test]
    fn perft_pos4_depth_1() {
        assert_eq!(perft(&parse(POSITION_4), 1), 6);
    }

    #[test]
    fn perft_pos4_depth_2() {
        assert_eq!(perft(&parse(POSITION_4), 2), 264);
    }

    #[test]
    #[ignore] // slow
    fn perft_pos4_depth_3() {
        assert_eq!(perft(&parse(POSITION_4), 3), 9_467);
    }

    // --- Position 5 ---

    #[test]
    fn perft_pos5_depth_1() {
        assert_eq!(perft(&parse(POSITION_5), 1), 44);
    }

    #[test]
    fn perft_pos5_depth_2() {
        assert_eq!(perft(&parse(POSITION_5), 2), 1_486);
    }

    #[test]
    #[ignore] // slow
    fn perft_pos5_depth_3() {
        assert_eq!(perft(&parse(POSITION_5), 3), 62_379);
    }

    #[test]
    fn perft_depth_0_is_one() {
        assert_eq!(perft(&Position::starting_position(), 0), 1);
    }

    #[test]
    fn divide_startpos_depth_2() {
        let results = divide(&Position::starting_position(), 2);
        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|(_, count)| *count == 20));
        assert_eq!(results[0].0, "a2a3");
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
    }

    #[test]
    fn divide_lists_each_promotion_piece() {
        let results = divide(&parse("4k3/P7/8/8/8/8/8/4K3 w - - 0 1"), 1);
        let promotions: Vec<&str> = results
            .iter()
            .map(|(mv, _)| mv.as_str())
            .filter(|mv| mv.starts_with("a7a8"))
            .collect();
        assert_eq!(promotions, vec!["a7a8b", "a7a8n", "a7a8q", "a7a8r"]);
    }
}
