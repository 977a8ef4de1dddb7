//! Integration tests for the rules engine through its public API.
//!
//! Plays short games with `Position::play` and checks classification,
//! special moves, and position text after each step.

use ferz_core::{
    CastleRights, CheckState, Color, GameStatus, Move, MoveError, MoveKind, Piece, Position,
    PromotionPiece, STARTING_FEN, Square, is_square_attacked, legal_moves, legal_moves_from,
    status,
};

const SCHOLARS_MATE_FEN: &str =
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

/// The position after playing `mv` on a copy of `position`.
fn after(position: &Position, mv: Move) -> Position {
    let mut next = *position;
    next.play(mv.from(), mv.to(), PromotionPiece::Queen)
        .unwrap_or_else(|err| panic!("{mv:?} rejected in {position}: {err}"));
    next
}

/// Play a sequence of coordinate moves such as `"e2e4"`, always promoting to a queen.
fn play_all(position: &mut Position, moves: &[&str]) {
    for text in moves {
        let from: Square = text[0..2].parse().unwrap();
        let to: Square = text[2..4].parse().unwrap();
        position
            .play(from, to, PromotionPiece::Queen)
            .unwrap_or_else(|err| panic!("{text} rejected in {position}: {err}"));
    }
}

// ── Reference scenarios ───────────────────────────────────────────────────────

#[test]
fn e2e4_from_start() {
    let mut position: Position = STARTING_FEN.parse().unwrap();
    play_all(&mut position, &["e2e4"]);
    assert_eq!(
        position.to_string(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn knight_b1_destinations() {
    let position = Position::starting_position();
    let moves = legal_moves_from(&position, Square::B1);
    let mut dests: Vec<Square> = moves.iter().map(|m| m.to()).collect();
    dests.sort();
    assert_eq!(dests, vec![Square::A3, Square::C3]);
    assert!(moves.iter().all(|m| m.kind() == MoveKind::Quiet));
}

#[test]
fn scholars_mate_is_classified_and_ends_the_game() {
    let mut position = Position::starting_position();
    play_all(&mut position, &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"]);
    assert_eq!(position.to_string(), SCHOLARS_MATE_FEN);

    let mate = position.play(Square::H5, Square::F7, PromotionPiece::Queen).unwrap();
    assert_eq!(mate.kind(), MoveKind::Checkmate);
    assert!(mate.is_capture(), "the action survives the annotation");
    assert_eq!(status(&position), GameStatus::Checkmate);
    assert!(legal_moves(&position).is_empty());
    assert_eq!(
        position.play(Square::E8, Square::F7, PromotionPiece::Queen),
        Err(MoveError::IllegalMove { from: Square::E8, to: Square::F7 })
    );
}

#[test]
fn check_with_reply_is_check() {
    let mut position = Position::starting_position();
    play_all(&mut position, &["e2e4", "f7f5"]);
    let mv = position.play(Square::D1, Square::H5, PromotionPiece::Queen).unwrap();
    assert_eq!(mv.check(), CheckState::Check);
    assert_eq!(status(&position), GameStatus::Check);

    // Only g6 or interpositions are allowed: every reply must resolve the check.
    for reply in legal_moves(&position) {
        let next = after(&position, reply);
        assert!(!is_square_attacked(&next, next.king_square(Color::Black), Color::White));
    }
}

#[test]
fn en_passant_removes_the_advanced_pawn() {
    let mut position = Position::starting_position();
    play_all(&mut position, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(position.en_passant(), Some(Square::D6));

    let mv = position.play(Square::E5, Square::D6, PromotionPiece::Queen).unwrap();
    assert_eq!(mv.kind(), MoveKind::EnPassantCapture);
    assert_eq!(position.piece_on(Square::D6), Some(Piece::WHITE_PAWN));
    assert_eq!(position.piece_on(Square::D5), None);
    assert_eq!(position.piece_on(Square::E5), None);
    assert_eq!(position.halfmove_clock(), 0);
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut position = Position::starting_position();
    play_all(&mut position, &["e2e4", "a7a6", "e4e5", "d7d5", "g1f3", "h7h6"]);
    assert!(
        !legal_moves_from(&position, Square::E5)
            .iter()
            .any(|m| m.to() == Square::D6)
    );
}

#[test]
fn castling_moves_king_and_rook_and_clears_rights() {
    let mut position = Position::starting_position();
    play_all(&mut position, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);

    let castle = legal_moves_from(&position, Square::E1)
        .into_iter()
        .find(|m| m.to() == Square::G1)
        .expect("castling should be offered");
    assert_eq!(castle.kind(), MoveKind::Castle);

    position.play(Square::E1, Square::G1, PromotionPiece::Queen).unwrap();
    assert_eq!(position.piece_on(Square::G1), Some(Piece::WHITE_KING));
    assert_eq!(position.piece_on(Square::F1), Some(Piece::WHITE_ROOK));
    assert_eq!(position.piece_on(Square::H1), None);
    assert_eq!(position.castling(), CastleRights::BLACK_BOTH);
    assert_eq!(
        position.to_string(),
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4"
    );
}

#[test]
fn promotion_asks_and_applies_choice() {
    let mut position: Position = "8/1P5k/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
    let mv = position
        .play(Square::B7, Square::B8, |color: Color, square: Square| {
            assert_eq!((color, square), (Color::White, Square::B8));
            PromotionPiece::Knight
        })
        .unwrap();
    assert!(mv.is_promotion());
    assert_eq!(position.piece_on(Square::B8), Some(Piece::WHITE_KNIGHT));
    assert_eq!(position.to_string(), "1N6/7k/8/8/8/8/8/4K3 b - - 0 1");
}

// ── Invariants over played games ──────────────────────────────────────────────

#[test]
fn legal_moves_stay_legal_along_a_game() {
    let mut position = Position::starting_position();
    // Deterministic walk: always play the last listed legal move.
    for _ in 0..40 {
        let moves = legal_moves(&position);
        let Some(&mv) = moves.last() else {
            break;
        };
        let us = position.side_to_move();
        for candidate in &moves {
            let next = after(&position, *candidate);
            assert!(
                !is_square_attacked(&next, next.king_square(us), !us),
                "{candidate:?} leaves the king attacked in {position}"
            );
            assert_eq!(
                candidate.check() != CheckState::None,
                is_square_attacked(&next, next.king_square(!us), us)
            );
        }
        position.play(mv.from(), mv.to(), PromotionPiece::Queen).unwrap();

        let text = position.to_string();
        let reparsed: Position = text.parse().unwrap();
        assert_eq!(reparsed, position, "text roundtrip failed for {text}");
    }
}

#[test]
fn rejected_moves_leave_position_unchanged() {
    let mut position: Position = SCHOLARS_MATE_FEN.parse().unwrap();
    let before = position;
    assert!(position.play(Square::E1, Square::G1, PromotionPiece::Queen).is_err());
    assert!(position.play(Square::A7, Square::A6, PromotionPiece::Queen).is_err());
    assert!(position.play(Square::H5, Square::H8, PromotionPiece::Queen).is_err());
    assert!(position.play_coords((0, 0), (-1, 3), PromotionPiece::Queen).is_err());
    assert_eq!(position, before);
}

#[test]
fn kings_cannot_be_removed_through_the_public_api() {
    // A rook "capturing" the king straight through its own pieces is refused.
    let mut position = Position::starting_position();
    assert_eq!(
        position.play(Square::A1, Square::E8, PromotionPiece::Queen),
        Err(MoveError::IllegalMove { from: Square::A1, to: Square::E8 })
    );
    assert_eq!(position, Position::starting_position());

    // Even with the king exposed, the side to move never has a king capture
    // available, because a position with the opponent in check is rejected.
    assert!("4k3/8/8/8/8/8/8/4RK2 w - - 0 1".parse::<Position>().is_err());
    assert!("8/8/8/8/8/8/8/4RK2 b - - 0 1".parse::<Position>().is_err());

    let position: Position = "4k3/8/8/8/8/8/8/4RK2 b - - 0 1".parse().unwrap();
    assert!(legal_moves(&position).iter().all(|m| {
        let next = after(&position, *m);
        next.find_king(Color::White).is_some() && next.find_king(Color::Black).is_some()
    }));
}
