//! Legal move generation and check/checkmate classification.
//!
//! A candidate is legal when, applied to a scratch copy of the position, it
//! leaves the mover's king unattacked. Castling additionally requires that the
//! king does not start on, cross, or land on an attacked square. Each legal
//! move is then annotated with what it does to the opponent, which needs one
//! level of reply search: a checked opponent with no legal reply is mated.

use crate::attacks::{is_square_attacked, pseudo_legal_moves};
use crate::chess_move::{CheckState, Move, MoveAction, PromotionPiece};
use crate::position::Position;
use crate::square::Square;

/// The state of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Not in check, with at least one legal move.
    Ongoing,
    /// In check, with at least one legal move.
    Check,
    /// In check, with no legal move.
    Checkmate,
    /// Not in check, with no legal move. No draw ruling is made.
    NoLegalMoves,
}

impl GameStatus {
    /// Return `true` if the side to move cannot move.
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::NoLegalMoves)
    }
}

/// Return `true` if the side to move's king is attacked.
pub fn is_in_check(position: &Position) -> bool {
    let us = position.side_to_move();
    is_square_attacked(position, position.king_square(us), !us)
}

/// Return `true` if applying `mv` keeps the mover's king safe.
fn is_safe(position: &Position, mv: Move) -> bool {
    let us = position.side_to_move();

    if let MoveAction::Castle(side) = mv.action()
        && side
            .king_path(us)
            .iter()
            .any(|&sq| is_square_attacked(position, sq, !us))
    {
        return false;
    }

    let after = position.make_move(mv, PromotionPiece::Queen);
    !is_square_attacked(&after, after.king_square(us), !us)
}

/// Legal moves from `from` without check annotations.
///
/// Empty unless `from` holds a piece of the side to move.
pub(crate) fn legal_candidates(position: &Position, from: Square) -> Vec<Move> {
    if position.color_on(from) != Some(position.side_to_move()) {
        return Vec::new();
    }
    pseudo_legal_moves(position, from)
        .into_iter()
        .filter(|&mv| is_safe(position, mv))
        .collect()
}

/// Return `true` if the side to move has at least one legal move.
///
/// Stops at the first one found.
pub fn has_legal_move(position: &Position) -> bool {
    position.pieces(position.side_to_move()).any(|(from, _)| {
        pseudo_legal_moves(position, from)
            .into_iter()
            .any(|mv| is_safe(position, mv))
    })
}

/// Classify the position reached by a move from the point of view of the side now to move.
pub(crate) fn classify(after: &Position) -> CheckState {
    if !is_in_check(after) {
        CheckState::None
    } else if has_legal_move(after) {
        CheckState::Check
    } else {
        CheckState::Checkmate
    }
}

/// Legal moves of the piece on `from`, each annotated with check or checkmate.
///
/// Returns an empty list if `from` is empty or holds a piece of the side not to
/// move. Promotions are classified as queen promotions.
pub fn legal_moves_from(position: &Position, from: Square) -> Vec<Move> {
    legal_candidates(position, from)
        .into_iter()
        .map(|mv| {
            let after = position.make_move(mv, PromotionPiece::Queen);
            mv.with_check(classify(&after))
        })
        .collect()
}

/// Annotated legal moves for every piece of the side to move, in square order.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    position
        .pieces(position.side_to_move())
        .flat_map(|(from, _)| legal_moves_from(position, from))
        .collect()
}

/// Return `true` if the side to move is in check with no legal move.
pub fn is_checkmate(position: &Position) -> bool {
    is_in_check(position) && !has_legal_move(position)
}

/// Report check and mobility for the side to move.
pub fn status(position: &Position) -> GameStatus {
    match (is_in_check(position), has_legal_move(position)) {
        (false, true) => GameStatus::Ongoing,
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::NoLegalMoves,
    }
}
