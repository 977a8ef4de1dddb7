//! Piece geometry: pseudo-legal candidates per origin square, attack sets, and attack detection.
//!
//! Everything here ignores king safety. Sliders walk each direction until the
//! first occupied square; leapers use fixed offset tables. Candidate order is
//! deterministic: direction then distance for sliders, table order for leapers.

use crate::castle_rights::CastleSide;
use crate::chess_move::{Move, MoveAction};
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;
use crate::square_set::SquareSet;

/// `(file, rank)` steps along files and ranks.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// `(file, rank)` steps along diagonals.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Sliding directions for a piece kind; empty for non-sliders.
fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        _ if !kind.is_slider() => &[],
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        _ => &QUEEN_DIRECTIONS,
    }
}

/// Squares along one direction from `from`, ending at (and including) the first occupied one.
fn ray(position: &Position, from: Square, (df, dr): (i8, i8)) -> impl Iterator<Item = Square> + '_ {
    std::iter::successors(from.offset(df, dr), move |&sq| {
        if position.is_occupied(sq) {
            None
        } else {
            sq.offset(df, dr)
        }
    })
}

/// Quiet or capture onto `to` for a piece of color `us`; `None` if a friendly piece stands there.
fn target_action(position: &Position, to: Square, us: Color) -> Option<MoveAction> {
    match position.color_on(to) {
        None => Some(MoveAction::Quiet),
        Some(color) if color != us => Some(MoveAction::Capture),
        Some(_) => None,
    }
}

/// Generate the pseudo-legal candidates of the piece on `from`.
///
/// Returns an empty list for an empty square. Castling is offered when the
/// right is held, the king and rook are on their home squares, and the squares
/// between them are empty; whether the king crosses an attacked square is left
/// to the legality layer.
pub fn pseudo_legal_moves(position: &Position, from: Square) -> Vec<Move> {
    let Some(piece) = position.piece_on(from) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(position, from, piece.color(), &mut moves),
        PieceKind::Knight => leaper_moves(position, from, piece.color(), &KNIGHT_OFFSETS, &mut moves),
        PieceKind::King => {
            leaper_moves(position, from, piece.color(), &KING_OFFSETS, &mut moves);
            castle_moves(position, from, piece.color(), &mut moves);
        }
        kind => slider_moves(position, from, piece.color(), slider_directions(kind), &mut moves),
    }
    moves
}

fn slider_moves(
    position: &Position,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &direction in directions {
        for to in ray(position, from, direction) {
            if let Some(action) = target_action(position, to, us) {
                moves.push(Move::new(from, to, action));
            }
        }
    }
}

fn leaper_moves(
    position: &Position,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr)
            && let Some(action) = target_action(position, to, us)
        {
            moves.push(Move::new(from, to, action));
        }
    }
}

fn pawn_moves(position: &Position, from: Square, us: Color, moves: &mut Vec<Move>) {
    let dir = us.pawn_direction();
    let promotes = |to: Square| to.rank() == us.promotion_rank();

    if let Some(one) = from.offset(0, dir)
        && !position.is_occupied(one)
    {
        let action = if promotes(one) {
            MoveAction::Promotion { capture: false }
        } else {
            MoveAction::Quiet
        };
        moves.push(Move::new(from, one, action));

        if from.rank() == us.pawn_rank()
            && let Some(two) = one.offset(0, dir)
            && !position.is_occupied(two)
        {
            moves.push(Move::new(from, two, MoveAction::Quiet));
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        if position.color_on(to) == Some(!us) {
            let action = if promotes(to) {
                MoveAction::Promotion { capture: true }
            } else {
                MoveAction::Capture
            };
            moves.push(Move::new(from, to, action));
        } else if is_en_passant_target(position, from, to, us) {
            moves.push(Move::new(from, to, MoveAction::EnPassant));
        }
    }
}

/// `to` is the en passant square, empty, with an enemy pawn beside `from` on `to`'s file.
fn is_en_passant_target(position: &Position, from: Square, to: Square, us: Color) -> bool {
    position.en_passant() == Some(to)
        && !position.is_occupied(to)
        && position.piece_on(Square::new(from.rank(), to.file())) == Some(Piece::new(PieceKind::Pawn, !us))
}

fn castle_moves(position: &Position, from: Square, us: Color, moves: &mut Vec<Move>) {
    if from != CastleSide::king_from(us) {
        return;
    }
    let rook = Piece::new(PieceKind::Rook, us);
    for side in CastleSide::ALL {
        if position.castling().has(us, side)
            && position.piece_on(side.rook_from(us)) == Some(rook)
            && side.between(us).all(|sq| !position.is_occupied(sq))
        {
            moves.push(Move::new(from, side.king_to(us), MoveAction::Castle(side)));
        }
    }
}

/// Squares the piece on `sq` attacks, including squares held by its own side.
///
/// Pawns attack both forward diagonals whether or not anything stands there;
/// pawn pushes and castling are not attacks.
pub fn attacks_from(position: &Position, sq: Square) -> SquareSet {
    let Some(piece) = position.piece_on(sq) else {
        return SquareSet::EMPTY;
    };

    let offsets = |table: &[(i8, i8)]| -> SquareSet {
        table.iter().filter_map(|&(df, dr)| sq.offset(df, dr)).collect()
    };

    match piece.kind() {
        PieceKind::Pawn => {
            let dir = piece.color().pawn_direction();
            offsets(&[(-1, dir), (1, dir)])
        }
        PieceKind::Knight => offsets(&KNIGHT_OFFSETS),
        PieceKind::King => offsets(&KING_OFFSETS),
        kind => slider_directions(kind)
            .iter()
            .flat_map(|&direction| ray(position, sq, direction))
            .collect(),
    }
}

/// Union of every square attacked by `by`'s pieces.
pub fn attacked_squares(position: &Position, by: Color) -> SquareSet {
    position
        .pieces(by)
        .fold(SquareSet::EMPTY, |set, (sq, _)| set | attacks_from(position, sq))
}

/// Check if `sq` is attacked by any piece of `by`.
///
/// Looks outward from `sq` for an attacker of the matching kind rather than
/// building the full attack set.
pub fn is_square_attacked(position: &Position, sq: Square, by: Color) -> bool {
    let holds = |target: Option<Square>, kind: PieceKind| {
        target.is_some_and(|t| position.piece_on(t) == Some(Piece::new(kind, by)))
    };

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(sq.offset(df, dr), PieceKind::Knight))
    {
        return true;
    }
    if KING_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(sq.offset(df, dr), PieceKind::King))
    {
        return true;
    }

    // An attacking pawn stands one rank behind `sq` from its own point of view.
    let back = -by.pawn_direction();
    if holds(sq.offset(-1, back), PieceKind::Pawn) || holds(sq.offset(1, back), PieceKind::Pawn) {
        return true;
    }

    let slider_hits = |directions: &[(i8, i8)], kind: PieceKind| {
        directions.iter().any(|&direction| {
            ray(position, sq, direction).last().is_some_and(|end| {
                position.piece_on(end).is_some_and(|p| {
                    p.color() == by && (p.kind() == kind || p.kind() == PieceKind::Queen)
                })
            })
        })
    };

    slider_hits(&ROOK_DIRECTIONS, PieceKind::Rook) || slider_hits(&BISHOP_DIRECTIONS, PieceKind::Bishop)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destinations(position: &Position, from: Square) -> Vec<Square> {
        pseudo_legal_moves(position, from).iter().map(|m| m.to()).collect()
    }

    #[test]
    fn knight_b1_start() {
        let position = Position::starting_position();
        assert_eq!(destinations(&position, Square::B1), vec![Square::C3, Square::A3]);
    }

    #[test]
    fn pawn_single_and_double_push() {
        let position = Position::starting_position();
        let moves = pseudo_legal_moves(&position, Square::E2);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].to(), Square::E3);
        assert_eq!(moves[1].to(), Square::E4);
        assert!(moves.iter().all(|m| m.action() == MoveAction::Quiet));
    }

    #[test]
    fn empty_square_has_no_candidates() {
        let position = Position::starting_position();
        assert!(pseudo_legal_moves(&position, Square::E4).is_empty());
    }

    #[test]
    fn blocked_pieces_in_start_position() {
        let position = Position::starting_position();
        for sq in [Square::A1, Square::C1, Square::D1, Square::E1, Square::F1, Square::H1] {
            assert!(
                pseudo_legal_moves(&position, sq).is_empty(),
                "{sq} should be boxed in"
            );
        }
    }

    #[test]
    fn slider_stops_at_enemy_with_capture() {
        let position: Position = "4k3/8/8/8/R3p3/8/8/4K3 w - - 0 1".parse().unwrap();
        let moves = pseudo_legal_moves(&position, Square::A4);
        assert_eq!(moves.len(), 11);
        let last = *moves.last().unwrap();
        assert_eq!(last.to(), Square::E4);
        assert_eq!(last.action(), MoveAction::Capture);
        assert!(moves.iter().all(|m| m.to() != Square::F4));
    }

    #[test]
    fn slider_excludes_friendly_blocker() {
        let position: Position = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse().unwrap();
        let dests = destinations(&position, Square::A1);
        assert_eq!(dests.len(), 10);
        assert!(!dests.contains(&Square::E1));
        assert!(dests.contains(&Square::D1));
    }

    #[test]
    fn pawn_promotion_by_push_and_capture() {
        let position: Position = "r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let moves = pseudo_legal_moves(&position, Square::B7);
        assert_eq!(
            moves,
            vec![
                Move::new(Square::B7, Square::B8, MoveAction::Promotion { capture: false }),
                Move::new(Square::B7, Square::A8, MoveAction::Promotion { capture: true }),
            ]
        );
    }

    #[test]
    fn en_passant_candidate() {
        let position: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let moves = pseudo_legal_moves(&position, Square::E5);
        assert_eq!(
            moves,
            vec![
                Move::new(Square::E5, Square::E6, MoveAction::Quiet),
                Move::new(Square::E5, Square::D6, MoveAction::EnPassant),
            ]
        );
    }

    #[test]
    fn en_passant_needs_enemy_pawn_behind_target() {
        let position: Position = "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        assert_eq!(destinations(&position, Square::E5), vec![Square::E6]);
    }

    #[test]
    fn castle_candidates_need_rights_rook_and_empty_between() {
        let position: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let castles: Vec<_> = pseudo_legal_moves(&position, Square::E1)
            .into_iter()
            .filter(|m| m.is_castle())
            .map(|m| m.to())
            .collect();
        assert_eq!(castles, vec![Square::G1, Square::C1]);

        let no_rook: Position = "4k3/8/8/8/8/8/8/4K2R w KQ - 0 1".parse().unwrap();
        let castles: Vec<_> = pseudo_legal_moves(&no_rook, Square::E1)
            .into_iter()
            .filter(|m| m.is_castle())
            .map(|m| m.to())
            .collect();
        assert_eq!(castles, vec![Square::G1]);

        let blocked: Position = "4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1".parse().unwrap();
        let castles = pseudo_legal_moves(&blocked, Square::E1)
            .into_iter()
            .filter(|m| m.is_castle())
            .count();
        assert_eq!(castles, 1, "b1 knight blocks queen side");

        let no_rights: Position = "4k3/8/8/8/8/8/8/R3K2R w - - 0 1".parse().unwrap();
        assert!(!pseudo_legal_moves(&no_rights, Square::E1).iter().any(|m| m.is_castle()));
    }

    #[test]
    fn castle_candidate_ignores_attacks() {
        // The f8 rook covers f1, which only the legality layer cares about.
        let position: Position = "4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1".parse().unwrap();
        assert!(
            pseudo_legal_moves(&position, Square::E1)
                .iter()
                .any(|m| m.action() == MoveAction::Castle(CastleSide::KingSide))
        );
    }

    #[test]
    fn attacks_include_defended_squares() {
        let position = Position::starting_position();
        let knight = attacks_from(&position, Square::B1);
        assert_eq!(knight.count(), 3);
        assert!(knight.contains(Square::D2));
        let rook = attacks_from(&position, Square::A1);
        assert_eq!(rook.iter().collect::<Vec<_>>(), vec![Square::B1, Square::A2]);
        let pawn = attacks_from(&position, Square::E2);
        assert_eq!(pawn.iter().collect::<Vec<_>>(), vec![Square::D3, Square::F3]);
    }

    #[test]
    fn pawn_pushes_are_not_attacks() {
        let position = Position::starting_position();
        assert!(is_square_attacked(&position, Square::E3, Color::White));
        assert!(!is_square_attacked(&position, Square::E4, Color::White));
        assert!(is_square_attacked(&position, Square::F6, Color::Black));
        assert!(!is_square_attacked(&position, Square::E5, Color::Black));
    }

    #[test]
    fn pawn_attacks_do_not_wrap() {
        let position: Position = "4k3/8/8/8/8/8/P6P/4K3 w - - 0 1".parse().unwrap();
        let set = attacked_squares(&position, Color::White);
        assert!(set.contains(Square::B3));
        assert!(set.contains(Square::G3));
        assert!(!set.contains(Square::A3));
        assert!(!set.contains(Square::H3));
    }

    #[test]
    fn slider_attack_is_blocked() {
        let position: Position = "4k3/8/8/8/8/8/4P3/4RK2 b - - 0 1".parse().unwrap();
        assert!(is_square_attacked(&position, Square::E2, Color::White));
        assert!(!is_square_attacked(&position, Square::E3, Color::White));
        assert!(!attacks_from(&position, Square::E1).contains(Square::E3));
    }

    #[test]
    fn reverse_lookup_agrees_with_attack_sets() {
        let fens = [
            crate::fen::STARTING_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];
        for fen in fens {
            let position: Position = fen.parse().unwrap();
            for color in Color::ALL {
                let set = attacked_squares(&position, color);
                for sq in Square::all() {
                    assert_eq!(
                        set.contains(sq),
                        is_square_attacked(&position, sq, color),
                        "{fen}: {color:?} attack on {sq} disagrees"
                    );
                }
            }
        }
    }
}
