//! Move representation: an origin, a destination, how the board changes, and what it does to the opponent.

use std::fmt;

use crate::castle_rights::CastleSide;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// How applying a move mutates the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    /// Relocation onto an empty square.
    Quiet,
    /// Relocation onto an enemy piece, removing it.
    Capture,
    /// King hop of two squares plus the matching rook relocation.
    Castle(CastleSide),
    /// Pawn capture of the pawn that just double-stepped past the destination.
    EnPassant,
    /// Pawn arriving on the farthest rank, by push or by capture.
    Promotion {
        /// `true` if an enemy piece stood on the destination.
        capture: bool,
    },
}

/// The opponent's state after the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// The opponent's king is not attacked (or the move has not been classified).
    #[default]
    None,
    /// The opponent's king is attacked and it has at least one legal reply.
    Check,
    /// The opponent's king is attacked and it has no legal reply.
    Checkmate,
}

/// A single mutually exclusive label for a move, with check annotations
/// taking precedence over the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet,
    Capture,
    Castle,
    Promotion,
    Check,
    Checkmate,
    EnPassantCapture,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveKind::Quiet => "quiet",
            MoveKind::Capture => "capture",
            MoveKind::Castle => "castle",
            MoveKind::Promotion => "promotion",
            MoveKind::Check => "check",
            MoveKind::Checkmate => "checkmate",
            MoveKind::EnPassantCapture => "en-passant",
        };
        f.write_str(name)
    }
}

/// The piece a pawn promotes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PromotionPiece {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    /// All promotion choices, queen first.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    pub const fn to_piece_kind(self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }

    /// Lowercase letter used as the suffix of coordinate move text.
    pub const fn to_char(self) -> char {
        self.to_piece_kind().fen_char()
    }

    /// Parse a promotion letter, either case.
    pub fn from_char(c: char) -> Option<PromotionPiece> {
        PromotionPiece::ALL
            .into_iter()
            .find(|p| p.to_char() == c.to_ascii_lowercase())
    }
}

/// A move from one square to another, with its action and (once classified) its check state.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    action: MoveAction,
    check: CheckState,
}

impl Move {
    /// Create an unclassified move.
    pub const fn new(from: Square, to: Square, action: MoveAction) -> Move {
        Move {
            from,
            to,
            action,
            check: CheckState::None,
        }
    }

    /// Return this move with its check state replaced.
    pub(crate) const fn with_check(self, check: CheckState) -> Move {
        Move { check, ..self }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    #[inline]
    pub const fn action(self) -> MoveAction {
        self.action
    }

    #[inline]
    pub const fn check(self) -> CheckState {
        self.check
    }

    /// Collapse action and check state into one label.
    pub const fn kind(self) -> MoveKind {
        match (self.check, self.action) {
            (CheckState::Checkmate, _) => MoveKind::Checkmate,
            (CheckState::Check, _) => MoveKind::Check,
            (CheckState::None, MoveAction::Quiet) => MoveKind::Quiet,
            (CheckState::None, MoveAction::Capture) => MoveKind::Capture,
            (CheckState::None, MoveAction::Castle(_)) => MoveKind::Castle,
            (CheckState::None, MoveAction::EnPassant) => MoveKind::EnPassantCapture,
            (CheckState::None, MoveAction::Promotion { .. }) => MoveKind::Promotion,
        }
    }

    /// `true` if an enemy piece is removed, including en passant.
    pub const fn is_capture(self) -> bool {
        matches!(
            self.action,
            MoveAction::Capture | MoveAction::EnPassant | MoveAction::Promotion { capture: true }
        )
    }

    pub const fn is_castle(self) -> bool {
        matches!(self.action, MoveAction::Castle(_))
    }

    pub const fn is_en_passant(self) -> bool {
        matches!(self.action, MoveAction::EnPassant)
    }

    pub const fn is_promotion(self) -> bool {
        matches!(self.action, MoveAction::Promotion { .. })
    }

    /// `true` for both check and checkmate.
    pub const fn gives_check(self) -> bool {
        !matches!(self.check, CheckState::None)
    }

    pub const fn is_checkmate(self) -> bool {
        matches!(self.check, CheckState::Checkmate)
    }

    /// Coordinate text such as `e2e4`, with a promotion letter when one is given.
    pub fn to_coordinate(self, promotion: Option<PromotionPiece>) -> String {
        match promotion {
            Some(piece) if self.is_promotion() => {
                format!("{}{}{}", self.from, self.to, piece.to_char())
            }
            _ => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        match self.check {
            CheckState::None => Ok(()),
            CheckState::Check => write!(f, "+"),
            CheckState::Checkmate => write!(f, "#"),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?} {:?})", self, self.action, self.check)
    }
}
