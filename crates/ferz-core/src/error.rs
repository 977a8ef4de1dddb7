//! Error types for square addressing, position text, position validation, and move requests.

use crate::color::Color;
use crate::square::Square;

/// A square could not be addressed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    /// Coordinates outside the 8x8 board.
    #[error("square ({file}, {rank}) is off the board")]
    OffBoard {
        /// Zero-based file as supplied.
        file: i32,
        /// Zero-based rank as supplied.
        rank: i32,
    },
    /// Text that is not a file letter followed by a rank digit.
    #[error("invalid square name: \"{text}\"")]
    BadAlgebraic {
        /// The rejected text.
        text: String,
    },
}

/// Errors that occur when parsing position text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The text does not have exactly 6 space-separated fields.
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement does not have exactly 8 rows.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of rows found.
        found: usize,
    },
    /// A row describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based row index as written (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character in the piece placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The side-to-move field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// The invalid field.
        found: String,
    },
    /// An unrecognized character in the castling field.
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// The en passant field is neither "-" nor a square.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant {
        /// The invalid field.
        found: String,
    },
    /// A move counter is not a non-negative number.
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// "halfmove clock" or "fullmove number".
        field: &'static str,
        /// The invalid field.
        found: String,
    },
    /// The text parsed but describes an unusable position.
    #[error("invalid position: {source}")]
    InvalidPosition {
        /// Why the position was rejected.
        #[from]
        source: PositionError,
    },
}

/// A position that the rules engine cannot operate on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// A side has no king, so check cannot be decided for it.
    #[error("no {} king on the board", .color.name())]
    MissingKing {
        /// Which side is missing its king.
        color: Color,
    },
    /// A side has more than one king.
    #[error("expected 1 {} king, found {count}", .color.name())]
    TooManyKings {
        /// Which side has extra kings.
        color: Color,
        /// Number of kings found.
        count: usize,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawn on back rank at {square}")]
    PawnOnBackRank {
        /// Where the pawn stands.
        square: Square,
    },
    /// The side that just moved is in check, so its king could be captured.
    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// A move request that was rejected. The position is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// One of the requested squares is off the board.
    #[error(transparent)]
    InvalidSquare(#[from] SquareError),
    /// The origin square is empty.
    #[error("no piece on {square}")]
    EmptySquare {
        /// The empty origin.
        square: Square,
    },
    /// The origin holds a piece of the side not to move.
    #[error("piece on {square} does not belong to the side to move")]
    NotYourPiece {
        /// The origin.
        square: Square,
    },
    /// The destination is not among the origin's legal moves.
    #[error("illegal move {from}{to}")]
    IllegalMove {
        /// Origin square.
        from: Square,
        /// Requested destination.
        to: Square,
    },
}

#[cfg(test)]
mod tests {
    use super::{FenError, MoveError, PositionError, SquareError};
    use crate::color::Color;
    use crate::square::Square;

    #[test]
    fn fen_error_display() {
        let err = FenError::WrongFieldCount { found: 4 };
        assert_eq!(format!("{err}"), "expected 6 FEN fields, found 4");
    }

    #[test]
    fn position_error_display() {
        let err = PositionError::MissingKing { color: Color::Black };
        assert_eq!(format!("{err}"), "no black king on the board");
        let err = PositionError::PawnOnBackRank { square: Square::A8 };
        assert_eq!(format!("{err}"), "pawn on back rank at a8");
    }

    #[test]
    fn fen_error_from_position_error() {
        let fen_err: FenError = PositionError::OpponentInCheck.into();
        assert!(matches!(fen_err, FenError::InvalidPosition { .. }));
        assert!(std::error::Error::source(&fen_err).is_some());
    }

    #[test]
    fn move_error_wraps_square_error() {
        let err: MoveError = SquareError::OffBoard { file: 9, rank: 0 }.into();
        assert_eq!(format!("{err}"), "square (9, 0) is off the board");
        let err = MoveError::IllegalMove { from: Square::B1, to: Square::B3 };
        assert_eq!(format!("{err}"), "illegal move b1b3");
    }
}
