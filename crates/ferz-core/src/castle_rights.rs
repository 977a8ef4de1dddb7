//! Castling rights and the fixed squares each castling move involves.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;
use crate::file::File;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Where the king starts for `color`.
    pub fn king_from(color: Color) -> Square {
        Square::new(color.back_rank(), File::FileE)
    }

    /// Where the king lands after castling on this side.
    pub fn king_to(self, color: Color) -> Square {
        let file = match self {
            CastleSide::KingSide => File::FileG,
            CastleSide::QueenSide => File::FileC,
        };
        Square::new(color.back_rank(), file)
    }

    /// The corner the rook starts on.
    pub fn rook_from(self, color: Color) -> Square {
        let file = match self {
            CastleSide::KingSide => File::FileH,
            CastleSide::QueenSide => File::FileA,
        };
        Square::new(color.back_rank(), file)
    }

    /// Where the rook lands, on the square the king crossed.
    pub fn rook_to(self, color: Color) -> Square {
        let file = match self {
            CastleSide::KingSide => File::FileF,
            CastleSide::QueenSide => File::FileD,
        };
        Square::new(color.back_rank(), file)
    }

    /// Squares strictly between king and rook; all must be empty to castle.
    pub fn between(self, color: Color) -> impl Iterator<Item = Square> {
        let files: &'static [File] = match self {
            CastleSide::KingSide => &[File::FileF, File::FileG],
            CastleSide::QueenSide => &[File::FileB, File::FileC, File::FileD],
        };
        let rank = color.back_rank();
        files.iter().map(move |&file| Square::new(rank, file))
    }

    /// Squares the king stands on, crosses, or lands on; none may be attacked.
    pub fn king_path(self, color: Color) -> [Square; 3] {
        [Self::king_from(color), self.rook_to(color), self.king_to(color)]
    }

    /// The side a king move from `from` to `to` castles toward, if it is a castling hop.
    pub fn from_king_move(color: Color, from: Square, to: Square) -> Option<CastleSide> {
        if from != Self::king_from(color) {
            return None;
        }
        CastleSide::ALL.into_iter().find(|side| side.king_to(color) == to)
    }
}

/// Castling rights as a 4-bit field: bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
///
/// Rights are only ever removed while playing; nothing restores them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

/// Rights lost when any move starts or ends on a given square.
const REVOKED_BY_SQUARE: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    table[Square::A1.index()] = CastleRights::WHITE_QUEEN;
    table[Square::H1.index()] = CastleRights::WHITE_KING;
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    table[Square::A8.index()] = CastleRights::BLACK_QUEEN;
    table[Square::H8.index()] = CastleRights::BLACK_KING;
    table
};

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    pub const WHITE_BOTH: CastleRights = CastleRights(0b0011);
    pub const BLACK_BOTH: CastleRights = CastleRights(0b1100);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// The single-bit flag for a color and side.
    #[inline]
    pub const fn flag(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => Self::WHITE_KING,
            (Color::White, CastleSide::QueenSide) => Self::WHITE_QUEEN,
            (Color::Black, CastleSide::KingSide) => Self::BLACK_KING,
            (Color::Black, CastleSide::QueenSide) => Self::BLACK_QUEEN,
        }
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.contains(Self::flag(color, side))
    }

    /// Rights remaining after a move from `from` to `to`.
    ///
    /// A king leaving its home square drops both of its rights; a move leaving
    /// or landing on a rook corner drops that corner's right (a captured rook
    /// cannot castle either).
    #[inline]
    pub const fn after_move(self, from: Square, to: Square) -> CastleRights {
        self.remove(REVOKED_BY_SQUARE[from.index()])
            .remove(REVOKED_BY_SQUARE[to.index()])
    }

    /// Parse the castling field (`KQkq`, `Kq`, `-`, ...).
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }

        s.chars().try_fold(CastleRights::NONE, |rights, c| {
            let flag = match c {
                'K' => Self::WHITE_KING,
                'Q' => Self::WHITE_QUEEN,
                'k' => Self::BLACK_KING,
                'q' => Self::BLACK_QUEEN,
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            Ok(rights.insert(flag))
        })
    }

    /// Serialize to the castling field, always in `KQkq` order.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        [
            (Self::WHITE_KING, 'K'),
            (Self::WHITE_QUEEN, 'Q'),
            (Self::BLACK_KING, 'k'),
            (Self::BLACK_QUEEN, 'q'),
        ]
        .into_iter()
        .filter(|&(flag, _)| self.contains(flag))
        .map(|(_, c)| c)
        .collect()
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}
