//! Piece kinds, independent of color.

use std::fmt;

/// What a piece is, with its color left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Every kind, pawn first.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Lowercase letter used in position text and promotion suffixes.
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// The kind named by `c`, in either case.
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        let c = c.to_ascii_lowercase();
        PieceKind::ALL.into_iter().find(|kind| kind.fen_char() == c)
    }

    /// Bishops, rooks and queens: pieces that move along rays until blocked.
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

#[cfg(test)]
mod tests {
    use super::PieceKind;

    #[test]
    fn letters_parse_back_in_either_case() {
        for kind in PieceKind::ALL {
            let c = kind.fen_char();
            assert_eq!(PieceKind::from_fen_char(c), Some(kind));
            assert_eq!(PieceKind::from_fen_char(c.to_ascii_uppercase()), Some(kind));
        }
        assert_eq!(PieceKind::from_fen_char('x'), None);
        assert_eq!(PieceKind::from_fen_char('1'), None);
    }

    #[test]
    fn only_ray_pieces_slide() {
        let sliders: Vec<PieceKind> = PieceKind::ALL.into_iter().filter(|k| k.is_slider()).collect();
        assert_eq!(sliders, [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]);
    }
}
