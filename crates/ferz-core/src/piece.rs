//! A colored piece: an explicit `{kind, color}` pair.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A colored chess piece as it sits in a board slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
}

impl Piece {
    pub const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::White);
    pub const WHITE_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::White);
    pub const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);
    pub const WHITE_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::White);
    pub const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);
    pub const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);
    pub const BLACK_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::Black);
    pub const BLACK_ROOK: Piece = Piece::new(PieceKind::Rook, Color::Black);
    pub const BLACK_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::Black);
    pub const BLACK_KING: Piece = Piece::new(PieceKind::King, Color::Black);

    /// Create a piece from a kind and a color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// Parse a notation letter: uppercase is White, lowercase is Black.
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// `true` if this piece is of `kind` and belongs to `color`.
    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    /// Return the notation letter, uppercase for White.
    pub fn fen_char(self) -> char {
        let base = self.kind.fen_char();
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    /// Unicode chess glyph, used by text renderers.
    pub const fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '\u{2654}',
            (Color::White, PieceKind::Queen) => '\u{2655}',
            (Color::White, PieceKind::Rook) => '\u{2656}',
            (Color::White, PieceKind::Bishop) => '\u{2657}',
            (Color::White, PieceKind::Knight) => '\u{2658}',
            (Color::White, PieceKind::Pawn) => '\u{2659}',
            (Color::Black, PieceKind::King) => '\u{265A}',
            (Color::Black, PieceKind::Queen) => '\u{265B}',
            (Color::Black, PieceKind::Rook) => '\u{265C}',
            (Color::Black, PieceKind::Bishop) => '\u{265D}',
            (Color::Black, PieceKind::Knight) => '\u{265E}',
            (Color::Black, PieceKind::Pawn) => '\u{265F}',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        write!(f, "{}{}", color_prefix, self.kind.fen_char().to_ascii_uppercase())
    }
}
