//! The position: a 64-slot board plus side to move, castling, en passant, and move counters.

use std::fmt;

use crate::attacks::is_square_attacked;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::PositionError;
use crate::file::File;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// Complete chess position state.
///
/// Every `Position` reachable through the public API has exactly one king per
/// side and the side not to move is not in check, so check queries never have
/// to deal with a missing king.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Board slots indexed by [`Square::index()`].
    squares: [Option<Piece>; Square::COUNT],
    side_to_move: Color,
    castling: CastleRights,
    /// The square a pawn skipped over on the previous move, if any.
    en_passant: Option<Square>,
    /// Moves since the last pawn move or capture.
    halfmove_clock: u16,
    /// Starts at 1, incremented after Black moves.
    fullmove_number: u16,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// Return the standard starting position.
    pub fn starting_position() -> Position {
        let mut squares = [None; Square::COUNT];
        for color in Color::ALL {
            for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
                squares[Square::new(color.back_rank(), file).index()] = Some(Piece::new(kind, color));
                squares[Square::new(color.pawn_rank(), file).index()] =
                    Some(Piece::new(PieceKind::Pawn, color));
            }
        }

        Position {
            squares,
            side_to_move: Color::White,
            castling: CastleRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Build a position from its parts, rejecting boards the rules engine cannot work with.
    ///
    /// Castling rights and the en passant square are taken as given; rights
    /// whose king or rook has left home are simply never usable.
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] if [`validate`](Self::validate) fails.
    pub fn from_parts(
        squares: [Option<Piece>; Square::COUNT],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Result<Position, PositionError> {
        let position = Position {
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };
        position.validate()?;
        Ok(position)
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Return the color of the piece on `sq`, if any.
    #[inline]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_on(sq).map(Piece::color)
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_some()
    }

    /// The 64 board slots in index order.
    #[inline]
    pub fn squares(&self) -> &[Option<Piece>; Square::COUNT] {
        &self.squares
    }

    /// Iterate over the squares holding `color`'s pieces, in index order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_on(sq) {
            Some(piece) if piece.color() == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Locate `color`'s king, if it is on the board.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        Square::all().find(|&sq| self.piece_on(sq) == Some(king))
    }

    /// Return the square of the king for the given side.
    ///
    /// # Panics
    ///
    /// Panics if the side has no king. Positions built through
    /// [`from_parts`](Self::from_parts), text parsing, or legal moves always have one.
    pub fn king_square(&self, color: Color) -> Square {
        self.find_king(color)
            .expect("position must have a king for each side")
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Overwrite a board slot.
    #[inline]
    pub(crate) fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    /// Check the structural conditions check detection relies on.
    ///
    /// Each side needs exactly one king, no pawn may stand on the first or
    /// eighth rank, and the side that just moved must not be left in check.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in Color::ALL {
            let king = Piece::new(PieceKind::King, color);
            let count = self.squares.iter().filter(|&&slot| slot == Some(king)).count();
            match count {
                0 => return Err(PositionError::MissingKing { color }),
                1 => {}
                _ => return Err(PositionError::TooManyKings { color, count }),
            }
        }

        for rank in [Rank::Rank1, Rank::Rank8] {
            for file in File::ALL {
                let square = Square::new(rank, file);
                if self.piece_on(square).is_some_and(|p| p.kind() == PieceKind::Pawn) {
                    return Err(PositionError::PawnOnBackRank { square });
                }
            }
        }

        let waiting = self.side_to_move.flip();
        if is_square_attacked(self, self.king_square(waiting), self.side_to_move) {
            return Err(PositionError::OpponentInCheck);
        }

        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}
