//! Move execution via copy-make, and the validate-then-commit entry point for requested moves.

use tracing::debug;

use crate::castle_rights::CastleSide;
use crate::chess_move::{Move, PromotionPiece};
use crate::color::Color;
use crate::error::MoveError;
use crate::legality::{classify, legal_moves_from};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Supplies the piece a pawn promotes to, given the promoting color and destination.
///
/// Closures implement this directly, and a bare [`PromotionPiece`] always
/// answers with itself.
pub trait PromotionChooser {
    fn choose(&mut self, color: Color, square: Square) -> PromotionPiece;
}

impl<F> PromotionChooser for F
where
    F: FnMut(Color, Square) -> PromotionPiece,
{
    fn choose(&mut self, color: Color, square: Square) -> PromotionPiece {
        self(color, square)
    }
}

impl PromotionChooser for PromotionPiece {
    fn choose(&mut self, _color: Color, _square: Square) -> PromotionPiece {
        *self
    }
}

impl Position {
    /// Apply a move and return the resulting position. Copy-make: `self` is not modified.
    ///
    /// The move is not checked for legality. Special cases are recognized from
    /// the board itself: a pawn landing on the empty en passant square removes
    /// the pawn beside it, a two-file king hop from home also moves the rook,
    /// and a pawn reaching the last rank becomes `promotion`.
    ///
    /// If the origin square is empty the position is returned unchanged.
    /// Crate-internal: an unchecked move could capture a king, so callers
    /// outside go through [`Position::play`].
    pub(crate) fn make_move(&self, mv: Move, promotion: PromotionPiece) -> Position {
        let mut next = *self;
        let from = mv.from();
        let to = mv.to();

        let Some(piece) = self.piece_on(from) else {
            return next;
        };
        let us = piece.color();
        let is_pawn = piece.kind() == PieceKind::Pawn;

        let is_en_passant = is_pawn && self.en_passant() == Some(to) && !self.is_occupied(to);
        let is_capture = self.is_occupied(to) || is_en_passant;

        if is_en_passant {
            // The captured pawn sits beside the origin, on the destination's file.
            next.set_piece(Square::new(from.rank(), to.file()), None);
        }

        next.set_piece(from, None);
        next.set_piece(to, Some(piece));
        next.set_castling(self.castling().after_move(from, to));

        if piece.kind() == PieceKind::King
            && let Some(side) = CastleSide::from_king_move(us, from, to)
        {
            let rook = next.piece_on(side.rook_from(us));
            next.set_piece(side.rook_from(us), None);
            next.set_piece(side.rook_to(us), rook);
        }

        if is_pawn && to.rank() == us.promotion_rank() {
            next.set_piece(to, Some(Piece::new(promotion.to_piece_kind(), us)));
        }

        if is_pawn || is_capture {
            next.set_halfmove_clock(0);
        } else {
            next.set_halfmove_clock(self.halfmove_clock().saturating_add(1));
        }

        let double_push = is_pawn && from.rank().index().abs_diff(to.rank().index()) == 2;
        next.set_en_passant(if double_push {
            from.offset(0, us.pawn_direction())
        } else {
            None
        });

        if self.side_to_move() == Color::Black {
            next.set_fullmove_number(self.fullmove_number().saturating_add(1));
        }
        next.set_side_to_move(self.side_to_move().flip());

        next
    }

    /// Play the move from `from` to `to` if it is legal, asking `chooser` for
    /// the piece when a pawn promotes.
    ///
    /// Returns the committed move, classified against the piece actually chosen.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] and leaves the position untouched if the origin
    /// is empty, holds a piece of the side not to move, or `to` is not one of
    /// its legal destinations.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        mut chooser: impl PromotionChooser,
    ) -> Result<Move, MoveError> {
        let piece = self
            .piece_on(from)
            .ok_or(MoveError::EmptySquare { square: from })?;
        if piece.color() != self.side_to_move() {
            return Err(MoveError::NotYourPiece { square: from });
        }

        let Some(mv) = legal_moves_from(self, from).into_iter().find(|m| m.to() == to) else {
            debug!(%from, %to, "rejected illegal move");
            return Err(MoveError::IllegalMove { from, to });
        };

        let promotion = if mv.is_promotion() {
            chooser.choose(piece.color(), to)
        } else {
            PromotionPiece::default()
        };

        let next = self.make_move(mv, promotion);
        // Candidates are classified assuming a queen; an underpromotion may change the outcome.
        let mv = if promotion == PromotionPiece::default() {
            mv
        } else {
            mv.with_check(classify(&next))
        };

        *self = next;
        debug!(%mv, kind = %mv.kind(), fen = %self, "played move");
        Ok(mv)
    }

    /// [`play`](Self::play) addressed by zero-based `(file, rank)` pairs counted from a1.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidSquare`] for off-board coordinates, otherwise
    /// as [`play`](Self::play).
    pub fn play_coords(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        chooser: impl PromotionChooser,
    ) -> Result<Move, MoveError> {
        let from = Square::from_coords(from.0, from.1)?;
        let to = Square::from_coords(to.0, to.1)?;
        self.play(from, to, chooser)
    }
}
