//! Text board rendering.
//!
//! Each square is drawn three characters wide. A selected piece is wrapped in
//! `[ ]`, legal destinations show `*` (or `( )` around a capturable piece),
//! and the two squares of the last move are wrapped in `< >`.

use std::fmt;

use ferz_core::{Color, File, Move, Piece, Position, Rank, Square, SquareSet};

/// A drawable view of a position with highlights.
pub struct BoardView<'a> {
    position: &'a Position,
    orientation: Color,
    unicode: bool,
    selected: Option<Square>,
    targets: SquareSet,
    last_move: Option<Move>,
}

impl<'a> BoardView<'a> {
    /// A plain view with White at the bottom.
    pub fn new(position: &'a Position) -> BoardView<'a> {
        BoardView {
            position,
            orientation: Color::White,
            unicode: false,
            selected: None,
            targets: SquareSet::EMPTY,
            last_move: None,
        }
    }

    /// Draw `color`'s first rank at the bottom.
    pub fn orientation(mut self, color: Color) -> Self {
        self.orientation = color;
        self
    }

    /// Draw Unicode chess symbols instead of letters.
    pub fn unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    /// Mark a selected square and the destinations available from it.
    pub fn selection(mut self, square: Square, targets: SquareSet) -> Self {
        self.selected = Some(square);
        self.targets = targets;
        self
    }

    pub fn last_move(mut self, mv: Option<Move>) -> Self {
        self.last_move = mv;
        self
    }

    fn piece_char(&self, piece: Piece) -> char {
        if self.unicode {
            piece.glyph()
        } else {
            piece.fen_char()
        }
    }

    fn cell(&self, sq: Square) -> String {
        let piece = self.position.piece_on(sq);
        let c = piece.map_or('.', |p| self.piece_char(p));

        let on_last_move = self
            .last_move
            .is_some_and(|mv| mv.from() == sq || mv.to() == sq);

        if self.selected == Some(sq) {
            format!("[{c}]")
        } else if self.targets.contains(sq) {
            match piece {
                Some(_) => format!("({c})"),
                None => " * ".to_string(),
            }
        } else if on_last_move {
            format!("<{c}>")
        } else {
            format!(" {c} ")
        }
    }

    /// Ranks top to bottom and files left to right, as seen from `orientation`.
    fn axes(&self) -> (Vec<Rank>, Vec<File>) {
        match self.orientation {
            Color::White => (Rank::ALL.into_iter().rev().collect(), File::ALL.to_vec()),
            Color::Black => (Rank::ALL.to_vec(), File::ALL.into_iter().rev().collect()),
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ranks, files) = self.axes();
        for rank in ranks {
            write!(f, "{rank} ")?;
            for &file in &files {
                write!(f, "{}", self.cell(Square::new(rank, file)))?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in files {
            write!(f, " {file} ")?;
        }
        Ok(())
    }
}
