//! Core chess rules: position representation, move geometry, legality, and move application.

mod attacks;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod file;
mod legality;
mod make_move;
mod perft;
mod piece;
mod piece_kind;
mod position;
mod rank;
mod square;
mod square_set;

pub use attacks::{attacked_squares, attacks_from, is_square_attacked, pseudo_legal_moves};
pub use castle_rights::{CastleRights, CastleSide};
pub use chess_move::{CheckState, Move, MoveAction, MoveKind, PromotionPiece};
pub use color::Color;
pub use error::{FenError, MoveError, PositionError, SquareError};
pub use fen::STARTING_FEN;
pub use file::File;
pub use legality::{
    GameStatus, has_legal_move, is_checkmate, is_in_check, legal_moves, legal_moves_from, status,
};
pub use make_move::PromotionChooser;
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::Position;
pub use rank::Rank;
pub use square::Square;
pub use square_set::{SquareSet, SquareSetIter};
