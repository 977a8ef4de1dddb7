//! Position text: parsing and serialization of the six-field notation.

use std::fmt;
use std::str::FromStr;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::file::File;
use crate::piece::Piece;
use crate::position::Position;
use crate::rank::Rank;
use crate::square::Square;

/// The text of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse one row of the placement field into the slots of `rank`.
fn parse_row(
    row: &str,
    rank_index: usize,
    rank: Rank,
    squares: &mut [Option<Piece>; Square::COUNT],
) -> Result<(), FenError> {
    let mut file_index = 0usize;

    for c in row.chars() {
        if let Some(run) = c.to_digit(10) {
            if !(1..=8).contains(&run) {
                return Err(FenError::InvalidPieceChar { character: c });
            }
            file_index += run as usize;
            continue;
        }

        let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
        let file = File::ALL.get(file_index).copied().ok_or(FenError::BadRankLength {
            rank_index,
            length: file_index + 1,
        })?;
        squares[Square::new(rank, file).index()] = Some(piece);
        file_index += 1;
    }

    if file_index != File::COUNT {
        return Err(FenError::BadRankLength {
            rank_index,
            length: file_index,
        });
    }
    Ok(())
}

fn parse_counter(field: &'static str, text: &str) -> Result<u16, FenError> {
    text.parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
        field,
        found: text.to_string(),
    })
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let [placement, side, castling, en_passant, halfmove, fullmove] = fields[..] else {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        };

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != Rank::COUNT {
            return Err(FenError::WrongRankCount { found: rows.len() });
        }

        // Rows are written from rank 8 down to rank 1.
        let mut squares = [None; Square::COUNT];
        for (rank_index, (row, rank)) in rows.iter().zip(Rank::ALL.into_iter().rev()).enumerate() {
            parse_row(row, rank_index, rank, &mut squares)?;
        }

        let side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        let castling = CastleRights::from_fen(castling)?;

        let en_passant = match en_passant {
            "-" => None,
            text => Some(Square::from_algebraic(text).ok_or_else(|| {
                FenError::InvalidEnPassant {
                    found: text.to_string(),
                }
            })?),
        };

        let halfmove_clock = parse_counter("halfmove clock", halfmove)?;
        let fullmove_number = parse_counter("fullmove number", fullmove)?;

        Ok(Position::from_parts(
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        )?)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in Rank::ALL.into_iter().rev().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            let mut empty_run = 0u8;
            for file in File::ALL {
                match self.piece_on(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::error::{FenError, PositionError};
    use crate::position::Position;

    fn roundtrip(fen: &str) {
        let position: Position = fen.parse().unwrap();
        let output = position.to_string();
        assert_eq!(output, fen, "position text roundtrip failed");
        let reparsed: Position = output.parse().unwrap();
        assert_eq!(position, reparsed);
    }

    #[test]
    fn roundtrip_starting() {
        roundtrip(STARTING_FEN);
    }

    #[test]
    fn roundtrip_sicilian() {
        roundtrip("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2");
    }

    #[test]
    fn roundtrip_kiwipete() {
        roundtrip("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn roundtrip_endgame_without_rights() {
        roundtrip("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    }

    #[test]
    fn roundtrip_black_to_move_with_counters() {
        roundtrip("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        roundtrip("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
    }

    #[test]
    fn starting_position_matches_text() {
        let parsed: Position = STARTING_FEN.parse().unwrap();
        assert_eq!(parsed, Position::starting_position());
        assert_eq!(Position::starting_position().to_string(), STARTING_FEN);
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let parsed: Position = "  rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR   w KQkq - 0 1 "
            .parse()
            .unwrap();
        assert_eq!(parsed.to_string(), STARTING_FEN);
    }

    #[test]
    fn error_wrong_field_count() {
        assert_eq!(
            "e4 e5".parse::<Position>(),
            Err(FenError::WrongFieldCount { found: 2 })
        );
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0".parse::<Position>().is_err());
    }

    #[test]
    fn error_wrong_rank_count() {
        assert_eq!(
            "8/8/8/8/8/8/8 w - - 0 1".parse::<Position>(),
            Err(FenError::WrongRankCount { found: 7 })
        );
    }

    #[test]
    fn error_invalid_piece_char() {
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>(),
            Err(FenError::InvalidPieceChar { character: 'X' })
        );
        assert!("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>().is_err());
    }

    #[test]
    fn error_bad_rank_length() {
        assert_eq!(
            "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>(),
            Err(FenError::BadRankLength { rank_index: 1, length: 7 })
        );
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1".parse::<Position>().is_err());
        assert!("rnbqkbnr/pppppppp/44p/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".parse::<Position>().is_err());
    }

    #[test]
    fn error_invalid_fields() {
        let base = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
        assert!(matches!(
            format!("{base} x KQkq - 0 1").parse::<Position>(),
            Err(FenError::InvalidColor { .. })
        ));
        assert!(matches!(
            format!("{base} w XQkq - 0 1").parse::<Position>(),
            Err(FenError::InvalidCastlingChar { character: 'X' })
        ));
        assert!(matches!(
            format!("{base} w KQkq z9 0 1").parse::<Position>(),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            format!("{base} w KQkq - abc 1").parse::<Position>(),
            Err(FenError::InvalidMoveCounter { field: "halfmove clock", .. })
        ));
        assert!(matches!(
            format!("{base} w KQkq - 0 -3").parse::<Position>(),
            Err(FenError::InvalidMoveCounter { field: "fullmove number", .. })
        ));
    }

    #[test]
    fn error_missing_king() {
        assert_eq!(
            "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Position>(),
            Err(FenError::InvalidPosition {
                source: PositionError::MissingKing {
                    color: crate::color::Color::Black
                }
            })
        );
    }
}
