//! Console command parsing.

use ferz_core::{Color, Move, Position, PromotionPiece, Square};

use crate::error::ConsoleError;

/// A requested move in coordinate text: `e2e4`, or `e7e8n` with a promotion letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    /// Promotion piece named in the text; the session asks if it is absent.
    pub promotion: Option<PromotionPiece>,
}

impl MoveRequest {
    /// Parse coordinate move text.
    pub fn parse(text: &str) -> Result<MoveRequest, ConsoleError> {
        let invalid = || ConsoleError::InvalidMoveText {
            text: text.to_string(),
        };

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }
        let from: Square = text[0..2].parse().map_err(|_| invalid())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid())?;
        let promotion = match text[4..].chars().next() {
            Some(c) => Some(PromotionPiece::from_char(c).ok_or_else(invalid)?),
            None => None,
        };
        Ok(MoveRequest {
            from,
            to,
            promotion,
        })
    }
}

/// Result of a `position` command: the position reached and the last move replayed.
#[derive(Debug, Clone)]
pub struct PositionInfo {
    pub position: Position,
    pub last_move: Option<Move>,
}

/// A runtime option set with `setoption name <Name> value <v>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOption {
    /// Which side is drawn at the bottom of the board.
    Orientation(Color),
    /// Promote to a queen without asking.
    AutoQueen(bool),
    /// Draw the board after every move.
    ShowBoard(bool),
    /// Draw pieces as Unicode chess symbols instead of letters.
    Unicode(bool),
}

/// A parsed console command.
#[derive(Debug)]
pub enum Command {
    /// `new` -- reset to the starting position.
    New,
    /// `position` -- set up a position with optional moves applied.
    Position(PositionInfo),
    /// `select` -- pick a piece and list its legal moves.
    Select(Square),
    /// `move` -- play a move for the side to move.
    Move(MoveRequest),
    /// `fen` -- print the position text.
    Fen,
    /// `board` -- draw the board.
    Board,
    /// `flip` -- swap the side drawn at the bottom.
    Flip,
    /// `status` -- report check and mobility for the side to move.
    Status,
    /// `setoption` -- change a runtime option.
    SetOption(ConsoleOption),
    /// `help` -- list the commands.
    Help,
    /// `quit` -- leave the session.
    Quit,
    /// Unrecognized command.
    Unknown(String),
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, ConsoleError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "new" => Ok(Command::New),
        "fen" => Ok(Command::Fen),
        "board" | "d" => Ok(Command::Board),
        "flip" => Ok(Command::Flip),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "position" => parse_position(args),
        "select" => parse_select(args),
        "move" => parse_move(args),
        "setoption" => parse_setoption(args),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <six fields> [moves e2e4 d7d5 ...]`
///
/// Moves are replayed with full legality checks; a promotion without a
/// letter becomes a queen.
fn parse_position(tokens: &[&str]) -> Result<Command, ConsoleError> {
    let (mut position, rest) = match tokens.first() {
        Some(&"startpos") => (Position::starting_position(), &tokens[1..]),
        Some(&"fen") => {
            // Position text is 6 space-separated fields
            let end = tokens
                .iter()
                .position(|&t| t == "moves")
                .unwrap_or(tokens.len());
            let fen = tokens[1..end].join(" ");
            let position: Position = fen.parse()?;
            (position, &tokens[end..])
        }
        _ => return Err(ConsoleError::MalformedPosition),
    };

    let mut last_move = None;
    if let Some((&"moves", moves)) = rest.split_first() {
        for text in moves {
            let request = MoveRequest::parse(text)?;
            let mv = position.play(
                request.from,
                request.to,
                request.promotion.unwrap_or_default(),
            )?;
            last_move = Some(mv);
        }
    }

    Ok(Command::Position(PositionInfo {
        position,
        last_move,
    }))
}

fn parse_select(tokens: &[&str]) -> Result<Command, ConsoleError> {
    let text = tokens
        .first()
        .ok_or(ConsoleError::MissingArgument { command: "select" })?;
    let square = text.parse().map_err(|_| ConsoleError::InvalidSquare {
        text: text.to_string(),
    })?;
    Ok(Command::Select(square))
}

fn parse_move(tokens: &[&str]) -> Result<Command, ConsoleError> {
    let text = tokens
        .first()
        .ok_or(ConsoleError::MissingArgument { command: "move" })?;
    Ok(Command::Move(MoveRequest::parse(text)?))
}

/// Parse `setoption name <Name> value <v>`. Names are case-insensitive.
fn parse_setoption(tokens: &[&str]) -> Result<Command, ConsoleError> {
    let name_start = tokens
        .iter()
        .position(|&t| t == "name")
        .ok_or(ConsoleError::MissingArgument {
            command: "setoption",
        })?;
    let value_start = tokens.iter().position(|&t| t == "value");

    let name_end = value_start.unwrap_or(tokens.len());
    let name = tokens
        .get(name_start + 1..name_end)
        .unwrap_or_default()
        .join(" ");
    let value = value_start
        .map(|i| tokens[i + 1..].join(" "))
        .unwrap_or_default();

    let invalid = || ConsoleError::InvalidOptionValue {
        name: name.clone(),
        value: value.clone(),
    };
    let flag = || match value.to_ascii_lowercase().as_str() {
        "true" | "on" => Ok(true),
        "false" | "off" => Ok(false),
        _ => Err(invalid()),
    };

    let option = match name.to_ascii_lowercase().as_str() {
        "orientation" => match value.to_ascii_lowercase().as_str() {
            "white" => ConsoleOption::Orientation(Color::White),
            "black" => ConsoleOption::Orientation(Color::Black),
            _ => return Err(invalid()),
        },
        "autoqueen" => ConsoleOption::AutoQueen(flag()?),
        "showboard" => ConsoleOption::ShowBoard(flag()?),
        "unicode" => ConsoleOption::Unicode(flag()?),
        _ => return Err(ConsoleError::UnknownOption { name }),
    };
    Ok(Command::SetOption(option))
}
