//! The interactive session: one live position driven by text commands.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use ferz_core::{
    Color, GameStatus, Move, MoveKind, Position, PromotionPiece, Square, SquareSet,
    legal_moves_from, status,
};

use crate::command::{Command, ConsoleOption, MoveRequest, PositionInfo, parse_command};
use crate::error::ConsoleError;
use crate::render::BoardView;

const HELP: &str = "\
commands:
  new                                  start a new game
  position startpos [moves ...]        set up the starting position
  position fen <text> [moves ...]      set up a position from text
  select <square>                      list the legal moves of a piece
  move <from><to>[q|r|b|n]             play a move
  fen                                  print the position text
  board                                draw the board
  flip                                 swap the side drawn at the bottom
  status                               report check and mobility
  setoption name <name> value <value>  Orientation, AutoQueen, ShowBoard, Unicode
  help                                 show this list
  quit                                 leave";

/// Configuration knobs adjustable via `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// The side drawn at the bottom of the board.
    pub orientation: Color,
    /// Promote to a queen without asking.
    pub auto_queen: bool,
    /// Draw the board after every move.
    pub show_board: bool,
    /// Draw pieces as Unicode symbols.
    pub unicode: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            orientation: Color::White,
            auto_queen: false,
            show_board: true,
            unicode: false,
        }
    }
}

/// A selected piece and the legal moves it has.
#[derive(Debug, Clone)]
struct Selection {
    square: Square,
    moves: Vec<Move>,
}

/// What the loop should do after a command.
enum Flow {
    Continue,
    Quit,
}

/// A console session, holding the current position and what to highlight.
///
/// Reads commands line by line from `input` and writes replies to `output`.
/// Promotion choices are read synchronously from the same input.
pub struct Session<R, W> {
    position: Position,
    /// Only the immediately preceding move is kept.
    last_move: Option<Move>,
    selection: Option<Selection>,
    config: SessionConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session at the starting position.
    pub fn new(input: R, output: W) -> Self {
        Self::with_config(input, output, SessionConfig::default())
    }

    pub fn with_config(input: R, output: W, config: SessionConfig) -> Self {
        Self {
            position: Position::starting_position(),
            last_move: None,
            selection: None,
            config,
            input,
            output,
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The selected square, if any.
    pub fn selected(&self) -> Option<Square> {
        self.selection.as_ref().map(|s| s.square)
    }

    /// Consume the session and return its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the command loop until `quit` or end of input.
    ///
    /// Parse errors and rejected moves are reported on the output and the
    /// loop carries on.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");

            let flow = match parse_command(trimmed) {
                Ok(cmd) => self.execute(cmd)?,
                Err(e) => {
                    warn!(error = %e, "command parse error");
                    writeln!(self.output, "error: {e}")?;
                    Flow::Continue
                }
            };
            self.output.flush()?;
            if let Flow::Quit = flow {
                break;
            }
        }

        info!("session closed");
        Ok(())
    }

    fn execute(&mut self, cmd: Command) -> Result<Flow, ConsoleError> {
        match cmd {
            Command::New => self.handle_new()?,
            Command::Position(info) => self.handle_position(info)?,
            Command::Select(square) => self.handle_select(square)?,
            Command::Move(request) => self.handle_move(request)?,
            Command::Fen => writeln!(self.output, "{}", self.position)?,
            Command::Board => self.draw()?,
            Command::Flip => {
                self.config.orientation = !self.config.orientation;
                self.draw()?;
            }
            Command::Status => self.report_status()?,
            Command::SetOption(option) => self.handle_setoption(option),
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(name) => {
                if !name.is_empty() {
                    writeln!(self.output, "unknown command: {name} (try help)")?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_new(&mut self) -> Result<(), ConsoleError> {
        self.position = Position::starting_position();
        self.last_move = None;
        self.selection = None;
        if self.config.show_board {
            self.draw()?;
        }
        Ok(())
    }

    fn handle_position(&mut self, info: PositionInfo) -> Result<(), ConsoleError> {
        self.position = info.position;
        self.last_move = info.last_move;
        self.selection = None;
        if self.config.show_board {
            self.draw()?;
        }
        Ok(())
    }

    /// Select the piece on `square` if it belongs to the side to move; anything else clears the selection.
    fn handle_select(&mut self, square: Square) -> Result<(), ConsoleError> {
        if self.position.color_on(square) != Some(self.position.side_to_move()) {
            self.selection = None;
            writeln!(self.output, "nothing to select on {square}")?;
            return Ok(());
        }

        let moves = legal_moves_from(&self.position, square);
        if moves.is_empty() {
            writeln!(self.output, "{square}: no legal moves")?;
        } else {
            let listed: Vec<String> = moves
                .iter()
                .map(|mv| format!("{} ({})", mv.to(), mv.kind()))
                .collect();
            writeln!(self.output, "{square}: {}", listed.join(", "))?;
        }
        self.selection = Some(Selection { square, moves });

        if self.config.show_board {
            self.draw()?;
        }
        Ok(())
    }

    fn handle_move(&mut self, request: MoveRequest) -> Result<(), ConsoleError> {
        let auto_queen = self.config.auto_queen;
        let input = &mut self.input;
        let output = &mut self.output;
        let chooser = |color: Color, square: Square| match request.promotion {
            Some(piece) => piece,
            None if auto_queen => PromotionPiece::Queen,
            None => prompt_promotion(input, output, color, square),
        };

        let mv = match self.position.play(request.from, request.to, chooser) {
            Ok(mv) => mv,
            Err(e) => {
                warn!(error = %e, "move rejected");
                writeln!(self.output, "error: {e}")?;
                return Ok(());
            }
        };

        self.last_move = Some(mv);
        self.selection = None;

        let promoted = match self.position.piece_on(mv.to()) {
            Some(piece) if mv.is_promotion() => PromotionPiece::ALL
                .into_iter()
                .find(|p| p.to_piece_kind() == piece.kind()),
            _ => None,
        };
        writeln!(self.output, "played {} ({})", mv.to_coordinate(promoted), mv.kind())?;

        if self.config.show_board {
            self.draw()?;
        }
        match mv.kind() {
            MoveKind::Checkmate => writeln!(self.output, "checkmate")?,
            _ if status(&self.position) == GameStatus::NoLegalMoves => {
                writeln!(self.output, "no legal moves")?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_setoption(&mut self, option: ConsoleOption) {
        debug!(?option, "setoption");
        match option {
            ConsoleOption::Orientation(color) => self.config.orientation = color,
            ConsoleOption::AutoQueen(on) => self.config.auto_queen = on,
            ConsoleOption::ShowBoard(on) => self.config.show_board = on,
            ConsoleOption::Unicode(on) => self.config.unicode = on,
        }
    }

    fn report_status(&mut self) -> Result<(), ConsoleError> {
        let side = self.position.side_to_move().name();
        let text = match status(&self.position) {
            GameStatus::Ongoing => "to move",
            GameStatus::Check => "to move, in check",
            GameStatus::Checkmate => "is checkmated",
            GameStatus::NoLegalMoves => "has no legal moves",
        };
        writeln!(self.output, "{side} {text}")?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), ConsoleError> {
        let mut view = BoardView::new(&self.position)
            .orientation(self.config.orientation)
            .unicode(self.config.unicode)
            .last_move(self.last_move);
        if let Some(selection) = &self.selection {
            let targets: SquareSet = selection.moves.iter().map(|mv| mv.to()).collect();
            view = view.selection(selection.square, targets);
        }
        writeln!(self.output, "{view}")?;
        Ok(())
    }
}

/// Ask for a promotion piece until a valid letter arrives.
///
/// Falls back to a queen if input ends or cannot be read.
fn prompt_promotion<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    color: Color,
    square: Square,
) -> PromotionPiece {
    let mut line = String::new();
    loop {
        if let Err(e) = write!(output, "promote {} pawn on {square} to (q/r/b/n): ", color.name())
            .and_then(|()| output.flush())
        {
            warn!(error = %e, "promotion prompt not written, promoting to queen");
            return PromotionPiece::Queen;
        }

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                warn!("no promotion choice read, promoting to queen");
                return PromotionPiece::Queen;
            }
            Ok(_) => {}
        }

        let mut chars = line.trim().chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(piece) = PromotionPiece::from_char(c)
        {
            return piece;
        }
    }
}
