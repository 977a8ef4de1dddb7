//! Console errors.

use ferz_core::{FenError, MoveError};

/// Errors that can occur while parsing or executing a console command.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// The position text after `position fen` was rejected.
    #[error("invalid position text: {source}")]
    InvalidFen {
        /// Why the text was rejected.
        #[from]
        source: FenError,
    },

    /// Text that is not `<from><to>` with an optional promotion letter.
    #[error("invalid move text: {text}")]
    InvalidMoveText {
        /// The rejected text.
        text: String,
    },

    /// A square argument that is not algebraic notation.
    #[error("invalid square: {text}")]
    InvalidSquare {
        /// The rejected text.
        text: String,
    },

    /// A well-formed move the position does not allow.
    #[error("{source}")]
    Move {
        /// The rules engine's verdict.
        #[from]
        source: MoveError,
    },

    /// A command was given without a required argument.
    #[error("{command}: missing argument")]
    MissingArgument {
        /// The command that needs the argument.
        command: &'static str,
    },

    /// `setoption` named an option that does not exist.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name as given.
        name: String,
    },

    /// `setoption` supplied a value the option cannot take.
    #[error("invalid value for {name}: {value}")]
    InvalidOptionValue {
        /// The option name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
