//! Text console for playing through positions with ferz-core.

pub mod command;
pub mod error;
pub mod render;
pub mod session;

pub use command::{Command, ConsoleOption, MoveRequest, parse_command};
pub use error::ConsoleError;
pub use render::BoardView;
pub use session::{Session, SessionConfig};
