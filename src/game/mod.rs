//! Game engine: board, rules, opponent policy, and the session turn loop.

mod error;
mod policy;
mod rules;
mod session;
mod types;

pub use error::GameError;
pub use policy::{HeuristicOpponent, RANDOM_MOVE_CHANCE};
pub use rules::{WIN_LINES, evaluate};
pub use session::{COMPUTER_NAME, GameSession, GameView, MoveSource, SessionOutcome, Winner};
pub use types::{Board, GameStatus, Mark, Square};
