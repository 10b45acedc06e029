//! Terminal tic-tac-toe with user accounts and persisted statistics.
//!
//! # Architecture
//!
//! - **Game engine** ([`Board`], [`evaluate`], [`HeuristicOpponent`],
//!   [`GameSession`]): pure rules, the computer's move policy, and the
//!   turn loop between a human move source and the opponent.
//! - **Persistence** ([`GameRepository`], [`AccountService`]): SQLite
//!   storage of accounts and per-user win/lose/draw records, with
//!   argon2 password hashing. Guest play bypasses it entirely.
//! - **Front end** ([`Console`], [`App`]): stdin menus and board
//!   rendering, driven by a flat menu state machine.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod account;
mod app;
mod cli;
mod console;
mod db;
mod game;

// Crate-level exports - account layer
pub use account::{AccountError, AccountService};

// Crate-level exports - application shell
pub use app::{App, GUEST_NAME};
pub use cli::Cli;
pub use console::Console;

// Crate-level exports - persistence
pub use db::{AggregatedStats, DbError, GameOutcome, GameRepository, GameStat, NewGameStat, NewUser, User};

// Crate-level exports - game engine
pub use game::{
    Board, COMPUTER_NAME, GameError, GameSession, GameStatus, GameView, HeuristicOpponent, Mark,
    MoveSource, RANDOM_MOVE_CHANCE, SessionOutcome, Square, WIN_LINES, Winner, evaluate,
};
