//! Database persistence layer for user accounts and game statistics.

mod error;
mod models;
mod repository;
mod schema;

pub use error::DbError;
pub use models::{AggregatedStats, GameOutcome, GameStat, NewGameStat, NewUser, User};
pub use repository::GameRepository;
