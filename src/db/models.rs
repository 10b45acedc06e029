//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::{DbError, schema};

/// User account database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::users)]
pub struct User {
    id: i32,
    username: String,
    password_hash: String,
    created_at: NaiveDateTime,
}

/// Insertable user model for registering new accounts.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    username: String,
    password_hash: String,
}

/// Recorded game result database model.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::game_stats)]
#[diesel(belongs_to(User))]
pub struct GameStat {
    id: i32,
    user_id: i32,
    outcome: String,
    moves_count: i32,
    played_at: NaiveDateTime,
}

impl GameStat {
    /// Parses the stored outcome string into a [`GameOutcome`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored string is not a valid outcome.
    pub fn parse_outcome(&self) -> Result<GameOutcome, DbError> {
        GameOutcome::from_db_string(self.outcome())
    }
}

/// Insertable game stat model for recording a completed game.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_stats)]
pub struct NewGameStat {
    user_id: i32,
    outcome: String,
    moves_count: i32,
}

/// Game outcome from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    /// User won the game.
    Win,
    /// User lost the game.
    Lose,
    /// Game ended in a draw.
    Draw,
}

impl GameOutcome {
    /// Converts the outcome to the string stored in the database.
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Draw => "draw",
        }
    }

    /// Parses an outcome from the string stored in the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid outcome value.
    pub fn from_db_string(s: &str) -> Result<Self, DbError> {
        match s {
            "win" => Ok(Self::Win),
            "lose" => Ok(Self::Lose),
            "draw" => Ok(Self::Draw),
            _ => Err(DbError::new(format!("Invalid outcome: '{}'", s))),
        }
    }
}

/// Aggregated win/lose/draw counts for a user.
#[derive(Debug, Clone, Getters)]
pub struct AggregatedStats {
    total_games: i32,
    wins: i32,
    losses: i32,
    draws: i32,
}

impl AggregatedStats {
    /// Creates new aggregated statistics.
    pub fn new(total_games: i32, wins: i32, losses: i32, draws: i32) -> Self {
        Self {
            total_games,
            wins,
            losses,
            draws,
        }
    }

    /// Calculates win rate as a percentage (0.0-100.0).
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_round_trips_through_db_string() {
        for outcome in [GameOutcome::Win, GameOutcome::Lose, GameOutcome::Draw] {
            let parsed = GameOutcome::from_db_string(outcome.to_db_string())
                .expect("valid outcome string");
            assert_eq!(parsed, outcome);
        }
    }

    #[test]
    fn unknown_outcome_string_is_rejected() {
        assert!(GameOutcome::from_db_string("victory").is_err());
    }

    #[test]
    fn win_rate_handles_zero_games() {
        let stats = AggregatedStats::new(0, 0, 0, 0);
        assert_eq!(stats.win_rate(), 0.0);
    }

    #[test]
    fn win_rate_is_a_percentage() {
        let stats = AggregatedStats::new(4, 3, 1, 0);
        assert_eq!(stats.win_rate(), 75.0);
    }
}
