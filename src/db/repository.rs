//! Database repository for user accounts and game statistics.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::{AggregatedStats, DbError, GameStat, NewGameStat, NewUser, User, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for user and game-result operations.
///
/// Each operation opens a short-lived connection, so every append is its
/// own transaction and nothing is shared across sessions.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a repository backed by the SQLite database at the given
    /// path, running any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating GameRepository");
        let repo = Self { db_path };
        let mut conn = repo.connection()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration error: {}", e)))?;
        Ok(repo)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Creates a new user account with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the username is already taken or a database
    /// error occurs.
    #[instrument(skip(self, password_hash))]
    pub fn create_user(&self, username: String, password_hash: String) -> Result<User, DbError> {
        debug!(username = %username, "Creating user");
        let mut conn = self.connection()?;

        let new_user = NewUser::new(username, password_hash);

        let user = diesel::insert_into(schema::users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id = user.id(), username = %user.username(), "User created");
        Ok(user)
    }

    /// Gets a user by username. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_by_name(&self, username: &str) -> Result<Option<User>, DbError> {
        debug!(username = %username, "Looking up user by name");
        let mut conn = self.connection()?;

        let user = schema::users::table
            .filter(schema::users::username.eq(username))
            .first::<User>(&mut conn)
            .optional()?;

        if let Some(ref u) = user {
            debug!(user_id = u.id(), "User found");
        } else {
            debug!("User not found");
        }

        Ok(user)
    }

    /// Records a completed game result.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, stat), fields(user_id = stat.user_id(), outcome = %stat.outcome()))]
    pub fn record_game(&self, stat: NewGameStat) -> Result<GameStat, DbError> {
        debug!("Recording game result");
        let mut conn = self.connection()?;

        let game_stat = diesel::insert_into(schema::game_stats::table)
            .values(&stat)
            .returning(GameStat::as_returning())
            .get_result(&mut conn)?;

        info!(
            stat_id = game_stat.id(),
            user_id = game_stat.user_id(),
            outcome = %game_stat.outcome(),
            "Game result recorded"
        );
        Ok(game_stat)
    }

    /// Gets all game stats for a user, ordered most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_stats(&self, user_id: i32) -> Result<Vec<GameStat>, DbError> {
        debug!(user_id = %user_id, "Loading user stats");
        let mut conn = self.connection()?;

        let stats = schema::game_stats::table
            .filter(schema::game_stats::user_id.eq(user_id))
            .order(schema::game_stats::played_at.desc())
            .load::<GameStat>(&mut conn)?;

        info!(user_id = %user_id, count = stats.len(), "User stats loaded");
        Ok(stats)
    }

    /// Gets aggregated win/lose/draw counts for a user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_aggregated_stats(&self, user_id: i32) -> Result<AggregatedStats, DbError> {
        debug!(user_id = %user_id, "Computing aggregated stats");
        let mut conn = self.connection()?;

        let stats = schema::game_stats::table
            .filter(schema::game_stats::user_id.eq(user_id))
            .load::<GameStat>(&mut conn)?;

        let mut wins = 0;
        let mut losses = 0;
        let mut draws = 0;

        for stat in &stats {
            match stat.outcome().as_str() {
                "win" => wins += 1,
                "lose" => losses += 1,
                "draw" => draws += 1,
                other => warn!(outcome = %other, stat_id = stat.id(), "Unknown outcome value"),
            }
        }

        let total = stats.len() as i32;
        let aggregated = AggregatedStats::new(total, wins, losses, draws);

        info!(
            user_id = %user_id,
            total = %total,
            wins = %wins,
            losses = %losses,
            draws = %draws,
            win_rate = %format!("{:.1}%", aggregated.win_rate()),
            "Aggregated stats computed"
        );

        Ok(aggregated)
    }
}
