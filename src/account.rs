//! Account service: registration, login, and statistics recording.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

use crate::db::{AggregatedStats, DbError, GameOutcome, GameRepository, GameStat, NewGameStat, User};

/// Errors surfaced by account operations.
#[derive(Debug, Display, Error)]
pub enum AccountError {
    /// Registration with a username that already exists.
    #[display("username '{username}' is already taken")]
    DuplicateUsername {
        /// The requested username.
        username: String,
    },
    /// Login with an unknown username or a wrong password.
    ///
    /// Deliberately the same for both cases so login attempts cannot
    /// probe which usernames exist.
    #[display("username or password is invalid")]
    InvalidCredentials,
    /// Password hashing or hash parsing failed.
    #[display("password hashing failed: {message}")]
    Hash {
        /// Underlying hasher error message.
        message: String,
    },
    /// Underlying database failure.
    #[display("{_0}")]
    Db(DbError),
}

impl From<DbError> for AccountError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

/// Service layer over [`GameRepository`] adding password hashing and
/// outcome recording.
///
/// Guest play never touches this service; only logged-in users have
/// statistics.
#[derive(Debug, Clone)]
pub struct AccountService {
    repository: GameRepository,
}

impl AccountService {
    /// Creates a new account service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!("Creating AccountService");
        Self { repository }
    }

    /// Registers a new user and returns the created account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DuplicateUsername`] if the name is taken,
    /// [`AccountError::Hash`] if hashing fails, or [`AccountError::Db`]
    /// on database failure.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<User, AccountError> {
        debug!(username = %username, "Registering user");

        if self.repository.get_user_by_name(username)?.is_some() {
            return Err(AccountError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        let password_hash = hash_password(password)?;
        let user = self
            .repository
            .create_user(username.to_string(), password_hash)?;
        info!(user_id = user.id(), "User registered");
        Ok(user)
    }

    /// Authenticates a user by username and password.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] when the username is
    /// unknown or the password does not match.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<User, AccountError> {
        debug!(username = %username, "Authenticating user");

        let user = self
            .repository
            .get_user_by_name(username)?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(password, user.password_hash()) {
            return Err(AccountError::InvalidCredentials);
        }

        info!(user_id = user.id(), "User logged in");
        Ok(user)
    }

    /// Records the outcome of a completed game for a user.
    ///
    /// Called exactly once per completed non-guest session; aborted
    /// games are never recorded.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Db`] on database failure.
    #[instrument(skip(self))]
    pub fn record_result(
        &self,
        user_id: i32,
        outcome: GameOutcome,
        moves_count: i32,
    ) -> Result<GameStat, AccountError> {
        debug!(user_id = %user_id, outcome = ?outcome, "Recording game result");
        let stat = NewGameStat::new(user_id, outcome.to_db_string().to_string(), moves_count);
        Ok(self.repository.record_game(stat)?)
    }

    /// Returns aggregated win/lose/draw counts for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Db`] on database failure.
    #[instrument(skip(self))]
    pub fn statistics(&self, user_id: i32) -> Result<AggregatedStats, AccountError> {
        debug!(user_id = %user_id, "Loading aggregated stats");
        Ok(self.repository.get_aggregated_stats(user_id)?)
    }
}

/// Hashes a password into PHC string format with a fresh random salt.
fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::Hash {
            message: e.to_string(),
        })
}

/// Verifies a password against a stored PHC hash string.
///
/// An unparseable stored hash counts as a failed verification rather
/// than an error; login should not distinguish the two.
fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
