//! Outer application flow: main menu, authentication, games, statistics.
//!
//! The flow is a flat state machine driven by menu selections. Screens
//! return control codes instead of calling back into each other, so
//! there is no recursive menu re-entry and end-of-input unwinds every
//! level cleanly.

use anyhow::Result;
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

use crate::account::AccountService;
use crate::console::Console;
use crate::db::{GameOutcome, User};
use crate::game::{GameSession, HeuristicOpponent, Winner};

/// Identity used when playing without an account. Never persisted.
pub const GUEST_NAME: &str = "Guest";

/// Top-level menu selection.
#[derive(Debug, Clone, Copy, strum::Display, strum::EnumIter)]
enum MainMenuChoice {
    #[strum(serialize = "Play as guest")]
    PlayAsGuest,
    #[strum(serialize = "Log in")]
    LogIn,
    #[strum(serialize = "Register")]
    Register,
    #[strum(serialize = "Exit")]
    Exit,
}

/// Post-login menu selection.
#[derive(Debug, Clone, Copy, strum::Display, strum::EnumIter)]
enum LobbyChoice {
    #[strum(serialize = "Play new game")]
    PlayNewGame,
    #[strum(serialize = "Show statistics")]
    ShowStatistics,
}

/// Selection offered after a failed login or registration attempt.
#[derive(Debug, Clone, Copy, strum::Display, strum::EnumIter)]
enum RetryChoice {
    #[strum(serialize = "Try again")]
    TryAgain,
    #[strum(serialize = "Back to main menu")]
    BackToMainMenu,
    #[strum(serialize = "Exit from the game")]
    Exit,
}

/// Selection offered from the statistics view.
#[derive(Debug, Clone, Copy, strum::Display, strum::EnumIter)]
enum StatsChoice {
    #[strum(serialize = "Back to the game")]
    Back,
    #[strum(serialize = "Exit from the game")]
    Exit,
}

/// Plain yes/no selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
enum YesNo {
    Yes,
    No,
}

/// Control code returned by screens to the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Return to the main menu.
    Continue,
    /// Leave the application.
    Exit,
}

/// Result of an authentication screen.
enum AuthOutcome {
    /// Authentication succeeded.
    LoggedIn(User),
    /// The user chose to go back to the main menu.
    Back,
    /// The user chose to exit, or input ended.
    Exit,
}

/// The interactive application.
pub struct App {
    accounts: AccountService,
    console: Console,
}

impl App {
    /// Creates the application from its two collaborators.
    pub fn new(accounts: AccountService, console: Console) -> Self {
        Self { accounts, console }
    }

    /// Runs the main menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Only engine contract violations bubble up; user-level failures
    /// (bad credentials, duplicate names, database trouble at record
    /// time) are handled on their screens.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<()> {
        self.console.greeting();
        let main_options: Vec<MainMenuChoice> = MainMenuChoice::iter().collect();

        loop {
            let choice = self
                .console
                .menu("Choose how you want to play", &main_options);
            match choice {
                None | Some(MainMenuChoice::Exit) => break,
                Some(MainMenuChoice::PlayAsGuest) => {
                    if self.lobby(None)? == Flow::Exit {
                        break;
                    }
                }
                Some(MainMenuChoice::LogIn) => match self.login_screen() {
                    AuthOutcome::LoggedIn(user) => {
                        if self.lobby(Some(&user))? == Flow::Exit {
                            break;
                        }
                    }
                    AuthOutcome::Back => continue,
                    AuthOutcome::Exit => break,
                },
                Some(MainMenuChoice::Register) => match self.register_screen() {
                    AuthOutcome::LoggedIn(user) => {
                        if self.lobby(Some(&user))? == Flow::Exit {
                            break;
                        }
                    }
                    AuthOutcome::Back => continue,
                    AuthOutcome::Exit => break,
                },
            }
        }

        self.console.farewell();
        Ok(())
    }

    /// Login screen: prompts for credentials until success, back, or exit.
    fn login_screen(&mut self) -> AuthOutcome {
        self.console.clear();
        self.console.banner("Log in");

        loop {
            let Some(username) = self.console.prompt("Enter your username") else {
                return AuthOutcome::Exit;
            };
            let Some(password) = self.console.prompt("Enter your password") else {
                return AuthOutcome::Exit;
            };

            match self.accounts.login(&username, &password) {
                Ok(user) => {
                    info!(user_id = user.id(), "Login succeeded");
                    self.console.message("\nSuccessfully logged in!");
                    return AuthOutcome::LoggedIn(user);
                }
                Err(e) => {
                    warn!(error = %e, "Login failed");
                    self.console.error(&format!("\n{e}"));
                    match self.retry_menu() {
                        RetryChoice::TryAgain => continue,
                        RetryChoice::BackToMainMenu => return AuthOutcome::Back,
                        RetryChoice::Exit => return AuthOutcome::Exit,
                    }
                }
            }
        }
    }

    /// Registration screen: prompts for a username and matching password
    /// pair until success, back, or exit.
    fn register_screen(&mut self) -> AuthOutcome {
        self.console.clear();
        self.console.banner("Register");

        loop {
            let Some(username) = self.console.prompt("Enter your username") else {
                return AuthOutcome::Exit;
            };
            let Some(password) = self.console.prompt("Enter your password") else {
                return AuthOutcome::Exit;
            };
            let Some(confirmation) = self.console.prompt("Confirm your password") else {
                return AuthOutcome::Exit;
            };

            if password != confirmation {
                self.console
                    .error("\nPasswords do not match. Please try again.");
                match self.retry_menu() {
                    RetryChoice::TryAgain => continue,
                    RetryChoice::BackToMainMenu => return AuthOutcome::Back,
                    RetryChoice::Exit => return AuthOutcome::Exit,
                }
            }

            match self.accounts.register(&username, &password) {
                Ok(user) => {
                    info!(user_id = user.id(), "Registration succeeded");
                    self.console
                        .message("\nSuccessfully registered and logged in!");
                    return AuthOutcome::LoggedIn(user);
                }
                Err(e) => {
                    warn!(error = %e, "Registration failed");
                    self.console.error(&format!("\n{e}"));
                    match self.retry_menu() {
                        RetryChoice::TryAgain => continue,
                        RetryChoice::BackToMainMenu => return AuthOutcome::Back,
                        RetryChoice::Exit => return AuthOutcome::Exit,
                    }
                }
            }
        }
    }

    fn retry_menu(&mut self) -> RetryChoice {
        let options: Vec<RetryChoice> = RetryChoice::iter().collect();
        self.console
            .menu("What now?", &options)
            .unwrap_or(RetryChoice::Exit)
    }

    /// Lobby and play-again loop for a guest or logged-in user.
    #[instrument(skip(self, user), fields(user = user.map(|u| u.username().as_str()).unwrap_or(GUEST_NAME)))]
    fn lobby(&mut self, user: Option<&User>) -> Result<Flow> {
        if let Some(user) = user {
            self.console.message(&format!(
                "\nHi {}, choose what you want to do!",
                user.username()
            ));
            let options: Vec<LobbyChoice> = LobbyChoice::iter().collect();
            match self.console.menu("Lobby", &options) {
                None => return Ok(Flow::Exit),
                Some(LobbyChoice::ShowStatistics) => {
                    if self.stats_view(user) == Flow::Exit {
                        return Ok(Flow::Exit);
                    }
                }
                Some(LobbyChoice::PlayNewGame) => {}
            }
        }

        let yes_no: Vec<YesNo> = YesNo::iter().collect();
        loop {
            let Some(first) = self
                .console
                .menu("Do you want to make the first move?", &yes_no)
            else {
                return Ok(Flow::Exit);
            };

            let name = user.map(|u| u.username().as_str()).unwrap_or(GUEST_NAME);
            let opponent = HeuristicOpponent::new(rand::thread_rng());
            let mut session = GameSession::new(name, first == YesNo::Yes, opponent);

            match session.play(&mut self.console)? {
                // Abort mid-game: leave without recording anything.
                None => return Ok(Flow::Exit),
                Some(outcome) => {
                    if let Some(user) = user {
                        let result = outcome_for_human(*outcome.winner());
                        if let Err(e) = self.accounts.record_result(
                            *user.id(),
                            result,
                            *outcome.moves_played() as i32,
                        ) {
                            // Degraded guest-like mode: the game goes on.
                            warn!(error = %e, "Failed to record game result");
                            self.console
                                .error("Could not save your result; statistics are unavailable");
                        }

                        match self
                            .console
                            .menu("Do you want to see your statistics?", &yes_no)
                        {
                            None => return Ok(Flow::Exit),
                            Some(YesNo::Yes) => {
                                if self.stats_view(user) == Flow::Exit {
                                    return Ok(Flow::Exit);
                                }
                            }
                            Some(YesNo::No) => {}
                        }
                    }

                    match self.console.menu("Do you want to play again?", &yes_no) {
                        Some(YesNo::Yes) => continue,
                        Some(YesNo::No) => return Ok(Flow::Continue),
                        None => return Ok(Flow::Exit),
                    }
                }
            }
        }
    }

    /// Statistics view for a logged-in user.
    fn stats_view(&mut self, user: &User) -> Flow {
        match self.accounts.statistics(*user.id()) {
            Ok(stats) => self.console.show_statistics(user.username(), &stats),
            Err(e) => {
                warn!(error = %e, "Failed to load statistics");
                self.console
                    .error("Could not load your statistics right now");
            }
        }

        let options: Vec<StatsChoice> = StatsChoice::iter().collect();
        match self.console.menu("What now?", &options) {
            Some(StatsChoice::Back) => Flow::Continue,
            Some(StatsChoice::Exit) | None => Flow::Exit,
        }
    }
}

/// Maps a session winner to the outcome stored for the human player.
fn outcome_for_human(winner: Winner) -> GameOutcome {
    match winner {
        Winner::Human => GameOutcome::Win,
        Winner::Computer => GameOutcome::Lose,
        Winner::Draw => GameOutcome::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_maps_to_user_outcome() {
        assert_eq!(outcome_for_human(Winner::Human), GameOutcome::Win);
        assert_eq!(outcome_for_human(Winner::Computer), GameOutcome::Lose);
        assert_eq!(outcome_for_human(Winner::Draw), GameOutcome::Draw);
    }
}
