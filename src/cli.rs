//! Command-line interface definition.

use clap::Parser;

/// Terminal tic-tac-toe with user accounts and persisted statistics.
#[derive(Parser, Debug)]
#[command(name = "ttt")]
#[command(about = "Play tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the SQLite statistics database.
    #[arg(long, env = "DATABASE_URL", default_value = "tic_tac_toe.db")]
    pub database: String,
}
