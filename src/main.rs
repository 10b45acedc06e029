//! Terminal tic-tac-toe entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ttt::{AccountService, App, Cli, Console, GameRepository};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log to stderr so tracing output never corrupts the board display.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    info!(database = %cli.database, "Starting tic-tac-toe");

    let repository = GameRepository::new(cli.database)?;
    let accounts = AccountService::new(repository);
    let mut app = App::new(accounts, Console::new());
    app.run()
}
