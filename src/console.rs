//! Terminal input and rendering for the interactive game.
//!
//! The console is the concrete move source and view handed to a
//! [`GameSession`](crate::GameSession). All reads come from stdin line
//! by line; end-of-input (Ctrl-D) is reported as `None` so callers can
//! unwind cleanly.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, warn};

use crate::db::AggregatedStats;
use crate::game::{Board, GameView, Mark, MoveSource, SessionOutcome, Square, Winner};

const GREETING: &str = r#"
 _____ _        _____            _____
|_   _(_) ___  |_   _|_ _  ___  |_   _|__   ___
  | | | |/ __|   | |/ _` |/ __|   | |/ _ \ / _ \
  | | | | (__    | | (_| | (__    | | (_) |  __/
  |_| |_|\___|   |_|\__,_|\___|   |_|\___/ \___|
"#;

/// Interactive terminal front end.
#[derive(Debug, Default)]
pub struct Console;

impl Console {
    /// Creates a new console.
    pub fn new() -> Self {
        Self
    }

    /// Reads one trimmed line from stdin; `None` on end-of-input.
    fn read_line(&mut self) -> Option<String> {
        let mut buf = String::new();
        match io::stdin().lock().read_line(&mut buf) {
            Ok(0) => {
                debug!("End of input");
                None
            }
            Ok(_) => Some(buf.trim().to_string()),
            Err(e) => {
                warn!(error = %e, "Failed to read stdin");
                None
            }
        }
    }

    /// Clears the terminal and moves the cursor home.
    pub fn clear(&mut self) {
        // Rendering failures are not worth crashing a game over.
        let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
    }

    /// Prints a section banner.
    pub fn banner(&mut self, title: &str) {
        println!();
        println!("{}", format!("---------- {title} ----------").yellow().bold());
        println!();
    }

    /// Prints a plain message line.
    pub fn message(&mut self, text: &str) {
        println!("{text}");
    }

    /// Prints an error message line.
    pub fn error(&mut self, text: &str) {
        println!("{}", text.red().bold());
    }

    /// Shows the welcome screen with the move-numbering reference.
    pub fn greeting(&mut self) {
        self.clear();
        println!("{}", GREETING.red());
        println!("This is a game of tic-tac-toe between you and the computer.");
        println!("Pick your move by square number:");
        println!();
        println!("        0 | 1 | 2");
        println!("        ---------");
        println!("        3 | 4 | 5");
        println!("        ---------");
        println!("        6 | 7 | 8");
        println!();
        println!("Press Ctrl+D at any prompt to leave.");
        println!();
    }

    /// Shows the goodbye screen.
    pub fn farewell(&mut self) {
        self.clear();
        println!("{}", "Bye!".red().bold());
    }

    /// Presents numbered options and returns the chosen one.
    ///
    /// Reprompts on anything that is not a number between 1 and the
    /// option count; returns `None` on end-of-input.
    pub fn menu<T: Copy + Display>(&mut self, title: &str, options: &[T]) -> Option<T> {
        println!();
        println!("{}", title.yellow().bold());
        for (index, option) in options.iter().enumerate() {
            println!("  {}. {option}", index + 1);
        }
        loop {
            print!("> ");
            let _ = io::stdout().flush();
            let line = self.read_line()?;
            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Some(options[n - 1]),
                _ => self.error(&format!(
                    "Please enter a number between 1 and {}",
                    options.len()
                )),
            }
        }
    }

    /// Prompts for a single line of input, such as a username.
    pub fn prompt(&mut self, label: &str) -> Option<String> {
        print!("{label}: ");
        let _ = io::stdout().flush();
        self.read_line()
    }

    /// Renders the statistics table for a user.
    pub fn show_statistics(&mut self, username: &str, stats: &AggregatedStats) {
        self.clear();
        self.banner("Statistics");
        println!("Game statistics for {username}:");
        println!();
        println!("  Outcome | Count");
        println!("  --------+------");
        println!("  Wins    | {:>5}", stats.wins());
        println!("  Losses  | {:>5}", stats.losses());
        println!("  Draws   | {:>5}", stats.draws());
        println!();
        println!(
            "  {} games played, {:.1}% win rate",
            stats.total_games(),
            stats.win_rate()
        );
    }

    fn square_symbol(square: Square) -> char {
        match square {
            Square::Empty => ' ',
            Square::Taken(Mark::X) => 'X',
            Square::Taken(Mark::O) => 'O',
        }
    }
}

impl MoveSource for Console {
    fn read_move(&mut self, legal: &[usize]) -> Option<usize> {
        loop {
            print!("\nWhat will your move be? (0-8): ");
            let _ = io::stdout().flush();
            let line = self.read_line()?;
            match line.parse::<usize>() {
                Ok(index) if legal.contains(&index) => {
                    debug!(index, "Move accepted");
                    return Some(index);
                }
                Ok(index) if index < Board::SIZE => {
                    self.error("That square is already taken, choose another one");
                }
                _ => self.error("You did not enter a square number, please try again!"),
            }
        }
    }
}

impl GameView for Console {
    fn show_board(&mut self, board: &Board, active_player: &str) {
        self.clear();
        println!("Turn: {}", active_player.yellow());
        println!();
        let s = board.squares();
        for row in 0..3 {
            let a = Self::square_symbol(s[row * 3]);
            let b = Self::square_symbol(s[row * 3 + 1]);
            let c = Self::square_symbol(s[row * 3 + 2]);
            let r = row * 3;
            println!(
                "     {a} | {b} | {c}       {r} | {} | {}",
                r + 1,
                r + 2
            );
            if row < 2 {
                println!("    -----------      ---------");
            }
        }
        println!();
    }

    fn show_outcome(&mut self, outcome: &SessionOutcome) {
        match outcome.winner() {
            Winner::Human => {
                self.banner("You are the winner!");
                self.message("Somehow you managed to win! Enjoy it, it was probably the last time!");
            }
            Winner::Computer => {
                self.banner("Computer wins!");
                self.message("As I thought, there can only be one winner. Once again you are no match for me!");
            }
            Winner::Draw => {
                self.banner("Draw!");
                self.message("You were very lucky, or I had a bad day. You managed to draw!");
            }
        }
    }
}
