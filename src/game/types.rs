//! Core board types for tic-tac-toe.

use serde::{Deserialize, Serialize};

use crate::game::GameError;

/// Marker a player places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The X marker (held by whoever moves first).
    X,
    /// The O marker.
    O,
}

impl Mark {
    /// Returns the opposing marker.
    ///
    /// Turn alternation is just repeated application of this toggle;
    /// it is its own inverse.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A single square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// No marker placed yet.
    Empty,
    /// Square taken by the given marker.
    Taken(Mark),
}

/// 3x3 tic-tac-toe board.
///
/// Squares are stored in row-major order:
///
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
///
/// The only mutation is [`Board::place`], which requires the target
/// square to be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Number of squares on the board.
    pub const SIZE: usize = 9;

    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given index, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks whether the square at `index` is empty.
    ///
    /// Out-of-range indices are not empty.
    pub fn is_open(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns the indices of all empty squares, in ascending order.
    ///
    /// An empty result means the board is full.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Checks whether every square is taken.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|square| *square != Square::Empty)
    }

    /// Places `mark` on the square at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalMove`] if the index is out of range or
    /// the square is already taken.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        if !self.is_open(index) {
            return Err(GameError::IllegalMove { index });
        }
        self.squares[index] = Square::Taken(mark);
        Ok(())
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Status of a board, derived from its squares.
///
/// Recomputed on every query via [`evaluate`](crate::game::evaluate);
/// never cached across turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// The game is still going.
    InProgress,
    /// The holder of the given marker has three in a row.
    Won(Mark),
    /// The board is full with no winner.
    Draw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_has_nine_legal_moves() {
        let board = Board::new();
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(!board.is_full());
    }

    #[test]
    fn place_fills_a_square() {
        let mut board = Board::new();
        board.place(4, Mark::X).expect("center should be open");
        assert_eq!(board.get(4), Some(Square::Taken(Mark::X)));
        assert!(!board.is_open(4));
    }

    #[test]
    fn place_on_taken_square_fails() {
        let mut board = Board::new();
        board.place(0, Mark::X).expect("corner should be open");
        let result = board.place(0, Mark::O);
        assert_eq!(result, Err(GameError::IllegalMove { index: 0 }));
        // Losing move must not overwrite the square.
        assert_eq!(board.get(0), Some(Square::Taken(Mark::X)));
    }

    #[test]
    fn place_out_of_range_fails() {
        let mut board = Board::new();
        assert_eq!(
            board.place(9, Mark::X),
            Err(GameError::IllegalMove { index: 9 })
        );
    }

    #[test]
    fn legal_moves_plus_taken_is_nine() {
        let mut board = Board::new();
        let mut mark = Mark::X;
        for (played, index) in [4, 0, 8, 2, 6].into_iter().enumerate() {
            board.place(index, mark).expect("square should be open");
            mark = mark.opponent();
            let taken = board
                .squares()
                .iter()
                .filter(|s| **s != Square::Empty)
                .count();
            assert_eq!(board.legal_moves().len() + taken, Board::SIZE);
            assert_eq!(taken, played + 1);
        }
    }

    #[test]
    fn legal_moves_ascending() {
        let mut board = Board::new();
        board.place(5, Mark::X).expect("open");
        board.place(1, Mark::O).expect("open");
        assert_eq!(board.legal_moves(), vec![0, 2, 3, 4, 6, 7, 8]);
    }

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Mark::X.opponent().opponent(), Mark::X);
        assert_eq!(Mark::O.opponent().opponent(), Mark::O);
    }
}
