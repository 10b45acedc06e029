//! Game engine error types.

use derive_more::{Display, Error};

/// Errors produced by the game engine.
///
/// These mark contract violations between components. The session always
/// filters human input through [`Board::legal_moves`](crate::Board::legal_moves)
/// first, so none of them should ever surface to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Attempted placement on an occupied or out-of-range square.
    #[display("illegal move: square {index} is not open")]
    IllegalMove {
        /// The offending square index.
        index: usize,
    },
    /// The opponent policy was asked to move on a full board.
    #[display("no legal moves remain on the board")]
    NoLegalMoves,
}
