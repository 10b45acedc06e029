//! Heuristic move selection for the computer opponent.

use rand::Rng;
use tracing::{debug, instrument};

use super::error::GameError;
use super::rules::evaluate;
use super::types::{Board, GameStatus, Mark};

/// Chance that the computer ignores strategy and plays a random legal move.
///
/// This models imperfect play; the opponent is intentionally beatable.
pub const RANDOM_MOVE_CHANCE: f64 = 0.15;

/// Fallback preference when no win or block is available: center first,
/// then corners, then edges, each group in ascending index order.
const PREFERRED_SQUARES: [usize; 9] = [4, 0, 2, 6, 8, 1, 3, 5, 7];

/// Computer opponent using a one-ply heuristic with a randomness injection.
///
/// The randomness source is supplied by the caller so tests can force the
/// random override on or off deterministically.
#[derive(Debug)]
pub struct HeuristicOpponent<R> {
    rng: R,
    random_move_chance: f64,
}

impl<R: Rng> HeuristicOpponent<R> {
    /// Creates an opponent with the standard [`RANDOM_MOVE_CHANCE`].
    pub fn new(rng: R) -> Self {
        Self::with_chance(rng, RANDOM_MOVE_CHANCE)
    }

    /// Creates an opponent with an explicit random-move chance in `[0, 1]`.
    pub fn with_chance(rng: R, random_move_chance: f64) -> Self {
        Self {
            rng,
            random_move_chance,
        }
    }

    /// Selects the computer's next move.
    ///
    /// Priority order:
    ///
    /// 1. With probability `random_move_chance`, a uniformly random legal
    ///    move, bypassing all strategy below.
    /// 2. The first legal move (ascending) that wins for the computer.
    /// 3. The first legal move (ascending) that would win for the human.
    /// 4. The first legal square in the fixed center/corners/edges order.
    ///
    /// Every probe runs on a scratch copy; `board` is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoLegalMoves`] if the board is full.
    #[instrument(skip(self, board))]
    pub fn select_move(
        &mut self,
        board: &Board,
        computer: Mark,
        human: Mark,
    ) -> Result<usize, GameError> {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(GameError::NoLegalMoves);
        }

        if self.rng.gen_bool(self.random_move_chance) {
            let index = legal[self.rng.gen_range(0..legal.len())];
            debug!(index, "Random move override");
            return Ok(index);
        }

        if let Some(index) = winning_move(board, computer)? {
            debug!(index, "Winning move found");
            return Ok(index);
        }

        if let Some(index) = winning_move(board, human)? {
            debug!(index, "Blocking human win");
            return Ok(index);
        }

        for index in PREFERRED_SQUARES {
            if board.is_open(index) {
                debug!(index, "Positional fallback");
                return Ok(index);
            }
        }

        // Unreachable: legal was non-empty and PREFERRED_SQUARES covers
        // every index.
        Err(GameError::NoLegalMoves)
    }
}

/// Returns the first legal move (ascending) that completes a line for
/// `mark`, probing on a copy of the board.
fn winning_move(board: &Board, mark: Mark) -> Result<Option<usize>, GameError> {
    for index in board.legal_moves() {
        let mut probe = board.clone();
        probe.place(index, mark)?;
        if evaluate(&probe) == GameStatus::Won(mark) {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::tests::board_from;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn strategic(seed: u64) -> HeuristicOpponent<StdRng> {
        // Chance zero: the random override never fires.
        HeuristicOpponent::with_chance(StdRng::seed_from_u64(seed), 0.0)
    }

    #[test]
    fn empty_board_takes_center() {
        let board = Board::new();
        let mut opponent = strategic(7);
        let index = opponent
            .select_move(&board, Mark::O, Mark::X)
            .expect("moves remain");
        assert_eq!(index, 4);
    }

    #[test]
    fn center_taken_falls_back_to_first_corner() {
        let board = board_from("    X    ");
        let mut opponent = strategic(7);
        let index = opponent
            .select_move(&board, Mark::O, Mark::X)
            .expect("moves remain");
        assert_eq!(index, 0);
    }

    #[test]
    fn blocks_immediate_human_win() {
        // X threatens the top row at index 2.
        let board = board_from("XX  O    ");
        let mut opponent = strategic(7);
        let index = opponent
            .select_move(&board, Mark::O, Mark::X)
            .expect("moves remain");
        assert_eq!(index, 2);
    }

    #[test]
    fn prefers_own_win_over_block() {
        // O can win at 5; X threatens at 2. Winning takes priority.
        let board = board_from("XX OO    ");
        let mut opponent = strategic(7);
        let index = opponent
            .select_move(&board, Mark::O, Mark::X)
            .expect("moves remain");
        assert_eq!(index, 5);
    }

    #[test]
    fn random_override_picks_a_legal_move() {
        let board = board_from("XO X O  X");
        let legal = board.legal_moves();
        // Chance one: every call takes the random branch.
        let mut opponent = HeuristicOpponent::with_chance(StdRng::seed_from_u64(0), 1.0);
        for _ in 0..50 {
            let index = opponent
                .select_move(&board, Mark::O, Mark::X)
                .expect("moves remain");
            assert!(legal.contains(&index), "{index} is not a legal move");
        }
    }

    #[test]
    fn never_mutates_the_board() {
        let board = board_from("XX  O O  ");
        let snapshot = board.clone();
        let mut opponent = strategic(3);
        opponent
            .select_move(&board, Mark::O, Mark::X)
            .expect("moves remain");
        assert_eq!(board, snapshot);
    }

    #[test]
    fn full_board_is_an_error() {
        let board = board_from("XOXOXXOXO");
        let mut opponent = strategic(7);
        assert_eq!(
            opponent.select_move(&board, Mark::O, Mark::X),
            Err(GameError::NoLegalMoves)
        );
    }
}
