//! Win and draw detection for tic-tac-toe.

use super::types::{Board, GameStatus, Mark, Square};

/// The 8 index triples that constitute a win when uniformly occupied:
/// 3 rows, then 3 columns, then 2 diagonals.
///
/// [`evaluate`] scans these in order and reports the first winning line,
/// so the enumeration order is part of the contract.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Evaluates the board into a [`GameStatus`].
///
/// Checks each line in [`WIN_LINES`] order; if all three squares hold the
/// same marker that marker wins. A full board with no winner is a draw;
/// otherwise the game is still in progress.
pub fn evaluate(board: &Board) -> GameStatus {
    for [a, b, c] in WIN_LINES {
        if let Some(Square::Taken(mark)) = board.get(a) {
            if board.get(b) == Some(Square::Taken(mark))
                && board.get(c) == Some(Square::Taken(mark))
            {
                return GameStatus::Won(mark);
            }
        }
    }

    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a board from a 9-character pattern of `X`, `O`, and spaces.
    pub(crate) fn board_from(pattern: &str) -> Board {
        assert_eq!(pattern.chars().count(), 9, "pattern must cover the board");
        let mut board = Board::new();
        for (index, ch) in pattern.chars().enumerate() {
            let mark = match ch {
                'X' => Mark::X,
                'O' => Mark::O,
                ' ' => continue,
                other => panic!("unexpected pattern character: {other:?}"),
            };
            board.place(index, mark).expect("pattern square taken twice");
        }
        board
    }

    #[test]
    fn empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn top_row_wins() {
        let board = board_from("XXX OO   ");
        assert_eq!(evaluate(&board), GameStatus::Won(Mark::X));
    }

    #[test]
    fn column_wins() {
        let board = board_from("XO XO X O");
        assert_eq!(evaluate(&board), GameStatus::Won(Mark::X));
    }

    #[test]
    fn diagonal_wins() {
        let board = board_from("XO OX   X");
        assert_eq!(evaluate(&board), GameStatus::Won(Mark::X));
    }

    #[test]
    fn anti_diagonal_wins_for_o() {
        let board = board_from("XXO O OX ");
        assert_eq!(evaluate(&board), GameStatus::Won(Mark::O));
    }

    #[test]
    fn full_board_without_winner_is_draw() {
        // X O X / O X X / O X O
        let board = board_from("XOXOXXOXO");
        assert_eq!(evaluate(&board), GameStatus::Draw);
    }

    #[test]
    fn one_open_square_without_winner_still_in_progress() {
        // X O X / O X X / O X _
        let board = board_from("XOXOXXOX ");
        assert_eq!(evaluate(&board), GameStatus::InProgress);
    }

    #[test]
    fn evaluation_is_symmetric_under_mark_swap() {
        let boards = ["XXX OO   ", "XO XO X O", "XOXOXXOX ", "XOXOXXOXO", "    X    "];
        for pattern in boards {
            let swapped: String = pattern
                .chars()
                .map(|c| match c {
                    'X' => 'O',
                    'O' => 'X',
                    other => other,
                })
                .collect();
            let expected = match evaluate(&board_from(pattern)) {
                GameStatus::Won(mark) => GameStatus::Won(mark.opponent()),
                status => status,
            };
            assert_eq!(evaluate(&board_from(&swapped)), expected);
        }
    }
}
