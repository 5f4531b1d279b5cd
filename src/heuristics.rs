use crate::engine::{Board, BLANK};

/// Estimates of the remaining distance to the goal, used by the informed strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Heuristic {
    /// Sum of Manhattan distances of the tiles from their goal cells. Admissible.
    #[default]
    Manhattan,
    /// Number of cells that differ from the goal, blank included.
    MisplacedTiles,
}

impl Heuristic {
    /// Evaluates this heuristic on `board`.
    pub fn evaluate(self, board: &Board) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan_distance(board),
            Heuristic::MisplacedTiles => misplaced_tiles(board),
        }
    }
}

/// Calculates the Manhattan distance of the board from its goal.
///
/// For every non-blank tile that is not already in its goal cell, the horizontal plus
/// vertical distance between its current cell and its goal cell is added. The goal cell
/// of tile `v` is `((v - 1) / cols, (v - 1) % cols)`.
///
/// # Arguments
/// * `board`: A reference to the `Board` to analyze.
///
/// # Returns
/// The total distance as `u32`; `0` exactly when the board is solved.
pub fn manhattan_distance(board: &Board) -> u32 {
    let layout = board.layout();
    let cols = board.cols();
    let mut distance = 0;

    for (idx, (&value, &goal)) in board.cells().iter().zip(layout.cells()).enumerate() {
        if value != BLANK && value != goal {
            let (goal_r, goal_c) = layout.goal_position(value);
            let (r, c) = (idx / cols, idx % cols);
            distance += (r.abs_diff(goal_r) + c.abs_diff(goal_c)) as u32;
        }
    }

    distance
}

/// Counts the cells whose value differs from the goal.
///
/// The blank is counted like any other cell, so a board one move away from the goal
/// scores `2`.
pub fn misplaced_tiles(board: &Board) -> u32 {
    board
        .cells()
        .iter()
        .zip(board.layout().cells())
        .filter(|(value, goal)| value != goal)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(grid: &[&[u32]]) -> Board {
        Board::new(grid.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_manhattan_on_goal_is_zero() {
        assert_eq!(manhattan_distance(&Board::goal(3, 3)), 0);
        assert_eq!(manhattan_distance(&Board::goal(3, 5)), 0);
    }

    #[test]
    fn test_manhattan_classic_start() {
        // 8, 7, 2 and 1 are three cells from home, the other four tiles one cell.
        let b = board(&[&[8, 7, 6], &[5, 4, 3], &[2, 1, 0]]);
        assert_eq!(manhattan_distance(&b), 16);
    }

    #[test]
    fn test_manhattan_uses_columns_on_wide_boards() {
        // 6 belongs at (1, 0), 10 at (1, 4), 11..14 at (2, 0..3).
        let b = board(&[&[1, 2, 3, 4, 5], &[0, 6, 7, 8, 9], &[11, 12, 13, 14, 10]]);
        // 6..9 are each one cell right of home, 10 is one row below its goal.
        assert_eq!(manhattan_distance(&b), 5);
    }

    #[test]
    fn test_misplaced_tiles_counts_blank() {
        let b = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
        assert_eq!(misplaced_tiles(&b), 2);
        assert_eq!(manhattan_distance(&b), 1);
        let hard = board(&[&[8, 7, 6], &[5, 4, 3], &[2, 1, 0]]);
        assert_eq!(misplaced_tiles(&hard), 8);
    }

    #[test]
    fn test_heuristic_selector() {
        let b = board(&[&[1, 2, 3], &[4, 5, 6], &[0, 7, 8]]);
        assert_eq!(Heuristic::Manhattan.evaluate(&b), 2);
        assert_eq!(Heuristic::MisplacedTiles.evaluate(&b), 3);
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);
    }
}
