//! Board model for the sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `GoalLayout`: The solved arrangement for a given `rows x cols` shape, computed once
//!   and shared by every board of that puzzle.
//! - `Board`: One configuration of tiles, including the blank (`0`). Boards are values:
//!   every move produces a new `Board` and the original is never touched.
//! - `Direction`: Which neighbour of the blank slides into it.
//! - `SolvabilityCheck`: Selects between the full parity test and the legacy diagonal check.
use crate::error::BoardError;
use crate::heuristics;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The value that marks the empty cell.
pub const BLANK: u32 = 0;

/// The canonical solved arrangement for one board shape.
///
/// Value `(i + 1) mod (rows * cols)` sits at row-major index `i`, so tiles run
/// `1, 2, 3, ...` and the blank ends up in the bottom-right corner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GoalLayout {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl GoalLayout {
    /// Builds the goal layout for a `rows x cols` board.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::GoalLayout;
    /// let goal = GoalLayout::new(2, 3);
    /// assert_eq!(goal.cells(), &[1, 2, 3, 4, 5, 0]);
    /// ```
    pub fn new(rows: usize, cols: usize) -> Self {
        let k = rows * cols;
        let cells = (0..k).map(|i| ((i + 1) % k) as u32).collect();
        GoalLayout { rows, cols, cells }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major goal cells.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Returns the `(row, col)` where `value` belongs in the solved puzzle.
    ///
    /// Tile `v` belongs at `((v - 1) / cols, (v - 1) % cols)`; the blank belongs in
    /// the last cell.
    pub fn goal_position(&self, value: u32) -> (usize, usize) {
        if value == BLANK {
            return (self.rows - 1, self.cols - 1);
        }
        let idx = value as usize - 1;
        (idx / self.cols, idx % self.cols)
    }
}

/// Side of the blank on which the sliding tile sits.
///
/// `Board::possible_moves` emits successors in the order of the variants below, which is
/// the row-major order of the tile that moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    West,
    East,
    South,
}

impl Direction {
    /// All directions in emission order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::East,
        Direction::South,
    ];

    /// Row and column offset from the blank to the tile that moves.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "North",
            Direction::West => "West",
            Direction::East => "East",
            Direction::South => "South",
        };
        write!(f, "{}", s)
    }
}

/// How `Board::is_solvable_with` decides whether the goal is reachable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolvabilityCheck {
    /// Full permutation parity over the non-blank tiles, adjusted by the blank's row
    /// on even-width boards. Exact for every board of at least 2x2.
    #[default]
    Inversions,
    /// The check the first version of the solver shipped with: compares each cell above
    /// the main diagonal with its mirror below it and tests the count for evenness.
    /// Kept for reproducing old reports; it is not a correct test in general.
    LegacyDiagonal,
}

/// One configuration of the puzzle.
///
/// Cells are stored row-major. Equality and hashing only look at the dimensions and the
/// cell values, so two boards built from separately allocated layouts still compare equal.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<u32>,
    layout: Arc<GoalLayout>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.rows() == other.rows() && self.cols() == other.cols() && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows().hash(state);
        self.cols().hash(state);
        self.cells.hash(state);
    }
}

impl Board {
    /// Creates a board from a grid of rows, validating it eagerly.
    ///
    /// # Arguments
    /// * `grid`: Rows of tile values; `0` is the blank.
    ///
    /// # Returns
    /// * `Ok(Board)` when the grid is rectangular, at least 2x2, and holds every value in
    ///   `0..rows*cols` exactly once.
    /// * `Err(BoardError)` describing the first problem found otherwise.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 0]]).unwrap();
    /// assert!(board.is_goal());
    /// assert!(Board::new(vec![vec![1, 1], vec![2, 0]]).is_err());
    /// ```
    pub fn new(grid: Vec<Vec<u32>>) -> Result<Self, BoardError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(BoardError::Empty);
        }
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != cols {
                return Err(BoardError::Ragged {
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
        }
        let cells: Vec<u32> = grid.into_iter().flatten().collect();
        Board::with_goal(cells, Arc::new(GoalLayout::new(rows, cols)))
    }

    /// Creates a board that shares an existing goal layout.
    ///
    /// `cells` is row-major and must have exactly `layout.rows() * layout.cols()` entries.
    pub fn with_goal(cells: Vec<u32>, layout: Arc<GoalLayout>) -> Result<Self, BoardError> {
        let (rows, cols) = (layout.rows(), layout.cols());
        validate_cells(rows, cols, &cells)?;
        Ok(Board { cells, layout })
    }

    /// Returns the solved board for the given shape.
    ///
    /// # Panics
    /// Panics if `rows` or `cols` is less than 2, the same shapes `Board::new` rejects.
    pub fn goal(rows: usize, cols: usize) -> Self {
        assert!(
            rows >= 2 && cols >= 2,
            "board must be at least 2x2, got {}x{}",
            rows,
            cols
        );
        let layout = Arc::new(GoalLayout::new(rows, cols));
        Board {
            cells: layout.cells().to_vec(),
            layout,
        }
    }

    /// Produces a reproducible scrambled board by walking `steps` random moves away from
    /// the goal.
    ///
    /// The walk never immediately undoes its previous move. Because it only ever applies
    /// legal moves, the result is always solvable.
    ///
    /// # Arguments
    /// * `rows`, `cols`: Board shape.
    /// * `steps`: Number of random moves to apply.
    /// * `seed`: Seed for the random number generator; equal seeds give equal boards.
    ///
    /// # Panics
    /// Panics on shapes smaller than 2x2, like [`Board::goal`].
    pub fn scrambled(rows: usize, cols: usize, steps: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::goal(rows, cols);
        let mut previous_blank: Option<usize> = None;

        for _ in 0..steps {
            let blank = board.blank_index();
            let candidates: Vec<Board> = board
                .possible_moves()
                .into_iter()
                .filter(|next| Some(next.blank_index()) != previous_blank)
                .collect();
            match candidates.choose(&mut rng) {
                Some(next) => {
                    previous_blank = Some(blank);
                    board = next.clone();
                }
                None => break,
            }
        }
        board
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.layout.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.layout.cols()
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Goal layout shared by every board of this puzzle.
    pub fn layout(&self) -> &Arc<GoalLayout> {
        &self.layout
    }

    /// Returns the value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board.
    pub fn get(&self, r: usize, c: usize) -> u32 {
        assert!(r < self.rows() && c < self.cols(), "({}, {}) is off the board", r, c);
        self.cells[r * self.cols() + c]
    }

    /// Returns the grid as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.cols()).map(<[u32]>::to_vec).collect()
    }

    fn blank_index(&self) -> usize {
        // Construction guarantees exactly one blank.
        self.cells.iter().position(|&v| v == BLANK).unwrap_or(0)
    }

    /// Returns the `(row, col)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        let idx = self.blank_index();
        (idx / self.cols(), idx % self.cols())
    }

    /// True iff every cell matches the goal layout.
    pub fn is_goal(&self) -> bool {
        self.cells == self.layout.cells()
    }

    /// True iff the goal can be reached from this board (full parity test).
    pub fn is_solvable(&self) -> bool {
        self.is_solvable_with(SolvabilityCheck::Inversions)
    }

    /// Tests solvability with the chosen check.
    ///
    /// With `SolvabilityCheck::Inversions`, inversions are counted over the non-blank tiles
    /// in row-major order. On boards with an odd number of columns the puzzle is solvable
    /// iff that count is even; with an even number of columns the blank's distance (in
    /// rows) from the bottom row is added first.
    pub fn is_solvable_with(&self, check: SolvabilityCheck) -> bool {
        match check {
            SolvabilityCheck::Inversions => {
                let tiles: Vec<u32> = self.cells.iter().copied().filter(|&v| v != BLANK).collect();
                let mut inversions = 0usize;
                for (i, &a) in tiles.iter().enumerate() {
                    inversions += tiles[i + 1..].iter().filter(|&&b| a > b).count();
                }
                if self.cols() % 2 == 1 {
                    inversions % 2 == 0
                } else {
                    let (blank_row, _) = self.blank_position();
                    (inversions + (self.rows() - 1 - blank_row)) % 2 == 0
                }
            }
            SolvabilityCheck::LegacyDiagonal => {
                let mut inversions = 0usize;
                for i in 0..self.rows().saturating_sub(1) {
                    // Mirrored cells below the diagonal only exist for j < rows.
                    for j in (i + 1)..self.cols().min(self.rows()) {
                        let below = self.get(j, i);
                        if below > 0 && below > self.get(i, j) {
                            inversions += 1;
                        }
                    }
                }
                inversions % 2 == 0
            }
        }
    }

    /// Sum of Manhattan distances of misplaced tiles. See [`heuristics::manhattan_distance`].
    pub fn manhattan_heuristic(&self) -> u32 {
        heuristics::manhattan_distance(self)
    }

    /// Number of cells (blank included) that differ from the goal.
    /// See [`heuristics::misplaced_tiles`].
    pub fn misplaced_tiles_heuristic(&self) -> u32 {
        heuristics::misplaced_tiles(self)
    }

    /// Returns a copy of this board with the cells at `a` and `b` exchanged.
    fn swapped(&self, a: usize, b: usize) -> Board {
        let mut cells = self.cells.clone();
        cells.swap(a, b);
        Board {
            cells,
            layout: Arc::clone(&self.layout),
        }
    }

    /// Lists every board reachable in one move, tagged with the side the tile came from.
    ///
    /// Successors are emitted North, West, East, South; directions that would leave the
    /// board are skipped, so a corner blank yields two successors and an interior blank four.
    pub fn successors(&self) -> Vec<(Direction, Board)> {
        let (br, bc) = self.blank_position();
        let blank = self.blank_index();
        let rows = self.rows() as isize;
        let cols = self.cols() as isize;

        Direction::ALL
            .iter()
            .filter_map(|&dir| {
                let (dr, dc) = dir.offset();
                let nr = br as isize + dr;
                let nc = bc as isize + dc;
                if nr >= 0 && nr < rows && nc >= 0 && nc < cols {
                    let tile = (nr * cols + nc) as usize;
                    Some((dir, self.swapped(blank, tile)))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Lists every board reachable in one move, in the order of [`Board::successors`].
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::new(vec![vec![1, 2, 3], vec![4, 0, 5], vec![7, 8, 6]]).unwrap();
    /// assert_eq!(board.possible_moves().len(), 4);
    /// let corner = Board::goal(3, 3);
    /// assert_eq!(corner.possible_moves().len(), 2);
    /// ```
    pub fn possible_moves(&self) -> Vec<Board> {
        self.successors().into_iter().map(|(_, board)| board).collect()
    }

    /// Renders the board as aligned rows, with the blank shown as `.`.
    pub fn to_grid_string(&self) -> String {
        let width = (self.cells.len().saturating_sub(1)).to_string().len();
        let mut output = String::new();
        for (r, row) in self.cells.chunks(self.cols()).enumerate() {
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == BLANK {
                        format!("{:>width$}", ".", width = width)
                    } else {
                        format!("{:>width$}", v, width = width)
                    }
                })
                .collect();
            output.push_str(&line.join(" "));
            if r + 1 < self.rows() {
                output.push('\n');
            }
        }
        output
    }
}

/// Renders the board as nested lists, e.g. `[[1, 2, 3], [4, 5, 6], [7, 8, 0]]`.
/// Every report line starts with this form.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.cells.chunks(self.cols()).enumerate() {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (c, v) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

fn validate_cells(rows: usize, cols: usize, cells: &[u32]) -> Result<(), BoardError> {
    if rows == 0 || cols == 0 || cells.is_empty() {
        return Err(BoardError::Empty);
    }
    if rows < 2 || cols < 2 {
        return Err(BoardError::TooSmall { rows, cols });
    }
    if cells.len() != rows * cols {
        return Err(BoardError::CellCount {
            expected: rows * cols,
            found: cells.len(),
        });
    }
    let mut seen = vec![false; rows * cols];
    for &value in cells {
        let idx = value as usize;
        if idx >= seen.len() {
            return Err(BoardError::ValueOutOfRange { value, rows, cols });
        }
        if seen[idx] {
            return Err(BoardError::DuplicateValue(value));
        }
        seen[idx] = true;
    }
    Ok(())
}
