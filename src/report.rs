//! Line-oriented rendering of search results.
//!
//! A successful run is written as:
//!
//! ```text
//! Solution found!
//! [[1, 2, 3], [4, 5, 6], [0, 7, 8]] cost: 0 heuristic:0
//! [[1, 2, 3], [4, 5, 6], [7, 0, 8]] cost: 1 heuristic:1
//! [[1, 2, 3], [4, 5, 6], [7, 8, 0]] cost: 2 heuristic:0
//! 2 Moves
//! Nodes expanded: 2
//! Nodes unexpanded: 2
//!
//! ```
//!
//! and every failed run as the single line `No solution found`. The `<n> Moves` line is
//! what [`crate::statistics`] scrapes back out of report files.
use crate::solver::{SearchOutcome, Solution};
use std::io::{self, Write};

/// Line written for every run that ends without reaching the goal.
pub const NO_SOLUTION: &str = "No solution found";

/// Writes every board on the solution path, root first, each with its cost and heuristic.
pub fn print_solution<W: Write>(solution: &Solution, out: &mut W) -> io::Result<()> {
    for step in &solution.path {
        writeln!(out, "{} cost: {} heuristic:{}", step.board, step.cost, step.heuristic)?;
    }
    Ok(())
}

/// Writes the success banner, the path, the move count and the final set sizes.
pub fn report_solution<W: Write>(solution: &Solution, out: &mut W) -> io::Result<()> {
    writeln!(out, "Solution found!")?;
    print_solution(solution, out)?;
    writeln!(out, "{} Moves", solution.moves)?;
    writeln!(out, "Nodes expanded: {}", solution.stats.expanded)?;
    writeln!(out, "Nodes unexpanded: {}", solution.stats.unexpanded)?;
    writeln!(out)
}

/// Writes whichever report fits `outcome`.
pub fn report_outcome<W: Write>(outcome: &SearchOutcome, out: &mut W) -> io::Result<()> {
    match outcome {
        SearchOutcome::Solved(solution) => report_solution(solution, out),
        SearchOutcome::NoSolution { .. } => writeln!(out, "{}", NO_SOLUTION),
    }
}
