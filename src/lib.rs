//! # N-Puzzle Solver Library
//!
//! This library solves the generalized sliding-tile puzzle (the 8-puzzle and its
//! `rows x cols` relatives) by state-space search, with several interchangeable strategies
//! sharing one board model and one search loop.
//!
//! It is used by three binaries:
//! - `solve`: Runs one strategy (or all of them) on a puzzle and writes a report file per
//!   strategy.
//! - `compare_strategies`: Runs every strategy over seeded scrambled boards and prints
//!   move counts and node counts side by side.
//! - `move_stats`: Reads the report files back and compares the move counts.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), its goal layout, move generation and
//!   solvability test.
//! - `heuristics`: Distance estimates used by the informed strategies.
//! - `node`: Search-tree nodes, the arena that owns them and the duplicate lookup.
//! - `frontier`: The open list and the per-strategy frontier policies.
//! - `solver`: The search engine (`Search`), its configuration and outcomes.
//! - `report`: Line-oriented rendering of outcomes.
//! - `utils`: Parsing boards from puzzle descriptions.
//! - `statistics`: Scraping move counts back out of report files.
//! - `error`: Error types.

pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod node;
pub mod report;
pub mod solver;
pub mod statistics;
pub mod utils;

pub use crate::engine::Board;
pub use crate::solver::{Search, SearchConfig, SearchOutcome, Solution, Strategy};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_runs_can_move_across_threads() {
        assert_send_sync::<Board>();
        assert_send_sync::<SearchOutcome>();

        let start = Board::new(vec![vec![1, 2, 3], vec![0, 4, 6], vec![7, 5, 8]]).unwrap();
        let handles: Vec<_> = [Strategy::BreadthFirst, Strategy::AStar]
            .into_iter()
            .map(|strategy| {
                let start = start.clone();
                std::thread::spawn(move || Search::new(start, SearchConfig::default()).run(strategy))
            })
            .collect();
        let moves: Vec<u32> = handles
            .into_iter()
            .map(|h| h.join().unwrap().solution().unwrap().moves)
            .collect();
        assert_eq!(moves, vec![3, 3]);
    }
}
