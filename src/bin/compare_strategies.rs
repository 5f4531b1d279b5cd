use anyhow::{ensure, Result};
use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{Search, SearchConfig, SearchOutcome, Strategy};
use std::collections::HashMap;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Runs every strategy over seeded scrambled boards", long_about = None)]
struct Args {
    /// Number of boards to evaluate
    #[clap(short, long, default_value_t = 10)]
    boards: usize,

    /// Seed of the first board; board `i` uses `seed + i`
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Random moves applied to the goal to build each board
    #[clap(long, default_value_t = 12)]
    scramble: usize,

    #[clap(long, default_value_t = 3)]
    rows: usize,

    #[clap(long, default_value_t = 3)]
    cols: usize,

    /// Heuristic used by A* and greedy search
    #[clap(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Wall-clock limit per run, in milliseconds
    #[clap(long, default_value_t = 10_000)]
    time_limit_ms: u64,
}

#[derive(Default)]
struct Tally {
    solved: usize,
    steps: usize,
    expanded: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    ensure!(
        args.rows >= 2 && args.cols >= 2,
        "boards must be at least 2x2, got {}x{}",
        args.rows,
        args.cols
    );

    let config = SearchConfig::default()
        .with_heuristic(args.heuristic)
        .with_time_limit(Duration::from_millis(args.time_limit_ms));
    let mut tallies: HashMap<Strategy, Tally> = HashMap::new();

    println!(
        "Comparing {} strategies on {} boards ({}x{}, {} scramble moves)...",
        Strategy::ALL.len(),
        args.boards,
        args.rows,
        args.cols,
        args.scramble
    );

    for board_idx in 0..args.boards {
        let seed = args.seed + board_idx as u64;
        let board = Board::scrambled(args.rows, args.cols, args.scramble, seed);
        println!("\nBoard {} (Seed: {}) {}", board_idx, seed, board);

        for strategy in Strategy::ALL {
            let outcome = Search::new(board.clone(), config.clone()).run(strategy);
            let tally = tallies.entry(strategy).or_default();
            match &outcome {
                SearchOutcome::Solved(solution) => {
                    tally.solved += 1;
                    tally.steps += solution.steps();
                    tally.expanded += solution.stats.total_expanded;
                    println!(
                        "  Strategy: {:<22} Steps: {:<4} Expanded: {}",
                        strategy.name(),
                        solution.steps(),
                        solution.stats.total_expanded
                    );
                }
                SearchOutcome::NoSolution { reason, stats } => println!(
                    "  Strategy: {:<22} No solution ({}) after {} expansions",
                    strategy.name(),
                    reason,
                    stats.total_expanded
                ),
            }
        }
    }

    println!("\n--- Comparison Complete ---");
    for strategy in Strategy::ALL {
        let Some(tally) = tallies.get(&strategy) else {
            continue;
        };
        if tally.solved == 0 {
            println!("{:<22} solved 0/{}", strategy.name(), args.boards);
            continue;
        }
        println!(
            "{:<22} solved {}/{}, average steps {:.2}, average expanded {:.1}",
            strategy.name(),
            tally.solved,
            args.boards,
            tally.steps as f64 / tally.solved as f64,
            tally.expanded as f64 / tally.solved as f64
        );
    }

    Ok(())
}
