use anyhow::{Context, Result};
use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::frontier::DepthSemantics;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::report::report_outcome;
use npuzzle_solver::solver::{Search, SearchConfig, SearchOutcome, Strategy, DEFAULT_MAX_COST};
use npuzzle_solver::utils::{parse_board_text, parse_puzzle};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Puzzle solved when neither `--puzzle` nor `--board-file` is given.
const DEFAULT_PUZZLE: &str = "(3, 5) [1 2 3 4 5 0 6 7 8 9 11 12 13 14 10]";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Strategy to run; runs every strategy when omitted
    #[clap(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Puzzle description, e.g. "(3, 3) [3 8 6 5 0 2 7 4 1]"
    #[clap(short, long, conflicts_with = "board_file")]
    puzzle: Option<String>,

    /// Path to a board file (one row per line, or a puzzle description)
    #[clap(short, long)]
    board_file: Option<PathBuf>,

    /// Directory the report files are written to
    #[clap(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Heuristic used by A* and greedy search
    #[clap(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Reproduce the first solver version: diagonal solvability check and
    /// removal-counting depth limits
    #[clap(long)]
    legacy: bool,

    /// How depth-limited and iterative-deepening search measure depth; overrides the
    /// choice made by `--legacy`
    #[clap(long, value_enum)]
    depth_semantics: Option<DepthSemantics>,

    /// Give up once a selected node's path cost exceeds this
    #[clap(long, default_value_t = DEFAULT_MAX_COST)]
    max_cost: u32,

    /// Wall-clock limit per strategy, in milliseconds
    #[clap(long)]
    time_limit_ms: Option<u64>,
}

fn load_board(args: &Args) -> Result<Board> {
    if let Some(path) = &args.board_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read board file {}", path.display()))?;
        return parse_board_text(&content)
            .with_context(|| format!("Invalid board in {}", path.display()));
    }
    let description = args.puzzle.as_deref().unwrap_or(DEFAULT_PUZZLE);
    parse_puzzle(description).with_context(|| format!("Invalid puzzle description {:?}", description))
}

fn build_config(args: &Args) -> SearchConfig {
    let base = if args.legacy {
        SearchConfig::legacy()
    } else {
        SearchConfig::default()
    };
    let mut config = base
        .with_heuristic(args.heuristic)
        .with_max_cost(args.max_cost);
    if let Some(semantics) = args.depth_semantics {
        config = config.with_depth_semantics(semantics);
    }
    match args.time_limit_ms {
        Some(ms) => config.with_time_limit(Duration::from_millis(ms)),
        None => config,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let board = load_board(&args)?;
    let config = build_config(&args);
    let strategies = match args.strategy {
        Some(strategy) => vec![strategy],
        None => Strategy::ALL.to_vec(),
    };

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    println!("Initial board state:\n{}\n", board.to_grid_string());

    for strategy in strategies {
        let started = Instant::now();
        let outcome = Search::new(board.clone(), config.clone()).run(strategy);

        let path = args.output_dir.join(strategy.report_file_name());
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        report_outcome(&outcome, &mut out)
            .and_then(|_| out.flush())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        let duration = started.elapsed().as_millis();
        match &outcome {
            SearchOutcome::Solved(solution) => println!(
                "{:<22} {} moves, {} expanded, {} unexpanded -> {} ({} ms)",
                strategy.name(),
                solution.steps(),
                solution.stats.expanded,
                solution.stats.unexpanded,
                path.display(),
                duration
            ),
            SearchOutcome::NoSolution { reason, .. } => println!(
                "{:<22} no solution ({}) -> {} ({} ms)",
                strategy.name(),
                reason,
                path.display(),
                duration
            ),
        }
    }

    Ok(())
}
