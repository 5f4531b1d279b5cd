//! The search engine shared by every strategy.
//!
//! A [`Search`] owns the open and closed sets for one run. Each iteration asks the active
//! [`FrontierPolicy`] for the next node, tests it against the goal and the policy's bound,
//! and admits every successor whose board is not already open or closed.
use crate::engine::{Board, SolvabilityCheck};
use crate::frontier::{
    AStar, Advance, BreadthFirst, DepthFirst, DepthLimited, DepthSemantics, Exhausted,
    FrontierPolicy, Greedy, IterativeDeepening, OpenList, UniformCost,
};
use crate::heuristics::Heuristic;
use crate::node::{Node, NodeArena, NodeId};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Default ceiling on path cost (and on greedy removals).
pub const DEFAULT_MAX_COST: u32 = 100;
/// Default depth limit for depth-limited and iterative-deepening search.
pub const DEFAULT_DEPTH_LIMIT: u32 = 10;
/// Default amount by which iterative deepening raises its limit.
pub const DEFAULT_DEEPENING_STEP: u32 = 5;

/// Tunables for a search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_cost: u32,
    pub depth_limit: u32,
    pub deepening_step: u32,
    pub heuristic: Heuristic,
    pub solvability: SolvabilityCheck,
    pub depth_semantics: DepthSemantics,
    /// Wall-clock budget; `None` runs until a bound or the goal is hit.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_cost: DEFAULT_MAX_COST,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            deepening_step: DEFAULT_DEEPENING_STEP,
            heuristic: Heuristic::default(),
            solvability: SolvabilityCheck::default(),
            depth_semantics: DepthSemantics::default(),
            time_limit: None,
        }
    }
}

impl SearchConfig {
    /// Settings that reproduce the first version of the solver: the diagonal solvability
    /// check and removal-counting depth bounds.
    pub fn legacy() -> Self {
        SearchConfig {
            solvability: SolvabilityCheck::LegacyDiagonal,
            depth_semantics: DepthSemantics::RemovalCount,
            ..SearchConfig::default()
        }
    }

    pub fn with_max_cost(mut self, max_cost: u32) -> Self {
        self.max_cost = max_cost;
        self
    }

    pub fn with_depth_limit(mut self, limit: u32, step: u32) -> Self {
        self.depth_limit = limit;
        self.deepening_step = step;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_solvability(mut self, check: SolvabilityCheck) -> Self {
        self.solvability = check;
        self
    }

    pub fn with_depth_semantics(mut self, semantics: DepthSemantics) -> Self {
        self.depth_semantics = semantics;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// The available search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    #[value(alias = "bfs")]
    BreadthFirst,
    #[value(alias = "dfs")]
    DepthFirst,
    #[value(alias = "dls")]
    DepthLimited,
    #[value(alias = "iddfs")]
    IterativeDeepening,
    #[value(alias = "ucs", alias = "dijkstra")]
    UniformCost,
    #[value(alias = "astar")]
    AStar,
    Greedy,
}

impl Strategy {
    /// Every strategy, in the order reports and comparisons list them.
    pub const ALL: [Strategy; 7] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::DepthLimited,
        Strategy::Greedy,
        Strategy::UniformCost,
        Strategy::AStar,
        Strategy::IterativeDeepening,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "Breadth First Search",
            Strategy::DepthFirst => "Depth First Search",
            Strategy::DepthLimited => "Depth Limited Search",
            Strategy::IterativeDeepening => "Iterative Deepening",
            Strategy::UniformCost => "Uniform Cost Search",
            Strategy::AStar => "A* Search",
            Strategy::Greedy => "Greedy Search",
        }
    }

    /// File the `solve` binary writes this strategy's report to.
    pub fn report_file_name(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "outputBFS.txt",
            Strategy::DepthFirst => "outputDFS.txt",
            Strategy::DepthLimited => "outputDepthLimited.txt",
            Strategy::IterativeDeepening => "outputIterativeDeepening.txt",
            Strategy::UniformCost => "outputUniCost.txt",
            Strategy::AStar => "outputAstar.txt",
            Strategy::Greedy => "outputGreedy.txt",
        }
    }

    /// Builds the frontier policy for this strategy.
    pub fn policy(self, config: &SearchConfig) -> Box<dyn FrontierPolicy> {
        match self {
            Strategy::BreadthFirst => Box::new(BreadthFirst::new(config.max_cost)),
            Strategy::DepthFirst => Box::new(DepthFirst::new(config.max_cost)),
            Strategy::DepthLimited => Box::new(DepthLimited::new(
                config.depth_limit,
                config.max_cost,
                config.depth_semantics,
            )),
            Strategy::IterativeDeepening => Box::new(IterativeDeepening::new(
                config.depth_limit,
                config.deepening_step,
                config.max_cost,
                config.depth_semantics,
            )),
            Strategy::UniformCost => Box::new(UniformCost::new(config.max_cost)),
            Strategy::AStar => Box::new(AStar::new(config.heuristic, config.max_cost)),
            Strategy::Greedy => Box::new(Greedy::new(config.heuristic, config.max_cost)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Counters describing a finished run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Size of the closed set when the run ended.
    pub expanded: usize,
    /// Size of the open set when the run ended.
    pub unexpanded: usize,
    /// Nodes created over the whole run, roots included.
    pub generated: usize,
    /// Nodes closed over the whole run, across iterative-deepening restarts.
    pub total_expanded: usize,
    pub elapsed: Duration,
}

/// One board on the solution path with the values its node carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    pub board: Board,
    pub cost: u32,
    pub heuristic: u32,
}

/// A path from the initial board to the goal.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Root first, goal last.
    pub path: Vec<PathStep>,
    /// Path cost recorded on the goal node. Greedy search records `0` here since its
    /// nodes do not accumulate cost; use [`Solution::steps`] for the actual path length.
    pub moves: u32,
    pub stats: SearchStats,
}

impl Solution {
    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn goal(&self) -> Option<&Board> {
        self.path.last().map(|step| &step.board)
    }
}

/// Why a run ended without reaching the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoSolutionReason {
    /// The solvability check rejected the initial board; nothing was expanded.
    Unsolvable,
    /// Every reachable board was expanded.
    Exhausted,
    /// The open set ran dry but some nodes were cut off at the depth limit.
    DepthLimitReached,
    /// The policy's cost, depth or removal bound was hit.
    BoundExceeded,
    /// The configured time limit ran out.
    DeadlineExpired,
}

impl fmt::Display for NoSolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoSolutionReason::Unsolvable => "initial board is not solvable",
            NoSolutionReason::Exhausted => "search space exhausted",
            NoSolutionReason::DepthLimitReached => "depth limit reached",
            NoSolutionReason::BoundExceeded => "search bound exceeded",
            NoSolutionReason::DeadlineExpired => "time limit expired",
        };
        write!(f, "{}", s)
    }
}

/// Result of a search run.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Solved(Solution),
    NoSolution {
        reason: NoSolutionReason,
        stats: SearchStats,
    },
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::NoSolution { .. } => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved(solution) => &solution.stats,
            SearchOutcome::NoSolution { stats, .. } => stats,
        }
    }

    pub fn no_solution_reason(&self) -> Option<NoSolutionReason> {
        match self {
            SearchOutcome::Solved(_) => None,
            SearchOutcome::NoSolution { reason, .. } => Some(*reason),
        }
    }
}

/// One search run over a single initial board.
///
/// A `Search` is consumed by whichever entry point runs it.
#[derive(Debug)]
pub struct Search {
    initial: Board,
    config: SearchConfig,
    arena: NodeArena,
    open: OpenList,
    closed: Vec<NodeId>,
    visited: HashMap<Board, NodeId>,
    generated: usize,
    total_expanded: usize,
}

impl Search {
    pub fn new(initial: Board, config: SearchConfig) -> Self {
        Search {
            initial,
            config,
            arena: NodeArena::new(),
            open: OpenList::new(),
            closed: Vec::new(),
            visited: HashMap::new(),
            generated: 0,
            total_expanded: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs `strategy` with the policy built from this search's configuration.
    pub fn run(self, strategy: Strategy) -> SearchOutcome {
        let mut policy = strategy.policy(&self.config);
        self.run_with(policy.as_mut())
    }

    /// Runs the search loop with a caller-supplied policy.
    pub fn run_with(mut self, policy: &mut dyn FrontierPolicy) -> SearchOutcome {
        self.execute(policy)
    }

    pub fn breadth_first(self) -> SearchOutcome {
        self.run(Strategy::BreadthFirst)
    }

    pub fn depth_first(self) -> SearchOutcome {
        self.run(Strategy::DepthFirst)
    }

    pub fn depth_limited(self) -> SearchOutcome {
        self.run(Strategy::DepthLimited)
    }

    pub fn iterative_deepening(self) -> SearchOutcome {
        self.run(Strategy::IterativeDeepening)
    }

    pub fn uniform_cost(self) -> SearchOutcome {
        self.run(Strategy::UniformCost)
    }

    pub fn a_star(self) -> SearchOutcome {
        self.run(Strategy::AStar)
    }

    pub fn greedy(self) -> SearchOutcome {
        self.run(Strategy::Greedy)
    }

    fn execute(&mut self, policy: &mut dyn FrontierPolicy) -> SearchOutcome {
        let started = Instant::now();
        let deadline = self.config.time_limit.map(|limit| started + limit);
        info!(
            strategy = policy.name(),
            rows = self.initial.rows(),
            cols = self.initial.cols(),
            "starting search"
        );

        if !self.initial.is_solvable_with(self.config.solvability) {
            info!(strategy = policy.name(), "initial board is not solvable");
            return self.no_solution(NoSolutionReason::Unsolvable, started);
        }

        self.seed_root(policy);
        let mut cutoff = false;

        loop {
            if self.open.is_empty() {
                match policy.on_exhausted(cutoff) {
                    Exhausted::Finish => {
                        let reason = if cutoff {
                            NoSolutionReason::DepthLimitReached
                        } else {
                            NoSolutionReason::Exhausted
                        };
                        return self.no_solution(reason, started);
                    }
                    Exhausted::BoundExceeded => {
                        return self.no_solution(NoSolutionReason::BoundExceeded, started);
                    }
                    Exhausted::Restart => {
                        debug!(
                            strategy = policy.name(),
                            expanded = self.closed.len(),
                            "round exhausted with cutoff, restarting from the root"
                        );
                        self.reset();
                        self.seed_root(policy);
                        cutoff = false;
                        continue;
                    }
                }
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return self.no_solution(NoSolutionReason::DeadlineExpired, started);
            }

            match policy.advance(&mut self.open) {
                Advance::Select => {}
                Advance::Skip => continue,
                Advance::Stop => return self.no_solution(NoSolutionReason::BoundExceeded, started),
            }

            let Some(id) = policy.select(&mut self.open) else {
                // Only unranked entries remain, which a minimum-selecting policy never picks.
                return self.no_solution(NoSolutionReason::Exhausted, started);
            };
            let node = self.arena.get(id);

            if node.board().is_goal() {
                return self.solved(id, started);
            }
            if policy.exceeds_bound(node) {
                return self.no_solution(NoSolutionReason::BoundExceeded, started);
            }

            self.closed.push(id);
            self.total_expanded += 1;

            if !policy.should_expand(node) {
                cutoff = true;
                continue;
            }

            trace!(cost = node.cost(), heuristic = node.heuristic(), board = %node.board(), "expanding");

            let children: Vec<(Board, u32, u32)> = node
                .board()
                .possible_moves()
                .into_iter()
                .filter(|successor| !self.visited.contains_key(successor))
                .map(|successor| {
                    let (cost, heuristic) = policy.child_params(node, &successor);
                    (successor, cost, heuristic)
                })
                .collect();

            for (board, cost, heuristic) in children {
                let child = Node::new(board.clone(), Some(id), cost, heuristic);
                let rank = policy.rank(&child);
                let child_id = self.arena.alloc(child);
                let previous = self.visited.insert(board, child_id);
                debug_assert!(previous.is_none(), "board admitted twice");
                self.open.push(child_id, rank);
                self.generated += 1;
            }
        }
    }

    fn seed_root(&mut self, policy: &dyn FrontierPolicy) {
        let root = Node::root(self.initial.clone());
        let rank = policy.rank(&root);
        let root_id = self.arena.alloc(root);
        let previous = self.visited.insert(self.initial.clone(), root_id);
        debug_assert!(previous.is_none(), "root admitted into a non-empty index");
        self.open.push(root_id, rank);
        self.generated += 1;
    }

    fn reset(&mut self) {
        self.arena = NodeArena::new();
        self.open.clear();
        self.closed.clear();
        self.visited.clear();
    }

    fn stats(&self, started: Instant) -> SearchStats {
        SearchStats {
            expanded: self.closed.len(),
            unexpanded: self.open.len(),
            generated: self.generated,
            total_expanded: self.total_expanded,
            elapsed: started.elapsed(),
        }
    }

    fn solved(&self, goal: NodeId, started: Instant) -> SearchOutcome {
        let path: Vec<PathStep> = self
            .arena
            .path_to(goal)
            .into_iter()
            .map(|id| {
                let node = self.arena.get(id);
                PathStep {
                    board: node.board().clone(),
                    cost: node.cost(),
                    heuristic: node.heuristic(),
                }
            })
            .collect();
        let stats = self.stats(started);
        info!(
            moves = self.arena.get(goal).cost(),
            expanded = stats.expanded,
            unexpanded = stats.unexpanded,
            "solution found"
        );
        SearchOutcome::Solved(Solution {
            path,
            moves: self.arena.get(goal).cost(),
            stats,
        })
    }

    fn no_solution(&self, reason: NoSolutionReason, started: Instant) -> SearchOutcome {
        let stats = self.stats(started);
        info!(
            %reason,
            expanded = stats.expanded,
            unexpanded = stats.unexpanded,
            "no solution"
        );
        SearchOutcome::NoSolution { reason, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::find_node_with_state;
    use std::collections::HashSet;

    fn board(grid: &[&[u32]]) -> Board {
        Board::new(grid.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    fn classic_start() -> Board {
        board(&[&[8, 7, 6], &[5, 4, 3], &[2, 1, 0]])
    }

    fn wide_start() -> Board {
        board(&[&[1, 2, 3, 4, 5], &[0, 6, 7, 8, 9], &[11, 12, 13, 14, 10]])
    }

    fn run(start: &Board, strategy: Strategy, config: SearchConfig) -> SearchOutcome {
        Search::new(start.clone(), config).run(strategy)
    }

    fn assert_valid_path(solution: &Solution, start: &Board) {
        assert_eq!(&solution.path[0].board, start);
        assert!(solution.goal().is_some_and(Board::is_goal));
        for pair in solution.path.windows(2) {
            assert!(
                pair[0].board.possible_moves().contains(&pair[1].board),
                "{} -> {} is not a single move",
                pair[0].board,
                pair[1].board
            );
        }
    }

    #[test]
    fn test_every_strategy_solves_two_move_board() {
        let start = board(&[&[1, 2, 3], &[4, 5, 6], &[0, 7, 8]]);
        for strategy in Strategy::ALL {
            let outcome = run(&start, strategy, SearchConfig::default());
            let solution = outcome.solution().unwrap_or_else(|| panic!("{} failed", strategy));
            assert_eq!(solution.steps(), 2, "{}", strategy);
            assert_valid_path(solution, &start);
        }
    }

    #[test]
    fn test_goal_board_is_reported_immediately() {
        let goal = Board::goal(3, 3);
        let outcome = run(&goal, Strategy::AStar, SearchConfig::default());
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.moves, 0);
        assert_eq!(solution.path.len(), 1);
        assert_eq!(solution.stats.expanded, 0);
        assert_eq!(solution.stats.unexpanded, 0);
    }

    #[test]
    fn test_unsolvable_board_is_rejected_before_searching() {
        let start = board(&[&[2, 1, 3], &[4, 5, 6], &[7, 8, 0]]);
        for strategy in Strategy::ALL {
            let outcome = run(&start, strategy, SearchConfig::default());
            assert_eq!(outcome.no_solution_reason(), Some(NoSolutionReason::Unsolvable));
            assert_eq!(outcome.stats().expanded, 0);
            assert_eq!(outcome.stats().generated, 0);
        }
    }

    #[test]
    fn test_legacy_solvability_rejects_the_goal() {
        // The diagonal check counts three pairs on the solved 3x3 board.
        let outcome = run(&Board::goal(3, 3), Strategy::BreadthFirst, SearchConfig::legacy());
        assert_eq!(outcome.no_solution_reason(), Some(NoSolutionReason::Unsolvable));
    }

    #[test]
    fn test_wide_board_breadth_first() {
        let outcome = run(&wide_start(), Strategy::BreadthFirst, SearchConfig::default());
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.moves, 5);
        assert_eq!(solution.stats.expanded, 69);
        assert_eq!(solution.stats.unexpanded, 76);
        assert_valid_path(solution, &wide_start());
    }

    #[test]
    fn test_wide_board_uniform_cost_matches_breadth_first() {
        let ucs = run(&wide_start(), Strategy::UniformCost, SearchConfig::default());
        let bfs = run(&wide_start(), Strategy::BreadthFirst, SearchConfig::default());
        let (ucs, bfs) = (ucs.solution().unwrap(), bfs.solution().unwrap());
        assert_eq!(ucs.path, bfs.path);
        assert_eq!(ucs.stats.expanded, bfs.stats.expanded);
        assert_eq!(ucs.stats.unexpanded, bfs.stats.unexpanded);
    }

    #[test]
    fn test_wide_board_informed_strategies() {
        let astar = run(&wide_start(), Strategy::AStar, SearchConfig::default());
        let solution = astar.solution().unwrap();
        assert_eq!(solution.moves, 5);
        assert_eq!(solution.stats.expanded, 5);
        assert_eq!(solution.stats.unexpanded, 9);
        let last = solution.path.last().unwrap();
        assert_eq!((last.cost, last.heuristic), (5, 0));

        let greedy = run(&wide_start(), Strategy::Greedy, SearchConfig::default());
        let solution = greedy.solution().unwrap();
        assert_eq!(solution.moves, 0);
        assert_eq!(solution.steps(), 5);
        assert!(solution.path.iter().all(|step| step.cost == 0));
    }

    #[test]
    fn test_wide_board_depth_first_hits_cost_bound() {
        let outcome = run(&wide_start(), Strategy::DepthFirst, SearchConfig::default());
        assert_eq!(outcome.no_solution_reason(), Some(NoSolutionReason::BoundExceeded));
        assert_eq!(outcome.stats().expanded, 104);
        assert_eq!(outcome.stats().unexpanded, 91);
    }

    #[test]
    fn test_depth_limited_semantics() {
        let outcome = run(&wide_start(), Strategy::DepthLimited, SearchConfig::default());
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.moves, 5);
        assert_eq!(solution.stats.expanded, 1056);

        let legacy = run(&wide_start(), Strategy::DepthLimited, SearchConfig::legacy());
        assert_eq!(legacy.no_solution_reason(), Some(NoSolutionReason::BoundExceeded));
        assert_eq!(legacy.stats().expanded, 11);
        assert_eq!(legacy.stats().unexpanded, 11);
    }

    #[test]
    fn test_depth_limited_misses_shallow_goal_seen_deep_first() {
        // Three moves away, but the boards on the short path are first generated on deeper
        // paths and never re-admitted.
        let start = board(&[&[1, 2, 3], &[0, 4, 6], &[7, 5, 8]]);
        let bfs = run(&start, Strategy::BreadthFirst, SearchConfig::default());
        assert_eq!(bfs.solution().map(|s| s.moves), Some(3));

        let outcome = run(&start, Strategy::DepthLimited, SearchConfig::default());
        assert_eq!(outcome.no_solution_reason(), Some(NoSolutionReason::DepthLimitReached));
        assert_eq!(outcome.stats().expanded, 421);
        assert_eq!(outcome.stats().unexpanded, 0);
    }

    #[test]
    fn test_iterative_deepening_restart_finds_non_optimal_path() {
        let start = board(&[&[1, 2, 3], &[0, 4, 6], &[7, 5, 8]]);
        let outcome = run(&start, Strategy::IterativeDeepening, SearchConfig::default());
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.moves, 11);
        assert!(solution.steps() > 3);
        assert_eq!(solution.stats.expanded, 722);
        assert_eq!(solution.stats.total_expanded, 1143);
        assert_valid_path(solution, &start);
    }

    #[test]
    fn test_iterative_deepening_legacy_reversal() {
        let outcome = run(&wide_start(), Strategy::IterativeDeepening, SearchConfig::legacy());
        assert_eq!(outcome.no_solution_reason(), Some(NoSolutionReason::BoundExceeded));
        assert_eq!(outcome.stats().expanded, 200);
        assert_eq!(outcome.stats().unexpanded, 175);
    }

    #[test]
    fn test_iterative_deepening_gives_up_past_max_cost() {
        let config = SearchConfig::default().with_max_cost(12).with_depth_limit(2, 5);
        let outcome = run(&classic_start(), Strategy::IterativeDeepening, config);
        assert_eq!(outcome.no_solution_reason(), Some(NoSolutionReason::BoundExceeded));
    }

    #[test]
    fn test_classic_start_a_star_is_optimal() {
        let outcome = run(&classic_start(), Strategy::AStar, SearchConfig::default());
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.moves, 30);
        assert_eq!(solution.stats.expanded, 16713);
        assert_eq!(solution.stats.unexpanded, 7704);
        assert_valid_path(solution, &classic_start());
    }

    #[test]
    fn test_classic_start_a_star_not_longer_than_breadth_first() {
        let bfs = run(&classic_start(), Strategy::BreadthFirst, SearchConfig::default());
        let astar = run(
            &classic_start(),
            Strategy::AStar,
            SearchConfig::default().with_heuristic(Heuristic::MisplacedTiles),
        );
        let (bfs, astar) = (bfs.solution().unwrap(), astar.solution().unwrap());
        assert_eq!(bfs.moves, 30);
        assert_eq!(bfs.stats.expanded, 181404);
        assert!(astar.steps() <= bfs.steps());
        assert_eq!(astar.moves, 30);
    }

    #[test]
    fn test_classic_start_greedy_gives_up() {
        let outcome = run(&classic_start(), Strategy::Greedy, SearchConfig::default());
        assert_eq!(outcome.no_solution_reason(), Some(NoSolutionReason::BoundExceeded));
        assert_eq!(outcome.stats().expanded, 101);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let start = Board::scrambled(3, 3, 30, 42);
        for strategy in Strategy::ALL {
            let a = run(&start, strategy, SearchConfig::default());
            let b = run(&start, strategy, SearchConfig::default());
            assert_eq!(a.is_solved(), b.is_solved());
            assert_eq!(a.no_solution_reason(), b.no_solution_reason());
            if let (Some(a), Some(b)) = (a.solution(), b.solution()) {
                assert_eq!(a.path, b.path);
            }
            assert_eq!(a.stats().expanded, b.stats().expanded);
        }
    }

    #[test]
    fn test_zero_time_limit_expires() {
        let config = SearchConfig::default().with_time_limit(Duration::ZERO);
        let outcome = run(&classic_start(), Strategy::BreadthFirst, config);
        assert_eq!(outcome.no_solution_reason(), Some(NoSolutionReason::DeadlineExpired));
    }

    #[test]
    fn test_open_and_closed_never_share_a_board() {
        for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst, Strategy::Greedy] {
            let mut search = Search::new(wide_start(), SearchConfig::default());
            let mut policy = strategy.policy(search.config());
            let outcome = search.execute(policy.as_mut());
            assert!(outcome.stats().expanded > 0);

            let members: Vec<NodeId> = search.open.iter().chain(search.closed.iter().copied()).collect();
            let boards: HashSet<&Board> = members.iter().map(|&id| search.arena.get(id).board()).collect();
            assert_eq!(boards.len(), members.len(), "{}", strategy);

            for id in search.open.iter() {
                let b = search.arena.get(id).board();
                assert_eq!(find_node_with_state(&search.arena, search.open.iter(), b), Some(id));
                assert_eq!(find_node_with_state(&search.arena, search.closed.iter().copied(), b), None);
                assert_eq!(search.visited.get(b), Some(&id));
            }
        }
    }

    #[test]
    fn test_custom_policy_via_run_with() {
        let start = board(&[&[1, 2, 3], &[4, 5, 6], &[0, 7, 8]]);
        let mut policy = BreadthFirst::new(2);
        let outcome = Search::new(start.clone(), SearchConfig::default()).run_with(&mut policy);
        assert_eq!(outcome.solution().map(|s| s.moves), Some(2));

        // The first depth-2 node popped is not the goal.
        let mut policy = BreadthFirst::new(1);
        let outcome = Search::new(start, SearchConfig::default()).run_with(&mut policy);
        assert_eq!(outcome.no_solution_reason(), Some(NoSolutionReason::BoundExceeded));
        assert_eq!(outcome.stats().expanded, 3);
    }

    #[test]
    fn test_strategy_metadata() {
        let files: HashSet<&str> = Strategy::ALL.iter().map(|s| s.report_file_name()).collect();
        assert_eq!(files.len(), Strategy::ALL.len());
        assert_eq!(Strategy::UniformCost.report_file_name(), "outputUniCost.txt");
        assert_eq!(Strategy::AStar.to_string(), "A* Search");
        let config = SearchConfig::default();
        for strategy in Strategy::ALL {
            assert_eq!(strategy.policy(&config).name(), strategy.name());
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::ProptestConfig;
        use proptest::{prop_assert, prop_assert_eq, proptest};

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(24))]

            #[test]
            fn prop_no_board_admitted_twice(seed in 0u64..10_000, steps in 0usize..12) {
                let start = Board::scrambled(3, 3, steps, seed);
                for strategy in Strategy::ALL {
                    let mut search = Search::new(start.clone(), SearchConfig::default());
                    let mut policy = strategy.policy(search.config());
                    search.execute(policy.as_mut());

                    // Every node of the current round was indexed exactly once.
                    prop_assert_eq!(search.visited.len(), search.arena.len(), "{}", strategy);

                    let members: Vec<NodeId> =
                        search.open.iter().chain(search.closed.iter().copied()).collect();
                    let boards: HashSet<&Board> =
                        members.iter().map(|&id| search.arena.get(id).board()).collect();
                    prop_assert_eq!(boards.len(), members.len(), "{}", strategy);
                    for &id in &members {
                        let b = search.arena.get(id).board();
                        prop_assert!(search.visited.get(b) == Some(&id), "{}", strategy);
                    }
                }
            }
        }
    }
}
