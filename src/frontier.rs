//! Frontier policies: which open node is expanded next, and what cost and heuristic a
//! freshly generated child receives.
//!
//! Every strategy runs the same loop in [`crate::solver::Search`]; the differences live
//! entirely in the [`FrontierPolicy`] implementations below.
//!
//! | Policy | Selects | Child `g` | Child `h` | Bound |
//! |---|---|---|---|---|
//! | [`BreadthFirst`] | oldest | `g + 1` | 0 | `g > max_cost` |
//! | [`DepthFirst`] | newest | `g + 1` | 0 | `g > max_cost` |
//! | [`DepthLimited`] | newest | `g + 1` | 0 | depth limit, `g > max_cost` |
//! | [`IterativeDeepening`] | newest | `g + 1` | 0 | growing depth limit, `g > max_cost` |
//! | [`UniformCost`] | lowest `g + h` | `g + 1` | 0 | `g > max_cost` |
//! | [`AStar`] | lowest `g + h` | `g + 1` | heuristic | `g > max_cost` |
//! | [`Greedy`] | lowest `h` | 0 | heuristic | removals `> max_cost` |
use crate::engine::Board;
use crate::heuristics::Heuristic;
use crate::node::{Node, NodeId};
use std::collections::{BTreeMap, BTreeSet};

/// Insertion-ordered set of open node handles.
///
/// Besides plain FIFO and LIFO removal, entries pushed with a rank can be removed lowest
/// rank first. Among equal ranks the earliest inserted entry wins, which is what a linear
/// scan keeping the first strictly-smaller value would pick.
#[derive(Debug, Default)]
pub struct OpenList {
    entries: BTreeMap<u64, (NodeId, Option<u32>)>,
    ranked: BTreeSet<(u32, u64)>,
    next_seq: u64,
}

impl OpenList {
    pub fn new() -> Self {
        OpenList::default()
    }

    /// Appends `id`. Only entries with a rank are visible to [`OpenList::pop_lowest`].
    pub fn push(&mut self, id: NodeId, rank: Option<u32>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(seq, (id, rank));
        if let Some(rank) = rank {
            self.ranked.insert((rank, seq));
        }
    }

    fn take(&mut self, seq: u64) -> Option<NodeId> {
        let (id, rank) = self.entries.remove(&seq)?;
        if let Some(rank) = rank {
            self.ranked.remove(&(rank, seq));
        }
        Some(id)
    }

    /// Removes the earliest inserted entry.
    pub fn pop_front(&mut self) -> Option<NodeId> {
        let seq = *self.entries.keys().next()?;
        self.take(seq)
    }

    /// Removes the most recently inserted entry.
    pub fn pop_back(&mut self) -> Option<NodeId> {
        let seq = *self.entries.keys().next_back()?;
        self.take(seq)
    }

    /// Removes the ranked entry with the lowest rank, earliest inserted on ties.
    pub fn pop_lowest(&mut self) -> Option<NodeId> {
        let &(_, seq) = self.ranked.iter().next()?;
        self.take(seq)
    }

    /// Reverses the insertion order of the remaining entries.
    pub fn reverse(&mut self) {
        let remaining: Vec<(NodeId, Option<u32>)> =
            std::mem::take(&mut self.entries).into_values().collect();
        self.ranked.clear();
        for (id, rank) in remaining.into_iter().rev() {
            self.push(id, rank);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.values().map(|&(id, _)| id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.ranked.clear();
    }
}

/// What the search loop should do before selecting a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Select and process a node as usual.
    Select,
    /// Skip this iteration; the open list may have been rearranged.
    Skip,
    /// Stop: the policy's own bound has been reached.
    Stop,
}

/// What the search loop should do when the open list runs dry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exhausted {
    /// End the run without a solution.
    Finish,
    /// Clear the open and closed sets and start again from the root.
    Restart,
    /// End the run because the policy cannot grow its limit any further.
    BoundExceeded,
}

/// How the depth-bounded strategies measure depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DepthSemantics {
    /// Depth is the node's path cost. Depth-limited search stops expanding at the limit;
    /// iterative deepening restarts from the root with a larger limit.
    ///
    /// A board already in the open or closed set is never admitted again, even when a
    /// shallower path to it turns up later. Within a limit the search is therefore
    /// neither complete nor optimal.
    #[default]
    PathDepth,
    /// Depth is the number of loop iterations so far. Depth-limited search gives up after
    /// `limit + 1` removals; iterative deepening raises its limit and reverses the open
    /// list in place whenever the counter reaches it. This matches the behaviour of the
    /// first version of the solver.
    RemovalCount,
}

/// Strategy-specific rules plugged into the generic search loop.
pub trait FrontierPolicy {
    /// Human-readable strategy name.
    fn name(&self) -> &'static str;

    /// Called at the top of every loop iteration while the open list is non-empty.
    fn advance(&mut self, _open: &mut OpenList) -> Advance {
        Advance::Select
    }

    /// Removes and returns the next node to process.
    fn select(&self, open: &mut OpenList) -> Option<NodeId>;

    /// Rank of `node` in the open list, for policies that select by minimum.
    fn rank(&self, _node: &Node) -> Option<u32> {
        None
    }

    /// Checked after the goal test on every selected node.
    fn exceeds_bound(&mut self, node: &Node) -> bool;

    /// Whether the successors of `node` should be generated.
    fn should_expand(&self, _node: &Node) -> bool {
        true
    }

    /// Cost and heuristic for a child generated from `parent`.
    fn child_params(&self, parent: &Node, successor: &Board) -> (u32, u32);

    /// Called when the open list is empty. `cutoff` tells whether any node was left
    /// unexpanded because of [`FrontierPolicy::should_expand`] during this round.
    fn on_exhausted(&mut self, _cutoff: bool) -> Exhausted {
        Exhausted::Finish
    }
}

/// Expands the oldest open node first.
#[derive(Clone, Debug)]
pub struct BreadthFirst {
    max_cost: u32,
}

impl BreadthFirst {
    pub fn new(max_cost: u32) -> Self {
        BreadthFirst { max_cost }
    }
}

impl FrontierPolicy for BreadthFirst {
    fn name(&self) -> &'static str {
        "Breadth First Search"
    }

    fn select(&self, open: &mut OpenList) -> Option<NodeId> {
        open.pop_front()
    }

    fn exceeds_bound(&mut self, node: &Node) -> bool {
        node.cost() > self.max_cost
    }

    fn child_params(&self, parent: &Node, _successor: &Board) -> (u32, u32) {
        (parent.cost() + 1, 0)
    }
}

/// Expands the newest open node first.
#[derive(Clone, Debug)]
pub struct DepthFirst {
    max_cost: u32,
}

impl DepthFirst {
    pub fn new(max_cost: u32) -> Self {
        DepthFirst { max_cost }
    }
}

impl FrontierPolicy for DepthFirst {
    fn name(&self) -> &'static str {
        "Depth First Search"
    }

    fn select(&self, open: &mut OpenList) -> Option<NodeId> {
        open.pop_back()
    }

    fn exceeds_bound(&mut self, node: &Node) -> bool {
        node.cost() > self.max_cost
    }

    fn child_params(&self, parent: &Node, _successor: &Board) -> (u32, u32) {
        (parent.cost() + 1, 0)
    }
}

/// Depth-first search with a fixed depth limit.
#[derive(Clone, Debug)]
pub struct DepthLimited {
    limit: u32,
    max_cost: u32,
    semantics: DepthSemantics,
    removals: u32,
}

impl DepthLimited {
    pub fn new(limit: u32, max_cost: u32, semantics: DepthSemantics) -> Self {
        DepthLimited {
            limit,
            max_cost,
            semantics,
            removals: 0,
        }
    }
}

impl FrontierPolicy for DepthLimited {
    fn name(&self) -> &'static str {
        "Depth Limited Search"
    }

    fn advance(&mut self, _open: &mut OpenList) -> Advance {
        match self.semantics {
            DepthSemantics::PathDepth => Advance::Select,
            DepthSemantics::RemovalCount => {
                if self.removals > self.limit {
                    return Advance::Stop;
                }
                self.removals += 1;
                Advance::Select
            }
        }
    }

    fn select(&self, open: &mut OpenList) -> Option<NodeId> {
        open.pop_back()
    }

    fn exceeds_bound(&mut self, node: &Node) -> bool {
        node.cost() > self.max_cost
    }

    fn should_expand(&self, node: &Node) -> bool {
        match self.semantics {
            DepthSemantics::PathDepth => node.cost() < self.limit,
            DepthSemantics::RemovalCount => true,
        }
    }

    fn child_params(&self, parent: &Node, _successor: &Board) -> (u32, u32) {
        (parent.cost() + 1, 0)
    }
}

/// Depth-limited search whose limit grows until a solution is found.
#[derive(Clone, Debug)]
pub struct IterativeDeepening {
    limit: u32,
    step: u32,
    max_cost: u32,
    semantics: DepthSemantics,
    removals: u32,
}

impl IterativeDeepening {
    pub fn new(initial_limit: u32, step: u32, max_cost: u32, semantics: DepthSemantics) -> Self {
        IterativeDeepening {
            limit: initial_limit,
            step,
            max_cost,
            semantics,
            removals: 0,
        }
    }

    /// The depth limit currently in force.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl FrontierPolicy for IterativeDeepening {
    fn name(&self) -> &'static str {
        "Iterative Deepening"
    }

    fn advance(&mut self, open: &mut OpenList) -> Advance {
        match self.semantics {
            DepthSemantics::PathDepth => Advance::Select,
            DepthSemantics::RemovalCount => {
                if self.removals > self.limit {
                    return Advance::Stop;
                }
                self.removals += 1;
                if self.removals == self.limit {
                    self.limit += self.step;
                    open.reverse();
                    tracing::debug!(limit = self.limit, "raised limit and reversed open list");
                    return Advance::Skip;
                }
                Advance::Select
            }
        }
    }

    fn select(&self, open: &mut OpenList) -> Option<NodeId> {
        open.pop_back()
    }

    fn exceeds_bound(&mut self, node: &Node) -> bool {
        node.cost() > self.max_cost
    }

    fn should_expand(&self, node: &Node) -> bool {
        match self.semantics {
            DepthSemantics::PathDepth => node.cost() < self.limit,
            DepthSemantics::RemovalCount => true,
        }
    }

    fn child_params(&self, parent: &Node, _successor: &Board) -> (u32, u32) {
        (parent.cost() + 1, 0)
    }

    fn on_exhausted(&mut self, cutoff: bool) -> Exhausted {
        if self.semantics == DepthSemantics::RemovalCount || !cutoff {
            return Exhausted::Finish;
        }
        self.limit += self.step;
        if self.limit > self.max_cost {
            Exhausted::BoundExceeded
        } else {
            Exhausted::Restart
        }
    }
}

/// Dijkstra-style search: lowest path cost first.
#[derive(Clone, Debug)]
pub struct UniformCost {
    max_cost: u32,
}

impl UniformCost {
    pub fn new(max_cost: u32) -> Self {
        UniformCost { max_cost }
    }
}

impl FrontierPolicy for UniformCost {
    fn name(&self) -> &'static str {
        "Uniform Cost Search"
    }

    fn select(&self, open: &mut OpenList) -> Option<NodeId> {
        open.pop_lowest()
    }

    fn rank(&self, node: &Node) -> Option<u32> {
        Some(node.cost() + node.heuristic())
    }

    fn exceeds_bound(&mut self, node: &Node) -> bool {
        node.cost() > self.max_cost
    }

    fn child_params(&self, parent: &Node, _successor: &Board) -> (u32, u32) {
        (parent.cost() + 1, 0)
    }
}

/// Lowest `g + h` first.
#[derive(Clone, Debug)]
pub struct AStar {
    heuristic: Heuristic,
    max_cost: u32,
}

impl AStar {
    pub fn new(heuristic: Heuristic, max_cost: u32) -> Self {
        AStar {
            heuristic,
            max_cost,
        }
    }
}

impl FrontierPolicy for AStar {
    fn name(&self) -> &'static str {
        "A* Search"
    }

    fn select(&self, open: &mut OpenList) -> Option<NodeId> {
        open.pop_lowest()
    }

    fn rank(&self, node: &Node) -> Option<u32> {
        Some(node.cost() + node.heuristic())
    }

    fn exceeds_bound(&mut self, node: &Node) -> bool {
        node.cost() > self.max_cost
    }

    fn child_params(&self, parent: &Node, successor: &Board) -> (u32, u32) {
        (parent.cost() + 1, self.heuristic.evaluate(successor))
    }
}

/// Lowest heuristic first, ignoring path cost.
///
/// Children carry `g = 0`, so reports from this strategy show zero costs. The bound counts
/// selected nodes rather than path length.
#[derive(Clone, Debug)]
pub struct Greedy {
    heuristic: Heuristic,
    max_removals: u32,
    removals: u32,
}

impl Greedy {
    pub fn new(heuristic: Heuristic, max_removals: u32) -> Self {
        Greedy {
            heuristic,
            max_removals,
            removals: 0,
        }
    }
}

impl FrontierPolicy for Greedy {
    fn name(&self) -> &'static str {
        "Greedy Search"
    }

    fn select(&self, open: &mut OpenList) -> Option<NodeId> {
        open.pop_lowest()
    }

    fn rank(&self, node: &Node) -> Option<u32> {
        Some(node.heuristic())
    }

    fn exceeds_bound(&mut self, _node: &Node) -> bool {
        let exceeded = self.removals > self.max_removals;
        self.removals += 1;
        exceeded
    }

    fn child_params(&self, _parent: &Node, successor: &Board) -> (u32, u32) {
        (0, self.heuristic.evaluate(successor))
    }
}
