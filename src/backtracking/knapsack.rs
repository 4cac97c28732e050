// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! 0/1 knapsack by depth-first branch and bound.
//!
//! Items are considered in decreasing value/weight order, include before
//! exclude. Every node is a feasible selection, so the incumbent is updated
//! whenever a node beats it. A node is pruned when its bound (the value of
//! the greedy fractional fill of the remaining capacity) cannot beat the
//! incumbent.

use super::{run_search, SolveMode};
use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::snapshot::Snapshot;
use crate::statistics::{Counters, Statistics};
use crate::trace::Trace;
use crate::trail::Trail;
use log::trace;
use serde::{Deserialize, Serialize};

const INCLUDE: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub weight: u64,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeAction {
    /// The node's bound can beat the incumbent: branch on the next item.
    Expand,
    /// The node's bound cannot beat the incumbent.
    Prune,
    /// The node's selection is the new incumbent.
    Improve,
    /// The item does not fit in the remaining capacity.
    Infeasible,
    Include,
    Exclude,
    Backtrack,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnapsackStep {
    pub action: NodeAction,
    /// Original index of the item the step is about
    pub item: Option<usize>,
    pub value: u64,
    pub weight: u64,
    pub bound: f64,
    /// Original indices of the items selected so far
    pub selection: Snapshot<Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnapsackResult {
    pub capacity: u64,
    pub best_value: u64,
    pub best_weight: u64,
    /// Original indices of the chosen items, ascending
    pub items: Vec<usize>,
    pub pruned: usize,
    pub steps: Trace<KnapsackStep>,
    pub statistics: Statistics,
}

struct KnapsackContext {
    /// Items with their original index, best ratio first.
    order: Vec<(usize, Item)>,
    capacity: u64,
    selection: Vec<usize>,
    value: u64,
    weight: u64,
    best_value: u64,
    best: Vec<usize>,
    best_weight: u64,
    pruned: usize,
    steps: Trace<KnapsackStep>,
    trail: Trail<usize>,
    statistics: Statistics,
}

impl KnapsackContext {
    fn new(items: &[Item], capacity: u64) -> Self {
        let mut order: Vec<(usize, Item)> = items.iter().copied().enumerate().collect();
        // ratio a > ratio b  <=>  a.value * b.weight > b.value * a.weight
        order.sort_by(|(_, a), (_, b)| {
            (u128::from(b.value) * u128::from(a.weight)).cmp(&(u128::from(a.value) * u128::from(b.weight)))
        });
        Self {
            order,
            capacity,
            selection: Vec::new(),
            value: 0,
            weight: 0,
            best_value: 0,
            best: Vec::new(),
            best_weight: 0,
            pruned: 0,
            steps: Trace::new(),
            trail: Trail::new(),
            statistics: Statistics::new(),
        }
    }

    /// Fractional relaxation over the items from `depth` on.
    fn bound(&self, depth: usize) -> f64 {
        let mut room = self.capacity - self.weight;
        let mut bound = self.value as f64;
        for (_, item) in &self.order[depth..] {
            if item.weight <= room {
                room -= item.weight;
                bound += item.value as f64;
            } else {
                bound += item.value as f64 * room as f64 / item.weight as f64;
                break;
            }
        }
        bound
    }

    fn log(&mut self, action: NodeAction, item: Option<usize>, bound: f64) {
        self.steps.record(KnapsackStep {
            action,
            item,
            value: self.value,
            weight: self.weight,
            bound,
            selection: Snapshot::capture(&self.selection),
        });
    }
}

impl SearchContext for KnapsackContext {
    /// Position in `order` of an included item.
    type Change = usize;

    fn trail(&mut self) -> &mut Trail<usize> {
        &mut self.trail
    }

    fn undo(&mut self, depth: usize) {
        let (original, item) = self.order[depth];
        self.selection.pop();
        self.value -= item.value;
        self.weight -= item.weight;
        self.statistics.increment(Counters::Backtracks);
        let bound = self.bound(depth);
        self.log(NodeAction::Backtrack, Some(original), bound);
    }

    fn statistics(&mut self) -> &mut Statistics {
        &mut self.statistics
    }
}

#[derive(Debug)]
struct BranchItem;

impl Predicate<KnapsackContext> for BranchItem {
    fn try_pred(&mut self, ctx: &mut KnapsackContext, depth: usize) -> PredicateResult {
        let bound = ctx.bound(depth);
        if ctx.value > ctx.best_value {
            ctx.best_value = ctx.value;
            ctx.best_weight = ctx.weight;
            ctx.best = ctx.selection.clone();
            ctx.statistics.increment(Counters::Solutions);
            trace!("knapsack: incumbent {} with {:?}", ctx.value, ctx.selection);
            ctx.log(NodeAction::Improve, None, bound);
        }
        if depth == ctx.order.len() {
            return PredicateResult::Failure;
        }
        if bound <= ctx.best_value as f64 {
            ctx.pruned += 1;
            ctx.log(NodeAction::Prune, None, bound);
            return PredicateResult::Failure;
        }
        ctx.log(NodeAction::Expand, Some(ctx.order[depth].0), bound);
        PredicateResult::Choices(2)
    }

    fn retry_pred(&mut self, ctx: &mut KnapsackContext, depth: usize, choice: usize) -> PredicateResult {
        ctx.statistics.increment(Counters::Tries);
        let (original, item) = ctx.order[depth];
        if choice != INCLUDE {
            let bound = ctx.bound(depth + 1);
            ctx.log(NodeAction::Exclude, Some(original), bound);
            return PredicateResult::SuccessSamePredicate;
        }
        // totals past u64::MAX are as infeasible as an overfull sack
        let fits = ctx
            .weight
            .checked_add(item.weight)
            .filter(|&weight| weight <= ctx.capacity)
            .zip(ctx.value.checked_add(item.value));
        let Some((weight, value)) = fits else {
            ctx.statistics.increment(Counters::Conflicts);
            let bound = ctx.bound(depth);
            ctx.log(NodeAction::Infeasible, Some(original), bound);
            return PredicateResult::Failure;
        };
        ctx.selection.push(original);
        ctx.value = value;
        ctx.weight = weight;
        ctx.trail.record(depth);
        ctx.statistics.increment(Counters::Placements);
        let bound = ctx.bound(depth + 1);
        ctx.log(NodeAction::Include, Some(original), bound);
        PredicateResult::SuccessSamePredicate
    }
}

/// Maximise total value within `capacity`.
///
/// ```
/// use algo_trace::backtracking::{knapsack, Item};
///
/// let items = [
///     Item { weight: 10, value: 60 },
///     Item { weight: 20, value: 100 },
///     Item { weight: 30, value: 120 },
/// ];
/// let result = knapsack(&items, 50);
/// assert_eq!(result.best_value, 220);
/// assert_eq!(result.items, vec![1, 2]);
/// ```
pub fn knapsack(items: &[Item], capacity: u64) -> KnapsackResult {
    let mut ctx = KnapsackContext::new(items, capacity);
    run_search(&mut ctx, Box::new(BranchItem), SolveMode::AllSolutions);
    let bound = ctx.best_value as f64;
    ctx.log(NodeAction::Complete, None, bound);

    let mut chosen = ctx.best;
    chosen.sort_unstable();
    KnapsackResult {
        capacity,
        best_value: ctx.best_value,
        best_weight: ctx.best_weight,
        items: chosen,
        pruned: ctx.pruned,
        steps: ctx.steps,
        statistics: ctx.statistics,
    }
}
