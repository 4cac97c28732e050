// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Subset sum over non-negative numbers.
//!
//! Each index is decided in order, include before exclude. A branch succeeds
//! as soon as the running sum equals the target, and is a dead end once the
//! sum exceeds the target or every index has been decided.

use super::{run_search, Action, BacktrackStep, SolveMode};
use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::snapshot::Snapshot;
use crate::statistics::{Counters, Statistics};
use crate::trace::Trace;
use crate::trail::Trail;
use serde::Serialize;

const INCLUDE: usize = 0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetSumResult {
    pub target: u64,
    pub has_subset: bool,
    /// Values of the subset found, in index order
    pub subset: Vec<u64>,
    pub indices: Vec<usize>,
    /// Each step's snapshot is the list of values included so far.
    pub steps: Trace<BacktrackStep<Vec<u64>>>,
    pub statistics: Statistics,
}

struct SubsetContext {
    numbers: Vec<u64>,
    target: u64,
    subset: Vec<u64>,
    sum: u64,
    found: bool,
    steps: Trace<BacktrackStep<Vec<u64>>>,
    trail: Trail<usize>,
    statistics: Statistics,
}

impl SubsetContext {
    fn log(&mut self, action: Action, index: Option<usize>, description: String) {
        self.steps.record(BacktrackStep {
            action,
            target: index,
            value: index.map(|i| self.numbers[i]),
            snapshot: Snapshot::capture(&self.subset),
            description,
        });
    }
}

impl SearchContext for SubsetContext {
    type Change = usize;

    fn trail(&mut self) -> &mut Trail<usize> {
        &mut self.trail
    }

    fn undo(&mut self, index: usize) {
        self.subset.pop();
        self.sum -= self.numbers[index];
        self.statistics.increment(Counters::Backtracks);
        self.log(
            Action::Backtrack,
            Some(index),
            format!("remove {} (sum {})", self.numbers[index], self.sum),
        );
    }

    fn statistics(&mut self) -> &mut Statistics {
        &mut self.statistics
    }
}

#[derive(Debug)]
struct DecideIndex;

impl Predicate<SubsetContext> for DecideIndex {
    fn try_pred(&mut self, ctx: &mut SubsetContext, index: usize) -> PredicateResult {
        if ctx.sum == ctx.target {
            ctx.found = true;
            ctx.log(Action::Solution, None, format!("sum {} reached", ctx.target));
            return PredicateResult::Success;
        }
        if ctx.sum > ctx.target {
            ctx.log(Action::DeadEnd, None, format!("sum {} exceeds {}", ctx.sum, ctx.target));
            return PredicateResult::Failure;
        }
        if index == ctx.numbers.len() {
            ctx.log(Action::DeadEnd, None, format!("no numbers left, sum {}", ctx.sum));
            return PredicateResult::Failure;
        }
        PredicateResult::Choices(2)
    }

    fn retry_pred(&mut self, ctx: &mut SubsetContext, index: usize, choice: usize) -> PredicateResult {
        ctx.statistics.increment(Counters::Tries);
        let number = ctx.numbers[index];
        if choice == INCLUDE {
            ctx.log(Action::Try, Some(index), format!("try including {}", number));
            // a sum past u64::MAX is past any target
            let Some(sum) = ctx.sum.checked_add(number) else {
                ctx.log(Action::DeadEnd, Some(index), format!("{} + {} exceeds {}", ctx.sum, number, ctx.target));
                return PredicateResult::Failure;
            };
            ctx.subset.push(number);
            ctx.sum = sum;
            ctx.trail.record(index);
            ctx.statistics.increment(Counters::Placements);
            ctx.log(Action::Place, Some(index), format!("include {} (sum {})", number, ctx.sum));
        } else {
            ctx.log(Action::Try, Some(index), format!("try excluding {}", number));
        }
        PredicateResult::SuccessSamePredicate
    }
}

/// Find a subset of `numbers` summing exactly to `target`.
///
/// ```
/// use algo_trace::backtracking::subset_sum;
///
/// let result = subset_sum(&[3, 34, 4, 12, 5, 2], 9);
/// assert!(result.has_subset);
/// assert_eq!(result.subset, vec![3, 4, 2]);
/// assert!(!subset_sum(&[3, 34, 4, 12, 5, 2], 30).has_subset);
/// ```
pub fn subset_sum(numbers: &[u64], target: u64) -> SubsetSumResult {
    let mut ctx = SubsetContext {
        numbers: numbers.to_vec(),
        target,
        subset: Vec::new(),
        sum: 0,
        found: false,
        steps: Trace::new(),
        trail: Trail::new(),
        statistics: Statistics::new(),
    };
    run_search(&mut ctx, Box::new(DecideIndex), SolveMode::FirstSolution);

    if !ctx.found {
        ctx.log(Action::Exhausted, None, format!("no subset sums to {}", target));
    }

    SubsetSumResult {
        target,
        has_subset: ctx.found,
        indices: ctx.trail.since(0).to_vec(),
        subset: ctx.subset,
        steps: ctx.steps,
        statistics: ctx.statistics,
    }
}
