// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use algo_trace::backtracking::BacktrackStep;
use algo_trace::context::SearchContext;
use algo_trace::statistics::Statistics;
use algo_trace::trace::Trace;
use algo_trace::trail::Trail;
use algo_trace::{Predicate, PredicateResult};

/// A context whose state is a list of chosen digits.
#[derive(Debug, Default)]
pub struct DigitsContext {
    pub chosen: Vec<usize>,
    pub solutions: Vec<Vec<usize>>,
    pub undone: usize,
    pub trail: Trail<usize>,
    pub statistics: Statistics,
}

impl SearchContext for DigitsContext {
    type Change = usize;

    fn trail(&mut self) -> &mut Trail<usize> {
        &mut self.trail
    }

    fn undo(&mut self, change: usize) {
        assert_eq!(self.chosen.pop(), Some(change));
        self.undone += 1;
    }

    fn statistics(&mut self) -> &mut Statistics {
        &mut self.statistics
    }
}

/// Choose `length` digits below `base`, one per round, recording each
/// complete choice whose sum is `sum`.
#[derive(Debug)]
pub struct DigitsSumTo {
    pub base: usize,
    pub length: usize,
    pub sum: usize,
}

impl Predicate<DigitsContext> for DigitsSumTo {
    fn try_pred(&mut self, ctx: &mut DigitsContext, round: usize) -> PredicateResult {
        if round < self.length {
            return PredicateResult::Choices(self.base);
        }
        if ctx.chosen.iter().sum::<usize>() == self.sum {
            ctx.solutions.push(ctx.chosen.clone());
            PredicateResult::Success
        } else {
            PredicateResult::Failure
        }
    }

    fn retry_pred(&mut self, ctx: &mut DigitsContext, _round: usize, choice: usize) -> PredicateResult {
        ctx.chosen.push(choice);
        ctx.trail.record(choice);
        PredicateResult::SuccessSamePredicate
    }
}

/// Check that every backtrack step shows exactly one fewer committed entity
/// than the step before it.
pub fn assert_undo_invariant<S>(steps: &Trace<BacktrackStep<S>>, committed: impl Fn(&S) -> usize) {
    for (i, pair) in steps.as_slice().windows(2).enumerate() {
        let (before, after) = (&pair[0], &pair[1]);
        if after.is_backtrack() {
            assert_eq!(
                committed(&after.snapshot),
                committed(&before.snapshot) - 1,
                "backtrack step {} does not remove exactly one entity",
                i + 1
            );
        }
    }
}

/// Deterministic pseudo-random sequence for property-style tests.
pub fn sequence(seed: u64, len: usize, modulus: u64) -> Vec<u64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) % modulus
        })
        .collect()
}
