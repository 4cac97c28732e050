// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking search engine that runs predicates
//! in sequence. The engine coordinates with the context's trail to provide
//! automatic state restoration on backtracking.
//!
//! # Architecture
//!
//! The engine maintains a stack of predicate execution states. Each stack entry tracks:
//! - Which predicate is executing
//! - Current round number (for predicates that execute multiple times)
//! - Choice mode state (whether we're trying alternatives)
//! - Current choice index (when in choice mode)
//!
//! Execution follows a WAM-like model:
//! 1. Call try_pred(round) on each predicate
//! 2. If Success: advance to next predicate
//! 3. If SuccessSamePredicate: increment round, stay at same predicate
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1)
//! 5. If Failure: backtrack to previous stack entry
//! 6. If Suspend: pause and return control to caller
//!
//! The backtracking solvers map directly onto this: one predicate per
//! problem, one round per row / vertex / index, one choice per column /
//! color / include-or-exclude decision.
//!
//! # Example
//!
//! ```
//! use algo_trace::engine::{EngineBuilder, Predicate, PredicateResult, SuspendPredicate};
//! use algo_trace::context::SearchContext;
//! use algo_trace::statistics::Statistics;
//! use algo_trace::trail::Trail;
//!
//! #[derive(Default)]
//! struct Digits { chosen: Vec<usize>, trail: Trail<usize>, statistics: Statistics }
//!
//! impl SearchContext for Digits {
//!     type Change = usize;
//!     fn trail(&mut self) -> &mut Trail<usize> { &mut self.trail }
//!     fn undo(&mut self, _change: usize) { self.chosen.pop(); }
//!     fn statistics(&mut self) -> &mut Statistics { &mut self.statistics }
//! }
//!
//! /// Pick two digits that sum to 7.
//! #[derive(Debug)]
//! struct PickDigit;
//!
//! impl Predicate<Digits> for PickDigit {
//!     fn try_pred(&mut self, ctx: &mut Digits, round: usize) -> PredicateResult {
//!         if round == 2 {
//!             return if ctx.chosen.iter().sum::<usize>() == 7 {
//!                 PredicateResult::Success
//!             } else {
//!                 PredicateResult::Failure
//!             };
//!         }
//!         PredicateResult::Choices(10)
//!     }
//!
//!     fn retry_pred(&mut self, ctx: &mut Digits, _round: usize, choice: usize) -> PredicateResult {
//!         ctx.chosen.push(choice);
//!         ctx.trail.record(choice);
//!         PredicateResult::SuccessSamePredicate
//!     }
//! }
//!
//! let mut ctx = Digits::default();
//! let engine = EngineBuilder::new()
//!     .add(Box::new(PickDigit))
//!     .terminal(Box::new(SuspendPredicate))
//!     .build();
//!
//! assert!(engine.search(&mut ctx).is_some());
//! assert_eq!(ctx.chosen, vec![0, 7]);
//! ```

pub mod predicate;

pub use predicate::{FailPredicate, Predicate, PredicateResult, SuspendPredicate, TerminalPredicate};

use crate::context::SearchContext;
use log::trace;

/// Initial capacity of the predicate stack.
const INITIAL_STACK_CAPACITY: usize = 64;

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    /// Whether we're in choice mode (exploring alternatives).
    in_choice_mode: bool,

    /// Current choice being tried (when in_choice_mode is true).
    current_choice: usize,

    /// Total number of choices (when in_choice_mode is true).
    num_choices: usize,

    /// Trail checkpoint for this stack entry.
    trail_checkpoint: usize,
}

impl StackEntry {
    fn new(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            trail_checkpoint,
        }
    }
}

/// Search engine that coordinates predicate execution and backtracking.
///
/// The engine runs predicates in sequence, managing rounds, choices, and
/// backtracking automatically via the context's trail.
pub struct SearchEngine<C: SearchContext> {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate<C>>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls (backtracks).
    retry_count: u64,
}

impl<C: SearchContext> SearchEngine<C> {
    /// Create a new search engine with the given predicates.
    ///
    /// Predicates will be tried in the order given. Prefer [`EngineBuilder`],
    /// which guarantees the sequence ends with a terminal predicate.
    pub fn new(predicates: Vec<Box<dyn Predicate<C>>>) -> Self {
        Self {
            predicates,
            stack: Vec::with_capacity(INITIAL_STACK_CAPACITY),
            try_count: 0,
            retry_count: 0,
        }
    }

    /// Run the search until it suspends or is exhausted.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if suspended - calling `search` again on the returned
    ///   engine resumes by backtracking into the remaining choices
    /// - `None` if exhausted (backtracked past first predicate) - search is complete
    ///
    /// Success is indicated via side effects on `ctx`, not by the return value.
    ///
    /// # Panics
    ///
    /// Panics if the predicate sequence is invalid (reaches the end without FAIL or SUSPEND).
    pub fn search(mut self, ctx: &mut C) -> Option<Self> {
        if self.predicates.is_empty() {
            return None; // Empty is exhausted
        }

        if self.stack.is_empty() {
            self.try_count = 0;
            self.retry_count = 0;
            self.stack.push(StackEntry::new(0, 0, ctx.trail().checkpoint()));
        } else {
            // Resuming: the suspending entry is treated as a failure.
            self.stack.pop();
        }

        // Main execution loop
        loop {
            let Some(entry) = self.stack.last_mut() else {
                trace!("search exhausted after {} tries", self.try_count);
                return None;
            };

            // Rewind trail to this entry's checkpoint
            let checkpoint = entry.trail_checkpoint;
            ctx.rewind_to(checkpoint);

            if !entry.in_choice_mode {
                // Call mode: try_pred
                let pred_idx = entry.predicate_index;
                let round = entry.round;
                self.try_count += 1;
                let result = self.predicates[pred_idx].try_pred(ctx, round);

                match result {
                    PredicateResult::Success => {
                        self.mark_deterministic();
                        self.push_next_predicate(ctx);
                    }
                    PredicateResult::SuccessSamePredicate => {
                        self.mark_deterministic();
                        self.push_same_predicate(ctx);
                    }
                    PredicateResult::Failure => {
                        self.stack.pop();
                    }
                    PredicateResult::Choices(n) => {
                        let checkpoint = ctx.trail().checkpoint();
                        if let Some(entry) = self.stack.last_mut() {
                            entry.in_choice_mode = true;
                            entry.current_choice = 0;
                            entry.num_choices = n;
                            entry.trail_checkpoint = checkpoint;
                        }
                    }
                    PredicateResult::Suspend => {
                        trace!(
                            "search suspended in {} after {} tries",
                            self.predicates[pred_idx].name(),
                            self.try_count
                        );
                        return Some(self);
                    }
                }
            } else {
                // Choice mode: retry_pred
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }

                let pred_idx = entry.predicate_index;
                let round = entry.round;
                let choice = entry.current_choice;
                entry.current_choice += 1;
                self.retry_count += 1;
                let result = self.predicates[pred_idx].retry_pred(ctx, round, choice);

                match result {
                    PredicateResult::Success => self.push_next_predicate(ctx),
                    PredicateResult::SuccessSamePredicate => self.push_same_predicate(ctx),
                    PredicateResult::Failure => {
                        // Try next choice (loop continues)
                    }
                    PredicateResult::Choices(_) | PredicateResult::Suspend => {
                        panic!("retry_pred returned invalid result: {:?}", result);
                    }
                }
            }
        }
    }

    /// A deterministic success leaves nothing to retry: backtracking into the
    /// entry must pop it rather than call try_pred again.
    fn mark_deterministic(&mut self) {
        if let Some(entry) = self.stack.last_mut() {
            entry.in_choice_mode = true;
            entry.current_choice = 0;
            entry.num_choices = 0;
        }
    }

    /// Push a new stack entry for the next predicate in sequence.
    ///
    /// Panics if we've reached the end of the predicate sequence, as this indicates
    /// an invalid program (all valid programs must end with FAIL or SUSPEND).
    fn push_next_predicate(&mut self, ctx: &mut C) {
        let next_index = self.stack.last().map_or(0, |entry| entry.predicate_index + 1);

        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 All programs must terminate with a FAIL or SUSPEND predicate."
            );
        }

        self.stack.push(StackEntry::new(next_index, 0, ctx.trail().checkpoint()));
    }

    /// Push a new stack entry for the same predicate with incremented round.
    fn push_same_predicate(&mut self, ctx: &mut C) {
        let (pred_index, next_round) = self
            .stack
            .last()
            .map_or((0, 0), |entry| (entry.predicate_index, entry.round + 1));

        self.stack.push(StackEntry::new(pred_index, next_round, ctx.trail().checkpoint()));
    }

    /// Get statistics about the search.
    ///
    /// Returns (try_count, retry_count) showing how many times predicates
    /// were tried and retried.
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}

/// Builder that assembles a predicate program ending in a terminal predicate.
pub struct EngineBuilder<C: SearchContext> {
    predicates: Vec<Box<dyn Predicate<C>>>,
}

impl<C: SearchContext + 'static> EngineBuilder<C> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Append a non-terminal predicate.
    pub fn add(mut self, predicate: Box<dyn Predicate<C>>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Append the terminal predicate, closing the program.
    pub fn terminal<T: TerminalPredicate<C> + 'static>(mut self, predicate: Box<T>) -> TerminatedBuilder<C> {
        self.predicates.push(predicate);
        TerminatedBuilder {
            predicates: self.predicates,
        }
    }
}

impl<C: SearchContext + 'static> Default for EngineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A predicate program known to end with FAIL or SUSPEND.
pub struct TerminatedBuilder<C: SearchContext> {
    predicates: Vec<Box<dyn Predicate<C>>>,
}

impl<C: SearchContext> TerminatedBuilder<C> {
    pub fn build(self) -> SearchEngine<C> {
        SearchEngine::new(self.predicates)
    }
}
