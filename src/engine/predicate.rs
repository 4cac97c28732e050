// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicate trait for non-deterministic search.
//!
//! The search engine works by trying predicates in sequence. Each predicate
//! represents a choice point in the search space. Predicates can succeed,
//! fail, or signal completion.
//!
//! # Example
//!
//! ```
//! use algo_trace::engine::{Predicate, PredicateResult};
//! use algo_trace::context::SearchContext;
//!
//! #[derive(Debug)]
//! struct SimplePredicate;
//!
//! impl<C: SearchContext> Predicate<C> for SimplePredicate {
//!     fn try_pred(&mut self, _ctx: &mut C, _round: usize) -> PredicateResult {
//!         // Return Choices(2) to try two alternatives
//!         PredicateResult::Choices(2)
//!     }
//!
//!     fn retry_pred(&mut self, _ctx: &mut C, _round: usize, choice: usize) -> PredicateResult {
//!         if choice < 2 {
//!             PredicateResult::Success  // This choice works
//!         } else {
//!             PredicateResult::Failure  // No more options
//!         }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Simple"
//!     }
//! }
//! ```

use crate::context::SearchContext;
use std::fmt::Debug;

/// Result of attempting a predicate.
///
/// Predicates can return:
/// - `Success`: Move to next predicate in the sequence
/// - `SuccessSamePredicate`: Stay at same predicate, increment round (for iterative predicates)
/// - `Failure`: Backtrack to previous predicate
/// - `Choices(n)`: Predicate has n choices to explore via retry_pred
/// - `Suspend`: Pause execution, typically because a solution was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResult {
    /// Predicate succeeded. Move to next predicate in sequence.
    Success,

    /// Predicate succeeded but stay at same predicate with next round.
    /// Allows a single predicate to execute once per row, vertex or index.
    SuccessSamePredicate,

    /// Predicate has no (more) valid choices. Backtrack to previous predicate.
    Failure,

    /// Predicate has multiple choices to explore.
    /// Engine will call retry_pred(round, choice) for each choice in 0..n.
    Choices(usize),

    /// Suspend execution. Engine returns control with state preserved.
    Suspend,
}

/// A terminal predicate that ends a search program.
///
/// Terminal predicates are FAIL or SUSPEND - they never return Success.
/// [`EngineBuilder::terminal`](super::EngineBuilder::terminal) only accepts
/// predicates carrying this marker, so every built program ends properly.
pub trait TerminalPredicate<C: SearchContext>: Predicate<C> {}

/// Trait for search predicates in the non-deterministic engine.
///
/// Each predicate represents a choice point in the search. The engine
/// calls `try_pred` to attempt the predicate for the first time, and
/// `retry_pred` on backtracking to try alternative choices.
///
/// # Lifecycle
///
/// 1. Engine calls `try_pred` when first encountering the predicate
/// 2. If Success: engine advances to next predicate
/// 3. If Failure: engine backtracks to previous predicate
/// 4. On backtrack: engine calls `retry_pred` to try next option
/// 5. Repeat until Success (advance) or Failure (backtrack)
///
/// # Trail Integration
///
/// Predicates commit changes to the context through its trail. Before every
/// `try_pred` and `retry_pred` the engine rewinds the context to the
/// checkpoint of the current stack entry, so a retried choice always starts
/// from the state the first choice saw.
pub trait Predicate<C: SearchContext>: Debug {
    /// Try this predicate for a given round.
    ///
    /// The round starts at 0 and increments each time the predicate returns
    /// `SuccessSamePredicate`.
    fn try_pred(&mut self, ctx: &mut C, round: usize) -> PredicateResult;

    /// Retry this predicate with a specific choice.
    ///
    /// Called after try_pred returns Choices(n), for each choice in 0..n.
    ///
    /// Can return:
    /// - `Success`: This choice succeeded, move to next predicate
    /// - `SuccessSamePredicate`: This choice succeeded, stay at this predicate
    /// - `Failure`: This choice failed, try next choice (or backtrack if no more)
    ///
    /// Note: retry_pred cannot return Choices or Suspend (we're already in choice mode).
    #[allow(unused)]
    fn retry_pred(&mut self, ctx: &mut C, round: usize, choice: usize) -> PredicateResult {
        // Predicates that return Choices must implement this.
        panic!("{}::retry_pred should never be called", self.name());
    }

    /// Optional: Get a name for this predicate (for debugging).
    ///
    /// Default implementation returns the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Built-in fail predicate (Prolog's `fail.`).
///
/// Ends a program that should enumerate every solution: each time the
/// search reaches it, the engine backtracks into the remaining choices.
#[derive(Debug)]
pub struct FailPredicate;

impl<C: SearchContext> Predicate<C> for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut C, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn retry_pred(&mut self, _ctx: &mut C, _round: usize, _choice: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl<C: SearchContext> TerminalPredicate<C> for FailPredicate {}

/// Built-in suspend predicate.
///
/// Ends a program that stops at the first solution.
#[derive(Debug)]
pub struct SuspendPredicate;

impl<C: SearchContext> Predicate<C> for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut C, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn retry_pred(&mut self, _ctx: &mut C, _round: usize, _choice: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl<C: SearchContext> TerminalPredicate<C> for SuspendPredicate {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::StackContext;

    #[test]
    fn test_suspend_predicate() {
        let mut ctx = StackContext::default();
        let mut pred = SuspendPredicate;

        assert_eq!(pred.try_pred(&mut ctx, 0), PredicateResult::Suspend);
        assert_eq!(pred.retry_pred(&mut ctx, 0, 0), PredicateResult::Failure);
    }

    #[test]
    fn test_fail_predicate() {
        let mut ctx = StackContext::default();
        let mut pred = FailPredicate;

        assert_eq!(pred.try_pred(&mut ctx, 0), PredicateResult::Failure);
        assert_eq!(pred.retry_pred(&mut ctx, 0, 0), PredicateResult::Failure);
    }

    #[test]
    fn test_names() {
        assert_eq!(Predicate::<StackContext>::name(&FailPredicate), "Fail");
        assert_eq!(Predicate::<StackContext>::name(&SuspendPredicate), "Suspend");
    }
}
