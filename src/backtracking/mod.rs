// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backtracking solvers built on the search engine.
//!
//! Every solver is a single predicate that runs one round per decision
//! (row, vertex, item index) and offers the alternatives for that decision
//! as engine choices. Committed decisions go on the context's trail; when
//! the engine rewinds, [`SearchContext::undo`](crate::context::SearchContext::undo)
//! reverses them and logs a [`Action::Backtrack`] step, so the trace shows
//! the removals in the same order a recursive solver would make them.
//!
//! A first-solution run ends the program with
//! [`SuspendPredicate`](crate::engine::SuspendPredicate); an all-solutions
//! run ends it with [`FailPredicate`](crate::engine::FailPredicate) so the
//! engine keeps backtracking until the space is exhausted.

pub mod coloring;
pub mod knapsack;
pub mod queens;
pub mod subset_sum;

pub use coloring::{color_graph, Coloring, ColoringResult};
pub use knapsack::{knapsack, Item, KnapsackResult, KnapsackStep, NodeAction};
pub use queens::{n_queens, Board, QueensResult};
pub use subset_sum::{subset_sum, SubsetSumResult};

use crate::context::SearchContext;
use crate::engine::{EngineBuilder, FailPredicate, Predicate, SuspendPredicate};
use crate::snapshot::Snapshot;
use crate::statistics::{Counters, Statistics};
use serde::{Deserialize, Serialize};

/// What a solver did at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Considering a value for the current decision.
    Try,
    /// The value was committed.
    Place,
    /// The value clashes with an earlier decision.
    Conflict,
    /// A committed value was removed.
    Backtrack,
    /// Every decision is made and valid.
    Solution,
    /// This branch cannot lead to a solution.
    DeadEnd,
    /// The search space is used up.
    Exhausted,
}

/// One step of a backtracking search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktrackStep<S> {
    pub action: Action,
    /// Row, vertex or index the step is about
    pub target: Option<usize>,
    /// Column, color or number involved
    pub value: Option<u64>,
    /// The partial solution after this step
    pub snapshot: Snapshot<S>,
    pub description: String,
}

impl<S> BacktrackStep<S> {
    pub fn is_backtrack(&self) -> bool {
        self.action == Action::Backtrack
    }
}

/// How far a solver searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveMode {
    /// Stop at the first solution.
    #[default]
    FirstSolution,
    /// Enumerate every solution.
    AllSolutions,
}

/// Run `solver` to completion under `mode`, counting solutions as they pass.
pub(crate) fn run_search<C: SearchContext + 'static>(ctx: &mut C, solver: Box<dyn Predicate<C>>, mode: SolveMode) {
    let builder = EngineBuilder::new()
        .add(solver)
        .add(Statistics::counting_predicate(Counters::Solutions, None));
    let engine = match mode {
        SolveMode::FirstSolution => builder.terminal(Box::new(SuspendPredicate)).build(),
        SolveMode::AllSolutions => builder.terminal(Box::new(FailPredicate)).build(),
    };
    if let Some(suspended) = engine.search(ctx) {
        let (tries, retries) = suspended.statistics();
        log::debug!("suspended at first solution after {} tries, {} retries", tries, retries);
    }
}

/// Count of committed entities in an optional-slot snapshot.
pub fn committed<T>(slots: &[Option<T>]) -> usize {
    slots.iter().filter(|slot| slot.is_some()).count()
}
