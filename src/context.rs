// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context shared by the engine and the solver predicates.
//!
//! Each backtracking solver owns a context holding its problem instance, its
//! live partial solution, the step trace and a [`Trail`] of committed changes.
//! The engine only needs three things from it: the trail, a way to undo one
//! trailed change, and the statistics counters.
//!
//! # Trail Discipline
//!
//! Solvers mutate the live partial solution only through `commit`-style
//! helpers that also push a change on the trail. The engine rewinds the
//! trail when it backtracks, and each popped change is handed to
//! [`SearchContext::undo`], which reverses it and logs the backtrack step.

use crate::statistics::Statistics;
use crate::trail::Trail;

/// State threaded through a search.
pub trait SearchContext {
    /// One reversible change, as recorded on the trail.
    type Change;

    /// The trail of committed changes.
    fn trail(&mut self) -> &mut Trail<Self::Change>;

    /// Reverse one change popped from the trail.
    fn undo(&mut self, change: Self::Change);

    /// Per-run counters.
    fn statistics(&mut self) -> &mut Statistics;

    /// Undo every change made since `checkpoint`, newest first.
    fn rewind_to(&mut self, checkpoint: usize) {
        while let Some(change) = self.trail().pop_above(checkpoint) {
            self.undo(change);
        }
    }
}
