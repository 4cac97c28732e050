// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Step-trace engines for classic algorithms.
//!
//! Every engine computes a verdict together with an ordered, replayable
//! trace of how it got there. The trace is complete when the call returns
//! and every step owns a [`Snapshot`] of the state it describes, so a caller
//! can step through it later without seeing stale data.
//!
//! # Families
//!
//! - [`automata`]: DFA, NFA, PDA and Turing machine simulators
//! - [`strings`]: naive and Knuth-Morris-Pratt search, regex search
//! - [`memory`]: FIFO / LRU / Optimal / LFU paging and six disk schedulers
//! - [`backtracking`]: N-Queens, graph coloring, subset sum and knapsack
//!
//! The families are independent. The backtracking solvers share the
//! predicate-driven [`engine`], which undoes committed decisions through a
//! [`Trail`] and so produces the backtrack steps in the order a recursive
//! solver would.
//!
//! # Errors
//!
//! A rejected input, an exhausted search or a missing match is an ordinary
//! result. Malformed instances (no start state, a ragged adjacency matrix,
//! zero frames, ...) are refused with an [`EngineError`].
//!
//! # Example
//!
//! ```
//! use algo_trace::backtracking::{n_queens, SolveMode};
//!
//! let result = n_queens(4, SolveMode::FirstSolution).unwrap();
//! assert!(result.found);
//! for step in result.steps.iter().filter(|step| step.is_backtrack()) {
//!     assert!(step.snapshot.iter().filter(|q| q.is_some()).count() < 4);
//! }
//! ```

pub mod automata;
pub mod backtracking;
pub mod context;
pub mod engine;
pub mod error;
pub mod harness;
pub mod memory;
pub mod snapshot;
pub mod statistics;
pub mod strings;
pub mod trace;
pub mod trail;

// Re-export commonly used types
pub use context::SearchContext;
pub use engine::{Predicate, PredicateResult, SearchEngine};
pub use error::EngineError;
pub use snapshot::Snapshot;
pub use trace::Trace;
pub use trail::Trail;
