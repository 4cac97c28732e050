// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Automaton simulators.
//!
//! Four machines share one contract: given a definition and an input string,
//! produce a [`Simulation`] holding the verdict, the final configuration and
//! the full step trace. Rejection is an ordinary outcome carried by the last
//! step; only malformed definitions produce an [`EngineError`](crate::EngineError),
//! and they do so when the machine is built, before any input is read.
//!
//! - [`dfa`]: deterministic finite automaton
//! - [`nfa`]: nondeterministic finite automaton (no epsilon moves)
//! - [`pda`]: pushdown automaton with accept-by-state or accept-by-empty-stack
//! - [`turing`]: single-tape Turing machine with a step cap

pub mod dfa;
pub mod nfa;
pub mod pda;
pub mod table;
pub mod turing;

pub use dfa::{simulate_dfa, Dfa};
pub use nfa::{simulate_nfa, Nfa};
pub use pda::{simulate_pda, AcceptMode, Pda, PdaDefinition, PdaStep, PdaTransition};
pub use table::{AutomatonDefinition, TransitionSpec, TransitionTable};
pub use turing::{simulate_turing, Move, TuringDefinition, TuringMachine, TuringStep, TuringTransition};

use crate::snapshot::Snapshot;
use crate::trace::Trace;
use serde::Serialize;
use std::collections::BTreeSet;

/// Where a run stands after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum Outcome {
    Running,
    Accepted,
    Rejected(RejectReason),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Running)
    }
}

/// Why a run ended without accepting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// No transition for the current state and symbol.
    NoTransition { state: String, symbol: char },
    /// Every NFA branch died on this symbol.
    EmptyStateSet { symbol: char },
    /// Input consumed but the final state is not accepting.
    NotAccepting,
    /// Final state accepting but the stack still holds symbols.
    StackNotEmpty,
    /// Turing machine entered an explicit reject state.
    RejectState,
    /// Turing machine ran out of steps.
    StepLimit { limit: usize },
}

/// One transition taken by a finite automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: String,
    pub symbol: char,
    pub to: String,
}

/// A DFA or NFA configuration: the active states and the input split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateStep {
    /// Active states (exactly one for a DFA)
    pub states: Snapshot<BTreeSet<String>>,
    pub consumed: String,
    pub remaining: String,
    /// Symbol read to reach this step, if any
    pub symbol: Option<char>,
    /// Transitions fired by that symbol
    pub transitions: Vec<Transition>,
    pub outcome: Outcome,
}

impl StateStep {
    pub(crate) fn at(
        states: &BTreeSet<String>,
        input: &[char],
        position: usize,
        symbol: Option<char>,
        transitions: Vec<Transition>,
        outcome: Outcome,
    ) -> Self {
        let (consumed, remaining) = split_input(input, position);
        Self {
            states: Snapshot::capture(states),
            consumed,
            remaining,
            symbol,
            transitions,
            outcome,
        }
    }
}

/// Result of running a machine on one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation<F, S> {
    pub accepted: bool,
    /// Final state (DFA, PDA, TM) or state set (NFA)
    pub final_state: F,
    pub steps: Trace<S>,
}

pub(crate) fn split_input(input: &[char], position: usize) -> (String, String) {
    let position = position.min(input.len());
    (
        input[..position].iter().collect(),
        input[position..].iter().collect(),
    )
}
