// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Single-tape Turing machine.
//!
//! The tape is seeded from the input, padded with one blank on the right,
//! and grows by one blank cell whenever the head steps off either end. The
//! run halts when the machine enters an accept state (accept), a reject
//! state or a configuration with no transition (reject), or after
//! `max_steps` transitions (reject, reported as a step-limit outcome).

use super::table::validate_states;
use super::{Outcome, RejectReason, Simulation};
use crate::error::EngineError;
use crate::snapshot::Snapshot;
use crate::trace::Trace;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Default runaway-loop guard.
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Default blank symbol.
pub const DEFAULT_BLANK: char = '_';

fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

fn default_blank() -> char {
    DEFAULT_BLANK
}

/// Head movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "L", alias = "left")]
    Left,
    #[serde(rename = "R", alias = "right")]
    Right,
    #[serde(rename = "S", alias = "stay")]
    Stay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuringTransition {
    pub from: String,
    pub read: char,
    pub to: String,
    pub write: char,
    #[serde(rename = "move")]
    pub direction: Move,
}

impl TuringTransition {
    pub fn new(from: &str, read: char, to: &str, write: char, direction: Move) -> Self {
        Self {
            from: from.to_string(),
            read,
            to: to.to_string(),
            write,
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TuringDefinition {
    pub start: String,
    pub accept: Vec<String>,
    #[serde(default)]
    pub reject: Vec<String>,
    pub transitions: Vec<TuringTransition>,
    #[serde(default = "default_blank")]
    pub blank: char,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl TuringDefinition {
    pub fn new(start: &str, accept: &[&str], transitions: Vec<TuringTransition>) -> Self {
        Self {
            start: start.to_string(),
            accept: accept.iter().map(|s| s.to_string()).collect(),
            reject: Vec::new(),
            transitions,
            blank: DEFAULT_BLANK,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// A machine configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuringStep {
    pub state: String,
    pub tape: Snapshot<Vec<char>>,
    pub head: usize,
    /// Transitions executed so far
    pub step_count: usize,
    pub transition: Option<TuringTransition>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct TuringMachine {
    start: String,
    accept: BTreeSet<String>,
    reject: BTreeSet<String>,
    rules: BTreeMap<(String, char), TuringTransition>,
    blank: char,
    max_steps: usize,
}

impl TuringMachine {
    pub fn new(definition: &TuringDefinition) -> Result<Self, EngineError> {
        let accept = validate_states(&definition.start, &definition.accept)?;
        let mut rules = BTreeMap::new();
        for transition in &definition.transitions {
            let key = (transition.from.clone(), transition.read);
            if rules.insert(key, transition.clone()).is_some() {
                return Err(EngineError::Nondeterministic {
                    state: transition.from.clone(),
                    symbol: transition.read,
                });
            }
        }
        Ok(Self {
            start: definition.start.clone(),
            accept,
            reject: definition.reject.iter().cloned().collect(),
            rules,
            blank: definition.blank,
            max_steps: definition.max_steps,
        })
    }

    pub fn simulate(&self, input: &str) -> Simulation<String, TuringStep> {
        let mut tape: VecDeque<char> = input.chars().collect();
        tape.push_back(self.blank);
        let mut head = 0usize;
        let mut state = self.start.clone();
        let mut step_count = 0usize;
        let mut steps = Trace::new();

        let snapshot = |state: &str,
                        tape: &VecDeque<char>,
                        head: usize,
                        step_count: usize,
                        transition: Option<TuringTransition>,
                        outcome: Outcome| TuringStep {
            state: state.to_string(),
            tape: Snapshot::from_owned(tape.iter().copied().collect()),
            head,
            step_count,
            transition,
            outcome,
        };

        steps.record(snapshot(&state, &tape, head, step_count, None, Outcome::Running));

        let outcome = loop {
            if self.accept.contains(&state) {
                break Outcome::Accepted;
            }
            if self.reject.contains(&state) {
                break Outcome::Rejected(RejectReason::RejectState);
            }
            if step_count >= self.max_steps {
                warn!("turing machine hit the {} step limit in state {}", self.max_steps, state);
                break Outcome::Rejected(RejectReason::StepLimit {
                    limit: self.max_steps,
                });
            }

            let symbol = tape.get(head).copied().unwrap_or(self.blank);
            let Some(rule) = self.rules.get(&(state.clone(), symbol)) else {
                debug!("turing: halted in {} reading {:?} at {}", state, symbol, head);
                break Outcome::Rejected(RejectReason::NoTransition {
                    state: state.clone(),
                    symbol,
                });
            };

            tape[head] = rule.write;
            match rule.direction {
                Move::Left => {
                    if head == 0 {
                        tape.push_front(self.blank);
                    } else {
                        head -= 1;
                    }
                }
                Move::Right => {
                    head += 1;
                    if head == tape.len() {
                        tape.push_back(self.blank);
                    }
                }
                Move::Stay => {}
            }
            state = rule.to.clone();
            step_count += 1;
            steps.record(snapshot(&state, &tape, head, step_count, Some(rule.clone()), Outcome::Running));
        };

        let accepted = outcome == Outcome::Accepted;
        steps.record(snapshot(&state, &tape, head, step_count, None, outcome));

        Simulation {
            accepted,
            final_state: state,
            steps,
        }
    }
}

/// Validate `definition` as a Turing machine and run it on `input`.
pub fn simulate_turing(
    definition: &TuringDefinition,
    input: &str,
) -> Result<Simulation<String, TuringStep>, EngineError> {
    Ok(TuringMachine::new(definition)?.simulate(input))
}
