// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pushdown automaton.
//!
//! A single current state plus an explicit stack. Each input symbol fires the
//! first transition (in definition order) whose `(from, input, stack_top)`
//! matches:
//!
//! - an empty `stack_top` is a wildcard: it matches any stack, including an
//!   empty one, and pops nothing;
//! - a non-empty `stack_top` matches only when it is the top of a non-empty
//!   stack, and is popped.
//!
//! The `push` string is then pushed so that its first character ends on top.

use super::table::{single_symbol, validate_states};
use super::{split_input, Outcome, RejectReason, Simulation};
use crate::error::EngineError;
use crate::snapshot::Snapshot;
use crate::trace::Trace;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a PDA decides acceptance once the input is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptMode {
    /// Accept iff the final state is accepting.
    #[default]
    FinalState,
    /// Accept iff the final state is accepting and the stack is empty.
    EmptyStack,
}

/// One PDA transition as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdaTransition {
    pub from: String,
    pub input: String,
    #[serde(default)]
    pub stack_top: String,
    #[serde(default)]
    pub push: String,
    pub to: String,
}

impl PdaTransition {
    pub fn new(from: &str, input: char, stack_top: &str, push: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            input: input.to_string(),
            stack_top: stack_top.to_string(),
            push: push.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PdaDefinition {
    pub start: String,
    pub accept: Vec<String>,
    pub transitions: Vec<PdaTransition>,
    /// Initial stack contents, first character on top.
    #[serde(default)]
    pub initial_stack: String,
    #[serde(default)]
    pub accept_mode: AcceptMode,
}

/// A normalized transition.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    from: String,
    input: char,
    pop: Option<char>,
    /// Symbols to push, bottom-most first.
    push: Vec<char>,
    to: String,
    source: PdaTransition,
}

/// A PDA configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdaStep {
    pub state: String,
    /// Stack contents, bottom first, top last
    pub stack: Snapshot<Vec<char>>,
    pub consumed: String,
    pub remaining: String,
    pub symbol: Option<char>,
    pub transition: Option<PdaTransition>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct Pda {
    start: String,
    accept: BTreeSet<String>,
    rules: Vec<Rule>,
    initial_stack: Vec<char>,
    accept_mode: AcceptMode,
}

impl Pda {
    pub fn new(definition: &PdaDefinition) -> Result<Self, EngineError> {
        let accept = validate_states(&definition.start, &definition.accept)?;
        let rules = definition
            .transitions
            .iter()
            .map(|t| -> Result<Rule, EngineError> {
                let pop = if t.stack_top.is_empty() {
                    None
                } else {
                    Some(single_symbol(&t.stack_top)?)
                };
                Ok(Rule {
                    from: t.from.clone(),
                    input: single_symbol(&t.input)?,
                    pop,
                    push: t.push.chars().rev().collect(),
                    to: t.to.clone(),
                    source: t.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            start: definition.start.clone(),
            accept,
            rules,
            initial_stack: definition.initial_stack.chars().rev().collect(),
            accept_mode: definition.accept_mode,
        })
    }

    fn find_rule(&self, state: &str, symbol: char, stack: &[char]) -> Option<&Rule> {
        self.rules.iter().find(|rule| {
            rule.from == state
                && rule.input == symbol
                && match rule.pop {
                    None => true,
                    Some(top) => stack.last() == Some(&top),
                }
        })
    }

    pub fn simulate(&self, input: &str) -> Simulation<String, PdaStep> {
        let symbols: Vec<char> = input.chars().collect();
        let mut steps = Trace::new();
        let mut state = self.start.clone();
        let mut stack = self.initial_stack.clone();

        let step = |state: &str,
                    stack: &Vec<char>,
                    position: usize,
                    symbol: Option<char>,
                    transition: Option<PdaTransition>,
                    outcome: Outcome| {
            let (consumed, remaining) = split_input(&symbols, position);
            PdaStep {
                state: state.to_string(),
                stack: Snapshot::capture(stack),
                consumed,
                remaining,
                symbol,
                transition,
                outcome,
            }
        };

        steps.record(step(&state, &stack, 0, None, None, Outcome::Running));

        for (position, &symbol) in symbols.iter().enumerate() {
            let Some(rule) = self.find_rule(&state, symbol, &stack) else {
                debug!(
                    "pda: no transition from {} on {:?} with top {:?}",
                    state,
                    symbol,
                    stack.last()
                );
                let reason = RejectReason::NoTransition {
                    state: state.clone(),
                    symbol,
                };
                steps.record(step(&state, &stack, position, Some(symbol), None, Outcome::Rejected(reason)));
                return Simulation {
                    accepted: false,
                    final_state: state,
                    steps,
                };
            };

            if rule.pop.is_some() {
                stack.pop();
            }
            stack.extend_from_slice(&rule.push);
            state = rule.to.clone();
            steps.record(step(
                &state,
                &stack,
                position + 1,
                Some(symbol),
                Some(rule.source.clone()),
                Outcome::Running,
            ));
        }

        let outcome = if !self.accept.contains(&state) {
            Outcome::Rejected(RejectReason::NotAccepting)
        } else if self.accept_mode == AcceptMode::EmptyStack && !stack.is_empty() {
            Outcome::Rejected(RejectReason::StackNotEmpty)
        } else {
            Outcome::Accepted
        };
        let accepted = outcome == Outcome::Accepted;
        steps.record(step(&state, &stack, symbols.len(), None, None, outcome));

        Simulation {
            accepted,
            final_state: state,
            steps,
        }
    }
}

/// Validate `definition` as a PDA and run it on `input`.
pub fn simulate_pda(definition: &PdaDefinition, input: &str) -> Result<Simulation<String, PdaStep>, EngineError> {
    Ok(Pda::new(definition)?.simulate(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a^n b^n, n >= 1, accepted by final state and empty stack.
    fn anbn() -> PdaDefinition {
        PdaDefinition {
            start: "push".into(),
            accept: vec!["pop".into()],
            transitions: vec![
                PdaTransition::new("push", 'a', "", "A", "push"),
                PdaTransition::new("push", 'b', "A", "", "pop"),
                PdaTransition::new("pop", 'b', "A", "", "pop"),
            ],
            initial_stack: String::new(),
            accept_mode: AcceptMode::EmptyStack,
        }
    }

    #[test]
    fn test_balanced_input_accepted() {
        let pda = Pda::new(&anbn()).unwrap();
        let run = pda.simulate("aabb");
        assert!(run.accepted);
        assert_eq!(run.final_state, "pop");

        let depths: Vec<usize> = run.steps.iter().map(|step| step.stack.len()).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 0, 0]);
    }

    #[test]
    fn test_leftover_stack_rejected_in_empty_stack_mode() {
        let pda = Pda::new(&anbn()).unwrap();
        let run = pda.simulate("aab");
        assert!(!run.accepted);
        assert_eq!(
            run.steps.last().unwrap().outcome,
            Outcome::Rejected(RejectReason::StackNotEmpty)
        );

        let mut by_state = anbn();
        by_state.accept_mode = AcceptMode::FinalState;
        assert!(Pda::new(&by_state).unwrap().simulate("aab").accepted);
    }

    #[test]
    fn test_no_matching_stack_top_rejects() {
        let pda = Pda::new(&anbn()).unwrap();
        let run = pda.simulate("abb");
        assert!(!run.accepted);
        assert_eq!(run.steps.last().unwrap().consumed, "ab");
    }

    #[test]
    fn test_multi_symbol_push_puts_first_character_on_top() {
        let def = PdaDefinition {
            start: "q".into(),
            accept: vec!["q".into()],
            transitions: vec![PdaTransition::new("q", 'x', "Z", "XYZ", "q")],
            initial_stack: "Z".into(),
            accept_mode: AcceptMode::FinalState,
        };
        let run = Pda::new(&def).unwrap().simulate("x");
        assert!(run.accepted);
        assert_eq!(*run.steps[1].stack, vec!['Z', 'Y', 'X']);
    }

    #[test]
    fn test_wildcard_matches_empty_stack_without_popping() {
        let def = PdaDefinition {
            start: "q".into(),
            accept: vec!["q".into()],
            transitions: vec![PdaTransition::new("q", 'x', "", "", "q")],
            initial_stack: String::new(),
            accept_mode: AcceptMode::EmptyStack,
        };
        let run = Pda::new(&def).unwrap().simulate("xx");
        assert!(run.accepted);
        assert!(run.steps.iter().all(|step| step.stack.is_empty()));
    }
}
