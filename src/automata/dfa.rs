// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Deterministic finite automaton.

use super::table::{AutomatonDefinition, TransitionTable};
use super::{Outcome, RejectReason, Simulation, StateStep, Transition};
use crate::error::EngineError;
use crate::trace::Trace;
use log::debug;
use std::collections::BTreeSet;

/// A validated DFA, ready to simulate any number of inputs.
///
/// # Example
///
/// ```
/// use algo_trace::automata::{AutomatonDefinition, Dfa};
///
/// // Binary strings ending in "01"
/// let def = AutomatonDefinition::from_edges(
///     "q0",
///     &["q2"],
///     &[
///         ("q0", '0', "q1"), ("q0", '1', "q0"),
///         ("q1", '0', "q1"), ("q1", '1', "q2"),
///         ("q2", '0', "q1"), ("q2", '1', "q0"),
///     ],
/// );
/// let dfa = Dfa::new(&def).unwrap();
/// assert!(dfa.simulate("1001").accepted);
/// assert!(!dfa.simulate("100").accepted);
/// ```
#[derive(Debug, Clone)]
pub struct Dfa {
    start: String,
    accept: BTreeSet<String>,
    table: TransitionTable,
}

impl Dfa {
    pub fn new(definition: &AutomatonDefinition) -> Result<Self, EngineError> {
        let (table, accept) = definition.normalize()?;
        table.ensure_deterministic()?;
        Ok(Self {
            start: definition.start.clone(),
            accept,
            table,
        })
    }

    /// Run the automaton over `input`, one step per symbol.
    ///
    /// A missing transition rejects immediately; the remaining symbols are
    /// never read.
    pub fn simulate(&self, input: &str) -> Simulation<String, StateStep> {
        let symbols: Vec<char> = input.chars().collect();
        let mut steps = Trace::new();
        let mut state = self.start.clone();

        steps.record(StateStep::at(
            &singleton(&state),
            &symbols,
            0,
            None,
            Vec::new(),
            Outcome::Running,
        ));

        for (position, &symbol) in symbols.iter().enumerate() {
            let Some(next) = self.table.target(&state, symbol) else {
                debug!("dfa: no transition from {} on {:?} at {}", state, symbol, position);
                steps.record(StateStep::at(
                    &singleton(&state),
                    &symbols,
                    position,
                    Some(symbol),
                    Vec::new(),
                    Outcome::Rejected(RejectReason::NoTransition {
                        state: state.clone(),
                        symbol,
                    }),
                ));
                return Simulation {
                    accepted: false,
                    final_state: state,
                    steps,
                };
            };

            let transition = Transition {
                from: state.clone(),
                symbol,
                to: next.clone(),
            };
            state = next.clone();
            steps.record(StateStep::at(
                &singleton(&state),
                &symbols,
                position + 1,
                Some(symbol),
                vec![transition],
                Outcome::Running,
            ));
        }

        let accepted = self.accept.contains(&state);
        let outcome = if accepted {
            Outcome::Accepted
        } else {
            Outcome::Rejected(RejectReason::NotAccepting)
        };
        steps.record(StateStep::at(
            &singleton(&state),
            &symbols,
            symbols.len(),
            None,
            Vec::new(),
            outcome,
        ));

        Simulation {
            accepted,
            final_state: state,
            steps,
        }
    }
}

/// Validate `definition` as a DFA and run it on `input`.
pub fn simulate_dfa(
    definition: &AutomatonDefinition,
    input: &str,
) -> Result<Simulation<String, StateStep>, EngineError> {
    Ok(Dfa::new(definition)?.simulate(input))
}

fn singleton(state: &str) -> BTreeSet<String> {
    std::iter::once(state.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even_zeros() -> AutomatonDefinition {
        AutomatonDefinition::from_edges(
            "even",
            &["even"],
            &[
                ("even", '0', "odd"),
                ("even", '1', "even"),
                ("odd", '0', "even"),
                ("odd", '1', "odd"),
            ],
        )
    }

    #[test]
    fn test_accepts_and_rejects() {
        let dfa = Dfa::new(&even_zeros()).unwrap();
        assert!(dfa.simulate("").accepted);
        assert!(dfa.simulate("1001").accepted);
        assert!(!dfa.simulate("10").accepted);
    }

    #[test]
    fn test_trace_shape() {
        let dfa = Dfa::new(&even_zeros()).unwrap();
        let run = dfa.simulate("01");

        // initial + one per symbol + verdict
        assert_eq!(run.steps.len(), 4);
        assert_eq!(run.steps[0].consumed, "");
        assert_eq!(run.steps[0].remaining, "01");
        assert_eq!(run.steps[1].transitions[0].to, "odd");
        assert_eq!(run.steps[2].consumed, "01");
        assert!(run.steps.iter().all(|step| step.states.len() == 1));
        assert_eq!(
            run.steps.last().unwrap().outcome,
            Outcome::Rejected(RejectReason::NotAccepting)
        );
        assert_eq!(run.final_state, "odd");
    }

    #[test]
    fn test_missing_transition_rejects_immediately() {
        let dfa = Dfa::new(&even_zeros()).unwrap();
        let run = dfa.simulate("1x01");

        assert!(!run.accepted);
        assert_eq!(run.steps.len(), 3);
        let last = run.steps.last().unwrap();
        assert_eq!(last.consumed, "1");
        assert_eq!(last.remaining, "x01");
        assert_eq!(
            last.outcome,
            Outcome::Rejected(RejectReason::NoTransition {
                state: "even".into(),
                symbol: 'x'
            })
        );
    }

    #[test]
    fn test_nondeterministic_definition_refused() {
        let def = AutomatonDefinition::from_edges("q0", &["q1"], &[("q0", 'a', "q0"), ("q0", 'a', "q1")]);
        assert!(matches!(Dfa::new(&def), Err(EngineError::Nondeterministic { .. })));
    }
}
