// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Nondeterministic finite automaton, simulated by tracking the set of
//! active states. Epsilon transitions are not supported.

use super::table::{AutomatonDefinition, TransitionTable};
use super::{Outcome, RejectReason, Simulation, StateStep, Transition};
use crate::error::EngineError;
use crate::trace::Trace;
use log::debug;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct Nfa {
    start: String,
    accept: BTreeSet<String>,
    table: TransitionTable,
}

impl Nfa {
    pub fn new(definition: &AutomatonDefinition) -> Result<Self, EngineError> {
        let (table, accept) = definition.normalize()?;
        Ok(Self {
            start: definition.start.clone(),
            accept,
            table,
        })
    }

    /// Advance every active state on each symbol and union the results.
    ///
    /// Rejects as soon as the active set becomes empty. Accepts iff some
    /// state of the final set is accepting.
    pub fn simulate(&self, input: &str) -> Simulation<BTreeSet<String>, StateStep> {
        let symbols: Vec<char> = input.chars().collect();
        let mut steps = Trace::new();
        let mut current: BTreeSet<String> = std::iter::once(self.start.clone()).collect();

        steps.record(StateStep::at(&current, &symbols, 0, None, Vec::new(), Outcome::Running));

        for (position, &symbol) in symbols.iter().enumerate() {
            let mut next = BTreeSet::new();
            let mut fired = Vec::new();
            for state in &current {
                if let Some(targets) = self.table.targets(state, symbol) {
                    for target in targets {
                        fired.push(Transition {
                            from: state.clone(),
                            symbol,
                            to: target.clone(),
                        });
                        next.insert(target.clone());
                    }
                }
            }

            if next.is_empty() {
                debug!("nfa: state set {:?} died on {:?} at {}", current, symbol, position);
                steps.record(StateStep::at(
                    &next,
                    &symbols,
                    position + 1,
                    Some(symbol),
                    fired,
                    Outcome::Rejected(RejectReason::EmptyStateSet { symbol }),
                ));
                return Simulation {
                    accepted: false,
                    final_state: next,
                    steps,
                };
            }

            current = next;
            steps.record(StateStep::at(
                &current,
                &symbols,
                position + 1,
                Some(symbol),
                fired,
                Outcome::Running,
            ));
        }

        let accepted = current.iter().any(|state| self.accept.contains(state));
        let outcome = if accepted {
            Outcome::Accepted
        } else {
            Outcome::Rejected(RejectReason::NotAccepting)
        };
        steps.record(StateStep::at(
            &current,
            &symbols,
            symbols.len(),
            None,
            Vec::new(),
            outcome,
        ));

        Simulation {
            accepted,
            final_state: current,
            steps,
        }
    }
}

/// Validate `definition` as an NFA and run it on `input`.
pub fn simulate_nfa(
    definition: &AutomatonDefinition,
    input: &str,
) -> Result<Simulation<BTreeSet<String>, StateStep>, EngineError> {
    Ok(Nfa::new(definition)?.simulate(input))
}
