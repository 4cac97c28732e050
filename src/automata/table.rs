// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Finite-automaton definitions and their normalized transition table.
//!
//! Definitions arrive in one of two shapes:
//!
//! ```text
//! edge list:   [{"from": "q0", "symbol": "a", "to": "q1"}, ...]
//! nested map:  {"q0": {"a": "q1", "b": ["q0", "q1"]}, ...}
//! ```
//!
//! Either shape is folded once into a [`TransitionTable`], a mapping from
//! `(state, symbol)` to a sorted set of target states. The simulators only
//! ever see the table.

use crate::error::EngineError;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// One target state or several.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    One(String),
    Many(Vec<String>),
}

impl Targets {
    fn iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        match self {
            Targets::One(state) => Box::new(std::iter::once(state)),
            Targets::Many(states) => Box::new(states.iter()),
        }
    }
}

/// An edge in list form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub symbol: String,
    pub to: Targets,
}

/// Transition relation as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TransitionSpec {
    Edges(Vec<EdgeSpec>),
    Nested(BTreeMap<String, BTreeMap<String, Targets>>),
}

/// A DFA or NFA definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AutomatonDefinition {
    pub start: String,
    pub accept: Vec<String>,
    pub transitions: TransitionSpec,
}

impl AutomatonDefinition {
    /// Build a definition from `(from, symbol, to)` triples.
    ///
    /// ```
    /// use algo_trace::automata::AutomatonDefinition;
    ///
    /// let def = AutomatonDefinition::from_edges("q0", &["q1"], &[("q0", 'a', "q1")]);
    /// assert_eq!(def.start, "q0");
    /// ```
    pub fn from_edges(start: &str, accept: &[&str], edges: &[(&str, char, &str)]) -> Self {
        Self {
            start: start.to_string(),
            accept: accept.iter().map(|s| s.to_string()).collect(),
            transitions: TransitionSpec::Edges(
                edges
                    .iter()
                    .map(|&(from, symbol, to)| EdgeSpec {
                        from: from.to_string(),
                        symbol: symbol.to_string(),
                        to: Targets::One(to.to_string()),
                    })
                    .collect(),
            ),
        }
    }

    /// Check the start and accept states, then normalize the transitions.
    pub(crate) fn normalize(&self) -> Result<(TransitionTable, BTreeSet<String>), EngineError> {
        let accept = validate_states(&self.start, &self.accept)?;
        let table = TransitionTable::from_spec(&self.transitions)?;
        Ok((table, accept))
    }
}

/// Shared start/accept validation for every machine kind.
pub(crate) fn validate_states(start: &str, accept: &[String]) -> Result<BTreeSet<String>, EngineError> {
    if start.is_empty() {
        return Err(EngineError::MissingStartState);
    }
    if accept.is_empty() {
        return Err(EngineError::EmptyAcceptStates);
    }
    Ok(accept.iter().cloned().collect())
}

/// Parse a one-character symbol.
pub(crate) fn single_symbol(symbol: &str) -> Result<char, EngineError> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(EngineError::InvalidSymbol {
            symbol: symbol.to_string(),
        }),
    }
}

/// Normalized transition relation: state -> symbol -> targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    edges: BTreeMap<String, BTreeMap<char, BTreeSet<String>>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spec(spec: &TransitionSpec) -> Result<Self, EngineError> {
        let mut table = Self::new();
        match spec {
            TransitionSpec::Edges(edges) => {
                for edge in edges {
                    let symbol = single_symbol(&edge.symbol)?;
                    for to in edge.to.iter() {
                        table.insert(&edge.from, symbol, to);
                    }
                }
            }
            TransitionSpec::Nested(states) => {
                for (from, row) in states {
                    for (symbol, targets) in row {
                        let symbol = single_symbol(symbol)?;
                        for to in targets.iter() {
                            table.insert(from, symbol, to);
                        }
                    }
                }
            }
        }
        Ok(table)
    }

    pub fn insert(&mut self, from: &str, symbol: char, to: &str) {
        self.edges
            .entry(from.to_string())
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(to.to_string());
    }

    /// All targets of `(state, symbol)`, if any.
    pub fn targets(&self, state: &str, symbol: char) -> Option<&BTreeSet<String>> {
        self.edges.get(state).and_then(|row| row.get(&symbol))
    }

    /// The unique target of `(state, symbol)`, for deterministic tables.
    pub fn target(&self, state: &str, symbol: char) -> Option<&String> {
        self.targets(state, symbol).and_then(|targets| targets.iter().next())
    }

    /// Fail on the first `(state, symbol)` pair with more than one target.
    pub fn ensure_deterministic(&self) -> Result<(), EngineError> {
        for (state, row) in &self.edges {
            for (&symbol, targets) in row {
                if targets.len() > 1 {
                    return Err(EngineError::Nondeterministic {
                        state: state.clone(),
                        symbol,
                    });
                }
            }
        }
        Ok(())
    }

    /// Every symbol used by some transition.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.edges.values().flat_map(|row| row.keys().copied()).collect()
    }

    /// Number of `(state, symbol, target)` triples.
    pub fn len(&self) -> usize {
        self.edges
            .values()
            .flat_map(|row| row.values())
            .map(BTreeSet::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
