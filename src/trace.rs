// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Append-only step traces.
//!
//! A `Trace` is the ordered record of one algorithm run. The position of a
//! step in the trace is its sequence number; steps are only ever appended,
//! never edited or removed, and the trace is complete by the time an engine
//! returns it.

use serde::Serialize;
use std::ops::Index;

/// Ordered, append-only sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace<S> {
    steps: Vec<S>,
}

impl<S> Trace<S> {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step and return its sequence number.
    pub fn record(&mut self, step: S) -> usize {
        self.steps.push(step);
        self.steps.len() - 1
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The most recent step, if any.
    pub fn last(&self) -> Option<&S> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.steps.iter()
    }

    /// View the steps as a slice, in sequence order.
    pub fn as_slice(&self) -> &[S] {
        &self.steps
    }
}

impl<S> Default for Trace<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Index<usize> for Trace<S> {
    type Output = S;

    fn index(&self, index: usize) -> &S {
        &self.steps[index]
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
