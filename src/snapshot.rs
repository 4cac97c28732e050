// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Immutable snapshots of live algorithm state.
//!
//! Every step type in the crate stores the mutable structure it describes
//! (board, stack, tape, frame set, ...) as a `Snapshot`. A snapshot is taken
//! by cloning at the moment the step is recorded and offers no mutable
//! access afterwards, so a step can never alias state that the algorithm
//! keeps mutating.
//!
//! # Example
//!
//! ```
//! use algo_trace::snapshot::Snapshot;
//!
//! let mut frames = vec![Some(7), None];
//! let before = Snapshot::capture(&frames);
//! frames[1] = Some(0);
//!
//! assert_eq!(*before, vec![Some(7), None]);
//! ```

use serde::Serialize;
use std::fmt;
use std::ops::Deref;

/// An owned, read-only copy of a value taken at one instant.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Snapshot<T>(T);

impl<T: Clone> Snapshot<T> {
    /// Copy `live` into a new snapshot.
    pub fn capture(live: &T) -> Self {
        Snapshot(live.clone())
    }
}

impl<T> Snapshot<T> {
    /// Wrap a value the caller already owns and will not mutate again.
    pub fn from_owned(value: T) -> Self {
        Snapshot(value)
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
