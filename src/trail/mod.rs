// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking.
//!
//! The trail records every committed change a solver makes (a queen placed,
//! a vertex colored, a number included). A checkpoint is simply the trail
//! length at some instant; rewinding to a checkpoint pops the changes made
//! since, newest first, and hands each one back to the owner of the state so
//! it can be undone.
//!
//! Popping newest first is what makes backtracking traces come out in the
//! same order a recursive solver would produce them: the deepest placement
//! is always removed before the placements it depended on.

/// Undo log of committed changes.
///
/// `C` is the solver-specific description of one change, for example
/// `(row, col)` for N-Queens.
#[derive(Debug)]
pub struct Trail<C> {
    /// All changes recorded so far, oldest first
    entries: Vec<C>,
}

impl<C> Trail<C> {
    /// Maximum trail size.
    ///
    /// The solvers keep at most one entry per decision level, so this is far
    /// beyond anything a legitimate run reaches.
    pub const MAX_SIZE: usize = 1 << 16;

    /// Create a new empty trail.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Current position, to be passed back to [`Trail::pop_above`] later.
    pub fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    /// Record a committed change.
    ///
    /// # Panics
    ///
    /// Panics if the trail exceeds `MAX_SIZE` (indicates a bug in a solver).
    pub fn record(&mut self, change: C) {
        if self.entries.len() >= Self::MAX_SIZE {
            panic!("Trail overflow: exceeded {} entries", Self::MAX_SIZE);
        }
        self.entries.push(change);
    }

    /// Pop the newest change if it was recorded after `checkpoint`.
    pub fn pop_above(&mut self, checkpoint: usize) -> Option<C> {
        if self.entries.len() > checkpoint {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Changes recorded after `checkpoint`, oldest first.
    pub fn since(&self, checkpoint: usize) -> &[C] {
        &self.entries[checkpoint.min(self.entries.len())..]
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Default for Trail<C> {
    fn default() -> Self {
        Self::new()
    }
}
