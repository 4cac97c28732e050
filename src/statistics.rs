// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are stored in each solver context, and can be incremented by special
//! predicates, or directly by the solver predicates as they log steps.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(Debug, EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    Tries,
    Placements,
    Conflicts,
    Backtracks,
    Solutions,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// A predicate that will increment the given counter, whenever a condition holds (or always).
    pub fn counting_predicate<C: SearchContext + 'static>(
        counter: Counters,
        filter: Option<fn(&C) -> bool>,
    ) -> Box<dyn Predicate<C>> {
        Box::new(CountingPredicate {
            filter: filter.unwrap_or(|_ctx| true),
            counter,
        })
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}

impl Serialize for Statistics {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let named: BTreeMap<&'static str, u64> = Counters::iter()
            .map(|counter| (counter.into(), self.get(counter)))
            .collect();
        named.serialize(serializer)
    }
}

struct CountingPredicate<C> {
    filter: fn(&C) -> bool,
    counter: Counters,
}

impl<C> fmt::Debug for CountingPredicate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingPredicate")
            .field("counter", &self.counter)
            .finish()
    }
}

impl<C: SearchContext> Predicate<C> for CountingPredicate<C> {
    fn try_pred(&mut self, ctx: &mut C, _round: usize) -> PredicateResult {
        if (self.filter)(ctx) {
            ctx.statistics().increment(self.counter);
        }
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "Counting"
    }
}
