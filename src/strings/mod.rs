// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! String matching with comparison traces.
//!
//! Both searchers work on characters (not bytes) and report match offsets as
//! character positions. An empty pattern, or one longer than the text,
//! yields no matches and no comparisons.

pub mod kmp;
pub mod naive;
pub mod pattern;

pub use kmp::{compute_lps, compute_lps_traced, kmp_search, KmpResult, LpsStep};
pub use naive::naive_search;
pub use pattern::{regex_search, PatternMatch, PatternSearch};

use crate::trace::Trace;
use serde::Serialize;

/// What happened at one step of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MatchEvent {
    /// One character comparison.
    Compare {
        text_char: char,
        pattern_char: char,
        matched: bool,
    },
    /// The pattern alignment moved right.
    Shift { from: usize, to: usize, amount: usize },
    /// A full occurrence starting at `start`.
    Found { start: usize },
    /// Search finished.
    Finished { found: bool, total: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchStep {
    pub text_index: usize,
    pub pattern_index: usize,
    /// Text offset the pattern is currently aligned with
    pub alignment: usize,
    pub event: MatchEvent,
    pub description: String,
}

/// Result of a naive or KMP search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub matches: Vec<usize>,
    pub steps: Trace<MatchStep>,
    pub comparisons: usize,
}

impl MatchResult {
    pub fn found(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Shared step recorder for the two searchers.
#[derive(Default)]
struct Recorder {
    steps: Trace<MatchStep>,
    comparisons: usize,
    matches: Vec<usize>,
}

impl Recorder {
    fn compare(&mut self, text_index: usize, pattern_index: usize, text_char: char, pattern_char: char) -> bool {
        self.comparisons += 1;
        let matched = text_char == pattern_char;
        let verb = if matched { "matches" } else { "mismatches" };
        self.steps.record(MatchStep {
            text_index,
            pattern_index,
            alignment: text_index - pattern_index,
            event: MatchEvent::Compare {
                text_char,
                pattern_char,
                matched,
            },
            description: format!(
                "text[{}] = '{}' {} pattern[{}] = '{}'",
                text_index, text_char, verb, pattern_index, pattern_char
            ),
        });
        matched
    }

    fn shift(&mut self, text_index: usize, pattern_index: usize, from: usize, to: usize) {
        let amount = to - from;
        self.steps.record(MatchStep {
            text_index,
            pattern_index,
            alignment: to,
            event: MatchEvent::Shift { from, to, amount },
            description: format!("shift pattern by {} to align at {}", amount, to),
        });
    }

    fn found(&mut self, start: usize, length: usize) {
        self.matches.push(start);
        self.steps.record(MatchStep {
            text_index: start + length - 1,
            pattern_index: length - 1,
            alignment: start,
            event: MatchEvent::Found { start },
            description: format!("pattern found at index {}", start),
        });
    }

    fn finish(mut self, text_len: usize) -> MatchResult {
        let total = self.matches.len();
        self.steps.record(MatchStep {
            text_index: text_len,
            pattern_index: 0,
            alignment: text_len,
            event: MatchEvent::Finished {
                found: total > 0,
                total,
            },
            description: format!("{} match(es), {} comparison(s)", total, self.comparisons),
        });
        MatchResult {
            matches: self.matches,
            steps: self.steps,
            comparisons: self.comparisons,
        }
    }
}
