// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Knuth-Morris-Pratt search.
//!
//! `lps[i]` is the length of the longest proper prefix of `pattern[..=i]`
//! that is also a suffix of it. On a mismatch after `j` matched characters
//! the pattern falls back to `lps[j - 1]` instead of restarting, and the text
//! pointer never moves backwards. After a full match the same fallback is
//! applied, so overlapping occurrences are found.

use super::{MatchResult, Recorder};
use crate::snapshot::Snapshot;
use crate::trace::Trace;
use serde::Serialize;

/// How the LPS construction moved at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LpsAction {
    /// `pattern[i] == pattern[len]`: the border grows.
    Extend,
    /// Mismatch with `len > 0`: fall back to `lps[len - 1]`.
    Fallback,
    /// Mismatch with `len == 0`: `lps[i] = 0`.
    Zero,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LpsStep {
    /// Position being filled
    pub index: usize,
    /// Border length compared against (before the action)
    pub length: usize,
    pub action: LpsAction,
    pub table: Snapshot<Vec<usize>>,
}

/// Result of a KMP search: the common result plus the LPS table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KmpResult {
    #[serde(flatten)]
    pub search: MatchResult,
    pub lps: Vec<usize>,
    pub lps_steps: Trace<LpsStep>,
}

/// Build the LPS table.
///
/// ```
/// use algo_trace::strings::compute_lps;
///
/// assert_eq!(compute_lps("AABAACAABAA"), vec![0, 1, 0, 1, 2, 0, 1, 2, 3, 4, 5]);
/// ```
pub fn compute_lps(pattern: &str) -> Vec<usize> {
    let pattern: Vec<char> = pattern.chars().collect();
    lps_with_trace(&pattern).0
}

/// Build the LPS table, recording every two-pointer move.
pub fn compute_lps_traced(pattern: &str) -> (Vec<usize>, Trace<LpsStep>) {
    let pattern: Vec<char> = pattern.chars().collect();
    lps_with_trace(&pattern)
}

fn lps_with_trace(pattern: &[char]) -> (Vec<usize>, Trace<LpsStep>) {
    let mut lps = vec![0; pattern.len()];
    let mut steps = Trace::new();
    let mut len = 0;
    let mut i = 1;

    while i < pattern.len() {
        let action = if pattern[i] == pattern[len] {
            LpsAction::Extend
        } else if len > 0 {
            LpsAction::Fallback
        } else {
            LpsAction::Zero
        };
        let compared = len;

        match action {
            LpsAction::Extend => {
                len += 1;
                lps[i] = len;
            }
            LpsAction::Fallback => len = lps[len - 1],
            LpsAction::Zero => lps[i] = 0,
        }

        steps.record(LpsStep {
            index: i,
            length: compared,
            action,
            table: Snapshot::capture(&lps),
        });

        if action != LpsAction::Fallback {
            i += 1;
        }
    }

    (lps, steps)
}

/// Find every occurrence of `pattern` in `text`.
///
/// ```
/// use algo_trace::strings::kmp_search;
///
/// let result = kmp_search("AABAACAADAABAABA", "AABA");
/// assert_eq!(result.search.matches, vec![0, 9, 12]);
/// assert_eq!(result.lps, vec![0, 1, 0, 1]);
/// ```
pub fn kmp_search(text: &str, pattern: &str) -> KmpResult {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (lps, lps_steps) = lps_with_trace(&pattern);
    let mut recorder = Recorder::default();

    if pattern.is_empty() || pattern.len() > text.len() {
        return KmpResult {
            search: recorder.finish(text.len()),
            lps,
            lps_steps,
        };
    }

    let m = pattern.len();
    // an alignment is live while the text left covers the pattern left
    let viable = |i: usize, j: usize| text.len() - i >= m - j;
    let (mut i, mut j) = (0, 0);
    while viable(i, j) {
        if recorder.compare(i, j, text[i], pattern[j]) {
            i += 1;
            j += 1;
            if j == m {
                let start = i - m;
                recorder.found(start, m);
                let fallback = lps[m - 1];
                if viable(i, fallback) {
                    recorder.shift(i, fallback, start, i - fallback);
                }
                j = fallback;
            }
        } else if j > 0 {
            let fallback = lps[j - 1];
            if viable(i, fallback) {
                recorder.shift(i, fallback, i - j, i - fallback);
            }
            j = fallback;
        } else {
            if viable(i + 1, 0) {
                recorder.shift(i + 1, 0, i, i + 1);
            }
            i += 1;
        }
    }

    KmpResult {
        search: recorder.finish(text.len()),
        lps,
        lps_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::{naive_search, MatchEvent};

    #[test]
    fn test_lps_definition() {
        for pattern in ["", "A", "AAAA", "ABAB", "ABCABD", "AABAACAABAA", "aabaaab"] {
            let chars: Vec<char> = pattern.chars().collect();
            let lps = compute_lps(pattern);
            assert_eq!(lps.len(), chars.len());
            for i in 0..chars.len() {
                let expected = (0..=i)
                    .rev()
                    .find(|&k| k <= i && chars[..k] == chars[i + 1 - k..=i] && k < i + 1)
                    .unwrap_or(0);
                assert_eq!(lps[i], expected, "pattern {:?} index {}", pattern, i);
            }
        }
    }

    #[test]
    fn test_overlapping_matches() {
        let result = kmp_search("AAAA", "AA");
        assert_eq!(result.search.matches, vec![0, 1, 2]);
    }

    #[test]
    fn test_agrees_with_naive() {
        let cases = [
            ("AABAACAADAABAABA", "AABA"),
            ("abababab", "abab"),
            ("mississippi", "issi"),
            ("short", "longer pattern"),
            ("", "a"),
            ("zzz", "q"),
        ];
        for (text, pattern) in cases {
            assert_eq!(
                kmp_search(text, pattern).search.matches,
                naive_search(text, pattern).matches,
                "{:?} / {:?}",
                text,
                pattern
            );
        }
    }

    #[test]
    fn test_fewer_comparisons_on_repetitive_text() {
        let text = "AAAAAAAAAB";
        let pattern = "AAAAB";
        let kmp = kmp_search(text, pattern);
        let naive = naive_search(text, pattern);
        assert_eq!(kmp.search.matches, vec![5]);
        assert!(kmp.search.comparisons < naive.comparisons);
    }

    #[test]
    fn test_shift_amount_uses_lps() {
        let result = kmp_search("ABABABC", "ABABC");
        assert_eq!(result.search.matches, vec![2]);
        let shifts: Vec<usize> = result
            .search
            .steps
            .iter()
            .filter_map(|step| match step.event {
                MatchEvent::Shift { amount, .. } => Some(amount),
                _ => None,
            })
            .collect();
        // mismatch at j = 4 falls back to lps[3] = 2, a shift of 2
        assert_eq!(shifts[0], 2);
    }

    #[test]
    fn test_stops_when_text_left_is_too_short() {
        for (text, pattern) in [("XXA", "AB"), ("bbbba", "ab"), ("AAAB", "AAB"), ("abcab", "ab")] {
            let kmp = kmp_search(text, pattern);
            let naive = naive_search(text, pattern);
            assert!(
                kmp.search.comparisons <= naive.comparisons,
                "{:?} / {:?}: {} > {}",
                text,
                pattern,
                kmp.search.comparisons,
                naive.comparisons
            );
            // every comparison sits at an alignment where the pattern still fits
            for step in kmp.search.steps.iter() {
                let finished = matches!(step.event, MatchEvent::Finished { .. });
                assert!(finished || step.alignment + pattern.len() <= text.len(), "{:?}", step);
            }
        }
        assert_eq!(kmp_search("XXA", "AB").search.comparisons, 2);
    }

    #[test]
    fn test_lps_trace_ends_with_full_table() {
        let (lps, steps) = compute_lps_traced("ABAB");
        assert_eq!(lps, vec![0, 0, 1, 2]);
        assert_eq!(*steps.last().unwrap().table, lps);
    }
}
