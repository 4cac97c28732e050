// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Brute-force search: every alignment, compared left to right.

use super::{MatchResult, Recorder};

/// Find every occurrence of `pattern` in `text` by trying each alignment.
///
/// ```
/// use algo_trace::strings::naive_search;
///
/// let result = naive_search("AABAACAADAABAABA", "AABA");
/// assert_eq!(result.matches, vec![0, 9, 12]);
/// ```
pub fn naive_search(text: &str, pattern: &str) -> MatchResult {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let mut recorder = Recorder::default();

    let last_offset = match text.len().checked_sub(pattern.len()) {
        Some(last) if !pattern.is_empty() => last,
        _ => return recorder.finish(text.len()),
    };

    for offset in 0..=last_offset {
        if offset > 0 {
            recorder.shift(offset, 0, offset - 1, offset);
        }
        let mut j = 0;
        while j < pattern.len() {
            if !recorder.compare(offset + j, j, text[offset + j], pattern[j]) {
                break;
            }
            j += 1;
        }
        if j == pattern.len() {
            recorder.found(offset, pattern.len());
        }
    }

    recorder.finish(text.len())
}
