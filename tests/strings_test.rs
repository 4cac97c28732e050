// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for string matching.
//!
//! These tests validate:
//! - KMP and the naive matcher report identical match lists
//! - The LPS table satisfies its prefix/suffix definition
//! - KMP never compares more characters than the naive matcher on the
//!   inputs where it should win
//! - Regex search reports character offsets

mod common;

use algo_trace::strings::{compute_lps, kmp_search, naive_search, regex_search, MatchEvent};
use common::sequence;
use rstest::rstest;

fn random_string(seed: u64, len: usize, alphabet: &[char]) -> String {
    sequence(seed, len, alphabet.len() as u64)
        .into_iter()
        .map(|i| alphabet[i as usize])
        .collect()
}

#[rstest]
#[case("AABAACAADAABAABA", "AABA", vec![0, 9, 12])]
#[case("ABABDABACDABABCABAB", "ABABCABAB", vec![10])]
#[case("aaaaa", "aa", vec![0, 1, 2, 3])]
#[case("abc", "d", vec![])]
#[case("ab", "abc", vec![])]
#[case("abc", "", vec![])]
fn test_kmp_equals_naive(#[case] text: &str, #[case] pattern: &str, #[case] expected: Vec<usize>) {
    let naive = naive_search(text, pattern);
    let kmp = kmp_search(text, pattern);
    assert_eq!(naive.matches, expected);
    assert_eq!(kmp.search.matches, expected);
}

#[test]
fn test_kmp_equals_naive_on_generated_inputs() {
    for seed in 0..40 {
        let text = random_string(seed, 60, &['a', 'b']);
        let pattern = random_string(seed + 1000, 1 + (seed as usize % 5), &['a', 'b']);
        let kmp = kmp_search(&text, &pattern);
        let naive = naive_search(&text, &pattern);
        assert_eq!(kmp.search.matches, naive.matches, "text {:?} pattern {:?}", text, pattern);
        assert!(
            kmp.search.comparisons <= naive.comparisons,
            "text {:?} pattern {:?}: {} > {}",
            text,
            pattern,
            kmp.search.comparisons,
            naive.comparisons
        );
    }
}

#[test]
fn test_lps_definition() {
    for seed in 0..20 {
        let pattern: Vec<char> = random_string(seed, 12, &['a', 'b', 'c']).chars().collect();
        let text: String = pattern.iter().collect();
        let lps = compute_lps(&text);
        assert_eq!(lps.len(), pattern.len());
        for (i, &length) in lps.iter().enumerate() {
            let prefix = &pattern[..=i];
            // longest proper prefix of pattern[..=i] that is also its suffix
            let expected = (0..=i)
                .rev()
                .find(|&k| prefix[..k] == prefix[i + 1 - k..])
                .unwrap_or(0);
            assert_eq!(length, expected, "pattern {:?} index {}", text, i);
        }
    }
}

#[test]
fn test_kmp_compares_no_more_than_naive() {
    for (text, pattern) in [
        ("AAAAAAAAAAAAAAAAAB", "AAAAB"),
        ("ABABABABABABABC", "ABABC"),
        ("XXA", "AB"),
        ("bbbba", "ab"),
        ("aaab", "aab"),
    ] {
        let kmp = kmp_search(text, pattern);
        let naive = naive_search(text, pattern);
        assert!(kmp.search.comparisons <= naive.comparisons);
    }
}

#[test]
fn test_trace_ends_with_summary() {
    let result = kmp_search("abcabc", "abc");
    match &result.search.steps.last().unwrap().event {
        MatchEvent::Finished { found, total } => {
            assert!(*found);
            assert_eq!(*total, 2);
        }
        other => panic!("unexpected final event {:?}", other),
    }
    let found = result
        .search
        .steps
        .iter()
        .filter(|step| matches!(step.event, MatchEvent::Found { .. }))
        .count();
    assert_eq!(found, 2);
}

#[test]
fn test_regex_offsets_are_characters() {
    let result = regex_search("héllo wörld", "w.r");
    assert!(result.valid);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].start, 6);
    assert_eq!(result.matches[0].end, 9);
    assert_eq!(result.matches[0].text, "wör");
}
