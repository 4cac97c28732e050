// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for JSON instances and the fixture suite.
//!
//! These tests validate:
//! - Every algorithm can be driven from a JSON instance
//! - Malformed instances are refused rather than run
//! - The built-in fixtures pass, family by family

use algo_trace::harness::{diff, fixtures, Instance};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(
    r#"{"algorithm": "nfa", "input": "aab",
        "definition": {"start": "s0", "accept": ["s2"],
                       "transitions": [{"from": "s0", "symbol": "a", "to": ["s0", "s1"]},
                                       {"from": "s0", "symbol": "b", "to": "s0"},
                                       {"from": "s1", "symbol": "b", "to": "s2"}]}}"#,
    json!({"accepted": true, "final_state": ["s0", "s2"]})
)]
#[case(
    r#"{"algorithm": "pda", "input": "aabb",
        "definition": {"start": "p", "accept": ["q"], "accept_mode": "empty_stack",
                       "transitions": [{"from": "p", "input": "a", "stack_top": "", "push": "A", "to": "p"},
                                       {"from": "p", "input": "b", "stack_top": "A", "push": "", "to": "q"},
                                       {"from": "q", "input": "b", "stack_top": "A", "push": "", "to": "q"}]}}"#,
    json!({"accepted": true, "final_state": "q"})
)]
#[case(
    r#"{"algorithm": "turing", "input": "11",
        "definition": {"start": "even", "accept": ["yes"],
                       "transitions": [{"from": "even", "read": "1", "to": "odd", "write": "1", "move": "R"},
                                       {"from": "odd", "read": "1", "to": "even", "write": "1", "move": "R"},
                                       {"from": "even", "read": "_", "to": "yes", "write": "_", "move": "S"}]}}"#,
    json!({"accepted": true, "final_state": "yes"})
)]
#[case(r#"{"algorithm": "naive", "text": "abab", "pattern": "ab"}"#, json!({"matches": [0, 2]}))]
#[case(r#"{"algorithm": "kmp", "text": "abab", "pattern": "ab"}"#, json!({"matches": [0, 2], "lps": [0, 0]}))]
#[case(r#"{"algorithm": "regex", "text": "a1b22", "pattern": "[0-9]+"}"#, json!({"valid": true}))]
#[case(
    r#"{"algorithm": "paging", "policy": "OPTIMAL", "pages": [1, 2, 3, 1, 2, 4], "frames": 2}"#,
    json!({"policy": "OPTIMAL", "page_faults": 5})
)]
#[case(
    r#"{"algorithm": "disk", "policy": "LOOK", "queue": [40, 10, 90], "head": 50, "direction": "left"}"#,
    json!({"sequence": [50, 40, 10, 90], "seek_time": 120})
)]
#[case(r#"{"algorithm": "queens", "n": 5, "mode": "all_solutions"}"#, json!({"total_solutions": 10}))]
#[case(
    r#"{"algorithm": "coloring", "adjacency": [[0, 1], [1, 0]], "colors": 1}"#,
    json!({"is_colorable": false, "chromatic_number": 0})
)]
#[case(
    r#"{"algorithm": "subset_sum", "numbers": [8, 6, 7], "target": 13}"#,
    json!({"has_subset": true, "subset": [6, 7], "indices": [1, 2]})
)]
#[case(
    r#"{"algorithm": "knapsack", "capacity": 5, "items": [{"weight": 2, "value": 3}, {"weight": 3, "value": 4}, {"weight": 4, "value": 5}]}"#,
    json!({"best_value": 7, "items": [0, 1]})
)]
fn test_instance_runs(#[case] text: &str, #[case] expected: serde_json::Value) {
    let instance = Instance::from_json(text).unwrap();
    let actual = instance.run().unwrap();
    let differences = diff(&expected, &actual);
    assert!(differences.is_empty(), "{}: {:?}", instance.algorithm(), differences);
}

#[rstest]
#[case(r#"{"algorithm": "bogosort", "numbers": [1]}"#)]
#[case(r#"{"algorithm": "paging", "pages": [1], "frames": 0}"#)]
#[case(r#"{"algorithm": "disk", "queue": [250], "head": 5}"#)]
#[case(r#"{"algorithm": "queens", "n": 0}"#)]
#[case(r#"{"algorithm": "coloring", "adjacency": [[0, 1], [1]], "colors": 2}"#)]
#[case(r#"{"algorithm": "dfa", "input": "a", "definition": {"start": "", "accept": ["q"], "transitions": []}}"#)]
fn test_malformed_instances_refused(#[case] text: &str) {
    let outcome = Instance::from_json(text).and_then(|instance| instance.run());
    assert!(outcome.is_err(), "{} was accepted", text);
}

#[rstest]
fn test_fixture_family(#[values("automata", "strings", "paging", "disk", "backtracking")] family: &str) {
    let report = fixtures::suite().run(Some(family));
    assert!(report.total() > 0);
    assert!(report.success(), "{:?}", report.failed);
}
