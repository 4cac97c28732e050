// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Literal textbook fixtures for every engine family.

use super::{expect_json, CheckResult, Suite};
use crate::automata::{
    simulate_dfa, simulate_nfa, simulate_pda, simulate_turing, AcceptMode, AutomatonDefinition, Move,
    PdaDefinition, PdaTransition, TuringDefinition, TuringTransition,
};
use crate::backtracking::{color_graph, knapsack, n_queens, subset_sum, Item, SolveMode};
use crate::memory::{schedule_disk, simulate_paging, DiskPolicy, DiskRequest, PagingPolicy};
use crate::strings::{compute_lps, kmp_search, naive_search, regex_search};
use serde_json::json;

const REFERENCES: [u32; 13] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];
const CYLINDERS: [u32; 8] = [98, 183, 37, 122, 14, 124, 65, 67];

fn err(e: impl ToString) -> String {
    e.to_string()
}

/// Binary strings ending in `01`.
pub fn ends_with_01() -> AutomatonDefinition {
    AutomatonDefinition::from_edges(
        "q0",
        &["q2"],
        &[
            ("q0", '0', "q1"),
            ("q0", '1', "q0"),
            ("q1", '0', "q1"),
            ("q1", '1', "q2"),
            ("q2", '0', "q1"),
            ("q2", '1', "q0"),
        ],
    )
}

/// Strings over `{a, b}` containing `ab`.
pub fn contains_ab() -> AutomatonDefinition {
    AutomatonDefinition::from_edges(
        "s0",
        &["s2"],
        &[
            ("s0", 'a', "s0"),
            ("s0", 'a', "s1"),
            ("s0", 'b', "s0"),
            ("s1", 'b', "s2"),
            ("s2", 'a', "s2"),
            ("s2", 'b', "s2"),
        ],
    )
}

/// `a^n b^n`, n >= 1, accepted by final state and empty stack.
pub fn balanced_ab() -> PdaDefinition {
    PdaDefinition {
        start: "push".into(),
        accept: vec!["pop".into()],
        transitions: vec![
            PdaTransition::new("push", 'a', "", "A", "push"),
            PdaTransition::new("push", 'b', "A", "", "pop"),
            PdaTransition::new("pop", 'b', "A", "", "pop"),
        ],
        initial_stack: String::new(),
        accept_mode: AcceptMode::EmptyStack,
    }
}

/// Binary strings with an even number of `1`s.
pub fn even_ones() -> TuringDefinition {
    TuringDefinition::new(
        "even",
        &["yes"],
        vec![
            TuringTransition::new("even", '0', "even", '0', Move::Right),
            TuringTransition::new("even", '1', "odd", '1', Move::Right),
            TuringTransition::new("odd", '0', "odd", '0', Move::Right),
            TuringTransition::new("odd", '1', "even", '1', Move::Right),
            TuringTransition::new("even", '_', "yes", '_', Move::Stay),
        ],
    )
}

fn dfa_accepts() -> CheckResult {
    let run = simulate_dfa(&ends_with_01(), "1001").map_err(err)?;
    expect_json(&run, json!({"accepted": true, "final_state": "q2"}))
}

fn dfa_rejects() -> CheckResult {
    let run = simulate_dfa(&ends_with_01(), "100").map_err(err)?;
    expect_json(&run, json!({"accepted": false, "final_state": "q1"}))
}

fn nfa_tracks_state_sets() -> CheckResult {
    let run = simulate_nfa(&contains_ab(), "bab").map_err(err)?;
    expect_json(&run, json!({"accepted": true, "final_state": ["s0", "s2"]}))?;
    let run = simulate_nfa(&contains_ab(), "ba").map_err(err)?;
    expect_json(&run, json!({"accepted": false, "final_state": ["s0", "s1"]}))
}

fn pda_balanced() -> CheckResult {
    let run = simulate_pda(&balanced_ab(), "aabb").map_err(err)?;
    expect_json(&run, json!({"accepted": true, "final_state": "pop"}))?;
    let run = simulate_pda(&balanced_ab(), "aab").map_err(err)?;
    expect_json(&run, json!({"accepted": false}))
}

fn turing_even_ones() -> CheckResult {
    let run = simulate_turing(&even_ones(), "0110").map_err(err)?;
    expect_json(&run, json!({"accepted": true, "final_state": "yes"}))?;
    let run = simulate_turing(&even_ones(), "01").map_err(err)?;
    expect_json(&run, json!({"accepted": false, "final_state": "odd"}))
}

fn naive_matches() -> CheckResult {
    expect_json(&naive_search("AABAACAADAABAABA", "AABA"), json!({"matches": [0, 9, 12]}))
}

fn kmp_matches() -> CheckResult {
    expect_json(
        &kmp_search("AABAACAADAABAABA", "AABA"),
        json!({"matches": [0, 9, 12], "lps": [0, 1, 0, 1]}),
    )
}

fn kmp_lps_table() -> CheckResult {
    expect_json(&compute_lps("AABAACAABAA"), json!([0, 1, 0, 1, 2, 0, 1, 2, 3, 4, 5]))
}

fn regex_reports_bad_pattern() -> CheckResult {
    expect_json(&regex_search("abc", "a(b"), json!({"valid": false, "matches": []}))
}

fn paging(policy: PagingPolicy, faults: usize, hits: usize) -> CheckResult {
    let result = simulate_paging(policy, &REFERENCES, 3).map_err(err)?;
    expect_json(&result, json!({"page_faults": faults, "page_hits": hits}))
}

fn paging_fifo() -> CheckResult {
    paging(PagingPolicy::Fifo, 10, 3)
}

fn paging_lru() -> CheckResult {
    paging(PagingPolicy::Lru, 9, 4)
}

fn paging_optimal() -> CheckResult {
    paging(PagingPolicy::Optimal, 7, 6)
}

fn paging_lfu() -> CheckResult {
    paging(PagingPolicy::Lfu, 8, 5)
}

fn disk(policy: DiskPolicy, seek_time: u64) -> CheckResult {
    let schedule = schedule_disk(policy, &DiskRequest::new(&CYLINDERS, 53)).map_err(err)?;
    expect_json(&schedule, json!({"seek_time": seek_time}))
}

fn disk_fcfs() -> CheckResult {
    disk(DiskPolicy::Fcfs, 640)
}

fn disk_sstf() -> CheckResult {
    disk(DiskPolicy::Sstf, 236)
}

fn disk_scan() -> CheckResult {
    disk(DiskPolicy::Scan, 331)
}

fn disk_cscan() -> CheckResult {
    disk(DiskPolicy::CScan, 382)
}

fn disk_look() -> CheckResult {
    disk(DiskPolicy::Look, 299)
}

fn disk_clook() -> CheckResult {
    disk(DiskPolicy::CLook, 322)
}

fn queens_four() -> CheckResult {
    let result = n_queens(4, SolveMode::FirstSolution).map_err(err)?;
    expect_json(&result, json!({"found": true, "total_solutions": 1, "solutions": [[1, 3, 0, 2]]}))
}

fn queens_three() -> CheckResult {
    let result = n_queens(3, SolveMode::FirstSolution).map_err(err)?;
    expect_json(&result, json!({"found": false, "total_solutions": 0}))
}

fn queens_eight_all() -> CheckResult {
    let result = n_queens(8, SolveMode::AllSolutions).map_err(err)?;
    expect_json(&result, json!({"total_solutions": 92}))
}

fn coloring_triangle() -> CheckResult {
    let triangle = vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]];
    let result = color_graph(&triangle, 3, SolveMode::FirstSolution).map_err(err)?;
    expect_json(&result, json!({"is_colorable": true, "coloring": [0, 1, 2], "chromatic_number": 3}))?;
    let result = color_graph(&triangle, 2, SolveMode::FirstSolution).map_err(err)?;
    expect_json(&result, json!({"is_colorable": false}))
}

fn subset_sum_found() -> CheckResult {
    expect_json(
        &subset_sum(&[3, 34, 4, 12, 5, 2], 9),
        json!({"has_subset": true, "subset": [3, 4, 2]}),
    )
}

fn knapsack_textbook() -> CheckResult {
    let items = [
        Item { weight: 10, value: 60 },
        Item { weight: 20, value: 100 },
        Item { weight: 30, value: 120 },
    ];
    expect_json(&knapsack(&items, 50), json!({"best_value": 220, "items": [1, 2]}))
}

/// Every built-in fixture.
pub fn suite() -> Suite {
    let mut suite = Suite::new();
    suite.add("automata", "dfa accepts 1001", dfa_accepts);
    suite.add("automata", "dfa rejects 100", dfa_rejects);
    suite.add("automata", "nfa state sets", nfa_tracks_state_sets);
    suite.add("automata", "pda a^n b^n", pda_balanced);
    suite.add("automata", "turing even ones", turing_even_ones);
    suite.add("strings", "naive AABA", naive_matches);
    suite.add("strings", "kmp AABA", kmp_matches);
    suite.add("strings", "kmp lps table", kmp_lps_table);
    suite.add("strings", "regex malformed pattern", regex_reports_bad_pattern);
    suite.add("paging", "fifo", paging_fifo);
    suite.add("paging", "lru", paging_lru);
    suite.add("paging", "optimal", paging_optimal);
    suite.add("paging", "lfu", paging_lfu);
    suite.add("disk", "fcfs", disk_fcfs);
    suite.add("disk", "sstf", disk_sstf);
    suite.add("disk", "scan", disk_scan);
    suite.add("disk", "c-scan", disk_cscan);
    suite.add("disk", "look", disk_look);
    suite.add("disk", "c-look", disk_clook);
    suite.add("backtracking", "4 queens", queens_four);
    suite.add("backtracking", "3 queens", queens_three);
    suite.add("backtracking", "8 queens all", queens_eight_all);
    suite.add("backtracking", "triangle coloring", coloring_triangle);
    suite.add("backtracking", "subset sum", subset_sum_found);
    suite.add("backtracking", "knapsack", knapsack_textbook);
    suite
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fixture_passes() {
        let report = suite().run(None);
        assert!(report.success(), "{:?}", report.failed);
        assert_eq!(report.total(), suite().checks().len());
    }
}
