// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for the backtracking solvers.
//!
//! These tests validate:
//! - Every reported solution is valid for its problem
//! - Every backtrack step removes exactly one committed decision
//! - Exhausted searches say so in their final step
//! - Solution counts match the known sequences

mod common;

use algo_trace::backtracking::{
    color_graph, committed, knapsack, n_queens, subset_sum, Action, Item, NodeAction, SolveMode,
};
use algo_trace::statistics::Counters;
use common::{assert_undo_invariant, sequence};
use rstest::rstest;

fn non_attacking(columns: &[usize]) -> bool {
    columns.iter().enumerate().all(|(r1, &c1)| {
        columns
            .iter()
            .enumerate()
            .skip(r1 + 1)
            .all(|(r2, &c2)| c1 != c2 && r2 - r1 != c1.abs_diff(c2))
    })
}

fn proper_coloring(adjacency: &[Vec<u8>], coloring: &[usize]) -> bool {
    adjacency.iter().enumerate().all(|(u, row)| {
        row.iter()
            .enumerate()
            .all(|(v, &edge)| edge == 0 || coloring[u] != coloring[v])
    })
}

fn cycle(n: usize) -> Vec<Vec<u8>> {
    let mut adjacency = vec![vec![0; n]; n];
    for u in 0..n {
        let v = (u + 1) % n;
        adjacency[u][v] = 1;
        adjacency[v][u] = 1;
    }
    adjacency
}

#[rstest]
#[case(1, 1)]
#[case(2, 0)]
#[case(3, 0)]
#[case(4, 2)]
#[case(6, 4)]
#[case(7, 40)]
fn test_queens_counts(#[case] n: usize, #[case] count: usize) {
    let result = n_queens(n, SolveMode::AllSolutions).unwrap();
    assert_eq!(result.total_solutions, count);
    assert!(result.solutions.iter().all(|solution| non_attacking(solution)));
    assert_undo_invariant(&result.steps, |board| committed(board));
    assert_eq!(result.steps.last().unwrap().action, Action::Exhausted);
}

#[rstest]
fn test_queens_first_solution_valid(#[values(4, 5, 6, 8)] n: usize) {
    let result = n_queens(n, SolveMode::FirstSolution).unwrap();
    assert!(result.found);
    assert_eq!(result.solutions.len(), 1);
    assert!(non_attacking(&result.solutions[0]));
    assert_eq!(result.steps.last().unwrap().action, Action::Solution);
    assert_undo_invariant(&result.steps, |board| committed(board));
}

#[test]
fn test_queens_four_first_solution() {
    let result = n_queens(4, SolveMode::FirstSolution).unwrap();
    assert_eq!(result.solutions, vec![vec![1, 3, 0, 2]]);
    let board = result.render().unwrap();
    assert_eq!(board[0], ".Q..");
    assert!(result.statistics.get(Counters::Backtracks) > 0);
}

#[rstest]
#[case(3, 2, false)]
#[case(3, 3, true)]
#[case(4, 2, true)]
#[case(5, 2, false)]
#[case(5, 3, true)]
fn test_cycle_coloring(#[case] n: usize, #[case] colors: usize, #[case] colorable: bool) {
    let adjacency = cycle(n);
    let result = color_graph(&adjacency, colors, SolveMode::FirstSolution).unwrap();
    assert_eq!(result.is_colorable, colorable);
    if let Some(coloring) = &result.coloring {
        assert!(proper_coloring(&adjacency, coloring));
    }
    assert_undo_invariant(&result.steps, |coloring| committed(coloring));
}

#[test]
fn test_all_colorings_of_square() {
    // proper 3-colorings of a 4-cycle: (k-1)^n + (-1)^n (k-1) = 16 + 2
    let adjacency = cycle(4);
    let result = color_graph(&adjacency, 3, SolveMode::AllSolutions).unwrap();
    assert_eq!(result.solutions.len(), 18);
    assert!(result.solutions.iter().all(|coloring| proper_coloring(&adjacency, coloring)));
    assert_undo_invariant(&result.steps, |coloring| committed(coloring));
}

#[test]
fn test_subset_sum_against_brute_force() {
    for seed in 0..30 {
        let numbers = sequence(seed, 8, 20);
        let target = sequence(seed + 500, 1, 60)[0];
        let reachable = (0u32..1 << numbers.len()).any(|mask| {
            numbers
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, n)| n)
                .sum::<u64>()
                == target
        });

        let result = subset_sum(&numbers, target);
        assert_eq!(result.has_subset, reachable, "{:?} -> {}", numbers, target);
        if result.has_subset {
            assert_eq!(result.subset.iter().sum::<u64>(), target);
            let picked: Vec<u64> = result.indices.iter().map(|&i| numbers[i]).collect();
            assert_eq!(picked, result.subset);
        } else {
            assert_eq!(result.steps.last().unwrap().action, Action::Exhausted);
        }
        assert_undo_invariant(&result.steps, |subset| subset.len());
    }
}

#[test]
fn test_knapsack_backtracks_remove_one_item() {
    let items: Vec<Item> = sequence(3, 9, 30)
        .into_iter()
        .zip(sequence(4, 9, 50))
        .map(|(weight, value)| Item { weight: weight + 1, value })
        .collect();
    let result = knapsack(&items, 60);

    let steps = result.steps.as_slice();
    for pair in steps.windows(2) {
        if pair[1].action == NodeAction::Backtrack {
            assert_eq!(pair[1].selection.len() + 1, pair[0].selection.len());
        }
    }
    assert_eq!(steps.last().unwrap().action, NodeAction::Complete);
    let weight: u64 = result.items.iter().map(|&i| items[i].weight).sum();
    let value: u64 = result.items.iter().map(|&i| items[i].value).sum();
    assert!(weight <= 60);
    assert_eq!(weight, result.best_weight);
    assert_eq!(value, result.best_value);
}
