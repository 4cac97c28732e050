// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! N-Queens.
//!
//! One queen per row, rows filled top to bottom. A column is valid for the
//! current row iff no queen in a row above shares its column or a diagonal;
//! rows below are still empty so they never need checking.

use super::{run_search, Action, BacktrackStep, SolveMode};
use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::error::EngineError;
use crate::snapshot::Snapshot;
use crate::statistics::{Counters, Statistics};
use crate::trace::Trace;
use crate::trail::Trail;
use log::debug;
use serde::Serialize;

/// Board as the column of the queen in each row, `None` while unplaced.
pub type Board = Vec<Option<usize>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueensResult {
    pub n: usize,
    pub mode: SolveMode,
    /// Each solution as the queen column per row
    pub solutions: Vec<Vec<usize>>,
    pub total_solutions: usize,
    pub found: bool,
    pub steps: Trace<BacktrackStep<Board>>,
    pub statistics: Statistics,
}

impl QueensResult {
    /// The first solution drawn as rows of `Q` and `.`.
    pub fn render(&self) -> Option<Vec<String>> {
        self.solutions.first().map(|columns| {
            columns
                .iter()
                .map(|&col| (0..self.n).map(|c| if c == col { 'Q' } else { '.' }).collect())
                .collect()
        })
    }
}

struct QueensContext {
    n: usize,
    board: Board,
    solutions: Vec<Vec<usize>>,
    steps: Trace<BacktrackStep<Board>>,
    trail: Trail<usize>,
    statistics: Statistics,
}

impl QueensContext {
    fn new(n: usize) -> Self {
        Self {
            n,
            board: vec![None; n],
            solutions: Vec::new(),
            steps: Trace::new(),
            trail: Trail::new(),
            statistics: Statistics::new(),
        }
    }

    fn log(&mut self, action: Action, row: Option<usize>, col: Option<usize>, description: String) {
        self.steps.record(BacktrackStep {
            action,
            target: row,
            value: col.map(|c| c as u64),
            snapshot: Snapshot::capture(&self.board),
            description,
        });
    }

    /// Row of a queen above `row` attacking `(row, col)`.
    fn attacker(&self, row: usize, col: usize) -> Option<usize> {
        (0..row).find(|&r| match self.board[r] {
            Some(c) => c == col || c.abs_diff(col) == row - r,
            None => false,
        })
    }

    fn place(&mut self, row: usize, col: usize) {
        self.board[row] = Some(col);
        self.trail.record(row);
        self.statistics.increment(Counters::Placements);
        self.log(Action::Place, Some(row), Some(col), format!("place queen at ({}, {})", row, col));
    }
}

impl SearchContext for QueensContext {
    type Change = usize;

    fn trail(&mut self) -> &mut Trail<usize> {
        &mut self.trail
    }

    fn undo(&mut self, row: usize) {
        let col = self.board[row].take();
        self.statistics.increment(Counters::Backtracks);
        self.log(Action::Backtrack, Some(row), col, format!("remove queen from row {}", row));
    }

    fn statistics(&mut self) -> &mut Statistics {
        &mut self.statistics
    }
}

#[derive(Debug)]
struct QueenRow;

impl Predicate<QueensContext> for QueenRow {
    fn try_pred(&mut self, ctx: &mut QueensContext, row: usize) -> PredicateResult {
        if row == ctx.n {
            let solution: Vec<usize> = ctx.board.iter().flatten().copied().collect();
            debug!("queens: solution {:?}", solution);
            ctx.log(Action::Solution, None, None, format!("all {} queens placed", ctx.n));
            ctx.solutions.push(solution);
            return PredicateResult::Success;
        }
        PredicateResult::Choices(ctx.n)
    }

    fn retry_pred(&mut self, ctx: &mut QueensContext, row: usize, col: usize) -> PredicateResult {
        ctx.statistics.increment(Counters::Tries);
        ctx.log(Action::Try, Some(row), Some(col), format!("try queen at ({}, {})", row, col));

        if let Some(other) = ctx.attacker(row, col) {
            ctx.statistics.increment(Counters::Conflicts);
            ctx.log(
                Action::Conflict,
                Some(row),
                Some(col),
                format!("({}, {}) is attacked by the queen in row {}", row, col, other),
            );
            return PredicateResult::Failure;
        }

        ctx.place(row, col);
        PredicateResult::SuccessSamePredicate
    }
}

/// Place `n` queens on an `n` x `n` board.
///
/// ```
/// use algo_trace::backtracking::{n_queens, SolveMode};
///
/// let result = n_queens(4, SolveMode::FirstSolution).unwrap();
/// assert_eq!(result.solutions, vec![vec![1, 3, 0, 2]]);
///
/// let all = n_queens(6, SolveMode::AllSolutions).unwrap();
/// assert_eq!(all.total_solutions, 4);
/// ```
pub fn n_queens(n: usize, mode: SolveMode) -> Result<QueensResult, EngineError> {
    if n == 0 {
        return Err(EngineError::EmptyBoard);
    }

    let mut ctx = QueensContext::new(n);
    run_search(&mut ctx, Box::new(QueenRow), mode);

    let total_solutions = ctx.solutions.len();
    if total_solutions == 0 || mode == SolveMode::AllSolutions {
        ctx.log(
            Action::Exhausted,
            None,
            None,
            format!("search complete: {} solution(s)", total_solutions),
        );
    }

    Ok(QueensResult {
        n,
        mode,
        solutions: ctx.solutions,
        total_solutions,
        found: total_solutions > 0,
        steps: ctx.steps,
        statistics: ctx.statistics,
    })
}
