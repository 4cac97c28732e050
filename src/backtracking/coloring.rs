// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Graph coloring with at most `k` colors.
//!
//! Vertices are colored in index order with colors `0..k`. A color is valid
//! for a vertex iff no adjacent vertex already holds it. The reported
//! chromatic number is the number of colors the first coloring actually
//! uses (largest color + 1); it is an upper bound, not a proven minimum.

use super::{run_search, Action, BacktrackStep, SolveMode};
use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::error::EngineError;
use crate::snapshot::Snapshot;
use crate::statistics::{Counters, Statistics};
use crate::trace::Trace;
use crate::trail::Trail;
use serde::Serialize;

/// Color per vertex, `None` while uncolored.
pub type Coloring = Vec<Option<usize>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoringResult {
    pub is_colorable: bool,
    /// First valid coloring found
    pub coloring: Option<Vec<usize>>,
    pub chromatic_number: usize,
    /// Every valid coloring (only the first in first-solution mode)
    pub solutions: Vec<Vec<usize>>,
    pub steps: Trace<BacktrackStep<Coloring>>,
    pub statistics: Statistics,
}

struct ColoringContext {
    adjacency: Vec<Vec<u8>>,
    colors: usize,
    coloring: Coloring,
    solutions: Vec<Vec<usize>>,
    steps: Trace<BacktrackStep<Coloring>>,
    trail: Trail<usize>,
    statistics: Statistics,
}

impl ColoringContext {
    fn log(&mut self, action: Action, vertex: Option<usize>, color: Option<usize>, description: String) {
        self.steps.record(BacktrackStep {
            action,
            target: vertex,
            value: color.map(|c| c as u64),
            snapshot: Snapshot::capture(&self.coloring),
            description,
        });
    }

    /// A neighbour of `vertex` already colored `color`.
    fn clash(&self, vertex: usize, color: usize) -> Option<usize> {
        (0..self.coloring.len()).find(|&u| self.adjacency[vertex][u] != 0 && self.coloring[u] == Some(color))
    }
}

impl SearchContext for ColoringContext {
    type Change = usize;

    fn trail(&mut self) -> &mut Trail<usize> {
        &mut self.trail
    }

    fn undo(&mut self, vertex: usize) {
        let color = self.coloring[vertex].take();
        self.statistics.increment(Counters::Backtracks);
        self.log(Action::Backtrack, Some(vertex), color, format!("uncolor vertex {}", vertex));
    }

    fn statistics(&mut self) -> &mut Statistics {
        &mut self.statistics
    }
}

#[derive(Debug)]
struct ColorVertex;

impl Predicate<ColoringContext> for ColorVertex {
    fn try_pred(&mut self, ctx: &mut ColoringContext, vertex: usize) -> PredicateResult {
        if vertex == ctx.coloring.len() {
            let solution: Vec<usize> = ctx.coloring.iter().flatten().copied().collect();
            ctx.log(Action::Solution, None, None, format!("valid coloring {:?}", solution));
            ctx.solutions.push(solution);
            return PredicateResult::Success;
        }
        PredicateResult::Choices(ctx.colors)
    }

    fn retry_pred(&mut self, ctx: &mut ColoringContext, vertex: usize, color: usize) -> PredicateResult {
        ctx.statistics.increment(Counters::Tries);
        ctx.log(Action::Try, Some(vertex), Some(color), format!("try color {} on vertex {}", color, vertex));

        if let Some(neighbour) = ctx.clash(vertex, color) {
            ctx.statistics.increment(Counters::Conflicts);
            ctx.log(
                Action::Conflict,
                Some(vertex),
                Some(color),
                format!("vertex {} already has color {}", neighbour, color),
            );
            return PredicateResult::Failure;
        }

        ctx.coloring[vertex] = Some(color);
        ctx.trail.record(vertex);
        ctx.statistics.increment(Counters::Placements);
        ctx.log(Action::Place, Some(vertex), Some(color), format!("color vertex {} with {}", vertex, color));
        PredicateResult::SuccessSamePredicate
    }
}

fn validate(adjacency: &[Vec<u8>]) -> Result<(), EngineError> {
    let expected = adjacency.len();
    match adjacency.iter().position(|row| row.len() != expected) {
        Some(row) => Err(EngineError::AdjacencyNotSquare {
            row,
            len: adjacency[row].len(),
            expected,
        }),
        None => Ok(()),
    }
}

/// Color the graph given by `adjacency` (non-zero entry = edge) with at
/// most `colors` colors.
///
/// ```
/// use algo_trace::backtracking::{color_graph, SolveMode};
///
/// let triangle = vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]];
/// assert!(!color_graph(&triangle, 2, SolveMode::FirstSolution).unwrap().is_colorable);
/// let result = color_graph(&triangle, 3, SolveMode::FirstSolution).unwrap();
/// assert_eq!(result.coloring, Some(vec![0, 1, 2]));
/// assert_eq!(result.chromatic_number, 3);
/// ```
pub fn color_graph(adjacency: &[Vec<u8>], colors: usize, mode: SolveMode) -> Result<ColoringResult, EngineError> {
    validate(adjacency)?;

    let mut ctx = ColoringContext {
        adjacency: adjacency.to_vec(),
        colors,
        coloring: vec![None; adjacency.len()],
        solutions: Vec::new(),
        steps: Trace::new(),
        trail: Trail::new(),
        statistics: Statistics::new(),
    };
    run_search(&mut ctx, Box::new(ColorVertex), mode);

    if ctx.solutions.is_empty() || mode == SolveMode::AllSolutions {
        let found = ctx.solutions.len();
        ctx.log(Action::Exhausted, None, None, format!("search complete: {} coloring(s)", found));
    }

    let coloring = ctx.solutions.first().cloned();
    let chromatic_number = coloring
        .as_ref()
        .and_then(|c| c.iter().max())
        .map_or(0, |max| max + 1);

    Ok(ColoringResult {
        is_colorable: coloring.is_some(),
        coloring,
        chromatic_number,
        solutions: ctx.solutions,
        steps: ctx.steps,
        statistics: ctx.statistics,
    })
}
