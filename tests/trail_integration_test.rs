// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for the trail-based backtracking system.
//!
//! These tests verify that the trail works correctly when integrated with a
//! SearchContext, demonstrating the rewind behavior the search engine
//! depends on.

mod common;

use algo_trace::SearchContext;
use common::DigitsContext;

fn choose(ctx: &mut DigitsContext, digit: usize) {
    ctx.chosen.push(digit);
    ctx.trail.record(digit);
}

#[test]
fn test_simple_rewind() {
    let mut ctx = DigitsContext::default();

    let checkpoint = ctx.trail.checkpoint();
    choose(&mut ctx, 7);
    assert_eq!(ctx.chosen, vec![7]);
    assert_eq!(ctx.trail.len(), 1);

    ctx.rewind_to(checkpoint);
    assert!(ctx.chosen.is_empty());
    assert_eq!(ctx.trail.len(), 0);
    assert_eq!(ctx.undone, 1);
}

#[test]
fn test_nested_checkpoints() {
    let mut ctx = DigitsContext::default();

    let cp1 = ctx.trail.checkpoint();
    assert_eq!(cp1, 0);
    choose(&mut ctx, 1);
    choose(&mut ctx, 2);
    choose(&mut ctx, 3);

    let cp2 = ctx.trail.checkpoint();
    assert_eq!(cp2, 3);
    choose(&mut ctx, 4);

    ctx.rewind_to(cp2);
    assert_eq!(ctx.chosen, vec![1, 2, 3]);

    ctx.rewind_to(cp1);
    assert!(ctx.chosen.is_empty());
    assert_eq!(ctx.undone, 4);
}

#[test]
fn test_rewind_to_current_is_noop() {
    let mut ctx = DigitsContext::default();
    choose(&mut ctx, 5);
    let checkpoint = ctx.trail.checkpoint();

    ctx.rewind_to(checkpoint);
    assert_eq!(ctx.chosen, vec![5]);
    assert_eq!(ctx.undone, 0);
}

#[test]
fn test_since_lists_changes_in_order() {
    let mut ctx = DigitsContext::default();
    choose(&mut ctx, 9);
    let checkpoint = ctx.trail.checkpoint();
    choose(&mut ctx, 8);
    choose(&mut ctx, 6);

    assert_eq!(ctx.trail.since(checkpoint), &[8, 6]);
    assert_eq!(ctx.trail.since(0), &[9, 8, 6]);
}
