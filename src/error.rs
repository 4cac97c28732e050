// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Errors for malformed problem instances.
//!
//! Rejections (no transition, no placement, exhausted search) are ordinary
//! outcomes carried in the returned trace. The variants here are caller
//! contract violations: the engine refuses to run rather than produce a
//! misleading verdict.

use thiserror::Error;

/// A problem instance that the engines refuse to simulate.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("automaton has no start state")]
    MissingStartState,

    #[error("automaton has an empty accept-state set")]
    EmptyAcceptStates,

    #[error("transition symbol {symbol:?} is not a single character")]
    InvalidSymbol { symbol: String },

    #[error("state {state:?} has more than one transition on {symbol:?}")]
    Nondeterministic { state: String, symbol: char },

    #[error("page replacement needs at least one frame")]
    ZeroFrames,

    #[error("head position {head} lies outside a disk of {disk_size} cylinders")]
    HeadOutOfRange { head: u32, disk_size: u32 },

    #[error("request {request} lies outside a disk of {disk_size} cylinders")]
    RequestOutOfRange { request: u32, disk_size: u32 },

    #[error("board size must be at least 1")]
    EmptyBoard,

    #[error("adjacency row {row} has {len} entries, expected {expected}")]
    AdjacencyNotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("malformed JSON instance: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = EngineError::Nondeterministic {
            state: "q0".into(),
            symbol: 'a',
        };
        assert_eq!(err.to_string(), "state \"q0\" has more than one transition on 'a'");

        let err = EngineError::HeadOutOfRange {
            head: 250,
            disk_size: 200,
        };
        assert!(err.to_string().contains("250"));
    }
}
