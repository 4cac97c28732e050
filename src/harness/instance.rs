// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Problem instances loaded from JSON.
//!
//! The `"algorithm"` key selects the engine; the remaining keys are its
//! input. For example:
//!
//! ```json
//! {"algorithm": "disk", "policy": "C-SCAN", "queue": [98, 183, 37], "head": 53}
//! ```
//!
//! Paging and disk instances without a `policy` run every policy and return
//! the comparison map.

use crate::automata::{
    simulate_dfa, simulate_nfa, simulate_pda, simulate_turing, AutomatonDefinition, PdaDefinition,
    TuringDefinition,
};
use crate::backtracking::{color_graph, knapsack, n_queens, subset_sum, Item, SolveMode};
use crate::error::EngineError;
use crate::memory::{
    compare_disk_policies, compare_page_policies, schedule_disk, simulate_paging, DiskPolicy, DiskRequest,
    PagingPolicy,
};
use crate::strings::{kmp_search, naive_search, regex_search};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Instance {
    Dfa {
        definition: AutomatonDefinition,
        input: String,
    },
    Nfa {
        definition: AutomatonDefinition,
        input: String,
    },
    Pda {
        definition: PdaDefinition,
        input: String,
    },
    Turing {
        definition: TuringDefinition,
        input: String,
    },
    Naive {
        text: String,
        pattern: String,
    },
    Kmp {
        text: String,
        pattern: String,
    },
    Regex {
        text: String,
        pattern: String,
    },
    Paging {
        #[serde(default)]
        policy: Option<PagingPolicy>,
        pages: Vec<u32>,
        frames: usize,
    },
    Disk {
        #[serde(default)]
        policy: Option<DiskPolicy>,
        #[serde(flatten)]
        request: DiskRequest,
    },
    Queens {
        n: usize,
        #[serde(default)]
        mode: SolveMode,
    },
    Coloring {
        adjacency: Vec<Vec<u8>>,
        colors: usize,
        #[serde(default)]
        mode: SolveMode,
    },
    SubsetSum {
        numbers: Vec<u64>,
        target: u64,
    },
    Knapsack {
        items: Vec<Item>,
        capacity: u64,
    },
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, EngineError> {
    Ok(serde_json::to_value(value)?)
}

impl Instance {
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Name of the selected engine, as spelled in JSON.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Instance::Dfa { .. } => "dfa",
            Instance::Nfa { .. } => "nfa",
            Instance::Pda { .. } => "pda",
            Instance::Turing { .. } => "turing",
            Instance::Naive { .. } => "naive",
            Instance::Kmp { .. } => "kmp",
            Instance::Regex { .. } => "regex",
            Instance::Paging { .. } => "paging",
            Instance::Disk { .. } => "disk",
            Instance::Queens { .. } => "queens",
            Instance::Coloring { .. } => "coloring",
            Instance::SubsetSum { .. } => "subset_sum",
            Instance::Knapsack { .. } => "knapsack",
        }
    }

    /// Run the instance and return its result as JSON.
    pub fn run(&self) -> Result<Value, EngineError> {
        debug!("running {} instance", self.algorithm());
        match self {
            Instance::Dfa { definition, input } => to_json(&simulate_dfa(definition, input)?),
            Instance::Nfa { definition, input } => to_json(&simulate_nfa(definition, input)?),
            Instance::Pda { definition, input } => to_json(&simulate_pda(definition, input)?),
            Instance::Turing { definition, input } => to_json(&simulate_turing(definition, input)?),
            Instance::Naive { text, pattern } => to_json(&naive_search(text, pattern)),
            Instance::Kmp { text, pattern } => to_json(&kmp_search(text, pattern)),
            Instance::Regex { text, pattern } => to_json(&regex_search(text, pattern)),
            Instance::Paging {
                policy: Some(policy),
                pages,
                frames,
            } => to_json(&simulate_paging(*policy, pages, *frames)?),
            Instance::Paging {
                policy: None,
                pages,
                frames,
            } => to_json(&compare_page_policies(pages, *frames)?),
            Instance::Disk {
                policy: Some(policy),
                request,
            } => to_json(&schedule_disk(*policy, request)?),
            Instance::Disk { policy: None, request } => to_json(&compare_disk_policies(request)?),
            Instance::Queens { n, mode } => to_json(&n_queens(*n, *mode)?),
            Instance::Coloring {
                adjacency,
                colors,
                mode,
            } => to_json(&color_graph(adjacency, *colors, *mode)?),
            Instance::SubsetSum { numbers, target } => to_json(&subset_sum(numbers, *target)),
            Instance::Knapsack { items, capacity } => to_json(&knapsack(items, *capacity)),
        }
    }
}
