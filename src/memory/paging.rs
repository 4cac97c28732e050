// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Page replacement.
//!
//! One driver walks the reference string. A reference to a resident page is
//! a hit; otherwise it is a fault and the page goes into the lowest empty
//! frame, or, once every frame is full, into the frame chosen by the
//! policy's [`ReplacementPolicy::victim`]. The frame array keeps the same
//! length for the whole run.

use crate::error::EngineError;
use crate::snapshot::Snapshot;
use crate::trace::Trace;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PagingPolicy {
    Fifo,
    Lru,
    Optimal,
    Lfu,
}

impl PagingPolicy {
    fn state(self, frame_count: usize) -> Box<dyn ReplacementPolicy> {
        match self {
            PagingPolicy::Fifo => Box::new(Fifo::default()),
            PagingPolicy::Lru => Box::new(Lru::default()),
            PagingPolicy::Optimal => Box::new(Optimal),
            PagingPolicy::Lfu => Box::new(Lfu::new(frame_count)),
        }
    }
}

/// One reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStep {
    /// Position in the reference string
    pub time: usize,
    pub page: u32,
    /// Frame contents after this reference
    pub frames: Snapshot<Vec<Option<u32>>>,
    pub hit: bool,
    /// Frame the page was loaded into, on a fault.
    pub loaded_into: Option<usize>,
    /// Page that was replaced, on a fault with every frame full.
    pub evicted: Option<u32>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagingResult {
    pub policy: PagingPolicy,
    pub frame_count: usize,
    pub steps: Trace<PageStep>,
    pub page_faults: usize,
    pub page_hits: usize,
    /// Hits as a percentage of all references (0 for an empty string).
    pub hit_ratio: f64,
}

/// Bookkeeping a replacement policy keeps alongside the frames.
///
/// The driver calls `loaded` after every fault and `hit` after every hit, so
/// a policy sees each reference exactly once.
trait ReplacementPolicy {
    fn hit(&mut self, _frame: usize, _time: usize) {}

    fn loaded(&mut self, _frame: usize, _time: usize) {}

    /// Choose the frame to replace; only called when every frame is full.
    /// `future` is the part of the reference string after the current one.
    fn victim(&mut self, frames: &[Option<u32>], future: &[u32]) -> usize;
}

/// Oldest load goes first. Frames fill in index order, so a rotating index
/// always points at the oldest load.
#[derive(Default)]
struct Fifo {
    next: usize,
}

impl ReplacementPolicy for Fifo {
    fn victim(&mut self, frames: &[Option<u32>], _future: &[u32]) -> usize {
        let victim = self.next;
        self.next = (self.next + 1) % frames.len();
        victim
    }
}

/// Frames in recency order, least recent at the front.
#[derive(Default)]
struct Lru {
    order: VecDeque<usize>,
}

impl Lru {
    fn promote(&mut self, frame: usize) {
        self.order.retain(|&f| f != frame);
        self.order.push_back(frame);
    }
}

impl ReplacementPolicy for Lru {
    fn hit(&mut self, frame: usize, _time: usize) {
        self.promote(frame);
    }

    fn loaded(&mut self, frame: usize, _time: usize) {
        self.promote(frame);
    }

    fn victim(&mut self, _frames: &[Option<u32>], _future: &[u32]) -> usize {
        self.order.front().copied().unwrap_or(0)
    }
}

/// Replace the page used farthest in the future; a page never used again
/// counts as farthest of all. Ties go to the lowest frame.
struct Optimal;

impl ReplacementPolicy for Optimal {
    fn victim(&mut self, frames: &[Option<u32>], future: &[u32]) -> usize {
        let mut victim = 0;
        let mut farthest = 0;
        for (frame, page) in frames.iter().enumerate() {
            let next_use = page
                .and_then(|page| future.iter().position(|&p| p == page))
                .unwrap_or(usize::MAX);
            if frame == 0 || next_use > farthest {
                victim = frame;
                farthest = next_use;
            }
        }
        victim
    }
}

/// Least frequently used, then least recently used, then lowest frame.
/// A page's count starts again at one each time it is loaded.
struct Lfu {
    frequency: Vec<u64>,
    last_used: Vec<usize>,
}

impl Lfu {
    fn new(frame_count: usize) -> Self {
        Self {
            frequency: vec![0; frame_count],
            last_used: vec![0; frame_count],
        }
    }
}

impl ReplacementPolicy for Lfu {
    fn hit(&mut self, frame: usize, time: usize) {
        self.frequency[frame] += 1;
        self.last_used[frame] = time;
    }

    fn loaded(&mut self, frame: usize, time: usize) {
        self.frequency[frame] = 1;
        self.last_used[frame] = time;
    }

    fn victim(&mut self, frames: &[Option<u32>], _future: &[u32]) -> usize {
        (0..frames.len())
            .min_by_key(|&frame| (self.frequency[frame], self.last_used[frame], frame))
            .unwrap_or(0)
    }
}

/// Run `policy` over `pages` with `frame_count` frames.
///
/// ```
/// use algo_trace::memory::{simulate_paging, PagingPolicy};
///
/// let pages = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];
/// let result = simulate_paging(PagingPolicy::Fifo, &pages, 3).unwrap();
/// assert_eq!(result.page_faults, 10);
/// assert_eq!(result.page_hits, 3);
/// ```
pub fn simulate_paging(policy: PagingPolicy, pages: &[u32], frame_count: usize) -> Result<PagingResult, EngineError> {
    if frame_count == 0 {
        return Err(EngineError::ZeroFrames);
    }

    let mut state = policy.state(frame_count);
    let mut frames: Vec<Option<u32>> = vec![None; frame_count];
    let mut steps = Trace::new();
    let (mut page_faults, mut page_hits) = (0, 0);

    for (time, &page) in pages.iter().enumerate() {
        if let Some(frame) = frames.iter().position(|&f| f == Some(page)) {
            page_hits += 1;
            state.hit(frame, time);
            trace!("{}: page {} hit in frame {}", policy, page, frame);
            steps.record(PageStep {
                time,
                page,
                frames: Snapshot::capture(&frames),
                hit: true,
                loaded_into: None,
                evicted: None,
                description: format!("page {} already in frame {}", page, frame),
            });
            continue;
        }

        page_faults += 1;
        let (frame, evicted) = match frames.iter().position(Option::is_none) {
            Some(empty) => (empty, None),
            None => {
                let victim = state.victim(&frames, &pages[time + 1..]);
                (victim, frames[victim])
            }
        };
        frames[frame] = Some(page);
        state.loaded(frame, time);

        let description = match evicted {
            Some(old) => {
                debug!("{}: page {} replaces {} in frame {}", policy, page, old, frame);
                format!("page fault: page {} replaces page {} in frame {}", page, old, frame)
            }
            None => format!("page fault: page {} loaded into empty frame {}", page, frame),
        };
        steps.record(PageStep {
            time,
            page,
            frames: Snapshot::capture(&frames),
            hit: false,
            loaded_into: Some(frame),
            evicted,
            description,
        });
    }

    let hit_ratio = if pages.is_empty() {
        0.0
    } else {
        page_hits as f64 / pages.len() as f64 * 100.0
    };

    Ok(PagingResult {
        policy,
        frame_count,
        steps,
        page_faults,
        page_hits,
        hit_ratio,
    })
}

/// Run every policy on the same reference string.
pub fn compare_page_policies(
    pages: &[u32],
    frame_count: usize,
) -> Result<BTreeMap<PagingPolicy, PagingResult>, EngineError> {
    PagingPolicy::iter()
        .map(|policy| Ok((policy, simulate_paging(policy, pages, frame_count)?)))
        .collect()
}
