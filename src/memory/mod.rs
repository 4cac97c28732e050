// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Operating-system memory and disk algorithms.
//!
//! [`paging`] replays a page reference string against a fixed number of
//! frames under FIFO, LRU, Optimal or LFU replacement. [`disk`] orders a
//! queue of cylinder requests under the six classic head-scheduling policies.

pub mod disk;
pub mod paging;

pub use disk::{
    compare_disk_policies, schedule_disk, Direction, DiskPolicy, DiskRequest, DiskSchedule, SeekStep,
    DEFAULT_DISK_SIZE,
};
pub use paging::{compare_page_policies, simulate_paging, PageStep, PagingPolicy, PagingResult};
