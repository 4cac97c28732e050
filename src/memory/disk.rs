// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Disk head scheduling.
//!
//! Each policy turns a [`DiskRequest`] into the order in which the head
//! visits cylinders. The visited sequence always starts at the initial head
//! position and the seek time is the sum of the absolute distances between
//! consecutive positions; no rotational or transfer cost is modelled.
//!
//! The sweeping policies treat a request at the head's own cylinder as lying
//! in the current direction. SCAN and C-SCAN always run to the boundary
//! they are heading for, and only reverse (SCAN) or jump to the opposite
//! boundary (C-SCAN) when requests remain behind the head. LOOK and C-LOOK
//! turn at the last request instead. The circular jump is a real head
//! movement and is counted in the seek time.

use crate::error::EngineError;
use crate::trace::Trace;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Number of cylinders when a request does not say.
pub const DEFAULT_DISK_SIZE: u32 = 200;

fn default_disk_size() -> u32 {
    DEFAULT_DISK_SIZE
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum DiskPolicy {
    #[strum(serialize = "FCFS")]
    #[serde(rename = "FCFS")]
    Fcfs,
    #[strum(serialize = "SSTF")]
    #[serde(rename = "SSTF")]
    Sstf,
    #[strum(serialize = "SCAN")]
    #[serde(rename = "SCAN")]
    Scan,
    #[strum(serialize = "C-SCAN")]
    #[serde(rename = "C-SCAN")]
    CScan,
    #[strum(serialize = "LOOK")]
    #[serde(rename = "LOOK")]
    Look,
    #[strum(serialize = "C-LOOK")]
    #[serde(rename = "C-LOOK")]
    CLook,
}

/// Initial sweep direction: towards cylinder 0 or towards `disk_size - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskRequest {
    pub queue: Vec<u32>,
    pub head: u32,
    #[serde(default = "default_disk_size")]
    pub disk_size: u32,
    #[serde(default)]
    pub direction: Direction,
}

impl DiskRequest {
    pub fn new(queue: &[u32], head: u32) -> Self {
        Self {
            queue: queue.to_vec(),
            head,
            disk_size: DEFAULT_DISK_SIZE,
            direction: Direction::default(),
        }
    }

    pub fn with_disk_size(mut self, disk_size: u32) -> Self {
        self.disk_size = disk_size;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.head >= self.disk_size {
            return Err(EngineError::HeadOutOfRange {
                head: self.head,
                disk_size: self.disk_size,
            });
        }
        match self.queue.iter().find(|&&r| r >= self.disk_size) {
            Some(&request) => Err(EngineError::RequestOutOfRange {
                request,
                disk_size: self.disk_size,
            }),
            None => Ok(()),
        }
    }

    fn last_cylinder(&self) -> u32 {
        self.disk_size - 1
    }

    /// Requests at or beyond the head in `direction`, nearest first, and the
    /// rest, also nearest first.
    fn split(&self) -> (Vec<u32>, Vec<u32>) {
        let mut ahead: Vec<u32>;
        let mut behind: Vec<u32>;
        match self.direction {
            Direction::Right => {
                ahead = self.queue.iter().copied().filter(|&r| r >= self.head).collect();
                behind = self.queue.iter().copied().filter(|&r| r < self.head).collect();
                ahead.sort_unstable();
                behind.sort_unstable_by(|a, b| b.cmp(a));
            }
            Direction::Left => {
                ahead = self.queue.iter().copied().filter(|&r| r <= self.head).collect();
                behind = self.queue.iter().copied().filter(|&r| r > self.head).collect();
                ahead.sort_unstable_by(|a, b| b.cmp(a));
                behind.sort_unstable();
            }
        }
        (ahead, behind)
    }

    /// The boundary in the sweep direction and the opposite one.
    fn boundaries(&self) -> (u32, u32) {
        match self.direction {
            Direction::Right => (self.last_cylinder(), 0),
            Direction::Left => (0, self.last_cylinder()),
        }
    }
}

/// One head movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeekStep {
    pub from: u32,
    pub to: u32,
    pub distance: u64,
    /// Seek time up to and including this move
    pub cumulative: u64,
    /// Circular return to the other end of the disk
    pub wrap: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskSchedule {
    pub policy: DiskPolicy,
    /// Positions visited, starting with the initial head position
    pub sequence: Vec<u32>,
    pub seek_time: u64,
    pub steps: Trace<SeekStep>,
}

/// Visits after the start, plus the index of a circular jump target.
#[derive(Default)]
struct Plan {
    visits: Vec<u32>,
    wrap_at: Option<usize>,
}

impl Plan {
    fn position(&self, head: u32) -> u32 {
        self.visits.last().copied().unwrap_or(head)
    }

    fn visit_boundary(&mut self, head: u32, boundary: u32) {
        if self.position(head) != boundary {
            self.visits.push(boundary);
        }
    }

    fn jump(&mut self, head: u32, target: u32) {
        if self.position(head) != target {
            self.wrap_at = Some(self.visits.len());
            self.visits.push(target);
        }
    }
}

fn plan_sstf(request: &DiskRequest) -> Plan {
    let mut pending = request.queue.clone();
    let mut plan = Plan::default();
    while !pending.is_empty() {
        let current = plan.position(request.head);
        let nearest = pending
            .iter()
            .enumerate()
            .min_by_key(|(_, &r)| r.abs_diff(current))
            .map(|(i, _)| i)
            .unwrap_or(0);
        plan.visits.push(pending.remove(nearest));
    }
    plan
}

fn plan_scan(request: &DiskRequest, circular: bool) -> Plan {
    let mut plan = Plan::default();
    if request.queue.is_empty() {
        return plan;
    }
    let (ahead, mut behind) = request.split();
    let (near, far) = request.boundaries();

    plan.visits.extend(&ahead);
    plan.visit_boundary(request.head, near);
    if !behind.is_empty() {
        if circular {
            behind.reverse();
            plan.jump(request.head, far);
            if behind.first() == Some(&far) {
                behind.remove(0);
            }
        }
        plan.visits.extend(behind);
    }
    plan
}

fn plan_look(request: &DiskRequest, circular: bool) -> Plan {
    let (ahead, mut behind) = request.split();
    let mut plan = Plan::default();
    plan.visits.extend(ahead);
    if circular && !behind.is_empty() {
        behind.reverse();
        plan.wrap_at = Some(plan.visits.len());
    }
    plan.visits.extend(behind);
    plan
}

fn plan(policy: DiskPolicy, request: &DiskRequest) -> Plan {
    match policy {
        DiskPolicy::Fcfs => Plan {
            visits: request.queue.clone(),
            wrap_at: None,
        },
        DiskPolicy::Sstf => plan_sstf(request),
        DiskPolicy::Scan => plan_scan(request, false),
        DiskPolicy::CScan => plan_scan(request, true),
        DiskPolicy::Look => plan_look(request, false),
        DiskPolicy::CLook => plan_look(request, true),
    }
}

/// Order `request.queue` under `policy`.
///
/// ```
/// use algo_trace::memory::{schedule_disk, DiskPolicy, DiskRequest};
///
/// let request = DiskRequest::new(&[98, 183, 37, 122, 14, 124, 65, 67], 53);
/// let fcfs = schedule_disk(DiskPolicy::Fcfs, &request).unwrap();
/// assert_eq!(fcfs.seek_time, 640);
/// let sstf = schedule_disk(DiskPolicy::Sstf, &request).unwrap();
/// assert_eq!(sstf.sequence, vec![53, 65, 67, 37, 14, 98, 122, 124, 183]);
/// ```
pub fn schedule_disk(policy: DiskPolicy, request: &DiskRequest) -> Result<DiskSchedule, EngineError> {
    request.validate()?;
    let Plan { visits, wrap_at } = plan(policy, request);

    let mut sequence = Vec::with_capacity(visits.len() + 1);
    sequence.push(request.head);
    let mut steps = Trace::new();
    let mut seek_time = 0u64;

    for (i, &to) in visits.iter().enumerate() {
        let from = sequence[sequence.len() - 1];
        let distance = u64::from(from.abs_diff(to));
        seek_time += distance;
        steps.record(SeekStep {
            from,
            to,
            distance,
            cumulative: seek_time,
            wrap: wrap_at == Some(i),
        });
        sequence.push(to);
    }

    debug!("{}: {} moves, seek time {}", policy, steps.len(), seek_time);
    Ok(DiskSchedule {
        policy,
        sequence,
        seek_time,
        steps,
    })
}

/// Schedule the same request under every policy.
pub fn compare_disk_policies(request: &DiskRequest) -> Result<BTreeMap<DiskPolicy, DiskSchedule>, EngineError> {
    DiskPolicy::iter()
        .map(|policy| Ok((policy, schedule_disk(policy, request)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> DiskRequest {
        DiskRequest::new(&[98, 183, 37, 122, 14, 124, 65, 67], 53)
    }

    fn sequence(policy: DiskPolicy, request: &DiskRequest) -> Vec<u32> {
        schedule_disk(policy, request).unwrap().sequence
    }

    #[test]
    fn test_scan_right_reaches_boundary() {
        let schedule = schedule_disk(DiskPolicy::Scan, &textbook()).unwrap();
        assert_eq!(schedule.sequence, vec![53, 65, 67, 98, 122, 124, 183, 199, 37, 14]);
        assert_eq!(schedule.seek_time, 146 + 185);
    }

    #[test]
    fn test_scan_left() {
        let request = textbook().with_direction(Direction::Left);
        let schedule = schedule_disk(DiskPolicy::Scan, &request).unwrap();
        assert_eq!(schedule.sequence, vec![53, 37, 14, 0, 65, 67, 98, 122, 124, 183]);
        assert_eq!(schedule.seek_time, 53 + 183);
    }

    #[test]
    fn test_cscan_wraps_to_zero() {
        let schedule = schedule_disk(DiskPolicy::CScan, &textbook()).unwrap();
        assert_eq!(schedule.sequence, vec![53, 65, 67, 98, 122, 124, 183, 199, 0, 14, 37]);
        assert_eq!(schedule.seek_time, 146 + 199 + 37);
        let wraps: Vec<&SeekStep> = schedule.steps.iter().filter(|s| s.wrap).collect();
        assert_eq!(wraps.len(), 1);
        assert_eq!((wraps[0].from, wraps[0].to), (199, 0));
    }

    #[test]
    fn test_look_turns_at_last_request() {
        assert_eq!(
            sequence(DiskPolicy::Look, &textbook()),
            vec![53, 65, 67, 98, 122, 124, 183, 37, 14]
        );
        assert_eq!(
            sequence(DiskPolicy::CLook, &textbook()),
            vec![53, 65, 67, 98, 122, 124, 183, 14, 37]
        );
    }

    #[test]
    fn test_clook_left_jumps_to_highest() {
        let request = textbook().with_direction(Direction::Left);
        assert_eq!(
            sequence(DiskPolicy::CLook, &request),
            vec![53, 37, 14, 183, 124, 122, 98, 67, 65]
        );
    }

    #[test]
    fn test_scan_without_requests_behind_stops_at_boundary() {
        let request = DiskRequest::new(&[60, 70], 50).with_disk_size(100);
        assert_eq!(sequence(DiskPolicy::Scan, &request), vec![50, 60, 70, 99]);
        assert_eq!(sequence(DiskPolicy::CScan, &request), vec![50, 60, 70, 99]);
    }

    #[test]
    fn test_boundary_request_not_repeated() {
        let request = DiskRequest::new(&[199, 10], 100);
        assert_eq!(sequence(DiskPolicy::Scan, &request), vec![100, 199, 10]);
        let request = DiskRequest::new(&[199, 0, 10], 100);
        assert_eq!(sequence(DiskPolicy::CScan, &request), vec![100, 199, 0, 10]);
    }

    #[test]
    fn test_empty_queue_does_not_move() {
        let request = DiskRequest::new(&[], 42);
        for policy in DiskPolicy::iter() {
            let schedule = schedule_disk(policy, &request).unwrap();
            assert_eq!(schedule.sequence, vec![42], "{}", policy);
            assert_eq!(schedule.seek_time, 0);
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        let request = DiskRequest::new(&[10], 250);
        assert!(matches!(
            schedule_disk(DiskPolicy::Fcfs, &request),
            Err(EngineError::HeadOutOfRange { head: 250, disk_size: 200 })
        ));
        let request = DiskRequest::new(&[10, 200], 5);
        assert!(matches!(
            schedule_disk(DiskPolicy::Fcfs, &request),
            Err(EngineError::RequestOutOfRange { request: 200, .. })
        ));
    }

    #[test]
    fn test_comparison_matches_single_runs() {
        fn same<T: Eq>(a: &T, b: &T) -> bool {
            a == b
        }
        let request = textbook().with_direction(Direction::Left);
        for (policy, schedule) in compare_disk_policies(&request).unwrap() {
            assert!(same(&schedule, &schedule_disk(policy, &request).unwrap()), "{}", policy);
        }
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(DiskPolicy::CScan.to_string(), "C-SCAN");
        let all = compare_disk_policies(&textbook()).unwrap();
        assert_eq!(all.len(), 6);
    }
}
