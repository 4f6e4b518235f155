//! Candidate ordering for the scheduler.
//!
//! Candidates are ranked by:
//! 1. due date, earliest first, with tasks lacking a due date last
//! 2. estimated hours, smallest first
//! 3. position in the input list

use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::interner::TaskIdx;
use crate::models::TaskDescriptor;

/// Sort key for a candidate task (lower = scheduled sooner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityKey {
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: i32,
    pub idx: TaskIdx,
}

impl PriorityKey {
    pub fn for_task(idx: TaskIdx, task: &TaskDescriptor) -> Self {
        Self {
            due_date: task.due_date,
            estimated_hours: task.estimated_hours,
            idx,
        }
    }
}

/// Absent due dates sort after every present one.
fn cmp_due_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_due_dates(self.due_date, other.due_date)
            .then(self.estimated_hours.cmp(&other.estimated_hours))
            .then(self.idx.cmp(&other.idx))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort candidate ids into scheduling order.
pub fn sort_candidates(candidates: &[TaskIdx], tasks: &[TaskDescriptor]) -> Vec<TaskIdx> {
    let mut keys: Vec<PriorityKey> = candidates
        .iter()
        .map(|&idx| PriorityKey::for_task(idx, &tasks[idx as usize]))
        .collect();

    // Keys are unique through idx, so an unstable sort is deterministic
    keys.sort_unstable();

    keys.into_iter().map(|k| k.idx).collect()
}
