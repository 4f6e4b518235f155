//! Mutable state of a single scheduling run.

use chrono::NaiveDate;

use crate::interner::TaskIdx;
use crate::models::ScheduledTask;

/// Progress of one run of the scheduling loop.
///
/// Owned by a single `TaskScheduler::schedule` call and dropped when it
/// returns, so nothing survives between runs.
#[derive(Clone, Debug)]
pub struct SchedulerState {
    /// completed[idx] is true once the task at input position idx is placed
    completed: Vec<bool>,
    completed_count: usize,
    /// Earliest date the next task may start. `None` once the cursor has run
    /// past the last representable date.
    pub cursor: Option<NaiveDate>,
    /// Append-only, in scheduling order
    pub result: Vec<ScheduledTask>,
    pub fallback_picks: usize,
    pub rewinds: usize,
}

impl SchedulerState {
    pub fn new(task_count: usize, start_date: NaiveDate) -> Self {
        Self {
            completed: vec![false; task_count],
            completed_count: 0,
            cursor: Some(start_date),
            result: Vec::with_capacity(task_count),
            fallback_picks: 0,
            rewinds: 0,
        }
    }

    #[inline]
    pub fn is_completed(&self, idx: TaskIdx) -> bool {
        self.completed[idx as usize]
    }

    pub fn is_done(&self) -> bool {
        self.completed_count == self.completed.len()
    }

    pub fn remaining(&self) -> usize {
        self.completed.len() - self.completed_count
    }

    /// Record a placed task and move the cursor to the day after it ends.
    pub fn complete(&mut self, idx: TaskIdx, scheduled: ScheduledTask) {
        debug_assert!(!self.completed[idx as usize], "task scheduled twice");
        self.completed[idx as usize] = true;
        self.completed_count += 1;
        self.cursor = scheduled.scheduled_end_date.succ_opt();
        self.result.push(scheduled);
    }
}
