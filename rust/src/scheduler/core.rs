//! Core scheduling loop.

use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use thiserror::Error;

use crate::config::SchedulerConfig;
use crate::interner::{TaskIdx, TitleInterner};
use crate::models::{ScheduleResult, ScheduledTask, TaskDescriptor};
use crate::sorting::sort_candidates;
use crate::{log_changes, log_checks, log_debug};

use super::state::SchedulerState;

/// Errors that can occur during scheduling.
///
/// Cycles and dependencies on unknown titles are not errors; those tasks are
/// still scheduled through the fallback pick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Duplicate task title: {0}")]
    DuplicateTitle(String),
    #[error("Schedule for task {0:?} falls outside the supported date range")]
    DateOutOfRange(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Greedy single-timeline scheduler.
///
/// Each iteration picks one task:
/// 1. among tasks whose dependencies are all scheduled, the first by
///    due date, then estimated hours, then input order
/// 2. if no task is ready (cycles or unknown dependency titles), the first
///    of all remaining tasks by the same ordering
///
/// The picked task starts at the cursor, or on its due date when the cursor
/// has already passed it, and the cursor moves to the day after its end.
pub struct TaskScheduler {
    tasks: Vec<TaskDescriptor>,
    /// Per task, the interned id of each dependency; `None` for titles that
    /// match no task in this run
    resolved_dependencies: Vec<Vec<Option<TaskIdx>>>,
    start_date: NaiveDate,
    config: SchedulerConfig,
}

impl TaskScheduler {
    /// Create a scheduler for one run.
    ///
    /// Fails if two tasks share a title or the configuration is unusable.
    pub fn new(
        tasks: Vec<TaskDescriptor>,
        start_date: NaiveDate,
        config: SchedulerConfig,
    ) -> Result<Self, ScheduleError> {
        if config.hours_per_work_day == 0 {
            return Err(ScheduleError::InvalidConfig(
                "hours_per_work_day must be greater than zero".to_string(),
            ));
        }
        if tasks.len() > TaskIdx::MAX as usize {
            return Err(ScheduleError::InvalidConfig(format!(
                "too many tasks: {}",
                tasks.len()
            )));
        }

        let mut interner = TitleInterner::with_capacity(tasks.len());
        for task in &tasks {
            if interner.insert(&task.title).is_err() {
                return Err(ScheduleError::DuplicateTitle(task.title.clone()));
            }
        }

        let resolved_dependencies = tasks
            .iter()
            .map(|task| {
                task.dependencies
                    .iter()
                    .map(|title| interner.get(title))
                    .collect()
            })
            .collect();

        Ok(Self {
            tasks,
            resolved_dependencies,
            start_date,
            config,
        })
    }

    /// Run the scheduling loop.
    pub fn schedule(&self) -> Result<ScheduleResult, ScheduleError> {
        let verbosity = self.config.verbosity;
        let mut state = SchedulerState::new(self.tasks.len(), self.start_date);

        log_debug!(
            verbosity,
            "Scheduling {} tasks from {}",
            self.tasks.len(),
            self.start_date
        );

        while !state.is_done() {
            let ready = self.ready_candidates(&state);

            let candidates = if ready.is_empty() {
                state.fallback_picks += 1;
                let remaining = self.remaining_candidates(&state);
                log_changes!(
                    verbosity,
                    "No task ready, ignoring unmet dependencies for {} remaining tasks",
                    remaining.len()
                );
                remaining
            } else {
                ready
            };

            let ordered = sort_candidates(&candidates, &self.tasks);
            log_checks!(
                verbosity,
                "Candidates: [{}]",
                ordered
                    .iter()
                    .map(|&idx| self.tasks[idx as usize].title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            // Non-empty: at least one task remains while the loop runs
            let Some(&picked) = ordered.first() else {
                break;
            };

            let scheduled = self.place(picked, &mut state)?;
            log_changes!(
                verbosity,
                "Scheduled {:?} from {} to {}",
                scheduled.title,
                scheduled.scheduled_start_date,
                scheduled.scheduled_end_date
            );
            state.complete(picked, scheduled);
            log_debug!(
                verbosity,
                "Cursor now {:?}, {} tasks remaining",
                state.cursor,
                state.remaining()
            );
        }

        let mut metadata = HashMap::new();
        metadata.insert("algorithm".to_string(), "greedy_topological".to_string());
        metadata.insert(
            "hours_per_work_day".to_string(),
            self.config.hours_per_work_day.to_string(),
        );
        metadata.insert(
            "fallback_picks".to_string(),
            state.fallback_picks.to_string(),
        );
        metadata.insert("rewinds".to_string(), state.rewinds.to_string());

        Ok(ScheduleResult {
            scheduled_tasks: state.result,
            algorithm_metadata: metadata,
        })
    }

    /// Unscheduled tasks whose dependencies have all been scheduled.
    fn ready_candidates(&self, state: &SchedulerState) -> Vec<TaskIdx> {
        self.remaining_candidates(state)
            .into_iter()
            .filter(|&idx| {
                self.resolved_dependencies[idx as usize]
                    .iter()
                    .all(|dep| dep.is_some_and(|dep_idx| state.is_completed(dep_idx)))
            })
            .collect()
    }

    fn remaining_candidates(&self, state: &SchedulerState) -> Vec<TaskIdx> {
        (0..self.tasks.len() as TaskIdx)
            .filter(|&idx| !state.is_completed(idx))
            .collect()
    }

    /// Compute the dates for a picked task.
    fn place(
        &self,
        idx: TaskIdx,
        state: &mut SchedulerState,
    ) -> Result<ScheduledTask, ScheduleError> {
        let task = &self.tasks[idx as usize];
        let out_of_range = || ScheduleError::DateOutOfRange(task.title.clone());

        // A cursor past the last representable date is later than any due date
        let start = match (task.due_date, state.cursor) {
            (Some(due), Some(cursor)) if cursor > due => {
                self.note_rewind(task, cursor, due, state);
                due
            }
            (Some(due), None) => {
                state.rewinds += 1;
                due
            }
            (_, Some(cursor)) => cursor,
            (None, None) => return Err(out_of_range()),
        };

        let work_days = self.config.work_days(task.estimated_hours);
        let end = start
            .checked_add_days(Days::new(work_days - 1))
            .ok_or_else(out_of_range)?;

        Ok(ScheduledTask {
            title: task.title.clone(),
            scheduled_start_date: start,
            scheduled_end_date: end,
            estimated_hours: task.estimated_hours,
            dependencies: task.dependencies.clone(),
            assigned_to_user_id: None,
            original_due_date: task.due_date,
        })
    }

    fn note_rewind(
        &self,
        task: &TaskDescriptor,
        cursor: NaiveDate,
        due: NaiveDate,
        state: &mut SchedulerState,
    ) {
        state.rewinds += 1;
        log_changes!(
            self.config.verbosity,
            "Task {:?} is overdue at {}, starting it on its due date {}",
            task.title,
            cursor,
            due
        );
    }
}

/// Schedule `tasks` starting at `start_date` with the default configuration.
///
/// Returns the tasks in scheduling order.
pub fn schedule_tasks(
    tasks: &[TaskDescriptor],
    start_date: NaiveDate,
) -> Result<Vec<ScheduledTask>, ScheduleError> {
    let scheduler = TaskScheduler::new(tasks.to_vec(), start_date, SchedulerConfig::default())?;
    Ok(scheduler.schedule()?.scheduled_tasks)
}
