//! Task auto-scheduler for project planning.
//!
//! Orders a project's tasks into a proposed timeline from their effort
//! estimates, due dates and dependency titles.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

mod config;
pub mod dates;
pub mod dependencies;
mod interner;
pub mod logging;
mod models;
pub mod planning;
pub mod scheduler;
mod sorting;

pub use config::{SchedulerConfig, DEFAULT_HOURS_PER_WORK_DAY};
pub use dates::{parse_calendar_date, DateParseError};
pub use dependencies::{decode_dependencies, encode_dependencies};
pub use models::{ScheduleResult, ScheduledTask, TaskDescriptor};
pub use planning::{
    plan_schedule, plan_schedule_now, ProjectTask, ScheduleRequest, ScheduleResponse, TaskStatus,
};
pub use scheduler::{schedule_tasks, ScheduleError, TaskScheduler};

/// Schedule tasks onto a single timeline.
///
/// # Arguments
/// * `tasks` - Tasks to schedule; titles must be unique
/// * `start_date` - First day the schedule may use
/// * `config` - Scheduler configuration (defaults when omitted)
///
/// # Returns
/// * ScheduleResult with the tasks in scheduled order
///
/// # Raises
/// * ValueError on duplicate titles, invalid configuration, or dates out of range
#[pyfunction]
#[pyo3(signature = (tasks, start_date, config=None))]
fn schedule(
    tasks: Vec<TaskDescriptor>,
    start_date: NaiveDate,
    config: Option<SchedulerConfig>,
) -> PyResult<ScheduleResult> {
    let scheduler = TaskScheduler::new(tasks, start_date, config.unwrap_or_default())
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
    scheduler
        .schedule()
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Split a stored comma-delimited dependency column into titles.
#[pyfunction]
#[pyo3(name = "decode_dependencies", signature = (stored=None))]
fn py_decode_dependencies(stored: Option<String>) -> Vec<String> {
    decode_dependencies(stored.as_deref())
}

/// Join dependency titles into the stored column form (None when empty).
#[pyfunction]
#[pyo3(name = "encode_dependencies")]
fn py_encode_dependencies(titles: Vec<String>) -> Option<String> {
    encode_dependencies(&titles)
}

/// The project_scheduler Python module.
#[pymodule]
fn project_scheduler(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<TaskDescriptor>()?;
    m.add_class::<ScheduledTask>()?;
    m.add_class::<ScheduleResult>()?;

    // Config types
    m.add_class::<SchedulerConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_decode_dependencies, m)?)?;
    m.add_function(wrap_pyfunction!(py_encode_dependencies, m)?)?;

    Ok(())
}
