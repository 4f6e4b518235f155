//! Core data types for the task scheduler.

use chrono::NaiveDate;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::DEFAULT_HOURS_PER_WORK_DAY;
use crate::dates::optional_calendar_date;

// Note: We use std HashMap here for PyO3 interface compatibility

fn default_estimated_hours() -> i32 {
    DEFAULT_HOURS_PER_WORK_DAY as i32
}

/// A task to be placed on the timeline.
///
/// `title` is the identity of the task within one scheduling run and is what
/// other tasks name in their `dependencies`.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescriptor {
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    #[serde(default = "default_estimated_hours")]
    pub estimated_hours: i32,
    #[pyo3(get, set)]
    #[serde(default, with = "optional_calendar_date")]
    pub due_date: Option<NaiveDate>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl TaskDescriptor {
    /// Create a task with no due date and no dependencies.
    pub fn new(title: impl Into<String>, estimated_hours: i32) -> Self {
        Self {
            title: title.into(),
            estimated_hours,
            due_date: None,
            dependencies: Vec::new(),
        }
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Add a dependency on another task's title.
    pub fn with_dependency(mut self, title: impl Into<String>) -> Self {
        self.dependencies.push(title.into());
        self
    }
}

#[pymethods]
impl TaskDescriptor {
    #[new]
    #[pyo3(signature = (title, estimated_hours, due_date=None, dependencies=None))]
    fn py_new(
        title: String,
        estimated_hours: i32,
        due_date: Option<NaiveDate>,
        dependencies: Option<Vec<String>>,
    ) -> Self {
        Self {
            title,
            estimated_hours,
            due_date,
            dependencies: dependencies.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskDescriptor(title={:?}, estimated_hours={}, due_date={:?}, deps={})",
            self.title,
            self.estimated_hours,
            self.due_date,
            self.dependencies.len()
        )
    }
}

/// A task with its computed place on the timeline.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub scheduled_start_date: NaiveDate,
    /// Inclusive
    #[pyo3(get, set)]
    pub scheduled_end_date: NaiveDate,
    #[pyo3(get, set)]
    pub estimated_hours: i32,
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
    /// Never filled in by the scheduler; carried for callers that assign work.
    #[pyo3(get, set)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_user_id: Option<String>,
    #[pyo3(get, set)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_due_date: Option<NaiveDate>,
}

impl ScheduledTask {
    /// Number of calendar days covered, counting both ends.
    pub fn span_days(&self) -> i64 {
        (self.scheduled_end_date - self.scheduled_start_date).num_days() + 1
    }
}

#[pymethods]
impl ScheduledTask {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledTask(title={:?}, start={}, end={})",
            self.title, self.scheduled_start_date, self.scheduled_end_date
        )
    }
}

/// Result of one scheduling run.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct ScheduleResult {
    /// Tasks in the order they were scheduled
    #[pyo3(get)]
    pub scheduled_tasks: Vec<ScheduledTask>,
    #[pyo3(get)]
    pub algorithm_metadata: HashMap<String, String>,
}

#[pymethods]
impl ScheduleResult {
    /// Titles in scheduled order.
    pub fn recommended_order(&self) -> Vec<String> {
        self.scheduled_tasks.iter().map(|t| t.title.clone()).collect()
    }

    fn __len__(&self) -> usize {
        self.scheduled_tasks.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(scheduled_tasks={}, metadata_keys={})",
            self.scheduled_tasks.len(),
            self.algorithm_metadata.len()
        )
    }
}
