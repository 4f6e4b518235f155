//! Configuration for the task scheduler.

use pyo3::prelude::*;

/// Default effort hours that make up one calendar work-day.
pub const DEFAULT_HOURS_PER_WORK_DAY: u32 = 8;

/// Scheduler configuration.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Estimated-effort hours mapped onto a single calendar day (must be > 0)
    #[pyo3(get, set)]
    pub hours_per_work_day: u32,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            hours_per_work_day: DEFAULT_HOURS_PER_WORK_DAY,
            verbosity: 0,
        }
    }
}

impl SchedulerConfig {
    /// Whole calendar days needed for `estimated_hours` of effort.
    ///
    /// Rounds up and never returns less than one day, so zero or negative
    /// estimates still occupy a day.
    pub fn work_days(&self, estimated_hours: i32) -> u64 {
        if estimated_hours <= 0 || self.hours_per_work_day == 0 {
            return 1;
        }
        let hours = estimated_hours as u64;
        let per_day = u64::from(self.hours_per_work_day);
        hours.div_ceil(per_day).max(1)
    }
}

#[pymethods]
impl SchedulerConfig {
    #[new]
    #[pyo3(signature = (hours_per_work_day=None, verbosity=None))]
    fn new(hours_per_work_day: Option<u32>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            hours_per_work_day: hours_per_work_day.unwrap_or(defaults.hours_per_work_day),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulerConfig(hours_per_work_day={}, verbosity={})",
            self.hours_per_work_day, self.verbosity
        )
    }
}
