//! Dependency-aware greedy scheduler.
//!
//! Places a project's tasks one after another on a single timeline, choosing
//! at each step the most urgent task whose dependencies are already placed.

mod core;
mod state;

pub use self::core::{schedule_tasks, ScheduleError, TaskScheduler};
pub use self::state::SchedulerState;
