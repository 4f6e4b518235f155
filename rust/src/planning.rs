//! Request/response layer around the scheduler.
//!
//! A schedule request may carry its own task list (planning new work) or
//! leave it out, in which case the project's outstanding tasks are used.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::dates::{optional_calendar_date, today_utc};
use crate::dependencies::decode_dependencies;
use crate::models::{ScheduleResult, ScheduledTask, TaskDescriptor};
use crate::scheduler::{ScheduleError, TaskScheduler};

/// Body of a schedule request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Defaults to today (UTC)
    #[serde(default, with = "optional_calendar_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub tasks: Option<Vec<TaskDescriptor>>,
}

/// Body of a schedule response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub recommended_order: Vec<String>,
    pub detailed_schedule: Vec<ScheduledTask>,
}

impl From<ScheduleResult> for ScheduleResponse {
    fn from(result: ScheduleResult) -> Self {
        Self {
            recommended_order: result.recommended_order(),
            detailed_schedule: result.scheduled_tasks,
        }
    }
}

/// Progress of a stored task.
///
/// Deserializes from either the variant name or the stored integer code
/// (0 = not started, 1 = in progress, 2 = completed). Serializes as the name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredStatus")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Integer code used by task storage.
    pub fn code(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::NotStarted),
            1 => Some(Self::InProgress),
            2 => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Wire forms accepted for `TaskStatus`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredStatus {
    Code(i64),
    Name(String),
}

impl TryFrom<StoredStatus> for TaskStatus {
    type Error = String;

    fn try_from(stored: StoredStatus) -> Result<Self, Self::Error> {
        match stored {
            StoredStatus::Code(code) => {
                Self::from_code(code).ok_or_else(|| format!("unknown task status code {}", code))
            }
            StoredStatus::Name(name) => match name.as_str() {
                "NotStarted" => Ok(Self::NotStarted),
                "InProgress" => Ok(Self::InProgress),
                "Completed" => Ok(Self::Completed),
                _ => Err(format!("unknown task status {:?}", name)),
            },
        }
    }
}

/// A task as kept by project storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTask {
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    pub estimated_hours: i32,
    #[serde(default, with = "optional_calendar_date")]
    pub due_date: Option<NaiveDate>,
    /// Comma-delimited dependency titles, as stored
    #[serde(default)]
    pub dependencies: Option<String>,
}

impl ProjectTask {
    pub fn to_descriptor(&self) -> TaskDescriptor {
        TaskDescriptor {
            title: self.title.clone(),
            estimated_hours: self.estimated_hours,
            due_date: self.due_date,
            dependencies: decode_dependencies(self.dependencies.as_deref()),
        }
    }
}

/// Descriptors for every project task that is not completed, in storage order.
pub fn outstanding_descriptors(project_tasks: &[ProjectTask]) -> Vec<TaskDescriptor> {
    project_tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .map(ProjectTask::to_descriptor)
        .collect()
}

/// Answer a schedule request.
///
/// Uses the request's tasks when it has a non-empty list, otherwise the
/// outstanding `project_tasks`. A missing start date means `today`.
pub fn plan_schedule(
    request: &ScheduleRequest,
    project_tasks: &[ProjectTask],
    today: NaiveDate,
    config: &SchedulerConfig,
) -> Result<ScheduleResponse, ScheduleError> {
    let start_date = request.start_date.unwrap_or(today);

    let tasks = match &request.tasks {
        Some(tasks) if !tasks.is_empty() => tasks.clone(),
        _ => outstanding_descriptors(project_tasks),
    };

    let scheduler = TaskScheduler::new(tasks, start_date, config.clone())?;
    Ok(scheduler.schedule()?.into())
}

/// `plan_schedule` with today's UTC date.
pub fn plan_schedule_now(
    request: &ScheduleRequest,
    project_tasks: &[ProjectTask],
    config: &SchedulerConfig,
) -> Result<ScheduleResponse, ScheduleError> {
    plan_schedule(request, project_tasks, today_utc(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn stored(title: &str, status: TaskStatus, hours: i32, deps: Option<&str>) -> ProjectTask {
        ProjectTask {
            title: title.to_string(),
            status,
            estimated_hours: hours,
            due_date: None,
            dependencies: deps.map(str::to_string),
        }
    }

    fn project() -> Vec<ProjectTask> {
        vec![
            stored("Deploy", TaskStatus::NotStarted, 8, Some("Build, Test")),
            stored("Build", TaskStatus::InProgress, 16, None),
            stored("Test", TaskStatus::NotStarted, 8, Some("Build")),
            stored("Design", TaskStatus::Completed, 8, None),
        ]
    }

    #[test]
    fn test_request_tasks_take_precedence() {
        let request = ScheduleRequest {
            start_date: Some(d(2024, 1, 1)),
            tasks: Some(vec![TaskDescriptor::new("Only", 8)]),
        };
        let response = plan_schedule(
            &request,
            &project(),
            d(2030, 1, 1),
            &SchedulerConfig::default(),
        )
        .unwrap();

        assert_eq!(response.recommended_order, vec!["Only"]);
        assert_eq!(response.detailed_schedule[0].scheduled_start_date, d(2024, 1, 1));
    }

    #[test]
    fn test_project_tasks_used_when_request_has_none() {
        let request = ScheduleRequest::default();
        let response = plan_schedule(
            &request,
            &project(),
            d(2024, 1, 1),
            &SchedulerConfig::default(),
        )
        .unwrap();

        // "Design" is completed; its title is not needed by anything left
        assert_eq!(response.recommended_order, vec!["Build", "Test", "Deploy"]);
        assert_eq!(response.detailed_schedule[2].dependencies, vec!["Build", "Test"]);
        assert_eq!(response.detailed_schedule[0].scheduled_start_date, d(2024, 1, 1));
    }

    #[test]
    fn test_empty_request_list_falls_back_to_project() {
        let request = ScheduleRequest {
            start_date: None,
            tasks: Some(vec![]),
        };
        let response = plan_schedule(
            &request,
            &project(),
            d(2024, 1, 1),
            &SchedulerConfig::default(),
        )
        .unwrap();
        assert_eq!(response.recommended_order.len(), 3);
    }

    #[test]
    fn test_dependency_on_completed_task_uses_fallback() {
        // Completed tasks are not part of the run, so depending on one is a
        // dangling dependency
        let tasks = vec![
            stored("Polish", TaskStatus::NotStarted, 8, Some("Design")),
            stored("Design", TaskStatus::Completed, 8, None),
        ];
        let response = plan_schedule(
            &ScheduleRequest::default(),
            &tasks,
            d(2024, 1, 1),
            &SchedulerConfig::default(),
        )
        .unwrap();
        assert_eq!(response.recommended_order, vec!["Polish"]);
    }

    #[test]
    fn test_request_json_roundtrip_shape() {
        let request: ScheduleRequest = serde_json::from_str(
            r#"{
                "startDate": "2024-01-01T09:30:00Z",
                "tasks": [
                    {"title": "A", "estimatedHours": 8},
                    {"title": "B", "estimatedHours": 16, "dependencies": ["A"]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(request.start_date, Some(d(2024, 1, 1)));

        let response =
            plan_schedule(&request, &[], d(2030, 1, 1), &SchedulerConfig::default()).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["recommendedOrder"], serde_json::json!(["A", "B"]));
        assert_eq!(json["detailedSchedule"][1]["scheduledStartDate"], "2024-01-02");
        assert_eq!(json["detailedSchedule"][1]["scheduledEndDate"], "2024-01-03");
    }

    #[test]
    fn test_empty_body_and_no_tasks() {
        let request: ScheduleRequest = serde_json::from_str("{}").unwrap();
        let response =
            plan_schedule(&request, &[], d(2024, 1, 1), &SchedulerConfig::default()).unwrap();
        assert!(response.recommended_order.is_empty());
        assert!(response.detailed_schedule.is_empty());
    }

    #[test]
    fn test_duplicate_request_titles_rejected() {
        let request = ScheduleRequest {
            start_date: None,
            tasks: Some(vec![
                TaskDescriptor::new("Same", 8),
                TaskDescriptor::new("Same", 8),
            ]),
        };
        let result = plan_schedule(&request, &[], d(2024, 1, 1), &SchedulerConfig::default());
        assert_eq!(result, Err(ScheduleError::DuplicateTitle("Same".to_string())));
    }

    #[test]
    fn test_status_accepts_name_or_stored_code() {
        let parse = |status: &str| {
            serde_json::from_str::<ProjectTask>(&format!(
                r#"{{"title": "X", "estimatedHours": 8, "status": {}}}"#,
                status
            ))
            .map(|t| t.status)
        };

        assert_eq!(parse("0").unwrap(), TaskStatus::NotStarted);
        assert_eq!(parse("1").unwrap(), TaskStatus::InProgress);
        assert_eq!(parse("2").unwrap(), TaskStatus::Completed);
        assert_eq!(parse(r#""InProgress""#).unwrap(), TaskStatus::InProgress);
        assert!(parse("3").is_err());
        assert!(parse(r#""Done""#).is_err());

        assert_eq!(serde_json::to_value(TaskStatus::Completed).unwrap(), "Completed");
        assert_eq!(TaskStatus::Completed.code(), 2);
    }

    #[test]
    fn test_completed_code_excluded_from_schedule() {
        let stored: Vec<ProjectTask> = serde_json::from_str(
            r#"[
                {"title": "Done", "estimatedHours": 8, "status": 2},
                {"title": "Next", "estimatedHours": 8, "status": 0, "dependencies": "Done"}
            ]"#,
        )
        .unwrap();
        let descriptors = outstanding_descriptors(&stored);

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].title, "Next");
        assert_eq!(descriptors[0].dependencies, vec!["Done"]);
    }

    #[test]
    fn test_plan_schedule_now_defaults_to_today() {
        let request = ScheduleRequest {
            start_date: None,
            tasks: Some(vec![TaskDescriptor::new("Now", 8)]),
        };
        let before = today_utc();
        let response = plan_schedule_now(&request, &[], &SchedulerConfig::default()).unwrap();
        let after = today_utc();

        let start = response.detailed_schedule[0].scheduled_start_date;
        assert!(start == before || start == after);
    }
}
