//! Task types: Task and TaskStatus

use super::ids::{ColumnId, TaskId};
use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a task, spelled the way the backend spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Status represented by a column.
    ///
    /// `todo -> TODO`, `doing -> IN_PROGRESS`, `done -> DONE`.
    pub fn for_column(column: ColumnId) -> Self {
        match column {
            ColumnId::Todo => TaskStatus::Todo,
            ColumnId::Doing => TaskStatus::InProgress,
            ColumnId::Done => TaskStatus::Done,
        }
    }

    /// Status for a raw column identifier; anything but the three known ids is rejected
    pub fn for_column_id(id: &str) -> Result<Self, BoardError> {
        Ok(Self::for_column(id.parse()?))
    }

    /// Column that holds tasks with this status
    pub fn column(&self) -> ColumnId {
        match self {
            TaskStatus::Todo => ColumnId::Todo,
            TaskStatus::InProgress => ColumnId::Doing,
            TaskStatus::Done => ColumnId::Done,
        }
    }

    /// Wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = BoardError;

    /// Accepts the wire spelling or a column id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            other => other
                .parse::<ColumnId>()
                .map(TaskStatus::for_column)
                .map_err(|_| BoardError::UnknownStatus {
                    value: other.to_string(),
                }),
        }
    }
}

/// A task/card on the board, as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub due_date: String,
    pub status: TaskStatus,

    /// Optimistic-concurrency counter; forwarded on status changes and deletes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    /// Completion condition (detail view only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Free-text notes (detail view only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl Task {
    /// Create a new task with the given id, title and status
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date: String::new(),
            due_date: String::new(),
            status,
            version: None,
            condition: None,
            memo: None,
        }
    }

    /// Set the schedule
    pub fn with_dates(mut self, start: impl Into<String>, due: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.due_date = due.into();
        self
    }

    /// Set the concurrency version
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    /// Column this task belongs in according to its status
    pub fn column(&self) -> ColumnId {
        self.status.column()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transition_table() {
        assert_eq!(TaskStatus::for_column_id("todo").unwrap(), TaskStatus::Todo);
        assert_eq!(
            TaskStatus::for_column_id("doing").unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(TaskStatus::for_column_id("done").unwrap(), TaskStatus::Done);
        assert!(matches!(
            TaskStatus::for_column_id("archive"),
            Err(BoardError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_status_round_trips_through_column() {
        for column in ColumnId::ALL {
            assert_eq!(TaskStatus::for_column(column).column(), column);
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("IN_PROGRESS".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!(matches!(
            "WAITING".parse::<TaskStatus>(),
            Err(BoardError::UnknownStatus { .. })
        ));
    }

    #[test]
    fn test_task_wire_shape() {
        let json = r#"{
            "id": 3,
            "title": "Write report",
            "startDate": "2025-07-31",
            "dueDate": "2025-08-01",
            "status": "IN_PROGRESS",
            "version": 2
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_str(), "3");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.version, Some(2));
        assert_eq!(task.column(), ColumnId::Doing);
        assert!(task.memo.is_none());

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["startDate"], "2025-07-31");
        assert_eq!(value["id"], "3");
        assert!(value.get("memo").is_none());
    }

    #[test]
    fn test_task_without_version() {
        let json = r#"{"id":"a","title":"t","startDate":"","dueDate":"","status":"TODO"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.version, None);
    }
}
