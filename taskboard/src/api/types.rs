//! Request bodies for the task API.

use crate::types::{Task, TaskStatus};
use serde::Serialize;

/// Editable fields of a task, sent with `PUT /api/tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub title: String,
    pub start_date: String,
    pub due_date: String,
    pub condition: String,
    pub memo: String,
}

impl TaskFields {
    /// Current field values of a task
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            start_date: task.start_date.clone(),
            due_date: task.due_date.clone(),
            condition: task.condition.clone().unwrap_or_default(),
            memo: task.memo.clone().unwrap_or_default(),
        }
    }
}

/// Body of `POST /api/tasks/new`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    #[serde(flatten)]
    pub fields: TaskFields,
    pub status: TaskStatus,
}

/// Body of `PATCH /api/tasks/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// Body of `DELETE /api/tasks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}
