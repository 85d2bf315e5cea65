//! GetTask command

use crate::api::{ApiError, TaskApi};
use crate::error::{BoardError, Result};
use crate::types::{Task, TaskId};

/// Fetch one task with its detail fields
#[derive(Debug, Clone, PartialEq)]
pub struct GetTask {
    pub id: TaskId,
}

impl GetTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }

    pub async fn execute(&self, api: &dyn TaskApi) -> Result<Task> {
        api.get_task(&self.id).await.map_err(|e| match e {
            ApiError::NotFound(_) => BoardError::TaskNotFound {
                id: self.id.to_string(),
            },
            other => other.into(),
        })
    }
}
