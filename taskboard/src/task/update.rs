//! UpdateTask command

use super::{validate_fields, GetTask};
use crate::api::{TaskApi, TaskFields};
use crate::error::Result;
use crate::logging::Pretty;
use crate::types::{Task, TaskId};

/// Edit the fields of an existing task. Status is not touched.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTask {
    /// The task ID to update
    pub id: TaskId,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub condition: Option<String>,
    pub memo: Option<String>,
}

impl UpdateTask {
    /// Create a new UpdateTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            start_date: None,
            due_date: None,
            condition: None,
            memo: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn with_due_date(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
            && self.condition.is_none()
            && self.memo.is_none()
    }

    /// Full field set: the current values overlaid with the changes
    pub fn apply(&self, current: &Task) -> TaskFields {
        let mut fields = TaskFields::from_task(current);
        if let Some(title) = &self.title {
            fields.title = title.trim().to_string();
        }
        if let Some(date) = &self.start_date {
            fields.start_date = date.clone();
        }
        if let Some(date) = &self.due_date {
            fields.due_date = date.clone();
        }
        if let Some(condition) = &self.condition {
            fields.condition = condition.clone();
        }
        if let Some(memo) = &self.memo {
            fields.memo = memo.clone();
        }
        fields
    }

    /// Fetch, merge, validate and send. Returns the updated field set.
    pub async fn execute(&self, api: &dyn TaskApi) -> Result<TaskFields> {
        let current = GetTask::new(self.id.clone()).execute(api).await?;
        let fields = self.apply(&current);
        validate_fields(&fields)?;

        tracing::debug!("updating task {}: {}", self.id, Pretty(&fields));
        api.update_task(&self.id, &fields).await?;
        tracing::info!("updated task {}", self.id);
        Ok(fields)
    }
}
