//! AddTask command

use super::{parse_date, validate_fields, DATE_FORMAT};
use crate::api::{NewTask, TaskApi, TaskFields};
use crate::error::{BoardError, Result};
use crate::types::{ColumnId, Task, TaskStatus};
use chrono::{Days, Local, NaiveDate};

/// Register a new task
#[derive(Debug, Clone, PartialEq)]
pub struct AddTask {
    /// The task title (required)
    pub title: String,
    /// Defaults to today
    pub start_date: Option<String>,
    /// Defaults to the day after the start date
    pub due_date: Option<String>,
    pub condition: Option<String>,
    pub memo: Option<String>,
    /// Initial status, `TODO` unless registered from another column
    pub status: TaskStatus,
}

impl AddTask {
    /// Create a new AddTask command with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start_date: None,
            due_date: None,
            condition: None,
            memo: None,
            status: TaskStatus::Todo,
        }
    }

    /// Set the start date (`YYYY-MM-DD`)
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Set the due date (`YYYY-MM-DD`)
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

    /// Register the task into a column, with that column's status
    pub fn in_column(mut self, column: ColumnId) -> Self {
        self.status = TaskStatus::for_column(column);
        self
    }

    /// Request body with defaults filled in relative to `today`
    pub fn build(&self, today: NaiveDate) -> Result<NewTask> {
        let start_date = match &self.start_date {
            Some(date) => date.clone(),
            None => today.format(DATE_FORMAT).to_string(),
        };
        let due_date = match &self.due_date {
            Some(date) => date.clone(),
            None => {
                let start = parse_date("startDate", &start_date)?;
                start
                    .checked_add_days(Days::new(1))
                    .ok_or_else(|| BoardError::invalid_value("startDate", "date out of range"))?
                    .format(DATE_FORMAT)
                    .to_string()
            }
        };

        let fields = TaskFields {
            title: self.title.trim().to_string(),
            start_date,
            due_date,
            condition: self.condition.clone().unwrap_or_default(),
            memo: self.memo.clone().unwrap_or_default(),
        };
        validate_fields(&fields)?;

        Ok(NewTask {
            fields,
            status: self.status,
        })
    }

    /// Send the task. Returns the stored record when the backend echoes one.
    pub async fn execute(&self, api: &dyn TaskApi) -> Result<Option<Task>> {
        let body = self.build(Local::now().date_naive())?;
        let created = api.create_task(&body).await?;
        match &created {
            Some(task) => tracing::info!("created task {} in {}", task.id, task.column()),
            None => tracing::info!("created task '{}'", body.fields.title),
        }
        Ok(created)
    }
}
