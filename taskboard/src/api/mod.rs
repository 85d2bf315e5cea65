//! Task backend API: the `TaskApi` seam and its HTTP implementation.

mod client;
mod error;
mod types;

pub use client::HttpTaskApi;
pub use error::ApiError;
pub use types::{DeleteRequest, NewTask, StatusUpdate, TaskFields};

use crate::types::{Task, TaskId};
use async_trait::async_trait;

/// Calls the board makes against the task backend.
///
/// `update_status` and `create_task` return the stored record when the
/// backend sends one back.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /api/tasks`
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;

    /// `GET /api/tasks/{id}`
    async fn get_task(&self, id: &TaskId) -> Result<Task, ApiError>;

    /// `PUT /api/tasks/{id}`
    async fn update_task(&self, id: &TaskId, fields: &TaskFields) -> Result<(), ApiError>;

    /// `POST /api/tasks/new`
    async fn create_task(&self, task: &NewTask) -> Result<Option<Task>, ApiError>;

    /// `PATCH /api/tasks/{id}/status`
    async fn update_status(
        &self,
        id: &TaskId,
        update: &StatusUpdate,
    ) -> Result<Option<Task>, ApiError>;

    /// `DELETE /api/tasks/{id}`
    async fn delete_task(&self, id: &TaskId, request: &DeleteRequest) -> Result<(), ApiError>;
}
