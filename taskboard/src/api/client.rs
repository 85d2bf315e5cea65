//! HTTP client for the task REST API.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::types::{Task, TaskId};

use super::error::ApiError;
use super::types::*;
use super::TaskApi;

/// Extract a human-readable message from a JSON error body.
///
/// Tries `message`, then `error`, then falls back to the raw body.
fn extract_error_description(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(err) = json.get("error").and_then(|v| v.as_str()) {
            return err.to_string();
        }
    }
    body.to_string()
}

/// Decode an optional task record from a success body.
///
/// Status and create endpoints may answer with an empty body or with the
/// stored record; anything that is not a task record is treated as empty.
fn decode_optional_task(bytes: &[u8]) -> Option<Task> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<Task>(bytes) {
        Ok(task) => Some(task),
        Err(e) => {
            tracing::debug!("response body is not a task record: {}", e);
            None
        }
    }
}

/// Client for the task backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!(
            "{}/api/tasks/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }

    /// Map an HTTP response to an `ApiError` based on status code.
    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_description(&body);

        match status_code {
            404 => Err(ApiError::NotFound(message)),
            409 => Err(ApiError::Conflict(message)),
            _ => Err(ApiError::Api {
                status: status_code,
                body: message,
            }),
        }
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.client.get(self.tasks_url()).send().await?;
        let response = self.check_response(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, ApiError> {
        let response = self.client.get(self.task_url(id)).send().await?;
        let response = self.check_response(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn update_task(&self, id: &TaskId, fields: &TaskFields) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.task_url(id))
            .json(fields)
            .send()
            .await?;
        self.check_response(response).await?;
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Option<Task>, ApiError> {
        let url = format!("{}/new", self.tasks_url());
        let response = self.client.post(&url).json(task).send().await?;
        let response = self.check_response(response).await?;
        let bytes = response.bytes().await?;
        Ok(decode_optional_task(&bytes))
    }

    async fn update_status(
        &self,
        id: &TaskId,
        update: &StatusUpdate,
    ) -> Result<Option<Task>, ApiError> {
        let url = format!("{}/status", self.task_url(id));
        let response = self.client.patch(&url).json(update).send().await?;
        let response = self.check_response(response).await?;
        let bytes = response.bytes().await?;
        Ok(decode_optional_task(&bytes))
    }

    async fn delete_task(&self, id: &TaskId, request: &DeleteRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.task_url(id))
            .json(request)
            .send()
            .await?;
        self.check_response(response).await?;
        Ok(())
    }
}
