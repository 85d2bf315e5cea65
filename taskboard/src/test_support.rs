//! In-memory task backend for tests.
//!
//! Behaves like the REST backend closely enough to drive the reconciler and
//! the task commands: versions are bumped on every write and a stale version
//! yields a conflict.

use crate::api::{ApiError, DeleteRequest, NewTask, StatusUpdate, TaskApi, TaskFields};
use crate::types::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Mutex;

/// Calls recorded by [`FakeTaskApi`], in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Get(TaskId),
    Update(TaskId),
    Create { title: String, status: TaskStatus },
    UpdateStatus {
        id: TaskId,
        status: TaskStatus,
        version: Option<u64>,
    },
    Delete { id: TaskId, version: Option<u64> },
}

/// Failure injected into the next call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Server,
    NotFound,
    Conflict,
}

impl Failure {
    fn into_error(self) -> ApiError {
        match self {
            Failure::Server => ApiError::Api {
                status: 500,
                body: "internal error".to_string(),
            },
            Failure::NotFound => ApiError::NotFound("task not found".to_string()),
            Failure::Conflict => ApiError::Conflict("version mismatch".to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    calls: Vec<ApiCall>,
    fail_next: Option<Failure>,
    fail_next_write: Option<Failure>,
    next_id: u64,
}

/// [`TaskApi`] backed by a vector of tasks
#[derive(Debug, Default)]
pub struct FakeTaskApi {
    inner: Mutex<Inner>,
}

impl FakeTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.len() as u64 + 100;
        Self {
            inner: Mutex::new(Inner {
                tasks,
                next_id,
                ..Default::default()
            }),
        }
    }

    /// Make the next call fail
    pub fn fail_next(&self, failure: Failure) {
        self.lock().fail_next = Some(failure);
    }

    /// Make the next create, update, status change or delete fail
    pub fn fail_next_write(&self, failure: Failure) {
        self.lock().fail_next_write = Some(failure);
    }

    /// Simulate a write by another client
    pub fn set_server_version(&self, id: &str, version: u64) {
        let mut inner = self.lock();
        if let Some(task) = inner.tasks.iter_mut().find(|t| t.id.as_str() == id) {
            task.version = Some(version);
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panicking test poisons the lock; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, call: ApiCall) -> Result<std::sync::MutexGuard<'_, Inner>, ApiError> {
        let mut inner = self.lock();
        let write = !matches!(call, ApiCall::List | ApiCall::Get(_));
        inner.calls.push(call);
        let failure = match inner.fail_next.take() {
            Some(failure) => Some(failure),
            None if write => inner.fail_next_write.take(),
            None => None,
        };
        match failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(inner),
        }
    }
}

fn check_version(task: &Task, expected: Option<u64>) -> Result<(), ApiError> {
    match (expected, task.version) {
        (Some(expected), Some(current)) if expected != current => Err(ApiError::Conflict(
            format!("expected version {expected}, found {current}"),
        )),
        _ => Ok(()),
    }
}

fn bump(task: &mut Task) {
    task.version = Some(task.version.unwrap_or(0) + 1);
}

#[async_trait]
impl TaskApi for FakeTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let inner = self.begin(ApiCall::List)?;
        Ok(inner.tasks.clone())
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, ApiError> {
        let inner = self.begin(ApiCall::Get(id.clone()))?;
        inner
            .tasks
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))
    }

    async fn update_task(&self, id: &TaskId, fields: &TaskFields) -> Result<(), ApiError> {
        let mut inner = self.begin(ApiCall::Update(id.clone()))?;
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
        task.title = fields.title.clone();
        task.start_date = fields.start_date.clone();
        task.due_date = fields.due_date.clone();
        task.condition = Some(fields.condition.clone());
        task.memo = Some(fields.memo.clone());
        bump(task);
        Ok(())
    }

    async fn create_task(&self, new: &NewTask) -> Result<Option<Task>, ApiError> {
        let mut inner = self.begin(ApiCall::Create {
            title: new.fields.title.clone(),
            status: new.status,
        })?;
        inner.next_id += 1;
        let mut task = Task::new(inner.next_id, new.fields.title.clone(), new.status)
            .with_dates(new.fields.start_date.clone(), new.fields.due_date.clone())
            .with_version(1);
        task.condition = Some(new.fields.condition.clone());
        task.memo = Some(new.fields.memo.clone());
        inner.tasks.push(task.clone());
        Ok(Some(task))
    }

    async fn update_status(
        &self,
        id: &TaskId,
        update: &StatusUpdate,
    ) -> Result<Option<Task>, ApiError> {
        let mut inner = self.begin(ApiCall::UpdateStatus {
            id: id.clone(),
            status: update.status,
            version: update.version,
        })?;
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
        check_version(task, update.version)?;
        task.status = update.status;
        bump(task);
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: &TaskId, request: &DeleteRequest) -> Result<(), ApiError> {
        let mut inner = self.begin(ApiCall::Delete {
            id: id.clone(),
            version: request.version,
        })?;
        let index = inner
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
        check_version(&inner.tasks[index], request.version)?;
        inner.tasks.remove(index);
        Ok(())
    }
}
