//! Gesture state machine types

use super::notice::Notice;
use crate::api::StatusUpdate;
use crate::types::{ColumnId, TaskId, TaskStatus};
use serde::Serialize;

/// Where the reconciler is in a drag interaction.
///
/// `Idle -> Dragging -> Idle` for no-ops and reorders,
/// `Idle -> Dragging -> AwaitingServerConfirmation -> Idle` for column transfers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        card: TaskId,
        origin: ColumnId,
        /// Column under the pointer, for preview rendering only
        over: Option<ColumnId>,
    },
    AwaitingServerConfirmation(PendingMove),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn pending(&self) -> Option<&PendingMove> {
        match self {
            Self::AwaitingServerConfirmation(pending) => Some(pending),
            _ => None,
        }
    }
}

/// A cross-column drop waiting for the backend to accept the new status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingMove {
    pub card: TaskId,
    pub from: ColumnId,
    pub to: ColumnId,
    /// Card to insert in front of; `None` appends
    pub before: Option<TaskId>,
    pub status: TaskStatus,
    pub version: Option<u64>,
}

impl PendingMove {
    /// Request body for the status change
    pub fn status_update(&self) -> StatusUpdate {
        StatusUpdate {
            status: self.status,
            version: self.version,
        }
    }
}

/// What an interaction did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed and nothing needs reporting
    Unchanged,
    Reordered {
        column: ColumnId,
        from: usize,
        to: usize,
    },
    Moved {
        card: TaskId,
        from: ColumnId,
        to: ColumnId,
    },
    Deleted {
        card: TaskId,
        column: ColumnId,
    },
    /// Board left as it was; the notice was also queued
    Failed(Notice),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Result of resolving a drop, before any server round-trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropResolution {
    /// Fully handled locally
    Done(Outcome),
    /// Status change that must be confirmed by the backend
    Transfer(PendingMove),
}
