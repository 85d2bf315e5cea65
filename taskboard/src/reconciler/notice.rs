//! User-visible failure notices

use crate::api::ApiError;
use crate::types::TaskId;
use serde::Serialize;
use std::fmt;

/// Why an interaction failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The backend could not be reached
    Transport,
    /// The backend saw a newer version of the task
    Conflict,
    /// The backend answered with a non-success response
    Rejected,
    /// Another request for the same card is still pending
    Busy,
}

/// A failure the user has to see. Produced instead of mutating the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub card: TaskId,
    pub message: String,
}

impl Notice {
    /// Notice for a failed backend call made on behalf of `card`
    pub fn from_api_error(card: &TaskId, action: &str, error: &ApiError) -> Self {
        let kind = match error {
            ApiError::Http(_) => NoticeKind::Transport,
            ApiError::Conflict(_) => NoticeKind::Conflict,
            _ => NoticeKind::Rejected,
        };
        Self {
            kind,
            card: card.clone(),
            message: format!("{} failed for task {}: {}", action, card, error),
        }
    }

    /// Notice for a card that already has a request in flight
    pub fn busy(card: &TaskId) -> Self {
        Self {
            kind: NoticeKind::Busy,
            card: card.clone(),
            message: format!("task {} is waiting for the server, try again", card),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_error() {
        let card = TaskId::from("1");
        let notice = Notice::from_api_error(&card, "delete", &ApiError::Conflict("v2".into()));
        assert_eq!(notice.kind, NoticeKind::Conflict);
        assert_eq!(notice.to_string(), "delete failed for task 1: conflict: v2");
        assert_eq!(notice.card, card);

        let notice = Notice::from_api_error(
            &card,
            "status update",
            &ApiError::Api {
                status: 500,
                body: String::new(),
            },
        );
        assert_eq!(notice.kind, NoticeKind::Rejected);
    }

    #[test]
    fn test_busy() {
        let notice = Notice::busy(&TaskId::from("8"));
        assert_eq!(notice.kind, NoticeKind::Busy);
        assert_eq!(notice.card, TaskId::from("8"));
    }
}
