//! Board reconciler: turns drag gestures into board changes.
//!
//! The reconciler is the single owner of the in-memory [`Board`]. A gesture
//! arrives as `start_gesture`, any number of `hover` calls, then
//! `end_gesture`. Reorders inside a column are applied at once and never sent
//! to the backend. A drop into another column becomes a [`PendingMove`]; the
//! board changes only after the backend accepts the new status
//! (`complete_transfer`). Failures leave the board untouched and queue a
//! [`Notice`].
//!
//! While a transfer is pending, new gestures are ignored.

mod gesture;
mod notice;

pub use gesture::{DropResolution, GestureState, Outcome, PendingMove};
pub use notice::{Notice, NoticeKind};

use crate::api::{ApiError, DeleteRequest, TaskApi};
use crate::board::LoadBoard;
use crate::config::ColumnTitles;
use crate::error::Result;
use crate::logging::Pretty;
use crate::types::{Board, Column, ColumnId, Task, TaskId, TaskStatus};

/// Single-owner state container for the board and the current gesture
#[derive(Debug, Clone, Default)]
pub struct BoardReconciler {
    board: Board,
    state: GestureState,
    notices: Vec<Notice>,
}

impl BoardReconciler {
    /// Wrap an already built board
    pub fn new(board: Board) -> Self {
        Self {
            board,
            state: GestureState::Idle,
            notices: Vec::new(),
        }
    }

    /// Hydrate from the backend
    pub async fn load(api: &dyn TaskApi, titles: &ColumnTitles) -> Result<Self> {
        let board = LoadBoard::new().with_titles(titles.clone()).execute(api).await?;
        Ok(Self::new(board))
    }

    /// Replace the board with a fresh copy from the backend.
    ///
    /// Drops any in-progress gesture; local reorders are lost.
    pub async fn reload(&mut self, api: &dyn TaskApi, titles: &ColumnTitles) -> Result<()> {
        let board = LoadBoard::new().with_titles(titles.clone()).execute(api).await?;
        self.board = board;
        self.state = GestureState::Idle;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Notices not yet shown to the user
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain queued notices for display
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Column that is `id`, or that holds the card `id`
    pub fn locate_container(&self, id: &str) -> Option<&Column> {
        self.board.locate(id)
    }

    /// Board as it should be rendered right now, including the card being
    /// dragged over another column
    pub fn preview(&self) -> Board {
        match &self.state {
            GestureState::Dragging {
                card,
                origin,
                over: Some(over),
            } if over != origin => self.board.preview(card, *over),
            _ => self.board.clone(),
        }
    }

    /// Begin dragging `card_id`. Returns false when the gesture is ignored.
    pub fn start_gesture(&mut self, card_id: &str) -> bool {
        if let GestureState::AwaitingServerConfirmation(pending) = &self.state {
            tracing::debug!(
                "ignoring drag of {} while move of {} is pending",
                card_id,
                pending.card
            );
            return false;
        }

        let card = TaskId::from(card_id);
        let Some(location) = self.board.find_card(&card) else {
            tracing::debug!("drag started on unknown card {}", card_id);
            self.state = GestureState::Idle;
            return false;
        };

        if let GestureState::Dragging { card: previous, .. } = &self.state {
            tracing::debug!("drag of {} replaced by drag of {}", previous, card);
        }

        tracing::debug!("drag started: {} from {}", card, location.column);
        self.state = GestureState::Dragging {
            card,
            origin: location.column,
            over: Some(location.column),
        };
        true
    }

    /// Intermediate pointer move over `target` (card or column id)
    pub fn hover(&mut self, target: Option<&str>) {
        let column = target
            .and_then(|id| self.board.locate(id))
            .map(Column::id);
        if let GestureState::Dragging { over, .. } = &mut self.state {
            *over = column;
        }
    }

    /// Abandon the current drag without a drop
    pub fn cancel_gesture(&mut self) {
        if matches!(self.state, GestureState::Dragging { .. }) {
            self.state = GestureState::Idle;
        }
    }

    /// Resolve a drop of `card_id` onto `target`.
    ///
    /// Reorders are applied immediately. A drop into another column moves the
    /// state to `AwaitingServerConfirmation` and returns the move to send;
    /// the board is unchanged until [`complete_transfer`](Self::complete_transfer).
    pub fn end_gesture(&mut self, card_id: &str, target: Option<&str>) -> DropResolution {
        let (card, origin) = match std::mem::take(&mut self.state) {
            GestureState::Dragging { card, origin, .. } => (card, origin),
            GestureState::Idle => {
                tracing::debug!("drop of {} without a drag in progress", card_id);
                return DropResolution::Done(Outcome::Unchanged);
            }
            pending @ GestureState::AwaitingServerConfirmation(_) => {
                tracing::debug!("drop of {} ignored while a move is pending", card_id);
                self.state = pending;
                return DropResolution::Done(Outcome::Unchanged);
            }
        };

        if card.as_str() != card_id {
            tracing::warn!("drop of {} does not match drag of {}", card_id, card);
            return DropResolution::Done(Outcome::Unchanged);
        }

        let Some(target) = target else {
            tracing::debug!("{} dropped outside any column", card);
            return DropResolution::Done(Outcome::Unchanged);
        };
        let Some(target_column) = self.board.locate(target).map(Column::id) else {
            tracing::debug!("{} dropped on unknown target {}", card, target);
            return DropResolution::Done(Outcome::Unchanged);
        };

        let Some(from_index) = self.board.column(origin).position_of(&card) else {
            tracing::warn!("card {} is no longer in column {}", card, origin);
            return DropResolution::Done(Outcome::Unchanged);
        };

        // A card target means "at that card's position"; a column target means the end.
        let target_card = self
            .board
            .column(target_column)
            .position_of(&TaskId::from(target))
            .map(|index| (index, TaskId::from(target)));

        if target_column == origin {
            let last = self.board.column(origin).len().saturating_sub(1);
            let to_index = target_card.map(|(index, _)| index).unwrap_or(last);
            if to_index == from_index {
                tracing::debug!("{} dropped on its own position", card);
                return DropResolution::Done(Outcome::Unchanged);
            }
            self.board.reorder(origin, from_index, to_index);
            tracing::debug!("reordered {} in {}: {} -> {}", card, origin, from_index, to_index);
            return DropResolution::Done(Outcome::Reordered {
                column: origin,
                from: from_index,
                to: to_index,
            });
        }

        let version = self.board.card(&card).and_then(|task| task.version);
        let pending = PendingMove {
            card,
            from: origin,
            to: target_column,
            before: target_card.map(|(_, id)| id),
            status: TaskStatus::for_column(target_column),
            version,
        };
        tracing::debug!("awaiting server for move: {}", Pretty(&pending));
        self.state = GestureState::AwaitingServerConfirmation(pending.clone());
        DropResolution::Transfer(pending)
    }

    /// Apply the backend's answer to the pending transfer.
    ///
    /// On success the card leaves its origin column and enters the target
    /// column with the new status (and the returned version, if any). On
    /// failure the board is left exactly as it was and a notice is queued.
    pub fn complete_transfer(
        &mut self,
        result: std::result::Result<Option<Task>, ApiError>,
    ) -> Outcome {
        let pending = match std::mem::take(&mut self.state) {
            GestureState::AwaitingServerConfirmation(pending) => pending,
            other => {
                tracing::warn!("server confirmation arrived with no move pending");
                self.state = other;
                return Outcome::Unchanged;
            }
        };

        let returned = match result {
            Ok(returned) => returned,
            Err(error) => {
                let notice = Notice::from_api_error(&pending.card, "status update", &error);
                return self.fail(notice);
            }
        };

        let Some((from, _, mut task)) = self.board.remove_card(&pending.card) else {
            tracing::warn!("moved card {} vanished before confirmation", pending.card);
            return Outcome::Unchanged;
        };
        if let Some(record) = returned.filter(|r| r.id == task.id) {
            task.version = record.version;
        }

        let index = pending
            .before
            .as_ref()
            .and_then(|before| self.board.column(pending.to).position_of(before));
        self.board.insert_card(pending.to, index, task);

        tracing::info!("moved {} from {} to {}", pending.card, from, pending.to);
        Outcome::Moved {
            card: pending.card,
            from,
            to: pending.to,
        }
    }

    /// End a gesture and, for column transfers, wait for the backend
    pub async fn drop_card(
        &mut self,
        api: &dyn TaskApi,
        card_id: &str,
        target: Option<&str>,
    ) -> Outcome {
        match self.end_gesture(card_id, target) {
            DropResolution::Done(outcome) => outcome,
            DropResolution::Transfer(pending) => {
                let result = api
                    .update_status(&pending.card, &pending.status_update())
                    .await;
                self.complete_transfer(result)
            }
        }
    }

    /// Full gesture in one call: start on `card_id`, drop on `target`
    pub async fn move_card(&mut self, api: &dyn TaskApi, card_id: &str, target: &str) -> Outcome {
        if !self.start_gesture(card_id) {
            return Outcome::Unchanged;
        }
        self.hover(Some(target));
        self.drop_card(api, card_id, Some(target)).await
    }

    /// Delete a card on the backend, then from the board.
    ///
    /// `version` is forwarded for concurrent-edit detection; when `None`, the
    /// card's known version is sent.
    pub async fn delete_card(
        &mut self,
        api: &dyn TaskApi,
        card_id: &str,
        version: Option<u64>,
    ) -> Outcome {
        let card = TaskId::from(card_id);
        let Some(known_version) = self.board.card(&card).map(|task| task.version) else {
            tracing::debug!("delete of unknown card {}", card_id);
            return Outcome::Unchanged;
        };

        if self.state.pending().is_some_and(|p| p.card == card) {
            return self.fail(Notice::busy(&card));
        }

        let request = DeleteRequest {
            version: version.or(known_version),
        };
        if let Err(error) = api.delete_task(&card, &request).await {
            let notice = Notice::from_api_error(&card, "delete", &error);
            return self.fail(notice);
        }

        match self.board.remove_card(&card) {
            Some((column, _, _)) => {
                if let GestureState::Dragging { card: dragged, .. } = &self.state {
                    if dragged == &card {
                        self.state = GestureState::Idle;
                    }
                }
                tracing::info!("deleted {} from {}", card, column);
                Outcome::Deleted { card, column }
            }
            None => Outcome::Unchanged,
        }
    }

    fn fail(&mut self, notice: Notice) -> Outcome {
        tracing::warn!("{}", notice);
        self.notices.push(notice.clone());
        Outcome::Failed(notice)
    }

    /// Column currently holding the card.
    ///
    /// A pending cross-column move is not reflected until it is confirmed.
    pub fn column_of(&self, card_id: &str) -> Option<ColumnId> {
        self.board
            .find_card(&TaskId::from(card_id))
            .map(|location| location.column)
    }
}
