//! LoadBoard command

use crate::api::TaskApi;
use crate::config::ColumnTitles;
use crate::error::Result;
use crate::types::{Board, Task, TaskId};
use std::collections::HashSet;

/// Fetch every task and partition it into the three columns
#[derive(Debug, Clone, Default)]
pub struct LoadBoard {
    titles: ColumnTitles,
}

impl LoadBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom column titles
    pub fn with_titles(mut self, titles: ColumnTitles) -> Self {
        self.titles = titles;
        self
    }

    pub async fn execute(&self, api: &dyn TaskApi) -> Result<Board> {
        let tasks = api.list_tasks().await?;
        let total = tasks.len();

        // A card may live in one column only; later duplicates are dropped.
        let mut seen: HashSet<TaskId> = HashSet::with_capacity(total);
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| {
                let fresh = seen.insert(task.id.clone());
                if !fresh {
                    tracing::warn!("backend returned task {} more than once", task.id);
                }
                fresh
            })
            .collect();

        let board = Board::from_tasks(tasks).with_titles(|id| self.titles.title(id));
        tracing::debug!(
            "loaded board: {} tasks ({} todo, {} doing, {} done)",
            board.len(),
            board.columns()[0].len(),
            board.columns()[1].len(),
            board.columns()[2].len()
        );
        Ok(board)
    }
}
