//! Board-level types: Board and Column

use super::ids::{ColumnId, TaskId};
use super::task::{Task, TaskStatus};
use serde::Serialize;

/// One status bucket of the board with its ordered cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    status: TaskStatus,
    cards: Vec<Task>,
}

impl Column {
    fn new(id: ColumnId) -> Self {
        Self {
            id,
            title: Board::default_title(id).to_string(),
            status: TaskStatus::for_column(id),
            cards: Vec::new(),
        }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn cards(&self) -> &[Task] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index of a card in this column
    pub fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == id)
    }

    /// Card ids in display order
    pub fn card_ids(&self) -> Vec<TaskId> {
        self.cards.iter().map(|c| c.id.clone()).collect()
    }
}

/// Where a card currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLocation {
    pub column: ColumnId,
    pub index: usize,
}

/// The board: exactly three columns in `todo`, `doing`, `done` order.
///
/// Built from the flat task list the backend returns. Mutation is reserved
/// for the reconciler so the one-card-one-column invariant has a single owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            columns: ColumnId::ALL.iter().copied().map(Column::new).collect(),
        }
    }
}

impl Board {
    /// Default display title of a column
    pub fn default_title(id: ColumnId) -> &'static str {
        match id {
            ColumnId::Todo => "To-Do",
            ColumnId::Doing => "In-Progress",
            ColumnId::Done => "Done",
        }
    }

    /// Partition tasks into columns by status, keeping the backend's order
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::default();
        for task in tasks {
            let column = task.column();
            board.columns[column.index()].cards.push(task);
        }
        board
    }

    /// Override column titles
    pub fn with_titles<F>(mut self, title: F) -> Self
    where
        F: Fn(ColumnId) -> String,
    {
        for column in &mut self.columns {
            column.title = title(column.id);
        }
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        &self.columns[id.index()]
    }

    /// Column identified by `id`, or the column containing the card `id`.
    ///
    /// Column identifiers win over card identifiers. Linear scan; boards hold
    /// tens of cards.
    pub fn locate(&self, id: &str) -> Option<&Column> {
        if let Ok(column) = id.parse::<ColumnId>() {
            return Some(self.column(column));
        }
        self.columns
            .iter()
            .find(|column| column.cards.iter().any(|card| card.id.as_str() == id))
    }

    /// Column and index of a card
    pub fn find_card(&self, id: &TaskId) -> Option<CardLocation> {
        self.columns.iter().find_map(|column| {
            column.position_of(id).map(|index| CardLocation {
                column: column.id,
                index,
            })
        })
    }

    /// Look up a card by id
    pub fn card(&self, id: &TaskId) -> Option<&Task> {
        let location = self.find_card(id)?;
        self.column(location.column).cards.get(location.index)
    }

    /// Every card id on the board, column by column
    pub fn card_ids(&self) -> Vec<TaskId> {
        self.columns.iter().flat_map(|c| c.card_ids()).collect()
    }

    /// Total number of cards
    pub fn len(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the board with `card` shown at the end of `over`.
    ///
    /// Used to render an in-progress drag without touching the real board.
    pub fn preview(&self, card: &TaskId, over: ColumnId) -> Board {
        let mut preview = self.clone();
        if let Some((_, _, task)) = preview.remove_card(card) {
            preview.insert_card(over, None, task);
        }
        preview
    }

    /// Move a card inside one column: remove at `from`, insert at `to`
    pub(crate) fn reorder(&mut self, column: ColumnId, from: usize, to: usize) -> bool {
        let cards = &mut self.columns[column.index()].cards;
        if from >= cards.len() || to >= cards.len() || from == to {
            return false;
        }
        let card = cards.remove(from);
        cards.insert(to, card);
        true
    }

    /// Take a card off the board
    pub(crate) fn remove_card(&mut self, id: &TaskId) -> Option<(ColumnId, usize, Task)> {
        let location = self.find_card(id)?;
        let task = self.columns[location.column.index()]
            .cards
            .remove(location.index);
        Some((location.column, location.index, task))
    }

    /// Put a card into a column at `index`, or at the end.
    ///
    /// The card's status is aligned with the column.
    pub(crate) fn insert_card(&mut self, column: ColumnId, index: Option<usize>, mut task: Task) {
        let target = &mut self.columns[column.index()];
        task.status = target.status;
        let index = index.unwrap_or(target.cards.len()).min(target.cards.len());
        target.cards.insert(index, task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task::new(id, format!("Task {id}"), status)
    }

    fn sample() -> Board {
        Board::from_tasks(vec![
            task("1", TaskStatus::Todo),
            task("2", TaskStatus::Done),
            task("3", TaskStatus::Todo),
            task("4", TaskStatus::InProgress),
        ])
    }

    #[test]
    fn test_default_board_has_three_columns() {
        let board = Board::default();
        let ids: Vec<_> = board.columns().iter().map(Column::id).collect();
        assert_eq!(ids, ColumnId::ALL.to_vec());
        assert!(board.is_empty());
        assert_eq!(board.column(ColumnId::Doing).status(), TaskStatus::InProgress);
        assert_eq!(board.column(ColumnId::Todo).title(), "To-Do");
    }

    #[test]
    fn test_from_tasks_partitions_by_status() {
        let board = sample();
        assert_eq!(
            board.column(ColumnId::Todo).card_ids(),
            vec![TaskId::from("1"), TaskId::from("3")]
        );
        assert_eq!(board.column(ColumnId::Doing).card_ids(), vec![TaskId::from("4")]);
        assert_eq!(board.column(ColumnId::Done).card_ids(), vec![TaskId::from("2")]);
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn test_locate_by_column_and_card() {
        let board = sample();
        assert_eq!(board.locate("doing").map(Column::id), Some(ColumnId::Doing));
        assert_eq!(board.locate("3").map(Column::id), Some(ColumnId::Todo));
        assert!(board.locate("99").is_none());
        assert!(board.locate("").is_none());
    }

    #[test]
    fn test_find_card() {
        let board = sample();
        assert_eq!(
            board.find_card(&TaskId::from("3")),
            Some(CardLocation {
                column: ColumnId::Todo,
                index: 1
            })
        );
        assert_eq!(board.card(&TaskId::from("4")).map(|t| t.title.as_str()), Some("Task 4"));
    }

    #[test]
    fn test_with_titles() {
        let board = Board::default().with_titles(|id| id.as_str().to_uppercase());
        assert_eq!(board.column(ColumnId::Done).title(), "DONE");
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        let mut board = Board::from_tasks(vec![
            task("1", TaskStatus::Todo),
            task("2", TaskStatus::Todo),
            task("3", TaskStatus::Todo),
        ]);
        assert!(board.reorder(ColumnId::Todo, 2, 0));
        assert_eq!(
            board.column(ColumnId::Todo).card_ids(),
            vec![TaskId::from("3"), TaskId::from("1"), TaskId::from("2")]
        );
        assert!(!board.reorder(ColumnId::Todo, 1, 1));
        assert!(!board.reorder(ColumnId::Todo, 0, 5));
    }

    #[test]
    fn test_insert_aligns_status() {
        let mut board = sample();
        let (from, index, card) = board.remove_card(&TaskId::from("1")).unwrap();
        assert_eq!((from, index), (ColumnId::Todo, 0));
        board.insert_card(ColumnId::Done, Some(0), card);
        let moved = board.card(&TaskId::from("1")).unwrap();
        assert_eq!(moved.status, TaskStatus::Done);
        assert_eq!(board.find_card(&TaskId::from("1")).unwrap().index, 0);
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn test_preview_leaves_board_untouched() {
        let board = sample();
        let preview = board.preview(&TaskId::from("1"), ColumnId::Done);
        assert_eq!(preview.column(ColumnId::Done).len(), 2);
        assert_eq!(preview.column(ColumnId::Todo).len(), 1);
        assert_eq!(board, sample());
    }
}
