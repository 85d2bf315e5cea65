//! Property-based tests for the board reconciler
//!
//! Random boards are driven by random gestures and deletes against the
//! in-memory backend, with write failures injected along the way. After
//! every step the board must still mirror the backend.

use proptest::prelude::*;
use std::collections::BTreeMap;
use taskboard::test_support::{ApiCall, FakeTaskApi, Failure};
use taskboard::{
    Board, BoardReconciler, ColumnId, ColumnTitles, Outcome, Task, TaskId, TaskStatus,
};

/// Where a gesture ends up
#[derive(Debug, Clone)]
enum Target {
    Column(ColumnId),
    /// Index into the board's card ids, wrapped to the current size
    Card(usize),
    Outside,
}

#[derive(Debug, Clone)]
enum Step {
    /// start, hover, drop
    Drag { card: usize, target: Target },
    /// start, hover, cancel
    Abandon { card: usize, over: Target },
    Delete { card: usize, version: Option<u64> },
}

#[derive(Debug, Clone)]
struct Action {
    step: Step,
    failure: Option<Failure>,
}

fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Done),
    ]
}

fn column_strategy() -> impl Strategy<Value = ColumnId> {
    prop_oneof![
        Just(ColumnId::Todo),
        Just(ColumnId::Doing),
        Just(ColumnId::Done),
    ]
}

fn target_strategy() -> impl Strategy<Value = Target> {
    prop_oneof![
        2 => column_strategy().prop_map(Target::Column),
        2 => (0..16usize).prop_map(Target::Card),
        1 => Just(Target::Outside),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..16usize, target_strategy())
            .prop_map(|(card, target)| Step::Drag { card, target }),
        1 => (0..16usize, target_strategy())
            .prop_map(|(card, over)| Step::Abandon { card, over }),
        2 => (0..16usize, proptest::option::of(0..4u64))
            .prop_map(|(card, version)| Step::Delete { card, version }),
    ]
}

fn action_strategy() -> impl Strategy<Value = Action> {
    let failure = prop_oneof![
        Just(Failure::Server),
        Just(Failure::Conflict),
        Just(Failure::NotFound),
    ];
    (step_strategy(), proptest::option::weighted(0.3, failure))
        .prop_map(|(step, failure)| Action { step, failure })
}

fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(status_strategy(), 0..8).prop_map(|statuses| {
        statuses
            .into_iter()
            .enumerate()
            .map(|(i, status)| {
                let id = i as u64 + 1;
                Task::new(id, format!("Task {id}"), status).with_version(1)
            })
            .collect()
    })
}

fn pick(ids: &[TaskId], index: usize) -> Option<TaskId> {
    if ids.is_empty() {
        return None;
    }
    ids.get(index % ids.len()).cloned()
}

fn resolve(ids: &[TaskId], target: &Target) -> Option<String> {
    match target {
        Target::Column(column) => Some(column.as_str().to_string()),
        Target::Card(index) => pick(ids, *index).map(|id| id.to_string()),
        Target::Outside => None,
    }
}

/// Every card sits in exactly one column, with that column's status
fn check_columns(board: &Board) -> Result<BTreeMap<TaskId, Task>, TestCaseError> {
    let mut seen = BTreeMap::new();
    for column in board.columns() {
        for task in column.cards() {
            prop_assert_eq!(
                task.status,
                column.status(),
                "card {} has the wrong status for {}",
                task.id,
                column.id()
            );
            prop_assert!(
                seen.insert(task.id.clone(), task.clone()).is_none(),
                "card {} appears in more than one place",
                task.id
            );
        }
    }
    Ok(seen)
}

/// The board holds exactly the backend's tasks, with matching status and version
fn check_mirrors_server(board: &Board, api: &FakeTaskApi) -> Result<(), TestCaseError> {
    let cards = check_columns(board)?;
    let server: BTreeMap<TaskId, Task> = api
        .tasks()
        .into_iter()
        .map(|task| (task.id.clone(), task))
        .collect();

    prop_assert_eq!(
        cards.keys().collect::<Vec<_>>(),
        server.keys().collect::<Vec<_>>()
    );
    for (id, task) in &server {
        let card = &cards[id];
        prop_assert_eq!(card.status, task.status, "status of {}", id);
        prop_assert_eq!(card.version, task.version, "version of {}", id);
    }
    Ok(())
}

fn check_outcome(
    outcome: &Outcome,
    before: &Board,
    after: &Board,
    server_before: &[Task],
    api: &FakeTaskApi,
) -> Result<(), TestCaseError> {
    match outcome {
        Outcome::Unchanged => {
            prop_assert_eq!(after, before);
            prop_assert_eq!(api.tasks(), server_before);
        }
        Outcome::Failed(_) => {
            prop_assert_eq!(after, before, "failed step touched the board");
            prop_assert_eq!(api.tasks(), server_before, "failed step touched the server");
        }
        Outcome::Reordered { column, from, to } => {
            let mut expected = before.column(*column).card_ids();
            let card = expected.remove(*from);
            expected.insert(*to, card);
            prop_assert_eq!(after.column(*column).card_ids(), expected);
            for other in ColumnId::ALL.into_iter().filter(|c| c != column) {
                prop_assert_eq!(after.column(other), before.column(other));
            }
            prop_assert_eq!(api.tasks(), server_before, "reorders stay local");
        }
        Outcome::Moved { card, from, to } => {
            prop_assert_ne!(from, to);
            let mut expected_from = before.column(*from).card_ids();
            expected_from.retain(|id| id != card);
            prop_assert_eq!(after.column(*from).card_ids(), expected_from);
            prop_assert!(after.column(*to).position_of(card).is_some());
            prop_assert_eq!(after.column(*to).len(), before.column(*to).len() + 1);
            prop_assert_eq!(after.len(), before.len());
        }
        Outcome::Deleted { card, column } => {
            let mut expected = before.column(*column).card_ids();
            expected.retain(|id| id != card);
            prop_assert_eq!(after.column(*column).card_ids(), expected);
            prop_assert!(after.card(card).is_none());
            prop_assert_eq!(after.len() + 1, before.len());
        }
    }
    Ok(())
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: after any sequence of drags, abandoned drags and deletes,
    /// with or without failing writes, the board mirrors the backend.
    #[test]
    fn test_board_mirrors_server_after_every_step(
        tasks in tasks_strategy(),
        actions in prop::collection::vec(action_strategy(), 1..24),
    ) {
        runtime().block_on(async {
            let api = FakeTaskApi::with_tasks(tasks);
            let mut rec = BoardReconciler::load(&api, &ColumnTitles::default())
                .await
                .unwrap();
            check_mirrors_server(rec.board(), &api)?;

            for action in actions {
                let ids = rec.board().card_ids();
                let before = rec.board().clone();
                let server_before = api.tasks();
                let notices_before = rec.notices().len();

                // An unused failure stays armed for a later write; that write must roll back too.
                if let Some(failure) = action.failure {
                    api.fail_next_write(failure);
                }

                let outcome = match &action.step {
                    Step::Drag { card, target } => {
                        let Some(card) = pick(&ids, *card) else { continue };
                        let target = resolve(&ids, target);
                        prop_assert!(rec.start_gesture(card.as_str()));
                        rec.hover(target.as_deref());
                        check_columns(&rec.preview())?;
                        prop_assert_eq!(rec.preview().len(), before.len());
                        rec.drop_card(&api, card.as_str(), target.as_deref()).await
                    }
                    Step::Abandon { card, over } => {
                        let Some(card) = pick(&ids, *card) else { continue };
                        let over = resolve(&ids, over);
                        prop_assert!(rec.start_gesture(card.as_str()));
                        rec.hover(over.as_deref());
                        rec.cancel_gesture();
                        Outcome::Unchanged
                    }
                    Step::Delete { card, version } => {
                        let Some(card) = pick(&ids, *card) else { continue };
                        rec.delete_card(&api, card.as_str(), *version).await
                    }
                };

                prop_assert!(rec.state().is_idle(), "gesture left open after {:?}", action);
                let expected_notices = notices_before + usize::from(outcome.is_failure());
                prop_assert_eq!(rec.notices().len(), expected_notices);
                check_outcome(&outcome, &before, rec.board(), &server_before, &api)?;
                check_mirrors_server(rec.board(), &api)?;
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Property: a reorder is a permutation of its column
    #[test]
    fn test_reorder_is_permutation(
        len in 1..10u64,
        from in 0..16usize,
        onto in 0..16usize,
    ) {
        runtime().block_on(async {
            let tasks: Vec<Task> = (1..=len)
                .map(|id| Task::new(id, format!("Task {id}"), TaskStatus::Todo).with_version(1))
                .collect();
            let api = FakeTaskApi::with_tasks(tasks);
            let mut rec = BoardReconciler::load(&api, &ColumnTitles::default())
                .await
                .unwrap();
            let ids = rec.board().column(ColumnId::Todo).card_ids();
            let card = ids[from % ids.len()].clone();
            let target = ids[onto % ids.len()].clone();

            let outcome = rec.move_card(&api, card.as_str(), target.as_str()).await;

            let mut after = rec.board().column(ColumnId::Todo).card_ids();
            let mut sorted = ids.clone();
            after.sort();
            sorted.sort();
            prop_assert_eq!(after, sorted);
            prop_assert_eq!(
                rec.board().column(ColumnId::Todo).position_of(&card),
                ids.iter().position(|id| *id == target)
            );
            if card == target {
                prop_assert_eq!(outcome, Outcome::Unchanged);
            } else {
                let is_reorder = matches!(outcome, Outcome::Reordered { .. });
                prop_assert!(is_reorder);
            }
            prop_assert!(api.calls().iter().all(|call| *call == ApiCall::List));
            Ok::<(), TestCaseError>(())
        })?;
    }
}
