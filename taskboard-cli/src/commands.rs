//! One-shot subcommands.
//!
//! Each command loads what it needs from the backend, does one thing, and
//! writes its result to `out`. Gestures and deletes that produce a notice
//! fail with [`CliError::Notice`].

use std::io::Write;

use taskboard::board::LoadBoard;
use taskboard::task::{AddTask, GetTask, UpdateTask};
use taskboard::{BoardReconciler, ColumnId, ColumnTitles, Outcome, TaskApi};

use crate::cli::{ColumnArg, TaskFieldArgs};
use crate::error::CliError;
use crate::render;

impl From<ColumnArg> for ColumnId {
    fn from(arg: ColumnArg) -> Self {
        match arg {
            ColumnArg::Todo => ColumnId::Todo,
            ColumnArg::Doing => ColumnId::Doing,
            ColumnArg::Done => ColumnId::Done,
        }
    }
}

/// `taskboard board`
pub async fn run_board(
    api: &dyn TaskApi,
    titles: &ColumnTitles,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let board = LoadBoard::new()
        .with_titles(titles.clone())
        .execute(api)
        .await?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&board)?)?;
    } else {
        writeln!(out, "{}", render::board_table(&board))?;
        writeln!(out, "{} task(s)", board.len())?;
    }
    Ok(())
}

/// `taskboard show <id>`
pub async fn run_show(
    api: &dyn TaskApi,
    id: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let task = GetTask::new(id).execute(api).await?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&task)?)?;
    } else {
        write!(out, "{}", render::task_detail(&task))?;
    }
    Ok(())
}

/// `taskboard new`
pub async fn run_new(
    api: &dyn TaskApi,
    status: ColumnArg,
    fields: TaskFieldArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let Some(title) = fields.title else {
        return Err(CliError::Usage("--title is required".to_string()));
    };

    let mut cmd = AddTask::new(title).in_column(status.into());
    cmd.start_date = fields.start;
    cmd.due_date = fields.due;
    cmd.condition = fields.condition;
    cmd.memo = fields.memo;

    match cmd.execute(api).await? {
        Some(task) => writeln!(out, "created #{} in {}", task.id, task.column())?,
        None => writeln!(out, "created '{}' in {}", cmd.title.trim(), status)?,
    }
    Ok(())
}

/// `taskboard edit <id>`
pub async fn run_edit(
    api: &dyn TaskApi,
    id: &str,
    fields: TaskFieldArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cmd = UpdateTask {
        title: fields.title,
        start_date: fields.start,
        due_date: fields.due,
        condition: fields.condition,
        memo: fields.memo,
        ..UpdateTask::new(id)
    };
    if cmd.is_empty() {
        return Err(CliError::Usage("nothing to change".to_string()));
    }
    cmd.execute(api).await?;
    writeln!(out, "updated #{}", id)?;
    Ok(())
}

/// `taskboard move <card> <target>`: one full gesture on a fresh board
pub async fn run_move(
    api: &dyn TaskApi,
    titles: &ColumnTitles,
    card: &str,
    target: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut reconciler = BoardReconciler::load(api, titles).await?;
    let outcome = reconciler.move_card(api, card, target).await;
    report(outcome, out)
}

/// `taskboard delete <card>`
pub async fn run_delete(
    api: &dyn TaskApi,
    titles: &ColumnTitles,
    card: &str,
    version: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut reconciler = BoardReconciler::load(api, titles).await?;
    let outcome = reconciler.delete_card(api, card, version).await;
    report(outcome, out)
}

fn report(outcome: Outcome, out: &mut dyn Write) -> Result<(), CliError> {
    match outcome {
        Outcome::Failed(notice) => Err(CliError::Notice(notice)),
        outcome => {
            writeln!(out, "{}", render::describe(&outcome))?;
            Ok(())
        }
    }
}
