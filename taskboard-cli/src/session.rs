//! Interactive session: drive the board with gesture events from stdin.
//!
//! The board stays in memory between lines, so intra-column reorders last
//! until `reload` or the end of the session.
//!
//! `drop` drives the two phases of a transfer itself (`end_gesture`, then the
//! status request and `complete_transfer`) so the pending state can be shown
//! before the server answers. `move` uses the one-call `move_card`.

use std::io::{BufRead, Write};

use taskboard::{
    BoardReconciler, ColumnTitles, DropResolution, GestureState, Outcome, TaskApi,
};

use crate::error::CliError;
use crate::render;

const HELP: &str = "\
commands:
  start <card>            begin dragging a card
  over <target>|-         hover over a column or card (- for nowhere)
  drop [target]           drop the dragged card (no target: outside the board)
  cancel                  abandon the current drag
  move <card> <target>    start and drop in one step
  delete <card> [version] delete a card
  board                   show the board
  reload                  fetch the board again (resets local ordering)
  state                   show the gesture state
  help                    show this help
  quit                    leave the session";

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Board plus the per-session settings needed to reload it
pub struct Session {
    reconciler: BoardReconciler,
    titles: ColumnTitles,
    notices_shown: usize,
}

impl Session {
    /// Load the board and start a session
    pub async fn start(api: &dyn TaskApi, titles: ColumnTitles) -> Result<Self, CliError> {
        let reconciler = BoardReconciler::load(api, &titles).await?;
        Ok(Self {
            reconciler,
            titles,
            notices_shown: 0,
        })
    }

    pub fn reconciler(&self) -> &BoardReconciler {
        &self.reconciler
    }

    /// Number of notices printed so far
    pub fn notices_shown(&self) -> usize {
        self.notices_shown
    }

    /// Handle one input line
    pub async fn handle_line(
        &mut self,
        api: &dyn TaskApi,
        line: &str,
        out: &mut dyn Write,
    ) -> Result<Control, CliError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Ok(Control::Continue);
        };
        tracing::debug!("session command: {}", line.trim());

        match (command, args) {
            ("start", [card]) => {
                if self.reconciler.start_gesture(card) {
                    writeln!(out, "dragging #{}", card)?;
                } else {
                    writeln!(out, "ignored")?;
                }
            }
            ("over", [target]) => {
                let target = (*target != "-").then_some(*target);
                self.reconciler.hover(target);
                writeln!(out, "{}", render::board_table(&self.reconciler.preview()))?;
            }
            ("drop", [] | [_]) => {
                let GestureState::Dragging { card, .. } = self.reconciler.state() else {
                    writeln!(out, "nothing is being dragged")?;
                    return Ok(Control::Continue);
                };
                let card = card.to_string();
                let outcome = match self.reconciler.end_gesture(&card, args.first().copied()) {
                    DropResolution::Done(outcome) => outcome,
                    DropResolution::Transfer(pending) => {
                        writeln!(out, "waiting for server: #{} -> {}", pending.card, pending.to)?;
                        let result = api
                            .update_status(&pending.card, &pending.status_update())
                            .await;
                        self.reconciler.complete_transfer(result)
                    }
                };
                self.report(&outcome, out)?;
            }
            ("cancel", []) => {
                self.reconciler.cancel_gesture();
                writeln!(out, "cancelled")?;
            }
            ("move", [card, target]) => {
                let outcome = self.reconciler.move_card(api, card, target).await;
                self.report(&outcome, out)?;
            }
            ("delete", [card]) => {
                let outcome = self.reconciler.delete_card(api, card, None).await;
                self.report(&outcome, out)?;
            }
            ("delete", [card, version]) => match version.parse::<u64>() {
                Ok(version) => {
                    let outcome = self.reconciler.delete_card(api, card, Some(version)).await;
                    self.report(&outcome, out)?;
                }
                Err(_) => writeln!(out, "version must be a number: {}", version)?,
            },
            ("board", []) => {
                writeln!(out, "{}", render::board_table(self.reconciler.board()))?;
            }
            ("reload", []) => match self.reconciler.reload(api, &self.titles).await {
                Ok(()) => writeln!(out, "reloaded {} task(s)", self.reconciler.board().len())?,
                Err(e) => writeln!(out, "reload failed: {}", e)?,
            },
            ("state", []) => writeln!(out, "{:?}", self.reconciler.state())?,
            ("help", _) => writeln!(out, "{}", HELP)?,
            ("quit" | "exit", _) => return Ok(Control::Quit),
            _ => writeln!(out, "unrecognized: {} (try 'help')", line.trim())?,
        }
        Ok(Control::Continue)
    }

    fn report(&mut self, outcome: &Outcome, out: &mut dyn Write) -> Result<(), CliError> {
        writeln!(out, "{}", render::describe(outcome))?;
        // Failed outcomes carry their notice; drain the queue so it is shown once.
        self.notices_shown += self.reconciler.take_notices().len();
        Ok(())
    }
}

/// Run the read-eval loop until `quit` or end of input.
///
/// Fails with [`CliError::SessionNotices`] when any notice was shown.
pub async fn run_session(
    api: &dyn TaskApi,
    titles: ColumnTitles,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut session = Session::start(api, titles).await?;
    writeln!(out, "{}", render::board_table(session.reconciler().board()))?;
    writeln!(out, "type 'help' for commands")?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if session.handle_line(api, &line, out).await? == Control::Quit {
            break;
        }
        out.flush()?;
    }

    match session.notices_shown() {
        0 => Ok(()),
        n => Err(CliError::SessionNotices(n)),
    }
}
