//! Kanban task board backed by a REST task service
//!
//! The board shows three fixed columns (`todo`, `doing`, `done`). Each task
//! lives in the column matching its status. Cards are moved with drag
//! gestures, and the [`BoardReconciler`] turns those gestures into board changes:
//!
//! - Reordering cards inside a column is local only.
//! - Moving a card to another column is a status change. The board shows it
//!   only after the backend accepts it.
//! - Failures never change the board; they queue a [`Notice`] instead.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use taskboard::{BoardReconciler, ColumnTitles, HttpTaskApi, Outcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpTaskApi::new("http://localhost:8080")?;
//! let mut board = BoardReconciler::load(&api, &ColumnTitles::default()).await?;
//!
//! // Drag card 12 onto the "doing" column
//! board.start_gesture("12");
//! match board.drop_card(&api, "12", Some("doing")).await {
//!     Outcome::Failed(notice) => eprintln!("{}", notice),
//!     outcome => println!("{:?}", outcome),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: tasks, columns and the board
//! - [`api`]: the `TaskApi` seam and its HTTP client
//! - [`reconciler`]: gesture state machine
//! - [`board`], [`task`]: form-style commands (load, add, get, update)
//! - [`config`]: YAML configuration

pub mod api;
pub mod board;
pub mod config;
mod error;
mod logging;
pub mod reconciler;
pub mod task;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use api::{ApiError, HttpTaskApi, TaskApi};
pub use config::{BoardConfig, ColumnTitles};
pub use error::{BoardError, Result};
pub use logging::Pretty;
pub use reconciler::{BoardReconciler, DropResolution, GestureState, Notice, NoticeKind, Outcome};
pub use types::{Board, CardLocation, Column, ColumnId, Task, TaskId, TaskStatus};
