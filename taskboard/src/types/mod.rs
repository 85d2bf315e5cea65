//! Core types for the task board

mod board;
mod ids;
mod task;

// Re-export all types
pub use board::{Board, CardLocation, Column};
pub use ids::{ColumnId, TaskId};
pub use task::{Task, TaskStatus};
