//! Log formatting helpers.

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper for pretty-printing types in logs as YAML
///
/// ```ignore
/// use taskboard::Pretty;
/// tracing::debug!("board after drop: {}", Pretty(&board));
/// ```
///
/// Outputs YAML with a leading newline. Debug is used as a fallback if YAML
/// serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Task, TaskStatus};

    #[test]
    fn test_pretty_renders_yaml() {
        let task = Task::new("1", "Write docs", TaskStatus::Todo);
        let rendered = Pretty(&task).to_string();
        assert!(rendered.starts_with('\n'));
        assert!(rendered.contains("title: Write docs"));
        assert!(rendered.contains("status: TODO"));
    }
}
