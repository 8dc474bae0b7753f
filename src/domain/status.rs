//! Derived task status and the three-way partition view.

use super::{Task, TodoItem};
use serde::Serialize;
use std::fmt;

/// Completion status derived from a task's to-do set.
///
/// Computed on read and never persisted; the task's stored free-form
/// `status` label is a separate, user-editable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedStatus {
    /// No to-do item has been completed, or the task has no to-dos at all.
    NotStarted,
    /// Some, but not all, to-do items have been completed.
    InProgress,
    /// Every to-do item has been completed.
    Done,
}

impl DerivedStatus {
    /// Classifies a task from its to-do set.
    ///
    /// An empty set is [`DerivedStatus::NotStarted`]; a singleton set
    /// follows the all-finished / none-finished rules trivially.
    #[must_use]
    pub fn from_todos(todos: &[TodoItem]) -> Self {
        if todos.is_empty() {
            return Self::NotStarted;
        }
        let finished = todos.iter().filter(|todo| todo.is_finished()).count();
        if finished == todos.len() {
            Self::Done
        } else if finished == 0 {
            Self::NotStarted
        } else {
            Self::InProgress
        }
    }

    /// Returns the canonical presentation label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for DerivedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partition of a project's tasks by derived status.
///
/// Buckets are disjoint; each preserves the relative order of the task
/// fetch that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusBoard {
    not_started: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl TaskStatusBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task to the bucket for the given status.
    pub fn assign(&mut self, status: DerivedStatus, task: Task) {
        match status {
            DerivedStatus::NotStarted => self.not_started.push(task),
            DerivedStatus::InProgress => self.in_progress.push(task),
            DerivedStatus::Done => self.done.push(task),
        }
    }

    /// Returns the tasks no contributor has started.
    #[must_use]
    pub fn not_started(&self) -> &[Task] {
        &self.not_started
    }

    /// Returns the tasks with partially completed to-dos.
    #[must_use]
    pub fn in_progress(&self) -> &[Task] {
        &self.in_progress
    }

    /// Returns the fully completed tasks.
    #[must_use]
    pub fn done(&self) -> &[Task] {
        &self.done
    }

    /// Returns the number of tasks across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.not_started.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns whether every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
