//! Status aggregation: classifies a project's tasks from their to-do
//! completion state.

use crate::domain::{DerivedStatus, ProjectId, TaskStatusBoard};
use crate::ports::DocumentStore;
use crate::repositories::{RepositoryResult, TaskRepository, TodoRepository};
use futures::future;
use std::sync::Arc;

/// Aggregation service producing the three-way task partition.
#[derive(Debug)]
pub struct StatusBoardService<S> {
    tasks: Arc<TaskRepository<S>>,
    todos: Arc<TodoRepository<S>>,
}

impl<S> Clone for StatusBoardService<S> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            todos: Arc::clone(&self.todos),
        }
    }
}

impl<S> StatusBoardService<S>
where
    S: DocumentStore,
{
    /// Creates a new aggregation service.
    #[must_use]
    pub const fn new(tasks: Arc<TaskRepository<S>>, todos: Arc<TodoRepository<S>>) -> Self {
        Self { tasks, todos }
    }

    /// Partitions the project's tasks into not-started, in-progress, and
    /// done buckets.
    ///
    /// Tasks are fetched most recently created first; one to-do fetch per
    /// task then runs concurrently and the join preserves task order, so
    /// every bucket keeps the fetch order regardless of which fetch
    /// completes first. The first failing fetch fails the whole
    /// aggregation; no partial partition is returned.
    ///
    /// Classification reads only the to-do completion flags. The task's
    /// stored free-form `status` label plays no part and is never written
    /// back.
    ///
    /// # Errors
    ///
    /// Returns the first repository failure encountered by the task fetch
    /// or any to-do fetch.
    pub async fn classify_project_tasks(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<TaskStatusBoard> {
        let tasks = self.tasks.list_by_project(project_id).await?;
        let fetches = tasks.iter().map(|task| self.todos.list_by_task(task.id()));
        let todo_sets = future::try_join_all(fetches).await?;

        let mut board = TaskStatusBoard::new();
        for (task, todos) in tasks.into_iter().zip(todo_sets) {
            board.assign(DerivedStatus::from_todos(&todos), task);
        }
        tracing::debug!(
            project = %project_id,
            not_started = board.not_started().len(),
            in_progress = board.in_progress().len(),
            done = board.done().len(),
            "classified project tasks"
        );
        Ok(board)
    }
}
