//! Behavioural integration tests for the in-memory work-tracking flow.
//!
//! These tests exercise the public API end to end: project CRUD, task and
//! to-do creation, and the derived status board, verifying the crate
//! behaves correctly in realistic usage scenarios.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;
use taskboard::adapters::memory::InMemoryDocumentStore;
use taskboard::domain::{Priority, Task, UserId};
use taskboard::repositories::{
    CreateProjectRequest, CreateTaskRequest, CreateTodoRequest, ProjectPatch, ProjectRepository,
    RepositoryError, TaskRepository, TodoRepository,
};
use taskboard::services::StatusBoardService;

type TestStore = InMemoryDocumentStore<DefaultClock>;

struct World {
    projects: ProjectRepository<TestStore>,
    tasks: Arc<TaskRepository<TestStore>>,
    todos: Arc<TodoRepository<TestStore>>,
    board: StatusBoardService<TestStore>,
}

#[fixture]
fn world() -> World {
    let store = Arc::new(InMemoryDocumentStore::new());
    let tasks = Arc::new(TaskRepository::new(Arc::clone(&store)));
    let todos = Arc::new(TodoRepository::new(Arc::clone(&store)));
    let board = StatusBoardService::new(Arc::clone(&tasks), Arc::clone(&todos));
    World {
        projects: ProjectRepository::new(store),
        tasks,
        todos,
        board,
    }
}

fn user(value: &str) -> UserId {
    UserId::new(value).expect("valid user id")
}

/// Asserts a bucket holds exactly the expected task names, in order.
///
/// # Errors
///
/// Returns an error describing the mismatch.
fn assert_bucket(bucket: &[Task], expected: &[&str]) -> Result<(), eyre::Report> {
    let names: Vec<&str> = bucket.iter().map(Task::name).collect();
    eyre::ensure!(
        names == expected,
        "bucket mismatch: got {names:?}, expected {expected:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_lifecycle_flows_through_the_repository(world: World) {
    let id = world
        .projects
        .create(
            CreateProjectRequest::new("Relaunch", "new site", "owner-1")
                .with_contributors(vec!["alice".to_owned()]),
        )
        .await
        .expect("project creation should succeed");

    let owned = world
        .projects
        .list_by_owner(&user("owner-1"))
        .await
        .expect("owner listing should succeed");
    assert_eq!(owned.len(), 1);

    let shared = world
        .projects
        .list_by_contributor(&user("alice"))
        .await
        .expect("contributor listing should succeed");
    assert_eq!(shared.len(), 1);

    world
        .projects
        .update(id, ProjectPatch::new().with_description("the relaunch"))
        .await
        .expect("update should succeed");

    world
        .projects
        .delete(id)
        .await
        .expect("delete should succeed");
    let remaining = world
        .projects
        .list_all()
        .await
        .expect("listing should succeed");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_leaves_its_tasks_in_place(world: World) {
    let project_id = world
        .projects
        .create(CreateProjectRequest::new("Doomed", "", "owner-1"))
        .await
        .expect("project creation should succeed");

    world
        .tasks
        .create(CreateTaskRequest::new(project_id, "Survivor", ""))
        .await
        .expect("task creation should succeed");

    world
        .projects
        .delete(project_id)
        .await
        .expect("delete should succeed");

    // No cascade: the task stays queryable under the orphaned project id.
    let orphans = world
        .tasks
        .list_by_project(project_id)
        .await
        .expect("task listing should succeed");
    assert_eq!(orphans.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_reflects_todo_completion_end_to_end(world: World) {
    let project_id = world
        .projects
        .create(CreateProjectRequest::new("Tracked", "", "owner-1"))
        .await
        .expect("project creation should succeed");

    let planning = world
        .tasks
        .create(CreateTaskRequest::new(project_id, "Planning", ""))
        .await
        .expect("task creation should succeed");
    let build = world
        .tasks
        .create(CreateTaskRequest::new(project_id, "Build", ""))
        .await
        .expect("task creation should succeed");

    let outline = world
        .todos
        .create(CreateTodoRequest::new(
            planning,
            Priority::High,
            "docs",
            "outline",
        ))
        .await
        .expect("to-do creation should succeed");
    world
        .todos
        .create(CreateTodoRequest::new(
            build,
            Priority::Medium,
            "code",
            "scaffold",
        ))
        .await
        .expect("to-do creation should succeed");

    let board = world
        .board
        .classify_project_tasks(project_id)
        .await
        .expect("classification should succeed");
    assert_bucket(board.not_started(), &["Build", "Planning"]).expect("both tasks untouched");

    world
        .todos
        .set_finished(outline, true)
        .await
        .expect("update should succeed");

    let board = world
        .board
        .classify_project_tasks(project_id)
        .await
        .expect("classification should succeed");
    assert_bucket(board.not_started(), &["Build"]).expect("build still untouched");
    assert_bucket(board.done(), &["Planning"]).expect("planning fully finished");
    assert_bucket(board.in_progress(), &[]).expect("nothing half done");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn absent_records_surface_as_typed_errors(world: World) {
    let result = world
        .todos
        .set_finished(taskboard::domain::TodoId::new(), true)
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));

    let fetched = world
        .tasks
        .find_by_id(taskboard::domain::TaskId::new())
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());
}
