//! Integration tests for the end-to-end task lifecycle scenarios.

use super::helpers::{Stack, stack};
use rstest::rstest;
use tasker::task::{
    domain::{ApprovalStatus, Task, TaskGuardError, TaskId, TaskStatus},
    services::{CreateTaskRequest, TaskFlowError},
};

/// Asserts exactly one task is found with the expected ID.
///
/// # Errors
///
/// Returns an error if the result set does not contain exactly one task
/// matching `expected_id`.
fn assert_single_task_found(found: &[Task], expected_id: TaskId) -> Result<(), eyre::Report> {
    eyre::ensure!(
        found.len() == 1,
        "expected exactly one task, found {}",
        found.len()
    );
    let task = found
        .first()
        .ok_or_else(|| eyre::eyre!("expected at least one task"))?;
    eyre::ensure!(task.id() == expected_id, "task ID mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invited_member_creates_and_completes_an_approved_task(stack: Stack) {
    let (space, _, member) = stack.frontend_space_with_member().await;

    let dashboard = stack
        .dashboards
        .create_dashboard("Sprint 12")
        .await
        .expect("dashboard creation should succeed");

    let task = stack
        .flow
        .create_task(
            CreateTaskRequest::new("Ship release notes", member, member)
                .in_space(space)
                .on_dashboard(dashboard.id())
                .with_approval(ApprovalStatus::Approved),
        )
        .await
        .expect("task creation should succeed");
    assert_eq!(task.status(), TaskStatus::ToDo);

    let done = stack
        .flow
        .mark_task_done(task.id())
        .await
        .expect("completion should succeed");
    assert_eq!(done.status(), TaskStatus::Done);
    assert!(done.done_at().is_some());

    let details = stack
        .flow
        .get_task(task.id())
        .await
        .expect("retrieval should succeed");
    assert_eq!(details.reporter_name.as_deref(), Some("Grace Hopper"));
    assert_eq!(details.dashboard_name.as_deref(), Some("Sprint 12"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_is_refused_while_a_blocker_remains(stack: Stack) {
    let (space, _, member) = stack.frontend_space_with_member().await;

    let task_9 = stack
        .flow
        .create_task(
            CreateTaskRequest::new("Finalize API contract", member, member)
                .in_space(space)
                .with_approval(ApprovalStatus::Approved),
        )
        .await
        .expect("blocker creation should succeed");

    let dependent = stack
        .flow
        .create_task(
            CreateTaskRequest::new("Publish client SDK", member, member)
                .in_space(space)
                .with_approval(ApprovalStatus::Approved)
                .blocked_by([task_9.id()]),
        )
        .await
        .expect("task creation should succeed");

    let refused = stack.flow.mark_task_done(dependent.id()).await;
    match refused {
        Err(TaskFlowError::Guard(TaskGuardError::Blocked { blockers, .. })) => {
            assert_eq!(blockers, vec![task_9.id()]);
        }
        other => panic!("expected blocked guard failure, got {other:?}"),
    }

    // The refused task is untouched.
    let details = stack
        .flow
        .get_task(dependent.id())
        .await
        .expect("retrieval should succeed");
    assert_eq!(details.task.status(), TaskStatus::ToDo);
    assert_eq!(details.task.done_at(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_spans_spaces_and_dashboards(stack: Stack) -> Result<(), eyre::Report> {
    let (space, admin, member) = stack.frontend_space_with_member().await;
    let dashboard = stack.dashboards.create_dashboard("Roadmap").await?;

    let on_board = stack
        .flow
        .create_task(
            CreateTaskRequest::new("On the board", member, admin)
                .in_space(space)
                .on_dashboard(dashboard.id()),
        )
        .await?;
    stack
        .flow
        .create_task(CreateTaskRequest::new("Off the board", member, admin).in_space(space))
        .await?;

    let all = stack.flow.list_tasks().await?;
    eyre::ensure!(all.len() == 2, "expected two tasks, found {}", all.len());

    let grouped = stack.flow.tasks_on_dashboard(dashboard.id()).await?;
    assert_single_task_found(&grouped, on_board.id())?;
    Ok(())
}
