//! Integration tests for concurrent guard behaviour.

use super::helpers::{Stack, stack};
use rstest::rstest;
use tasker::task::{
    domain::{ApprovalStatus, TaskStatus},
    services::CreateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_completions_agree_on_a_single_stamp(stack: Stack) {
    let (space, _, member) = stack.frontend_space_with_member().await;
    let task = stack
        .flow
        .create_task(
            CreateTaskRequest::new("Race me", member, member)
                .in_space(space)
                .with_approval(ApprovalStatus::Approved),
        )
        .await
        .expect("task creation should succeed");

    let (first, second) = tokio::join!(
        stack.flow.mark_task_done(task.id()),
        stack.flow.mark_task_done(task.id()),
    );

    let first = first.expect("first completion should succeed");
    let second = second.expect("second completion should succeed");
    assert_eq!(first.status(), TaskStatus::Done);
    assert_eq!(second.status(), TaskStatus::Done);
    assert_eq!(first.done_at(), second.done_at());
    assert!(first.done_at().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_on_distinct_tasks_interleave_freely(stack: Stack) {
    let (space, _, member) = stack.frontend_space_with_member().await;
    let mut created = Vec::new();
    for index in 0..8 {
        let task = stack
            .flow
            .create_task(
                CreateTaskRequest::new(format!("Task {index}"), member, member)
                    .in_space(space)
                    .with_approval(ApprovalStatus::Approved),
            )
            .await
            .expect("task creation should succeed");
        created.push(task.id());
    }

    let handles = created
        .iter()
        .map(|id| {
            let flow = stack.flow.clone();
            let id = *id;
            tokio::spawn(async move { flow.mark_task_done(id).await })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let done = handle
            .await
            .expect("completion task should not panic")
            .expect("completion should succeed");
        assert_eq!(done.status(), TaskStatus::Done);
    }
}
