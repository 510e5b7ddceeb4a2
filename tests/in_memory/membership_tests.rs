//! Integration tests for space membership and authorization flows.

use super::helpers::{Stack, stack};
use rstest::rstest;
use tasker::space::services::{AccessError, SpaceDirectoryError};
use tasker::task::services::{CreateTaskRequest, TaskFlowError};
use tasker::user::domain::UserId;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creator_holds_admin_and_can_invite(stack: Stack) {
    let (space, admin, member) = stack.frontend_space_with_member().await;

    let admin_role = stack
        .spaces
        .membership(space, admin)
        .await
        .expect("lookup should succeed");
    assert_eq!(
        admin_role,
        Some(tasker::space::domain::SpaceRole::Admin)
    );

    let member_role = stack
        .spaces
        .membership(space, member)
        .await
        .expect("lookup should succeed");
    assert_eq!(
        member_role,
        Some(tasker::space::domain::SpaceRole::Member)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_invite(stack: Stack) {
    let (space, _, member) = stack.frontend_space_with_member().await;
    let outsider = UserId::new();

    let result = stack.spaces.invite(space, member, outsider, None).await;
    assert!(matches!(
        result,
        Err(SpaceDirectoryError::Authorization(
            AccessError::RoleDenied { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_members_cannot_create_tasks(stack: Stack) {
    let (space, _, _) = stack.frontend_space_with_member().await;
    let outsider = stack.register_user("Mallory", "Intruder", "mallory").await;

    let result = stack
        .flow
        .create_task(CreateTaskRequest::new("Sneaky", outsider, outsider).in_space(space))
        .await;
    assert!(matches!(
        result,
        Err(TaskFlowError::Authorization(AccessError::NotAMember { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_space_orphans_its_tasks(stack: Stack) {
    let (space, _, member) = stack.frontend_space_with_member().await;
    let task = stack
        .flow
        .create_task(CreateTaskRequest::new("Survivor", member, member).in_space(space))
        .await
        .expect("task creation should succeed");

    stack
        .spaces
        .delete_space(space)
        .await
        .expect("deletion should succeed");

    // The task keeps its dangling space reference and stays readable.
    let details = stack
        .flow
        .get_task(task.id())
        .await
        .expect("retrieval should succeed");
    assert_eq!(details.task.space(), Some(space));
}
