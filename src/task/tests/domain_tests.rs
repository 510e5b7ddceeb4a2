//! Domain-focused tests for task statuses, patches, and the done guard.

use crate::space::domain::SpaceId;
use crate::task::domain::{
    ApprovalStatus, FieldUpdate, NewTaskData, ParseTaskStatusError, Task, TaskDomainError,
    TaskGuardError, TaskId, TaskPatch, TaskStatus, TaskTitle,
};
use crate::user::domain::UserId;
use chrono::{Duration, Utc};
use rstest::rstest;

fn new_task(approval: ApprovalStatus, blocked_by: Vec<TaskId>) -> Task {
    Task::new(
        NewTaskData {
            title: TaskTitle::new("Ship release notes").expect("valid title"),
            description: None,
            deadline: None,
            space: SpaceId::new(),
            dashboard: None,
            reporter: UserId::new(),
            assigner: None,
            reviewer: None,
            approver: UserId::new(),
            approval,
            blocked_by,
        },
        Utc::now(),
    )
}

#[rstest]
#[case("to-do", TaskStatus::ToDo)]
#[case("in-progress", TaskStatus::InProgress)]
#[case("review", TaskStatus::Review)]
#[case("blocked", TaskStatus::Blocked)]
#[case("done", TaskStatus::Done)]
#[case("canceled", TaskStatus::Canceled)]
#[case("  DONE  ", TaskStatus::Done)]
fn task_status_parses_storage_strings(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn task_status_rejects_unknown_values() {
    assert_eq!(
        TaskStatus::try_from("paused"),
        Err(ParseTaskStatusError("paused".to_owned()))
    );
}

#[rstest]
fn statuses_round_trip_through_storage_strings() {
    for status in [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Blocked,
        TaskStatus::Done,
        TaskStatus::Canceled,
    ] {
        assert_eq!(TaskStatus::try_from(status.as_str()), Ok(status));
    }
    for approval in [
        ApprovalStatus::NeedApproval,
        ApprovalStatus::Approval,
        ApprovalStatus::Approved,
        ApprovalStatus::Rejected,
    ] {
        assert_eq!(ApprovalStatus::try_from(approval.as_str()), Ok(approval));
    }
}

#[rstest]
#[case(ApprovalStatus::NeedApproval, true)]
#[case(ApprovalStatus::Approval, false)]
#[case(ApprovalStatus::Approved, false)]
#[case(ApprovalStatus::Rejected, false)]
fn only_need_approval_counts_as_pending(#[case] approval: ApprovalStatus, #[case] pending: bool) {
    assert_eq!(approval.is_pending(), pending);
}

#[rstest]
fn statuses_serialize_to_kebab_case_wire_strings() {
    let status = serde_json::to_string(&TaskStatus::InProgress).expect("serialize");
    assert_eq!(status, "\"in-progress\"");

    let approval: ApprovalStatus =
        serde_json::from_str("\"need-approval\"").expect("deserialize");
    assert_eq!(approval, ApprovalStatus::NeedApproval);
}

#[rstest]
#[case("")]
#[case("   ")]
fn task_title_rejects_empty_values(#[case] raw: &str) {
    assert_eq!(TaskTitle::new(raw), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn field_update_distinguishes_keep_clear_and_set() {
    let current = Some("old".to_owned());
    assert_eq!(
        FieldUpdate::<String>::Keep.resolve(current.clone()),
        current
    );
    assert_eq!(FieldUpdate::<String>::Clear.resolve(current.clone()), None);
    assert_eq!(
        FieldUpdate::Set("new".to_owned()).resolve(current),
        Some("new".to_owned())
    );

    assert_eq!(FieldUpdate::<String>::Keep.into_changeset(), None);
    assert_eq!(FieldUpdate::<String>::Clear.into_changeset(), Some(None));
    assert_eq!(
        FieldUpdate::Set("new".to_owned()).into_changeset(),
        Some(Some("new".to_owned()))
    );
}

#[rstest]
fn default_patch_is_empty() {
    assert!(TaskPatch::new().is_empty());
    let patch = TaskPatch {
        status: Some(TaskStatus::InProgress),
        ..TaskPatch::new()
    };
    assert!(!patch.is_empty());
}

#[rstest]
fn new_task_defaults_status_and_timestamps() {
    let task = new_task(ApprovalStatus::NeedApproval, Vec::new());
    assert_eq!(task.status(), TaskStatus::ToDo);
    assert_eq!(task.created_at(), task.updated_at());
    assert_eq!(task.done_at(), None);
    assert_eq!(task.started_at(), None);
}

#[rstest]
fn patch_touches_only_present_fields() {
    let mut task = new_task(ApprovalStatus::Approved, Vec::new());
    let original_title = task.title().clone();
    let original_approver = task.approver();
    let later = task.updated_at() + Duration::seconds(5);

    let patch = TaskPatch {
        description: FieldUpdate::Set("Write them in the changelog".to_owned()),
        deadline: FieldUpdate::Set("next Friday".to_owned()),
        status: Some(TaskStatus::InProgress),
        ..TaskPatch::new()
    };
    task.apply_patch(&patch, later);

    assert_eq!(task.title(), &original_title);
    assert_eq!(task.approver(), original_approver);
    assert_eq!(task.description(), Some("Write them in the changelog"));
    assert_eq!(task.deadline(), Some("next Friday"));
    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.updated_at(), later);
}

#[rstest]
fn patch_clears_nullable_fields_explicitly() {
    let mut task = new_task(ApprovalStatus::Approved, Vec::new());
    let later = task.updated_at() + Duration::seconds(1);
    task.apply_patch(
        &TaskPatch {
            description: FieldUpdate::Set("temporary".to_owned()),
            ..TaskPatch::new()
        },
        later,
    );

    let even_later = later + Duration::seconds(1);
    task.apply_patch(
        &TaskPatch {
            description: FieldUpdate::Clear,
            space: FieldUpdate::Clear,
            ..TaskPatch::new()
        },
        even_later,
    );

    assert_eq!(task.description(), None);
    assert_eq!(task.space(), None);
    assert_eq!(task.updated_at(), even_later);
}

#[rstest]
fn empty_patch_still_refreshes_updated_at() {
    let mut task = new_task(ApprovalStatus::Approved, Vec::new());
    let later = task.updated_at() + Duration::seconds(3);
    task.apply_patch(&TaskPatch::new(), later);
    assert_eq!(task.updated_at(), later);
}

#[rstest]
fn done_guard_rejects_while_blockers_remain() {
    let blocker = TaskId::new();
    let mut task = new_task(ApprovalStatus::Approved, vec![blocker]);
    let result = task.complete(Utc::now());

    assert_eq!(
        result,
        Err(TaskGuardError::Blocked {
            task: task.id(),
            blockers: vec![blocker],
        })
    );
    assert_eq!(task.status(), TaskStatus::ToDo);
    assert_eq!(task.done_at(), None);
}

#[rstest]
#[case(ApprovalStatus::NeedApproval, true)]
#[case(ApprovalStatus::Approval, false)]
#[case(ApprovalStatus::Approved, false)]
#[case(ApprovalStatus::Rejected, false)]
fn done_guard_checks_approval_state(#[case] approval: ApprovalStatus, #[case] rejected: bool) {
    let mut task = new_task(approval, Vec::new());
    let result = task.complete(Utc::now());

    if rejected {
        assert_eq!(
            result,
            Err(TaskGuardError::ApprovalPending {
                task: task.id(),
                approval,
            })
        );
    } else {
        assert_eq!(result, Ok(()));
        assert_eq!(task.status(), TaskStatus::Done);
        assert!(task.done_at().is_some());
    }
}

#[rstest]
fn completing_a_done_task_preserves_the_original_stamp() {
    let mut task = new_task(ApprovalStatus::Approved, Vec::new());
    let first = Utc::now();
    task.complete(first).expect("first completion should pass");
    let stamped = task.done_at();

    let second = first + Duration::seconds(30);
    task.complete(second).expect("repeat completion is a no-op");
    assert_eq!(task.done_at(), stamped);
    assert_eq!(task.updated_at(), first);
}
