//! Service orchestration tests for the task lifecycle engine.

use std::sync::Arc;
use std::time::Duration;

use crate::dashboard::{
    adapters::memory::InMemoryDashboardStore,
    domain::{Dashboard, DashboardId, DashboardName},
    ports::DashboardStore,
};
use crate::space::{
    adapters::memory::InMemorySpaceStore,
    domain::{Membership, Space, SpaceId, SpaceName, SpaceRole},
    ports::SpaceStore,
    services::AccessError,
};
use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{
        ApprovalStatus, FieldUpdate, Task, TaskDomainError, TaskGuardError, TaskId, TaskPatch,
        TaskStatus,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
    services::{CreateTaskRequest, TaskFlowError, TaskFlowService},
};
use crate::user::{
    adapters::memory::InMemoryUserStore,
    domain::{CredentialHash, DisplayName, Login, RoleId, User, UserId},
    ports::UserStore,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskFlowService<
    InMemoryTaskStore,
    InMemorySpaceStore,
    InMemoryUserStore,
    InMemoryDashboardStore,
    DefaultClock,
>;

struct Harness {
    tasks: Arc<InMemoryTaskStore>,
    registry: Arc<InMemorySpaceStore>,
    users: Arc<InMemoryUserStore>,
    dashboards: Arc<InMemoryDashboardStore>,
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskStore::new());
    let registry = Arc::new(InMemorySpaceStore::new());
    let users = Arc::new(InMemoryUserStore::new());
    let dashboards = Arc::new(InMemoryDashboardStore::new());
    let service = TaskFlowService::new(
        Arc::clone(&tasks),
        Arc::clone(&registry),
        Arc::clone(&users),
        Arc::clone(&dashboards),
        Arc::new(DefaultClock),
    );
    Harness {
        tasks,
        registry,
        users,
        dashboards,
        service,
    }
}

impl Harness {
    async fn seed_space(&self) -> (SpaceId, UserId) {
        let creator = UserId::new();
        let space = Space::new(
            SpaceName::new("Frontend").expect("valid name"),
            creator,
            &DefaultClock,
        );
        let membership = Membership::new(space.id(), creator, SpaceRole::Admin);
        self.registry
            .create_space(&space, &membership)
            .await
            .expect("seed space");
        (space.id(), creator)
    }

    async fn seed_user(&self, given: &str, family: &str, login: &str) -> UserId {
        let user = User::register(
            DisplayName::new(given, family).expect("valid name"),
            Login::new(login).expect("valid login"),
            RoleId::new(1),
            CredentialHash::new("digest".to_owned()),
        );
        self.users.insert(&user).await.expect("seed user");
        user.id()
    }

    async fn approved_task(&self, space: SpaceId, reporter: UserId) -> Task {
        self.service
            .create_task(
                CreateTaskRequest::new("Ship release notes", reporter, reporter)
                    .in_space(space)
                    .with_approval(ApprovalStatus::Approved),
            )
            .await
            .expect("task creation should succeed")
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creation_without_a_space_is_rejected(harness: Harness) {
    let reporter = UserId::new();
    let result = harness
        .service
        .create_task(CreateTaskRequest::new("Orphan", reporter, reporter))
        .await;
    assert!(matches!(
        result,
        Err(TaskFlowError::Validation(TaskDomainError::MissingSpace))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_member_reporter_is_rejected_before_field_validation(harness: Harness) {
    let (space, _) = harness.seed_space().await;
    let outsider = UserId::new();

    // The title is invalid too; the membership rejection must win.
    let result = harness
        .service
        .create_task(CreateTaskRequest::new("", outsider, outsider).in_space(space))
        .await;
    assert!(matches!(
        result,
        Err(TaskFlowError::Authorization(AccessError::NotAMember { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_tasks_default_status_and_approval(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let task = harness
        .service
        .create_task(CreateTaskRequest::new("Ship release notes", reporter, reporter).in_space(space))
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), TaskStatus::ToDo);
    assert_eq!(task.approval(), ApprovalStatus::NeedApproval);
    assert_eq!(task.space(), Some(space));

    let stored = harness
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored, Some(task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_updates_only_named_fields(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let task = harness.approved_task(space, reporter).await;

    let patch = TaskPatch {
        description: FieldUpdate::Set("Collect highlights from the sprint".to_owned()),
        status: Some(TaskStatus::InProgress),
        ..TaskPatch::new()
    };
    tokio::time::sleep(Duration::from_millis(5)).await;
    let updated = harness
        .service
        .update_task(task.id(), &patch)
        .await
        .expect("patch should succeed");

    assert_eq!(updated.title(), task.title());
    assert_eq!(updated.approver(), task.approver());
    assert_eq!(
        updated.description(),
        Some("Collect highlights from the sprint")
    );
    assert_eq!(updated.status(), TaskStatus::InProgress);
    assert!(updated.updated_at() > task.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_patch_is_a_touch_only_update(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let task = harness.approved_task(space, reporter).await;

    tokio::time::sleep(Duration::from_millis(5)).await;
    let touched = harness
        .service
        .update_task(task.id(), &TaskPatch::new())
        .await
        .expect("empty patch should succeed");

    assert!(touched.updated_at() > task.updated_at());
    assert_eq!(touched.title(), task.title());
    assert_eq!(touched.status(), task.status());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patching_an_unknown_task_is_not_found(harness: Harness) {
    let id = TaskId::new();
    let result = harness.service.update_task(id, &TaskPatch::new()).await;
    assert!(matches!(
        result,
        Err(TaskFlowError::NotFound(missing)) if missing == id
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_done_names_the_remaining_blockers(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let blocker = harness.approved_task(space, reporter).await;
    let dependent = harness
        .service
        .create_task(
            CreateTaskRequest::new("Publish", reporter, reporter)
                .in_space(space)
                .with_approval(ApprovalStatus::Approved)
                .blocked_by([blocker.id()]),
        )
        .await
        .expect("task creation should succeed");

    let result = harness.service.mark_task_done(dependent.id()).await;
    match result {
        Err(TaskFlowError::Guard(TaskGuardError::Blocked { task, blockers })) => {
            assert_eq!(task, dependent.id());
            assert_eq!(blockers, vec![blocker.id()]);
        }
        other => panic!("expected blocked guard failure, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_done_rejects_pending_approval(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let task = harness
        .service
        .create_task(CreateTaskRequest::new("Needs sign-off", reporter, reporter).in_space(space))
        .await
        .expect("task creation should succeed");

    let result = harness.service.mark_task_done(task.id()).await;
    assert!(matches!(
        result,
        Err(TaskFlowError::Guard(TaskGuardError::ApprovalPending {
            approval: ApprovalStatus::NeedApproval,
            ..
        }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_done_stamps_completion_once(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let task = harness.approved_task(space, reporter).await;

    let done = harness
        .service
        .mark_task_done(task.id())
        .await
        .expect("completion should succeed");
    assert_eq!(done.status(), TaskStatus::Done);
    let stamp = done.done_at().expect("done_at should be stamped");

    tokio::time::sleep(Duration::from_millis(5)).await;
    let again = harness
        .service
        .mark_task_done(task.id())
        .await
        .expect("repeat completion is a no-op");
    assert_eq!(again.done_at(), Some(stamp));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_blockers_keep_blocking_until_patched(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let blocker = harness.approved_task(space, reporter).await;
    let dependent = harness
        .service
        .create_task(
            CreateTaskRequest::new("Publish", reporter, reporter)
                .in_space(space)
                .with_approval(ApprovalStatus::Approved)
                .blocked_by([blocker.id()]),
        )
        .await
        .expect("task creation should succeed");

    harness
        .service
        .delete_task(blocker.id())
        .await
        .expect("deletion should succeed");

    // The dangling id still blocks.
    let blocked = harness.service.mark_task_done(dependent.id()).await;
    assert!(matches!(
        blocked,
        Err(TaskFlowError::Guard(TaskGuardError::Blocked { .. }))
    ));

    // Patching the blocking set away clears the guard.
    let patch = TaskPatch {
        blocked_by: Some(Vec::new()),
        ..TaskPatch::new()
    };
    harness
        .service
        .update_task(dependent.id(), &patch)
        .await
        .expect("patch should succeed");
    harness
        .service
        .mark_task_done(dependent.id())
        .await
        .expect("completion should succeed once unblocked");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_is_idempotent(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let task = harness.approved_task(space, reporter).await;

    harness
        .service
        .delete_task(task.id())
        .await
        .expect("first delete should succeed");
    harness
        .service
        .delete_task(task.id())
        .await
        .expect("second delete should succeed");

    let remaining = harness
        .service
        .list_tasks()
        .await
        .expect("listing should succeed");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_listing_filters_by_reference(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let dashboard = DashboardId::new();
    let on_dashboard = harness
        .service
        .create_task(
            CreateTaskRequest::new("Grouped", reporter, reporter)
                .in_space(space)
                .on_dashboard(dashboard),
        )
        .await
        .expect("task creation should succeed");
    harness.approved_task(space, reporter).await;

    let listed = harness
        .service
        .tasks_on_dashboard(dashboard)
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed.first().map(Task::id),
        Some(on_dashboard.id())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_task_enriches_display_and_dashboard_names(harness: Harness) {
    let (space, creator) = harness.seed_space().await;
    let reporter = harness.seed_user("Ada", "Lovelace", "ada").await;
    harness
        .registry
        .upsert_member(&Membership::new(space, reporter, SpaceRole::Member))
        .await
        .expect("seed membership");
    let approver = harness.seed_user("Grace", "Hopper", "grace").await;
    let dashboard = Dashboard::new(DashboardName::new("Sprint 12").expect("valid name"));
    harness
        .dashboards
        .insert(&dashboard)
        .await
        .expect("seed dashboard");

    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new("Ship release notes", reporter, approver)
                .in_space(space)
                .on_dashboard(dashboard.id())
                .with_assigner(creator),
        )
        .await
        .expect("task creation should succeed");

    let details = harness
        .service
        .get_task(task.id())
        .await
        .expect("retrieval should succeed");
    assert_eq!(details.reporter_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(details.approver_name.as_deref(), Some("Grace Hopper"));
    assert_eq!(details.dashboard_name.as_deref(), Some("Sprint 12"));
    // The assigner was never registered in the directory.
    assert_eq!(details.assigner_name, None);
    assert_eq!(details.reviewer_name, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_task_tolerates_dangling_references(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new("Ship release notes", reporter, reporter)
                .in_space(space)
                .on_dashboard(DashboardId::new()),
        )
        .await
        .expect("task creation should succeed");

    let details = harness
        .service
        .get_task(task.id())
        .await
        .expect("retrieval should succeed");
    assert_eq!(details.reporter_name, None);
    assert_eq!(details.dashboard_name, None);
    assert_eq!(details.task.id(), task.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_retrieval_is_not_found(harness: Harness) {
    let id = TaskId::new();
    let result = harness.service.get_task(id).await;
    assert!(matches!(
        result,
        Err(TaskFlowError::NotFound(missing)) if missing == id
    ));
}

mockall::mock! {
    FaultyTaskStore {}

    #[async_trait]
    impl TaskStore for FaultyTaskStore {
        async fn insert(&self, task: &Task) -> TaskStoreResult<()>;
        async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;
        async fn find_all(&self) -> TaskStoreResult<Vec<Task>>;
        async fn find_by_dashboard(
            &self,
            dashboard: DashboardId,
        ) -> TaskStoreResult<Vec<Task>>;
        async fn apply_patch(
            &self,
            id: TaskId,
            patch: &TaskPatch,
            now: DateTime<Utc>,
        ) -> TaskStoreResult<Task>;
        async fn complete(&self, id: TaskId, now: DateTime<Utc>) -> TaskStoreResult<Task>;
        async fn delete(&self, id: TaskId) -> TaskStoreResult<bool>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn infrastructure_failures_surface_as_retryable_store_errors() {
    let mut store = MockFaultyTaskStore::new();
    store.expect_find_all().returning(|| {
        Err(TaskStoreError::persistence(std::io::Error::other(
            "connection reset",
        )))
    });

    let service = TaskFlowService::new(
        Arc::new(store),
        Arc::new(InMemorySpaceStore::new()),
        Arc::new(InMemoryUserStore::new()),
        Arc::new(InMemoryDashboardStore::new()),
        Arc::new(DefaultClock),
    );

    let result = service.list_tasks().await;
    match result {
        Err(err @ TaskFlowError::Store(TaskStoreError::Persistence(_))) => {
            assert!(err.is_retryable());
        }
        other => panic!("expected store error, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guard_failures_are_not_retryable(harness: Harness) {
    let (space, reporter) = harness.seed_space().await;
    let task = harness
        .service
        .create_task(CreateTaskRequest::new("Needs sign-off", reporter, reporter).in_space(space))
        .await
        .expect("task creation should succeed");

    let err = harness
        .service
        .mark_task_done(task.id())
        .await
        .expect_err("guard should reject");
    assert!(!err.is_retryable());
}

/// Store whose reads never resolve, for exercising the deadline bound.
struct StalledTaskStore;

#[async_trait]
impl TaskStore for StalledTaskStore {
    async fn insert(&self, _task: &Task) -> TaskStoreResult<()> {
        std::future::pending().await
    }

    async fn find_by_id(&self, _id: TaskId) -> TaskStoreResult<Option<Task>> {
        std::future::pending().await
    }

    async fn find_all(&self) -> TaskStoreResult<Vec<Task>> {
        std::future::pending().await
    }

    async fn find_by_dashboard(&self, _dashboard: DashboardId) -> TaskStoreResult<Vec<Task>> {
        std::future::pending().await
    }

    async fn apply_patch(
        &self,
        _id: TaskId,
        _patch: &TaskPatch,
        _now: DateTime<Utc>,
    ) -> TaskStoreResult<Task> {
        std::future::pending().await
    }

    async fn complete(&self, _id: TaskId, _now: DateTime<Utc>) -> TaskStoreResult<Task> {
        std::future::pending().await
    }

    async fn delete(&self, _id: TaskId) -> TaskStoreResult<bool> {
        std::future::pending().await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn elapsed_deadline_is_a_distinct_retryable_condition() {
    let service = TaskFlowService::new(
        Arc::new(StalledTaskStore),
        Arc::new(InMemorySpaceStore::new()),
        Arc::new(InMemoryUserStore::new()),
        Arc::new(InMemoryDashboardStore::new()),
        Arc::new(DefaultClock),
    )
    .with_op_deadline(Duration::from_millis(10));

    let result = service.list_tasks().await;
    match result {
        Err(err @ TaskFlowError::DeadlineExceeded) => assert!(err.is_retryable()),
        other => panic!("expected deadline error, got {other:?}"),
    }
}
