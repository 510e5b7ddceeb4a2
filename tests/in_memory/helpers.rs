//! Shared test helpers wiring the full in-memory stack.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasker::dashboard::{
    adapters::memory::InMemoryDashboardStore, services::DashboardDirectoryService,
};
use tasker::space::{
    adapters::memory::InMemorySpaceStore,
    domain::{SpaceId, SpaceRole},
    services::SpaceDirectoryService,
};
use tasker::task::{adapters::memory::InMemoryTaskStore, services::TaskFlowService};
use tasker::user::{
    adapters::memory::{InMemoryAuthProvider, InMemoryUserStore},
    domain::{RoleId, UserId},
    services::{RegisterUserRequest, UserDirectoryService},
};

/// The complete engine wired over in-memory adapters.
pub struct Stack {
    /// Space directory and membership registry service.
    pub spaces: SpaceDirectoryService<InMemorySpaceStore, DefaultClock>,
    /// Dashboard directory service.
    pub dashboards: DashboardDirectoryService<InMemoryDashboardStore>,
    /// Task lifecycle engine.
    pub flow: TaskFlowService<
        InMemoryTaskStore,
        InMemorySpaceStore,
        InMemoryUserStore,
        InMemoryDashboardStore,
        DefaultClock,
    >,
    /// User directory service.
    pub directory:
        UserDirectoryService<InMemoryUserStore, InMemoryAuthProvider<InMemoryUserStore, DefaultClock>>,
}

/// Provides a freshly wired engine for each test.
#[fixture]
pub fn stack() -> Stack {
    let registry = Arc::new(InMemorySpaceStore::new());
    let tasks = Arc::new(InMemoryTaskStore::new());
    let users = Arc::new(InMemoryUserStore::new());
    let dashboards = Arc::new(InMemoryDashboardStore::new());
    let clock = Arc::new(DefaultClock);

    let auth = Arc::new(InMemoryAuthProvider::new(
        Arc::clone(&users),
        Arc::clone(&clock),
    ));

    Stack {
        spaces: SpaceDirectoryService::new(Arc::clone(&registry), Arc::clone(&clock)),
        dashboards: DashboardDirectoryService::new(Arc::clone(&dashboards)),
        flow: TaskFlowService::new(tasks, registry, Arc::clone(&users), dashboards, clock),
        directory: UserDirectoryService::new(users, auth),
    }
}

impl Stack {
    /// Registers a user and returns their identifier.
    pub async fn register_user(&self, given: &str, family: &str, login: &str) -> UserId {
        self.directory
            .register(RegisterUserRequest::new(
                given,
                family,
                login,
                RoleId::new(1),
                "s3cret",
            ))
            .await
            .expect("registration should succeed")
            .id()
    }

    /// Creates a space and invites a member, returning (space, admin, member).
    pub async fn frontend_space_with_member(&self) -> (SpaceId, UserId, UserId) {
        let admin = self.register_user("Ada", "Lovelace", "ada").await;
        let member = self.register_user("Grace", "Hopper", "grace").await;

        let space = self
            .spaces
            .create_space("Frontend", admin)
            .await
            .expect("space creation should succeed");
        self.spaces
            .invite(space.id(), admin, member, Some(SpaceRole::Member))
            .await
            .expect("invite should succeed");

        (space.id(), admin, member)
    }
}
