//! Tasker: multi-tenant task-tracking core.
//!
//! This crate provides the task lifecycle and authorization engine for a
//! workspace-based task tracker: space membership gating task creation and
//! mutation, the task status/approval state machine with its blocking-graph
//! completion guard, and a typed sparse-patch mechanism for partial updates.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`space`]: Space tenancy and the membership registry
//! - [`task`]: Task store and lifecycle engine
//! - [`dashboard`]: Dashboard directory
//! - [`user`]: User directory and the authentication provider boundary

pub mod dashboard;
pub mod deadline;
pub mod space;
pub mod task;
pub mod user;
