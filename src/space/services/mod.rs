//! Orchestration services for spaces and memberships.

mod access;
mod directory;

pub use access::{AccessError, AccessPolicy};
pub use directory::{SpaceDirectoryError, SpaceDirectoryResult, SpaceDirectoryService};
