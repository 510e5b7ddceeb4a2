//! Port contracts for the membership registry.

mod repository;

pub use repository::{SpaceStore, SpaceStoreError, SpaceStoreResult};
