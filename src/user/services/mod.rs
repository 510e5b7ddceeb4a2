//! Orchestration services for the user directory.

mod directory;

pub use directory::{
    RegisterUserRequest, UserDirectoryError, UserDirectoryResult, UserDirectoryService,
};
