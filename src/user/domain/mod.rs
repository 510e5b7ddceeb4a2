//! Domain model for the user directory.
//!
//! Users carry the display-name parts used for task enrichment, a unique
//! login, a role identifier, and an opaque credential hash. All
//! infrastructure concerns stay outside of the domain boundary.

mod error;
mod ids;
mod name;
mod user;

pub use error::UserDomainError;
pub use ids::{RoleId, UserId};
pub use name::DisplayName;
pub use user::{CredentialHash, Login, PersistedUserData, User};
