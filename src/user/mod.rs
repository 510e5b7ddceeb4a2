//! User directory and authentication boundary for Tasker.
//!
//! Users are created at registration and immutable thereafter. Credential
//! hashing, token issuance, and token verification are treated as an opaque
//! [`ports::AuthProvider`] capability; the engine trusts caller-supplied user
//! identifiers derived from validated claims and never re-verifies tokens.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
