//! Space tenancy and membership registry for Tasker.
//!
//! A space is the tenant boundary grouping users and tasks. The registry
//! answers membership/role questions, upserts memberships, and creates a
//! space together with its creator's admin membership as one atomic unit; a
//! space with zero admins is never observable. The module follows hexagonal
//! architecture:
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
