//! Task store and lifecycle engine for Tasker.
//!
//! Tasks carry a caller-driven status plus two guarded facts: a blocking set
//! of task ids and an approval state. The only transition the engine
//! enforces is entry into `done`, which is refused while blockers remain or
//! approval is pending. Updates travel as typed sparse patches; every
//! mutation refreshes `updated_at`. The module follows hexagonal
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
