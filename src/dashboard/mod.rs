//! Dashboard directory for Tasker.
//!
//! Dashboards are lightweight named groupings that tasks may point at.
//! They are deliberately unscoped: a dashboard belongs to no space, and a
//! task referencing a vanished dashboard stays readable. The module follows
//! hexagonal architecture:
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
