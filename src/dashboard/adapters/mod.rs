//! Adapter implementations of the dashboard directory ports.

pub mod memory;
pub mod postgres;
