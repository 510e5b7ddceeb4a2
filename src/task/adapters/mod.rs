//! Adapter implementations of the task store ports.

pub mod memory;
pub mod postgres;
