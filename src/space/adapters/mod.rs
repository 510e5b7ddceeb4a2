//! Adapter implementations of the membership registry ports.

pub mod memory;
pub mod postgres;
