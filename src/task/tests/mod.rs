//! Unit tests for the task store and lifecycle engine.

mod domain_tests;
mod service_tests;
