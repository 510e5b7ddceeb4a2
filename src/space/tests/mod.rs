//! Unit tests for spaces and the membership registry.

mod domain_tests;
