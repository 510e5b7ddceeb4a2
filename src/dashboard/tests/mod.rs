//! Unit tests for the dashboard directory.
