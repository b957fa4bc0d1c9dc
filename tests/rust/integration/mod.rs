//! Integration tests - Gateway against a seeded in-memory SQLite store
//!
//! These tests verify that classification, sanitizing, binding and the
//! storage layer work together end to end.

mod adversarial_harness_tests;
mod common;
mod statement_lifecycle_tests;
