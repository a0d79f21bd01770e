//! Shared helpers for the machine tests.

/// `TestContext` harness.
pub mod harness;
