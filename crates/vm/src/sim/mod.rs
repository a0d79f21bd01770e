//! Simulation utilities and program loading.
//!
//! Provides utilities for reading assembly sources from disk and turning them into
//! ready-to-run machines.

pub mod loader;
