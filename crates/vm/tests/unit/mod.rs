//! # Unit Components
//!
//! This module serves as the central hub for the per-component tests, from the
//! value type at the bottom up to the execution engine and its loader.

/// Unit tests for the fixed-width integer value type.
///
/// Covers modular construction, signed interpretation, byte splitting,
/// sign-extension and wrapping arithmetic, plus property tests for each law.
pub mod value;





/// Unit tests for JSON configuration.
pub mod config;

/// Unit tests for reading programs from disk.
pub mod loader;
