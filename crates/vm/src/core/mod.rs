//! Execution core.
//!
//! 1. **Bindings:** The flat name → view table for variables and registers.
//! 2. **Machine:** Instruction pointer, `step()` and the run loop.

/// Variable and register bindings.
pub mod bindings;

/// Execution engine.
pub mod machine;

pub use bindings::Bindings;
pub use machine::{Machine, RunOutcome};
