//! Byte-addressable virtual machine library.
//!
//! This crate interprets a small x86-like assembly dialect with the following:
//! 1. **Values:** Fixed-width two's-complement integers with splitting and sign-extension.
//! 2. **Memory:** Shared byte buffers and integer views into them; overlapping views alias.
//! 3. **Registers:** `ax`..`dx` and their byte halves, aliased over one 8-byte buffer.
//! 4. **ISA:** `mov`, `add`, `sub`, `cbw`, `cwd` and the load-time `define` directive.
//! 5. **Execution:** A linear instruction-pointer machine, source loader, configuration and statistics.

/// Assembly tokenizer and parser.
pub mod asm;
/// Common types (values, registers, errors).
pub mod common;
/// Run configuration (tracing, step budget, `cwd` semantics).
pub mod config;
/// Execution core (bindings, machine).
pub mod core;
/// Instruction set (opcodes, instructions, programs).
pub mod isa;
/// Byte buffers and integer views.
pub mod memory;
/// Source loader.
pub mod sim;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main execution type; construct with `Machine::new` or `Machine::from_source`.
pub use crate::core::Machine;
/// Crate-wide error type.
pub use crate::common::{Int, Result, VmError};
