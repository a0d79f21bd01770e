//! Common types used throughout the machine.
//!
//! This module provides the building blocks shared by every other layer. It includes:
//! 1. **Values:** `Int`, the immutable fixed-width two's-complement integer.
//! 2. **Error Handling:** The crate-wide `VmError` and `Result` alias.
//! 3. **Register Management:** The aliased 16-bit/8-bit register file.

/// Error types.
pub mod error;

/// Register names and the aliased register file.
pub mod reg;

/// Fixed-width integer values.
pub mod value;

pub use error::{Result, VmError};
pub use reg::{Register, RegisterFile};
pub use value::Int;
