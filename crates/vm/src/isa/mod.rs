//! Instruction Set Definitions.
//!
//! Contains the mnemonic table, the decoded instruction form and the program container.
//!
//! # Instructions
//!
//! * `mov dst, src` / `add dst, src` / `sub dst, src`: equal-width data movement and wrapping arithmetic.
//! * `cbw`: sign-extend `al` into `ax`.
//! * `cwd`: sign-extend `ax` into `dx:ax`.
//! * `define name db|dw literal`: load-time variable declaration.

/// Decoded instructions and operands.
pub mod instruction;

/// Mnemonic table.
pub mod opcode;

/// Program container and variable declarations.
pub mod program;

pub use instruction::{Instruction, Operand};
pub use opcode::Opcode;
pub use program::{DataSize, Program, VariableDecl};
