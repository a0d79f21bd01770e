//! Machine error definitions.
//!
//! This module defines the single error type shared by every layer of the machine. It covers:
//! 1. **Load errors:** Malformed source lines, duplicate declarations, I/O and config failures.
//! 2. **Value errors:** Width mismatches, invalid splits and sign-extensions.
//! 3. **Execution errors:** Undefined names, stray directives and instruction pointer overruns.
//!
//! Every variant is deterministic and data-dependent; none of them is ever swallowed.
//! Arithmetic wraparound is not an error and never produces one.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, VmError>;

/// Errors raised while loading or executing a program.
#[derive(Debug, Error)]
pub enum VmError {
    /// A source line could not be turned into an instruction or declaration.
    ///
    /// Fatal at load time: no instruction runs once this is returned.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based source line number.
        line: usize,
        /// Human readable description of the problem.
        message: String,
        /// Error raised by the component that rejected the line, if any.
        #[source]
        source: Option<Box<VmError>>,
    },

    /// An operand names neither a declared variable nor a register.
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),

    /// Two values (or a value and a view) disagree on their width in bytes.
    #[error("width mismatch: expected {expected} byte(s), got {actual}")]
    WidthMismatch {
        /// Width required by the destination or left operand.
        expected: usize,
        /// Width actually supplied.
        actual: usize,
    },

    /// Mnemonic is not part of the instruction set.
    #[error("unknown opcode `{0}`")]
    UnknownOpcode(String),

    /// Split sizes do not add up to the width being split.
    #[error("cannot split a {width}-byte value into {sizes:?}")]
    InvalidSplit {
        /// Width of the value or view being split.
        width: usize,
        /// Requested part sizes.
        sizes: Vec<usize>,
    },

    /// Width is zero or larger than the widest supported integer.
    #[error("invalid width {0}: must be between 1 and 8 bytes")]
    InvalidWidth(usize),

    /// Sign-extension was asked to narrow a value.
    #[error("cannot sign-extend a {from}-byte value to {to} byte(s)")]
    InvalidExtension {
        /// Width of the source value.
        from: usize,
        /// Requested (smaller) width.
        to: usize,
    },

    /// An instruction carries the wrong number of operands.
    #[error("`{opcode}` takes {expected} operand(s), got {actual}")]
    ArityMismatch {
        /// Mnemonic of the offending instruction.
        opcode: String,
        /// Operand count the opcode requires.
        expected: usize,
        /// Operand count found.
        actual: usize,
    },

    /// A variable is declared twice, or shadows a register name.
    #[error("`{0}` is already defined")]
    DuplicateVariable(String),

    /// A `define` directive reached the execution engine.
    #[error("`define` is a load-time directive and cannot be executed")]
    UnexpectedDefine,

    /// `step()` was called with the instruction pointer past the last instruction.
    #[error("instruction pointer {ip} out of range for a program of {len} instruction(s)")]
    InstructionPointerOutOfRange {
        /// Current instruction pointer.
        ip: usize,
        /// Number of instructions in the program.
        len: usize,
    },

    /// A view would reach past the end of its backing buffer.
    #[error("view [{offset}, {offset}+{width}) exceeds buffer of {len} byte(s)")]
    OutOfBounds {
        /// Start offset of the view.
        offset: usize,
        /// Width of the view.
        width: usize,
        /// Length of the backing buffer.
        len: usize,
    },

    /// Reading a source or config file failed.
    #[error("could not read `{}`", path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A JSON configuration document was rejected.
    #[error("invalid configuration")]
    Config(#[source] serde_json::Error),
}

impl VmError {
    /// Builds a [`VmError::Parse`] for `line`.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
            source: None,
        }
    }

    /// Builds a [`VmError::Parse`] for `line` that keeps `cause` as its source.
    pub fn parse_caused_by(line: usize, message: impl Into<String>, cause: Self) -> Self {
        Self::Parse {
            line,
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }
}
