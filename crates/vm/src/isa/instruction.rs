//! Decoded instructions.
//!
//! Parsing produces `(opcode, operands)` records; [`Instruction::from_parts`] checks them
//! once and turns them into a closed enum, so the execution engine dispatches with an
//! exhaustive `match` and never sees an unknown tag or a wrong operand count.

use std::fmt;

use crate::common::error::{Result, VmError};

use super::opcode::Opcode;

/// An instruction operand as written in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Variable or register name.
    Name(String),
    /// Integer literal; takes the width of the destination it is applied to.
    Literal(i128),
}

impl Operand {
    /// Shorthand for a named operand.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Literal(value) => write!(f, "{value}"),
        }
    }
}

/// An executable instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `mov dst, src`
    Mov {
        /// Destination name.
        dst: String,
        /// Source name or literal.
        src: Operand,
    },
    /// `add dst, src`
    Add {
        /// Destination (and left operand) name.
        dst: String,
        /// Right operand.
        src: Operand,
    },
    /// `sub dst, src`
    Sub {
        /// Destination (and left operand) name.
        dst: String,
        /// Right operand.
        src: Operand,
    },
    /// `cbw`
    Cbw,
    /// `cwd`
    Cwd,
}

impl Instruction {
    /// Builds an instruction from an opcode and its operand list.
    ///
    /// # Errors
    ///
    /// - [`VmError::UnexpectedDefine`] for [`Opcode::Define`], which is not executable.
    /// - [`VmError::ArityMismatch`] when the operand count is wrong.
    /// - [`VmError::UndefinedVariable`] when a literal is used as a destination.
    pub fn from_parts(opcode: Opcode, args: Vec<Operand>) -> Result<Self> {
        if !opcode.is_executable() {
            return Err(VmError::UnexpectedDefine);
        }
        if args.len() != opcode.arity() {
            return Err(VmError::ArityMismatch {
                opcode: opcode.mnemonic().to_string(),
                expected: opcode.arity(),
                actual: args.len(),
            });
        }

        let mut args = args.into_iter();
        let mut binary = |make: fn(String, Operand) -> Self| -> Result<Self> {
            match (args.next(), args.next()) {
                (Some(Operand::Name(dst)), Some(src)) => Ok(make(dst, src)),
                (Some(Operand::Literal(value)), _) => {
                    Err(VmError::UndefinedVariable(value.to_string()))
                }
                _ => Err(VmError::ArityMismatch {
                    opcode: opcode.mnemonic().to_string(),
                    expected: 2,
                    actual: 0,
                }),
            }
        };

        match opcode {
            Opcode::Mov => binary(|dst, src| Self::Mov { dst, src }),
            Opcode::Add => binary(|dst, src| Self::Add { dst, src }),
            Opcode::Sub => binary(|dst, src| Self::Sub { dst, src }),
            Opcode::Cbw => Ok(Self::Cbw),
            Opcode::Cwd => Ok(Self::Cwd),
            Opcode::Define => Err(VmError::UnexpectedDefine),
        }
    }

    /// Opcode of this instruction.
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::Mov { .. } => Opcode::Mov,
            Self::Add { .. } => Opcode::Add,
            Self::Sub { .. } => Opcode::Sub,
            Self::Cbw => Opcode::Cbw,
            Self::Cwd => Opcode::Cwd,
        }
    }
}

impl fmt::Display for Instruction {
    /// Formats the instruction as parseable assembly, e.g. `add ax, bx`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mov { dst, src } | Self::Add { dst, src } | Self::Sub { dst, src } => {
                write!(f, "{} {dst}, {src}", self.opcode())
            }
            Self::Cbw | Self::Cwd => write!(f, "{}", self.opcode()),
        }
    }
}
