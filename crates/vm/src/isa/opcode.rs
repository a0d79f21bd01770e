//! Mnemonics of the instruction set.

use std::fmt;
use std::str::FromStr;

use crate::common::error::{Result, VmError};

/// Operation tag of a source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `mov dst, src`: copy `src` into `dst`.
    Mov,
    /// `add dst, src`: `dst += src`, wrapping.
    Add,
    /// `sub dst, src`: `dst -= src`, wrapping.
    Sub,
    /// `cbw`: sign-extend `al` into `ax`.
    Cbw,
    /// `cwd`: sign-extend `ax` into `dx:ax`.
    Cwd,
    /// `define name db|dw literal`: load-time variable declaration.
    Define,
}

impl Opcode {
    /// Every opcode, in mnemonic table order.
    pub const ALL: [Self; 6] = [
        Self::Mov,
        Self::Add,
        Self::Sub,
        Self::Cbw,
        Self::Cwd,
        Self::Define,
    ];

    /// Lowercase assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Mov => "mov",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Cbw => "cbw",
            Self::Cwd => "cwd",
            Self::Define => "define",
        }
    }

    /// Number of operands the opcode takes.
    pub const fn arity(self) -> usize {
        match self {
            Self::Mov | Self::Add | Self::Sub => 2,
            Self::Cbw | Self::Cwd => 0,
            Self::Define => 3,
        }
    }

    /// `true` for opcodes the execution engine runs; `define` is handled at load time.
    pub const fn is_executable(self) -> bool {
        !matches!(self, Self::Define)
    }
}

impl FromStr for Opcode {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| VmError::UnknownOpcode(s.to_string()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
