//! Parsed programs: variable declarations plus the instruction sequence.

use std::fmt;
use std::str::FromStr;

use crate::common::error::{Result, VmError};
use crate::common::value::Int;

use super::instruction::Instruction;

/// Size tag of a `define` directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataSize {
    /// `db`: one byte.
    Byte,
    /// `dw`: two bytes.
    Word,
}

impl DataSize {
    /// Width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
        }
    }

    /// Directive spelling.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Byte => "db",
            Self::Word => "dw",
        }
    }
}

impl FromStr for DataSize {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "db" => Ok(Self::Byte),
            "dw" => Ok(Self::Word),
            other => Err(VmError::parse(0, format!("unknown size tag `{other}`"))),
        }
    }
}

/// A `define` directive: a named variable with its initial value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDecl {
    /// Variable name.
    pub name: String,
    /// Declared size.
    pub size: DataSize,
    /// Initial value, already reduced into `size`.
    pub value: Int,
}

impl VariableDecl {
    /// Declares `name` with `literal` reduced modulo `256^width`.
    pub fn new(name: impl Into<String>, size: DataSize, literal: i128) -> Self {
        let value = match size {
            DataSize::Byte => Int::byte(literal as u8),
            DataSize::Word => Int::word(literal as u16),
        };
        Self {
            name: name.into(),
            size,
            value,
        }
    }

    /// Width in bytes.
    pub const fn width(&self) -> usize {
        self.size.width()
    }
}

impl fmt::Display for VariableDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "define {} {} {}", self.name, self.size.tag(), self.value)
    }
}

/// Everything the engine needs to build a machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Variables in declaration order.
    pub variables: Vec<VariableDecl>,
    /// Executable instructions in program order.
    pub code: Vec<Instruction>,
}

impl Program {
    /// Bundles declarations and code.
    pub const fn new(variables: Vec<VariableDecl>, code: Vec<Instruction>) -> Self {
        Self { variables, code }
    }

    /// Total bytes needed to hold every declared variable.
    pub fn data_size(&self) -> usize {
        self.variables.iter().map(VariableDecl::width).sum()
    }

    /// Number of executable instructions.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// `true` when there is nothing to execute.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl fmt::Display for Program {
    /// Lists declarations first, then one instruction per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for decl in &self.variables {
            writeln!(f, "{decl}")?;
        }
        for inst in &self.code {
            writeln!(f, "{inst}")?;
        }
        Ok(())
    }
}
