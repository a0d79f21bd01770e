//! Aliased Register File.
//!
//! This module provides the four 16-bit general-purpose registers and their byte halves. It provides:
//! 1. **Unified Storage:** One 8-byte buffer backs every register; `ax` lives at offset 0, `bx` at 2,
//!    `cx` at 4 and `dx` at 6.
//! 2. **Structural Aliasing:** `al`/`ah` are sub-views of the same two bytes as `ax`, so a write to
//!    either is immediately visible through the other. Nothing is synchronised after construction.
//! 3. **Naming:** A closed [`Register`] enum for the twelve architectural names.

use std::fmt;
use std::str::FromStr;

use super::error::{Result, VmError};
use super::value::Int;
use crate::memory::{ByteBuffer, MemInt};

/// Number of 16-bit general-purpose registers.
pub const REGISTER_COUNT: usize = 4;

/// Width of a full register in bytes.
pub const REGISTER_WIDTH: usize = 2;

/// Architectural register names, full registers first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    /// Accumulator.
    Ax,
    /// Base register.
    Bx,
    /// Count register.
    Cx,
    /// Data register.
    Dx,
    /// Low byte of `ax`.
    Al,
    /// High byte of `ax`.
    Ah,
    /// Low byte of `bx`.
    Bl,
    /// High byte of `bx`.
    Bh,
    /// Low byte of `cx`.
    Cl,
    /// High byte of `cx`.
    Ch,
    /// Low byte of `dx`.
    Dl,
    /// High byte of `dx`.
    Dh,
}

impl Register {
    /// Every register, in storage order: full registers, then `(low, high)` pairs.
    pub const ALL: [Self; 12] = [
        Self::Ax,
        Self::Bx,
        Self::Cx,
        Self::Dx,
        Self::Al,
        Self::Ah,
        Self::Bl,
        Self::Bh,
        Self::Cl,
        Self::Ch,
        Self::Dl,
        Self::Dh,
    ];

    /// The 16-bit registers.
    pub const WORDS: [Self; REGISTER_COUNT] = [Self::Ax, Self::Bx, Self::Cx, Self::Dx];

    /// Assembly name, e.g. `"al"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ax => "ax",
            Self::Bx => "bx",
            Self::Cx => "cx",
            Self::Dx => "dx",
            Self::Al => "al",
            Self::Ah => "ah",
            Self::Bl => "bl",
            Self::Bh => "bh",
            Self::Cl => "cl",
            Self::Ch => "ch",
            Self::Dl => "dl",
            Self::Dh => "dh",
        }
    }

    /// Width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::Ax | Self::Bx | Self::Cx | Self::Dx => REGISTER_WIDTH,
            _ => 1,
        }
    }

    /// The full register this name belongs to. Full registers return themselves.
    pub const fn parent(self) -> Self {
        match self {
            Self::Ax | Self::Al | Self::Ah => Self::Ax,
            Self::Bx | Self::Bl | Self::Bh => Self::Bx,
            Self::Cx | Self::Cl | Self::Ch => Self::Cx,
            Self::Dx | Self::Dl | Self::Dh => Self::Dx,
        }
    }

    /// `(low, high)` byte halves of a full register; `None` for a half.
    pub const fn halves(self) -> Option<(Self, Self)> {
        match self {
            Self::Ax => Some((Self::Al, Self::Ah)),
            Self::Bx => Some((Self::Bl, Self::Bh)),
            Self::Cx => Some((Self::Cl, Self::Ch)),
            Self::Dx => Some((Self::Dl, Self::Dh)),
            _ => None,
        }
    }

    /// Looks a register up by its assembly name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Register {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| VmError::UndefinedVariable(s.to_string()))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register storage plus one view per architectural name.
#[derive(Debug)]
pub struct RegisterFile {
    buffer: ByteBuffer,
    views: Vec<MemInt>,
}

impl RegisterFile {
    /// Allocates the register buffer and derives the aliased views.
    ///
    /// Each full register is created at its sequential offset and then split `(1, 1)` into its
    /// low and high byte views, which share the parent's storage.
    ///
    /// # Errors
    ///
    /// Propagates view construction failures; with the fixed layout none are expected.
    pub fn new() -> Result<Self> {
        let buffer = ByteBuffer::new(REGISTER_COUNT * REGISTER_WIDTH);
        let mut words = Vec::with_capacity(REGISTER_COUNT);
        let mut halves = Vec::with_capacity(REGISTER_COUNT * 2);

        for i in 0..REGISTER_COUNT {
            let full = MemInt::new(&buffer, i * REGISTER_WIDTH, REGISTER_WIDTH)?;
            halves.extend(full.split(&[1, 1])?);
            words.push(full);
        }
        words.extend(halves);

        Ok(Self {
            buffer,
            views: words,
        })
    }

    /// View for `reg`.
    pub fn get(&self, reg: Register) -> &MemInt {
        &self.views[reg.index()]
    }

    /// Reads a register value.
    pub fn read(&self, reg: Register) -> Int {
        self.get(reg).read()
    }

    /// Writes a register value.
    ///
    /// # Errors
    ///
    /// [`VmError::WidthMismatch`] if `value` is not as wide as `reg`.
    pub fn write(&self, reg: Register, value: Int) -> Result<()> {
        self.get(reg).write(value)
    }

    /// `(register, view)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, &MemInt)> {
        Register::ALL.into_iter().zip(self.views.iter())
    }

    /// Backing buffer shared by all register views.
    pub const fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }
}
