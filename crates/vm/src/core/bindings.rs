//! Variable and register bindings.
//!
//! A flat name → [`MemInt`] map covering every declared variable and every register name.
//! It performs the load sequence:
//! 1. **Data buffer:** One buffer sized to the sum of declared widths; each variable gets the
//!    next sequential, non-overlapping offset and is initialised to its declared value.
//! 2. **Registers:** A second buffer for the register file; `ax`/`al`/`ah` and friends are
//!    inserted as aliased views over it.

use std::collections::HashMap;

use tracing::debug;

use crate::common::error::{Result, VmError};
use crate::common::reg::{Register, RegisterFile};
use crate::common::value::Int;
use crate::isa::{Operand, VariableDecl};
use crate::memory::{ByteBuffer, MemInt};

/// Name → view table for one machine.
#[derive(Debug)]
pub struct Bindings {
    views: HashMap<String, MemInt>,
    variables: Vec<String>,
    data: ByteBuffer,
    registers: RegisterFile,
}

impl Bindings {
    /// Allocates storage for `decls` plus the register file and builds the name table.
    ///
    /// # Errors
    ///
    /// [`VmError::DuplicateVariable`] if a name is declared twice or collides with a register.
    pub fn new(decls: &[VariableDecl]) -> Result<Self> {
        let data = ByteBuffer::new(decls.iter().map(VariableDecl::width).sum());
        let mut views = HashMap::with_capacity(decls.len() + Register::ALL.len());
        let mut variables = Vec::with_capacity(decls.len());

        let mut offset = 0;
        for decl in decls {
            let view = MemInt::new(&data, offset, decl.width())?;
            view.write(decl.value)?;
            debug!(name = %decl.name, offset, width = decl.width(), value = %decl.value, "bind variable");
            if views.insert(decl.name.clone(), view).is_some() {
                return Err(VmError::DuplicateVariable(decl.name.clone()));
            }
            variables.push(decl.name.clone());
            offset += decl.width();
        }

        let registers = RegisterFile::new()?;
        for (reg, view) in registers.iter() {
            if views.insert(reg.name().to_string(), view.clone()).is_some() {
                return Err(VmError::DuplicateVariable(reg.name().to_string()));
            }
        }

        Ok(Self {
            views,
            variables,
            data,
            registers,
        })
    }

    /// View bound to `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&MemInt> {
        self.views.get(name)
    }

    /// View bound to `name`.
    ///
    /// # Errors
    ///
    /// [`VmError::UndefinedVariable`] when nothing is bound to `name`.
    pub fn get(&self, name: &str) -> Result<&MemInt> {
        self.lookup(name)
            .ok_or_else(|| VmError::UndefinedVariable(name.to_string()))
    }

    /// View currently bound to a register name.
    pub fn register(&self, reg: Register) -> Result<&MemInt> {
        self.get(reg.name())
    }

    /// Reads the value bound to `name`.
    pub fn read(&self, name: &str) -> Result<Int> {
        self.get(name).map(MemInt::read)
    }

    /// Writes through the view bound to `name`.
    pub fn write(&self, name: &str, value: Int) -> Result<()> {
        self.get(name)?.write(value)
    }

    /// Evaluates a source operand at `width` bytes.
    ///
    /// Names are read as-is (their own width is kept, so a mismatch surfaces at the write);
    /// literals are reduced into `width`.
    pub fn resolve(&self, operand: &Operand, width: usize) -> Result<Int> {
        match operand {
            Operand::Name(name) => self.read(name),
            Operand::Literal(value) => Int::new(*value, width),
        }
    }

    /// Replaces the view bound to `name`, returning the previous one.
    ///
    /// Existing aliases of the old view are not touched.
    pub fn rebind(&mut self, name: &str, view: MemInt) -> Option<MemInt> {
        self.views.insert(name.to_string(), view)
    }

    /// Declared variables in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &MemInt)> {
        self.variables
            .iter()
            .filter_map(|name| self.views.get(name).map(|view| (name.as_str(), view)))
    }

    /// Register file created at load time.
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Buffer holding all declared variables.
    pub const fn data(&self) -> &ByteBuffer {
        &self.data
    }
}
