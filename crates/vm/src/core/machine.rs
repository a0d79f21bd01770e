//! Execution engine.
//!
//! `Machine` owns a program, its bindings and an instruction pointer. It performs:
//! 1. **Loading:** Variable storage and register views are allocated once, in `Machine::new`.
//! 2. **Stepping:** `step()` fetches the instruction at `ip`, advances `ip` *before* executing,
//!    then dispatches on the closed [`Instruction`] enum.
//! 3. **Running:** `run()` repeats `step()` until the program is exhausted or the step budget
//!    runs out.
//!
//! A failed step leaves every binding untouched and rewinds `ip` to the faulting instruction.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::asm::parse_program;
use crate::common::error::{Result, VmError};
use crate::common::reg::Register;
use crate::common::value::Int;
use crate::config::{Config, CwdMode};
use crate::isa::{Instruction, Program};
use crate::memory::MemInt;
use crate::stats::SimStats;

use super::bindings::Bindings;

/// How a call to [`Machine::run`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The instruction pointer reached the end of the program.
    Halted {
        /// Instructions executed by this call.
        steps: u64,
    },
    /// `max_steps` was reached first.
    StepLimit {
        /// Instructions executed by this call.
        steps: u64,
    },
}

/// An executing process.
#[derive(Debug)]
pub struct Machine {
    program: Program,
    bindings: Bindings,
    ip: usize,
    trace: bool,
    cwd_mode: CwdMode,
    max_steps: Option<u64>,
    stats: SimStats,
}

impl Machine {
    /// Loads `program`: allocates variable storage, initialises every variable and builds the
    /// register views.
    ///
    /// # Errors
    ///
    /// [`VmError::DuplicateVariable`] for clashing declarations.
    pub fn new(program: Program, config: &Config) -> Result<Self> {
        debug!(
            variables = program.variables.len(),
            data_bytes = program.data_size(),
            instructions = program.len(),
            "loading program"
        );
        let bindings = Bindings::new(&program.variables)?;
        Ok(Self {
            program,
            bindings,
            ip: 0,
            trace: config.general.trace_instructions,
            cwd_mode: config.engine.cwd_mode,
            max_steps: config.general.max_steps,
            stats: SimStats::default(),
        })
    }

    /// Parses `source` and loads it.
    ///
    /// # Errors
    ///
    /// Any parse error, then anything [`Machine::new`] returns.
    pub fn from_source(source: &str, config: &Config) -> Result<Self> {
        Self::new(parse_program(source)?, config)
    }

    /// Index of the next instruction to execute.
    pub const fn ip(&self) -> usize {
        self.ip
    }

    /// `true` once every instruction has been executed.
    pub fn is_halted(&self) -> bool {
        self.ip >= self.program.len()
    }

    /// The loaded program.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// The name table.
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Execution statistics for every step retired so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Instruction that the next `step()` will execute.
    pub fn current(&self) -> Option<&Instruction> {
        self.program.code.get(self.ip)
    }

    /// Reads a variable or register.
    pub fn read(&self, name: &str) -> Result<Int> {
        self.bindings.read(name)
    }

    /// Writes a variable or register.
    pub fn write(&self, name: &str, value: Int) -> Result<()> {
        self.bindings.write(name, value)
    }

    /// Executes exactly one instruction.
    ///
    /// # Errors
    ///
    /// - [`VmError::InstructionPointerOutOfRange`] if the program is already exhausted.
    /// - [`VmError::UndefinedVariable`] / [`VmError::WidthMismatch`] from the instruction.
    pub fn step(&mut self) -> Result<()> {
        let ip = self.ip;
        let inst = self
            .program
            .code
            .get(ip)
            .ok_or(VmError::InstructionPointerOutOfRange {
                ip,
                len: self.program.code.len(),
            })?;

        // Advance first so a future jump only has to overwrite `ip`.
        self.ip = ip + 1;
        if self.trace {
            trace!(ip, instruction = %inst, "step");
        }

        match Self::execute(&mut self.bindings, inst, self.cwd_mode) {
            Ok(()) => {
                self.stats.record(inst.opcode());
                Ok(())
            }
            Err(e) => {
                self.ip = ip;
                Err(e)
            }
        }
    }

    /// Steps until the program is exhausted or `max_steps` instructions have run.
    ///
    /// # Errors
    ///
    /// The first error returned by [`Machine::step`]; `ip` is left at the faulting instruction.
    pub fn run(&mut self) -> Result<RunOutcome> {
        let mut steps = 0;
        while !self.is_halted() {
            if self.max_steps.is_some_and(|max| steps >= max) {
                return Ok(RunOutcome::StepLimit { steps });
            }
            self.step()?;
            steps += 1;
        }
        Ok(RunOutcome::Halted { steps })
    }

    /// Renders registers and variables for display.
    pub fn dump_state(&self) -> String {
        self.to_string()
    }

    fn execute(bindings: &mut Bindings, inst: &Instruction, cwd_mode: CwdMode) -> Result<()> {
        match inst {
            Instruction::Mov { dst, src } => {
                let target = bindings.get(dst)?;
                let value = bindings.resolve(src, target.width())?;
                target.write(value)
            }
            Instruction::Add { dst, src } => {
                let target = bindings.get(dst)?;
                let rhs = bindings.resolve(src, target.width())?;
                target.write(target.read().wrapping_add(rhs)?)
            }
            Instruction::Sub { dst, src } => {
                let target = bindings.get(dst)?;
                let rhs = bindings.resolve(src, target.width())?;
                target.write(target.read().wrapping_sub(rhs)?)
            }
            Instruction::Cbw => {
                let al = bindings.register(Register::Al)?.read();
                bindings.register(Register::Ax)?.write(al.sign_extend(2)?)
            }
            Instruction::Cwd => {
                let wide = bindings.register(Register::Ax)?.read().sign_extend(4)?;
                let high = wide
                    .split(&[2, 2])?
                    .get(1)
                    .copied()
                    .ok_or(VmError::InvalidSplit {
                        width: wide.width(),
                        sizes: vec![2, 2],
                    })?;
                match cwd_mode {
                    CwdMode::WriteThrough => bindings.register(Register::Dx)?.write(high),
                    CwdMode::Rebind => {
                        warn!(value = %high, "cwd rebinding dx; dl/dh no longer alias it");
                        let _ = bindings.rebind(Register::Dx.name(), MemInt::detached(high));
                        Ok(())
                    }
                }
            }
        }
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ip: {}/{}", self.ip, self.program.len())?;
        writeln!(f, "registers:")?;
        for reg in Register::WORDS {
            let Some(full) = self.bindings.lookup(reg.name()) else {
                continue;
            };
            let value = full.read();
            write!(f, "\t{reg} : {value:#x} ({value})")?;
            if let Some((lo, hi)) = reg.halves() {
                for half in [lo, hi] {
                    if let Some(view) = self.bindings.lookup(half.name()) {
                        write!(f, "  {half}={:#x}", view.read())?;
                    }
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "variables:")?;
        for (name, view) in self.bindings.variables() {
            let value = view.read();
            writeln!(f, "\t{name} : {value:#x} ({value})")?;
        }
        Ok(())
    }
}
