//! Execution statistics collection and reporting.
//!
//! Tracks how many instructions retired, broken down by opcode, and the host time spent.

use std::time::Instant;

use crate::isa::Opcode;

/// Counters updated by the machine after every successful step.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Number of instructions that completed without error.
    pub instructions_retired: u64,
    /// Retired `mov` instructions.
    pub inst_mov: u64,
    /// Retired `add` instructions.
    pub inst_add: u64,
    /// Retired `sub` instructions.
    pub inst_sub: u64,
    /// Retired `cbw` instructions.
    pub inst_cbw: u64,
    /// Retired `cwd` instructions.
    pub inst_cwd: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            inst_mov: 0,
            inst_add: 0,
            inst_sub: 0,
            inst_cbw: 0,
            inst_cwd: 0,
        }
    }
}

impl SimStats {
    /// Counts one retired instruction.
    pub const fn record(&mut self, opcode: Opcode) {
        self.instructions_retired += 1;
        match opcode {
            Opcode::Mov => self.inst_mov += 1,
            Opcode::Add => self.inst_add += 1,
            Opcode::Sub => self.inst_sub += 1,
            Opcode::Cbw => self.inst_cbw += 1,
            Opcode::Cwd => self.inst_cwd += 1,
            Opcode::Define => {}
        }
    }

    /// Retired count for a single opcode.
    pub const fn count(&self, opcode: Opcode) -> u64 {
        match opcode {
            Opcode::Mov => self.inst_mov,
            Opcode::Add => self.inst_add,
            Opcode::Sub => self.inst_sub,
            Opcode::Cbw => self.inst_cbw,
            Opcode::Cwd => self.inst_cwd,
            Opcode::Define => 0,
        }
    }

    /// Prints a summary to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        println!("\n==========================================================");
        println!("EXECUTION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.6} s");
        println!("sim_insts                {}", self.instructions_retired);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        for opcode in Opcode::ALL.into_iter().filter(|op| op.is_executable()) {
            println!("  {:<22} {}", opcode.mnemonic(), self.count(opcode));
        }
        println!("==========================================================");
    }
}
