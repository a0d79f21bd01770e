//! Shared `TestContext` for building and driving machines from source.

use bytevm_core::config::{Config, CwdMode};
use bytevm_core::core::{Machine, RunOutcome};
use bytevm_core::{Int, VmError};
use tracing_subscriber::EnvFilter;

/// Assembles a program and owns the resulting machine.
pub struct TestContext {
    pub machine: Machine,
}

impl TestContext {
    /// Builds a machine from `source` with the default configuration.
    pub fn new(source: &str) -> Self {
        Self::with_config(source, &Config::default())
    }

    /// Builds a machine from `source` with the legacy `cwd` rebinding enabled.
    pub fn legacy_cwd(source: &str) -> Self {
        let mut config = Config::default();
        config.engine.cwd_mode = CwdMode::Rebind;
        Self::with_config(source, &config)
    }

    pub fn with_config(source: &str, config: &Config) -> Self {
        init_tracing();
        let machine = Machine::from_source(source, config)
            .unwrap_or_else(|e| panic!("test program failed to load: {e}"));
        Self { machine }
    }

    /// Runs to completion, panicking on any execution error.
    pub fn run(&mut self) -> RunOutcome {
        self.machine
            .run()
            .unwrap_or_else(|e| panic!("run failed at ip {}: {e}", self.machine.ip()))
    }

    /// Executes one instruction.
    pub fn step(&mut self) -> Result<(), VmError> {
        self.machine.step()
    }

    /// Reads a variable or register.
    pub fn get(&self, name: &str) -> Int {
        self.machine
            .read(name)
            .unwrap_or_else(|e| panic!("read of `{name}` failed: {e}"))
    }

    /// Writes a variable or register.
    pub fn set(&self, name: &str, value: Int) {
        self.machine
            .write(name, value)
            .unwrap_or_else(|e| panic!("write of `{name}` failed: {e}"));
    }
}

/// Routes `tracing` output through the test writer; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
