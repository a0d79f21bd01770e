//! Source Loader.
//!
//! This module reads assembly programs from disk. It performs:
//! 1. **Source loading:** Reads a text file, reporting the path on failure.
//! 2. **Parsing:** Turns the text into a [`Program`].
//! 3. **Machine setup:** Builds a [`Machine`] from a path and a configuration.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::asm::parse_program;
use crate::common::error::{Result, VmError};
use crate::config::Config;
use crate::core::Machine;
use crate::isa::Program;

/// Reads an assembly source file.
///
/// # Errors
///
/// [`VmError::Io`] carrying `path` if the file cannot be read.
pub fn load_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| VmError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "loaded source");
    Ok(text)
}

/// Reads and parses an assembly source file.
///
/// # Errors
///
/// [`VmError::Io`] or any parse error.
pub fn load_program(path: impl AsRef<Path>) -> Result<Program> {
    parse_program(&load_source(path)?)
}

/// Reads, parses and loads an assembly source file into a fresh machine.
///
/// # Errors
///
/// Anything [`load_program`] or [`Machine::new`] returns.
pub fn load_machine(path: impl AsRef<Path>, config: &Config) -> Result<Machine> {
    Machine::new(load_program(path)?, config)
}
