//! Configuration for the machine.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Every field has a default, so `Config::default()` works without a file.
//! 2. **Structures:** `general` (tracing, step budget) and `engine` (instruction semantics).
//! 3. **Enums:** `CwdMode`, selecting how `cwd` stores the high half of the result.
//!
//! Configuration is read from JSON; unknown sections are rejected.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{Result, VmError};

/// How `cwd` stores the high word of the sign-extended `ax`.
///
/// The historical implementation replaced the `dx` binding with a fresh value instead of
/// writing through the existing view, which detaches `dx` from `dl`/`dh` for the rest of the
/// run. `WriteThrough` is the corrected behaviour; `Rebind` reproduces the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CwdMode {
    /// Write the high half through the aliased `dx` view; `dl`/`dh` observe it.
    #[default]
    #[serde(alias = "write_through")]
    WriteThrough,
    /// Bind `dx` to a detached view holding the high half; `dl`/`dh` keep the old bytes.
    #[serde(alias = "rebind")]
    Rebind,
}

/// Root configuration.
///
/// # Example
///
/// ```
/// use bytevm_core::config::{Config, CwdMode};
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "max_steps": 1000 },
///     "engine": { "cwd_mode": "Rebind" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.max_steps, Some(1000));
/// assert_eq!(config.engine.cwd_mode, CwdMode::Rebind);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General run settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Instruction semantics.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// [`VmError::Config`] if the document is malformed or has unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(VmError::Config)
    }

    /// Reads and parses a JSON file.
    ///
    /// # Errors
    ///
    /// [`VmError::Io`] if the file cannot be read, [`VmError::Config`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| VmError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General run settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Emit a `trace` event for every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Stop `Machine::run` after this many instructions. `None` runs to completion.
    #[serde(default)]
    pub max_steps: Option<u64>,
}

/// Instruction semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// `cwd` write strategy.
    #[serde(default)]
    pub cwd_mode: CwdMode,
}
