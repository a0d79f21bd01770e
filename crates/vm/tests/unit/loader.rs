//! # Loader Tests
//!
//! Reads programs from temporary files and runs them end to end.

use std::fs;

use bytevm_core::config::Config;
use bytevm_core::core::RunOutcome;
use bytevm_core::sim::loader;
use bytevm_core::{Int, VmError};
use pretty_assertions::assert_eq;

const SIGN_EXTEND: &str = "\
define small db -3
define wide dw 0

mov al, small
cbw
mov wide, ax
cwd
";

fn write_source(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_load_source_returns_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(&dir, "prog.asm", SIGN_EXTEND);
    assert_eq!(loader::load_source(&path).unwrap(), SIGN_EXTEND);
}

#[test]
fn test_load_program_parses_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(&dir, "prog.asm", SIGN_EXTEND);
    let program = loader::load_program(&path).unwrap();
    assert_eq!(program.variables.len(), 2);
    assert_eq!(program.len(), 4);
    assert_eq!(program.data_size(), 3);
}

#[test]
fn test_load_machine_and_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(&dir, "prog.asm", SIGN_EXTEND);
    let mut machine = loader::load_machine(&path, &Config::default()).unwrap();

    assert_eq!(machine.run().unwrap(), RunOutcome::Halted { steps: 4 });
    assert_eq!(machine.read("wide").unwrap(), Int::word(0xFFFD));
    assert_eq!(machine.read("dx").unwrap(), Int::word(0xFFFF));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.asm");
    let err = loader::load_program(&path).unwrap_err();
    assert!(err.to_string().contains("missing.asm"), "{err}");
    assert!(matches!(err, VmError::Io { path: reported, .. } if reported == path));
}

#[test]
fn test_parse_error_surfaces_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(&dir, "bad.asm", "define x dw 1\n\nmov x\n");
    assert!(matches!(
        loader::load_machine(&path, &Config::default()),
        Err(VmError::Parse { line: 3, .. })
    ));
}
