//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, the `cwd_mode`
//! spellings and loading from disk.

use std::io::Write;

use bytevm_core::VmError;
use bytevm_core::config::{Config, CwdMode, EngineConfig, GeneralConfig};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.max_steps, None);
    assert_eq!(config.engine.cwd_mode, CwdMode::WriteThrough);
}

#[test]
fn test_empty_document_uses_defaults() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    assert_eq!(
        Config::from_json(r#"{ "general": {} }"#).unwrap().general,
        GeneralConfig::default()
    );
}

#[test]
fn test_full_document() {
    let config = Config::from_json(
        r#"{
            "general": { "trace_instructions": true, "max_steps": 64 },
            "engine": { "cwd_mode": "Rebind" }
        }"#,
    )
    .unwrap();
    assert!(config.general.trace_instructions);
    assert_eq!(config.general.max_steps, Some(64));
    assert_eq!(
        config.engine,
        EngineConfig {
            cwd_mode: CwdMode::Rebind
        }
    );
}

#[rstest]
#[case("WriteThrough", CwdMode::WriteThrough)]
#[case("write_through", CwdMode::WriteThrough)]
#[case("Rebind", CwdMode::Rebind)]
#[case("rebind", CwdMode::Rebind)]
fn test_cwd_mode_spellings(#[case] spelling: &str, #[case] expected: CwdMode) {
    let json = format!(r#"{{ "engine": {{ "cwd_mode": "{spelling}" }} }}"#);
    assert_eq!(Config::from_json(&json).unwrap().engine.cwd_mode, expected);
}

#[rstest]
#[case(r#"{ "memory": {} }"#)]
#[case(r#"{ "general": { "start_pc": 0 } }"#)]
#[case(r#"{ "engine": { "cwd_mode": "Swap" } }"#)]
#[case(r#"{ "general": { "max_steps": -1 } }"#)]
#[case("not json")]
fn test_invalid_documents_are_rejected(#[case] json: &str) {
    assert!(matches!(Config::from_json(json), Err(VmError::Config(_))));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "general": {{ "max_steps": 3 }} }}"#).unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.general.max_steps, Some(3));
    assert_eq!(config.engine.cwd_mode, CwdMode::WriteThrough);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match Config::load(&path) {
        Err(VmError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an Io error, got {other:?}"),
    }
}
