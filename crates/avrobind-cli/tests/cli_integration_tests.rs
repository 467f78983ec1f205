//! Integration tests for the avrobind binary.
//!
//! Runs the built executable against schema files in temporary directories
//! and checks exit codes and written packages.

#![allow(non_snake_case)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const SCHEMA: &str = r#"{
    "type": "record",
    "name": "Reading",
    "namespace": "iot.sensors",
    "fields": [
        {"name": "value", "type": "double"},
        {"name": "unit", "type": ["null", "string"], "default": null}
    ]
}"#;

/// Helper to write a schema file into a temp dir.
fn write_schema(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("schema.avsc");
    fs::write(&path, contents).unwrap();
    path
}

fn avrobind(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_avrobind"))
        .args(args)
        .env_remove("AVROBIND_LOG")
        .output()
        .unwrap()
}

// =============================================================================
// Generate
// =============================================================================

mod generate {
    use super::*;

    #[test]
    fn generate___valid_schema___writes_package() {
        let temp = TempDir::new().unwrap();
        let schema = write_schema(&temp, SCHEMA);
        let out = temp.path().join("out");

        let result = avrobind(&[
            "generate",
            "-i",
            schema.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ]);

        assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
        assert!(out.join("schema_classes.py").is_file());
        assert!(out.join("iot/sensors/__init__.py").is_file());
        assert!(String::from_utf8_lossy(&result.stdout).contains("✓ Classes: 1"));
    }

    #[test]
    fn generate___cyclic_defaults___exits_with_default_error_code() {
        let temp = TempDir::new().unwrap();
        let schema = write_schema(
            &temp,
            r#"{"type": "record", "name": "Loop", "fields": [{"name": "next", "type": "Loop"}]}"#,
        );

        let result = avrobind(&[
            "generate",
            "-i",
            schema.to_str().unwrap(),
            "-o",
            temp.path().join("out").to_str().unwrap(),
        ]);

        assert_eq!(result.status.code(), Some(3));
        assert!(String::from_utf8_lossy(&result.stderr).contains("cyclic default construction: Loop -> Loop"));
    }

    #[test]
    fn generate___unknown_reference___exits_with_type_error_code() {
        let temp = TempDir::new().unwrap();
        let schema = write_schema(
            &temp,
            r#"{"type": "record", "name": "R", "fields": [{"name": "x", "type": "Missing"}]}"#,
        );

        let result = avrobind(&[
            "generate",
            "-i",
            schema.to_str().unwrap(),
            "-o",
            temp.path().join("out").to_str().unwrap(),
        ]);

        assert_eq!(result.status.code(), Some(4));
    }
}

// =============================================================================
// Check
// =============================================================================

mod check {
    use super::*;

    #[test]
    fn check___lists_named_types() {
        let temp = TempDir::new().unwrap();
        let schema = write_schema(&temp, SCHEMA);

        let result = avrobind(&["check", "-i", schema.to_str().unwrap()]);

        assert!(result.status.success());
        assert!(String::from_utf8_lossy(&result.stdout).contains("record iot.sensors.Reading"));
    }

    #[test]
    fn check___missing_file___fails() {
        let result = avrobind(&["check", "-i", "/no/such/schema.avsc"]);

        assert!(!result.status.success());
    }
}
