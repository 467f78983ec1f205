#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn GenError___no_default___names_record_and_field() {
    let err = GenError::NoDefaultResolvable {
        record: "com.acme.User".into(),
        field: "payload".into(),
    };

    let display = err.to_string();

    assert_eq!(
        display,
        "cannot resolve a default for field 'payload' of 'com.acme.User'"
    );
}

#[test]
fn GenError___default_cycle___joins_path() {
    let err = GenError::DefaultCycle {
        path: vec!["a.Node".into(), "a.Edge".into(), "a.Node".into()],
    };

    assert_eq!(
        err.to_string(),
        "cyclic default construction: a.Node -> a.Edge -> a.Node"
    );
}

#[test]
fn GenError___from_serde_error___converts_to_serialization() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let err: GenError = json_err.into();

    assert!(matches!(err, GenError::Serialization(_)));
}

#[test]
fn GenError___output___keeps_io_source() {
    use std::error::Error;

    let err = GenError::Output {
        path: "out/com/__init__.py".into(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };

    assert!(err.source().is_some());
}

#[test_case(GenError::NoDefaultResolvable { record: "r".into(), field: "f".into() }, 3)]
#[test_case(GenError::DefaultCycle { path: vec![] }, 3)]
#[test_case(GenError::UnknownType("x".into()), 4)]
#[test_case(GenError::InvalidSchema("x".into()), 4)]
#[test_case(GenError::HostExpression { record: "r".into(), field: "f".into() }, 5)]
#[test_case(GenError::UnknownDispatchName("x".into()), 5)]
fn GenError___variant___maps_to_exit_code(error: GenError, expected: i32) {
    assert_eq!(error.exit_code(), expected);
}
