#![allow(non_snake_case)]

use super::*;
use avrobind_core::GenError;

const DOCUMENT: &str = r#"[
    {
        "type": "enum",
        "name": "Status",
        "namespace": "com.acme.models",
        "symbols": ["ACTIVE", "DISABLED"]
    },
    {
        "type": "record",
        "name": "User",
        "namespace": "com.acme.models",
        "fields": [
            {"name": "id", "type": "long"},
            {"name": "status", "type": "Status"}
        ]
    },
    {
        "type": "record",
        "name": "Signup",
        "namespace": "com.acme.events",
        "fields": [{"name": "user", "type": "com.acme.models.User"}]
    },
    {
        "type": "record",
        "name": "Point",
        "fields": [{"name": "x", "type": "double"}]
    }
]"#;

fn generate(source: &str) -> GeneratedOutput {
    GenerationSession::from_json_str(source, GenerateOptions::default())
        .unwrap()
        .generate()
        .unwrap()
}

#[test]
fn emission_order___sorted_by_namespace_then_name() {
    let session = GenerationSession::from_json_str(DOCUMENT, GenerateOptions::default()).unwrap();

    let order: Vec<&str> = session.emission_order().into_iter().map(|(name, _)| name).collect();

    assert_eq!(
        order,
        vec!["Point", "com.acme.events.Signup", "com.acme.models.Status", "com.acme.models.User"]
    );
}

#[test]
fn generate___writes_expected_units() {
    let output = generate(DOCUMENT);

    let paths: Vec<String> = output
        .units
        .iter()
        .map(|unit| unit.path.to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        paths,
        vec![
            "schema_classes.py",
            "schema.avsc",
            "__init__.py",
            "com/__init__.py",
            "com/acme/__init__.py",
            "com/acme/events/__init__.py",
            "com/acme/models/__init__.py",
        ]
    );
    assert_eq!(output.unit("schema.avsc").unwrap().contents, DOCUMENT);
}

#[test]
fn generate___shared_namespace___containers_created_once() {
    let output = generate(DOCUMENT);

    assert_eq!(output.namespaces.len(), 4);
    let models = output.unit("com/acme/models/__init__.py").unwrap();
    assert!(models.contents.contains("StatusClass = _com.acme.models.StatusClass\n"));
    assert!(models.contents.contains("UserClass = _com.acme.models.UserClass\n"));
    assert_eq!(output.unit("com/acme/__init__.py").unwrap().contents, "");
}

#[test]
fn generate___classes_nest_inside_scope_classes() {
    let output = generate(DOCUMENT);
    let code = &output.unit(SCHEMA_CLASSES_FILE).unwrap().contents;

    assert!(code.contains("\nclass PointClass(object):\n"));
    assert!(code.contains(
        "\nclass com(object):\n    class acme(object):\n        class events(object):\n            class SignupClass(object):\n"
    ));
    assert!(code.contains("\n        class models(object):\n            class StatusClass(str):\n"));
    assert_eq!(code.matches("class com(object):").count(), 1);
    assert_eq!(code.matches("class acme(object):").count(), 1);
}

#[test]
fn generate___dispatch_table_follows_scopes_at_top_level() {
    let output = generate(DOCUMENT);
    let code = &output.unit(SCHEMA_CLASSES_FILE).unwrap().contents;

    assert!(code.contains("\n__SCHEMA_TYPES = {\n"));
    assert!(code.contains("    \"com.acme.models.User\": com.acme.models.UserClass,\n"));
    assert!(code.contains("    \".Signup\": com.acme.events.SignupClass,\n"));
    assert_eq!(output.dispatch.len(), 11);
}

#[test]
fn generate___root_package___exports_null_namespace_classes() {
    let output = generate(DOCUMENT);

    let root = &output.unit("__init__.py").unwrap().contents;
    assert!(root.contains("from .schema_classes import PointClass\n"));
    assert!(!root.contains("UserClass"));
}

#[test]
fn generate___nested_record_field___defaults_to_nested_construction() {
    let output = generate(DOCUMENT);
    let code = &output.unit(SCHEMA_CLASSES_FILE).unwrap().contents;

    assert!(code.contains("self.user = com.acme.models.UserClass.construct_with_defaults()\n"));
    assert!(code.contains("self.status = com.acme.models.StatusClass.ACTIVE\n"));
}

#[test]
fn generate___same_input___byte_identical_output() {
    let first = generate(DOCUMENT);
    let second = generate(DOCUMENT);

    assert_eq!(first.units, second.units);
}

#[test]
fn generate___cyclic_defaults___fails_before_emitting() {
    let source = r#"{
        "type": "record",
        "name": "Node",
        "fields": [{"name": "next", "type": "Node"}]
    }"#;
    let session = GenerationSession::from_json_str(source, GenerateOptions::default()).unwrap();

    let result = session.generate();

    assert!(matches!(result, Err(GenError::DefaultCycle { .. })));
}

#[test]
fn generate___nullable_recursion___is_accepted() {
    let source = r#"{
        "type": "record",
        "name": "Node",
        "namespace": "list",
        "fields": [{"name": "next", "type": ["null", "Node"], "default": null}]
    }"#;

    let output = generate(source);

    assert_eq!(output.classes.len(), 1);
    assert!(output.class("list.Node").is_some());
}

#[test]
fn generate___fixed_types___get_no_class() {
    let source = r#"{
        "type": "record",
        "name": "File",
        "fields": [{"name": "hash", "type": {"type": "fixed", "name": "Md5", "size": 16}}]
    }"#;

    let output = generate(source);

    assert_eq!(output.classes.len(), 1);
    assert!(output.dispatch.lookup("Md5").is_err());
}

#[test]
fn materializer___uses_session_registry() {
    let session = GenerationSession::from_json_str(DOCUMENT, GenerateOptions::default()).unwrap();

    let signup = session.materializer().construct_with_defaults("com.acme.events.Signup").unwrap();

    assert_eq!(
        signup.to_json(),
        serde_json::json!({"user": {"id": 0, "status": "ACTIVE"}})
    );
}
