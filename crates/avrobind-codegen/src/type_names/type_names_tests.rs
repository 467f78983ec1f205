#![allow(non_snake_case)]

use super::*;
use avrobind_core::{
    EnumSchema, GenError, GenerateOptions, LogicalTypeMapping, RecordSchema, SchemaRegistry,
};
use test_case::test_case;

fn prim(p: Primitive) -> SchemaNode {
    SchemaNode::primitive(p)
}

fn name_of(node: &SchemaNode) -> String {
    let registry = SchemaRegistry::from_nodes([node]);
    let options = GenerateOptions::default();
    type_name_of(node, &GenContext::new(&registry, &options)).unwrap()
}

#[test_case(Primitive::Null, "None")]
#[test_case(Primitive::Boolean, "bool")]
#[test_case(Primitive::Int, "int")]
#[test_case(Primitive::Long, "int")]
#[test_case(Primitive::Float, "float")]
#[test_case(Primitive::Double, "float")]
#[test_case(Primitive::Bytes, "bytes")]
#[test_case(Primitive::String, "str")]
fn type_name_of___primitive___maps_to_python_builtin(primitive: Primitive, expected: &str) {
    assert_eq!(name_of(&prim(primitive)), expected);
}

#[test]
fn type_name_of___fixed___is_bytes() {
    assert_eq!(name_of(&SchemaNode::fixed("com.acme.Md5", 16)), "bytes");
}

#[test]
fn type_name_of___record___is_quoted_class_reference() {
    let node = SchemaNode::record(RecordSchema::new("com.acme.User"));

    assert_eq!(name_of(&node), "\"com.acme.UserClass\"");
}

#[test]
fn type_name_of___enum___is_quoted_class_reference() {
    let node = SchemaNode::enumeration(EnumSchema::new("Suit", ["HEARTS"]));

    assert_eq!(name_of(&node), "\"SuitClass\"");
}

#[test]
fn type_name_of___named_reference___resolves_through_registry() {
    let definition = SchemaNode::enumeration(EnumSchema::new("com.acme.Suit", ["HEARTS"]));
    let registry = SchemaRegistry::from_nodes([&definition]);
    let options = GenerateOptions::default();
    let ctx = GenContext::new(&registry, &options);

    let name = type_name_of(&SchemaNode::named("com.acme.Suit"), &ctx).unwrap();

    assert_eq!(name, "\"com.acme.SuitClass\"");
}

#[test]
fn type_name_of___dangling_reference___returns_unknown_type() {
    let registry = SchemaRegistry::new();
    let options = GenerateOptions::default();
    let ctx = GenContext::new(&registry, &options);

    let result = type_name_of(&SchemaNode::named("com.acme.Missing"), &ctx);

    assert!(matches!(result, Err(GenError::UnknownType(_))));
}

#[test]
fn type_name_of___nested_containers___compose() {
    let node = SchemaNode::map(SchemaNode::array(prim(Primitive::Long)));

    assert_eq!(name_of(&node), "Dict[str, List[int]]");
}

#[test]
fn type_name_of___union___preserves_declaration_order() {
    let node = SchemaNode::union(vec![prim(Primitive::String), prim(Primitive::Null)]);

    assert_eq!(name_of(&node), "Union[str, None]");
}

#[test]
fn type_name_of___union_of_identical_names___collapses_to_one() {
    let node = SchemaNode::union(vec![prim(Primitive::Int), prim(Primitive::Long)]);

    assert_eq!(name_of(&node), "int");
}

#[test]
fn type_name_of___empty_union___is_empty_annotation() {
    assert_eq!(name_of(&SchemaNode::union(vec![])), "");
}

#[test]
fn type_name_of___union_inside_array___nests() {
    let node = SchemaNode::array(SchemaNode::union(vec![
        prim(Primitive::Null),
        prim(Primitive::Double),
        prim(Primitive::Float),
    ]));

    assert_eq!(name_of(&node), "List[Union[None, float]]");
}

#[test]
fn type_name_of___logical_type_enabled___overrides_structural_name() {
    let node = prim(Primitive::Int).with_logical_type("date");
    let registry = SchemaRegistry::new();
    let options = GenerateOptions::new().with_logical_types(true).with_logical_type(
        "date",
        LogicalTypeMapping::new("datetime.date", "datetime.date.today()", "{value}"),
    );

    let name = type_name_of(&node, &GenContext::new(&registry, &options)).unwrap();

    assert_eq!(name, "datetime.date");
}

#[test]
fn type_name_of___logical_type_disabled___uses_structural_name() {
    let node = prim(Primitive::Int).with_logical_type("date");
    let registry = SchemaRegistry::new();
    let options = GenerateOptions::new().with_logical_type(
        "date",
        LogicalTypeMapping::new("datetime.date", "datetime.date.today()", "{value}"),
    );

    let name = type_name_of(&node, &GenContext::new(&registry, &options)).unwrap();

    assert_eq!(name, "int");
}
