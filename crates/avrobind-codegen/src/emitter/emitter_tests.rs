#![allow(non_snake_case)]

use super::*;
use avrobind_core::{Field, GenerateOptions, Primitive, SchemaNode, SchemaRegistry};
use serde_json::json;

fn user_record() -> RecordSchema {
    RecordSchema::new("com.acme.User")
        .with_doc("A user.")
        .with_field(Field::new("id", SchemaNode::primitive(Primitive::Long)).with_doc("Primary key."))
        .with_field(Field::new(
            "email",
            SchemaNode::union(vec![
                SchemaNode::primitive(Primitive::Null),
                SchemaNode::primitive(Primitive::String),
            ]),
        ))
        .with_field(Field::new("score", SchemaNode::primitive(Primitive::Double)).with_default(json!(1.5)))
        .with_field(Field::new("name", SchemaNode::primitive(Primitive::String)))
}

fn emit(record: &RecordSchema) -> (GeneratedClass, String) {
    let node = SchemaNode::record(record.clone());
    let registry = SchemaRegistry::from_nodes([&node]);
    let options = GenerateOptions::default();
    let mut writer = PythonWriter::new();
    let class = emit_record(record, &GenContext::new(&registry, &options), &mut writer).unwrap();
    (class, writer.finish())
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn build_record___resolves_class_names() {
    let (class, _) = emit(&user_record());

    assert_eq!(class.fullname, "com.acme.User");
    assert_eq!(class.namespace, vec!["com", "acme"]);
    assert_eq!(class.class_name, "UserClass");
    assert_eq!(class.class_ref, "com.acme.UserClass");
    assert!(class.is_record());
}

#[test]
fn emit_record___defaulted_parameters___move_after_required_ones() {
    let (_, code) = emit(&user_record());

    assert!(code.contains(
        "    def __init__(self,\n\
         \x20       id: int,\n\
         \x20       name: str,\n\
         \x20       email: Union[None, str]=None,\n\
         \x20       score: Optional[float]=None,\n\
         \x20   ):\n"
    ));
}

#[test]
fn emit_record___declared_default___assigns_in_two_branches() {
    let (_, code) = emit(&user_record());

    assert!(code.contains(
        "        if score is None:\n\
         \x20           # default: 1.5\n\
         \x20           self.score = self.record_schema().fields_dict[\"score\"].default\n\
         \x20       else:\n\
         \x20           self.score = score\n"
    ));
    assert!(code.contains("        self.email = email\n"));
}

#[test]
fn emit_record___storage_order_follows_declaration() {
    let (_, code) = emit(&user_record());

    let id = code.find("        self.id = id\n").unwrap();
    let email = code.find("        self.email = email\n").unwrap();
    let name = code.find("        self.name = name\n").unwrap();
    assert!(id < email && email < name);
}

#[test]
fn emit_record___restore_defaults___reassigns_every_field() {
    let (_, code) = emit(&user_record());

    assert!(code.contains(
        "    def _restore_defaults(self) -> None:\n\
         \x20       self.id = int()\n\
         \x20       self.email = None\n\
         \x20       self.score = self.record_schema().fields_dict[\"score\"].default\n\
         \x20       self.name = str()\n"
    ));
}

#[test]
fn emit_record___schema_is_looked_up_lazily_by_fullname() {
    let (_, code) = emit(&user_record());

    assert!(code.contains("        return _REGISTRY.lookup(\"com.acme.User\")\n"));
    assert!(code.contains("    def construct_with_defaults(cls) -> \"com.acme.UserClass\":\n"));
}

#[test]
fn emit_record___properties_use_wire_name_as_key() {
    let record = RecordSchema::new("Flags")
        .with_field(Field::new("class", SchemaNode::primitive(Primitive::Boolean)));

    let (class, code) = emit(&record);

    assert_eq!(class.fields()[0].accessor, "class_");
    assert!(code.contains(
        "    @property\n\
         \x20   def class_(self) -> bool:\n\
         \x20       # No docs available.\n\
         \x20       return self._inner_dict.get(\"class\")  # type: ignore\n"
    ));
    assert!(code.contains("        self._inner_dict[\"class\"] = value\n"));
}

#[test]
fn emit_record___field_named_self___does_not_shadow_receiver() {
    let record = RecordSchema::new("Owner")
        .with_field(Field::new("self", SchemaNode::primitive(Primitive::Int)));

    let (class, code) = emit(&record);

    assert_eq!(class.fields()[0].accessor, "self_");
    assert!(code.contains("    def __init__(self,\n        self_: int,\n    ):\n"));
    assert!(code.contains("        return self._inner_dict.get(\"self\")  # type: ignore\n"));
    assert!(!code.contains("self: int"));
}

#[test]
fn emit_record___doc_ending_in_quote___stays_a_closed_docstring() {
    let record = RecordSchema::new("Greeting").with_doc("Says \"hi\"");

    let (_, code) = emit(&record);

    assert!(code.starts_with("class GreetingClass(object):\n    \"\"\"Says \\\"hi\\\"\"\"\"\n"));
}

#[test]
fn emit_record___field_doc___becomes_property_docstring() {
    let (_, code) = emit(&user_record());

    assert!(code.contains("    def id(self) -> int:\n        \"\"\"Primary key.\"\"\"\n"));
    assert!(code.starts_with("class UserClass(object):\n    \"\"\"A user.\"\"\"\n"));
}

#[test]
fn emit_record___no_fields___restore_defaults_passes() {
    let (class, code) = emit(&RecordSchema::new("Empty"));

    assert!(class.fields().is_empty());
    assert!(code.contains("    def _restore_defaults(self) -> None:\n        pass\n"));
}

#[test]
fn emit_record___nested_record___defaults_to_construct_with_defaults() {
    let address = RecordSchema::new("com.acme.Address")
        .with_field(Field::new("street", SchemaNode::primitive(Primitive::String)));
    let user = RecordSchema::new("com.acme.User")
        .with_field(Field::new("address", SchemaNode::record(address)));

    let (_, code) = emit(&user);

    assert!(code.contains("        self.address = com.acme.AddressClass.construct_with_defaults()\n"));
    assert!(code.contains("address: \"com.acme.AddressClass\",\n"));
}

#[test]
fn emit_record___unresolvable_field___fails() {
    let record = RecordSchema::new("Broken")
        .with_field(Field::new("missing", SchemaNode::named("nowhere.Gone")));
    let registry = SchemaRegistry::new();
    let options = GenerateOptions::default();
    let mut writer = PythonWriter::new();

    let result = emit_record(&record, &GenContext::new(&registry, &options), &mut writer);

    assert!(result.is_err());
    assert!(writer.as_str().is_empty());
}

#[test]
fn emit_record___respects_writer_indent() {
    let record = RecordSchema::new("com.Point");
    let node = SchemaNode::record(record.clone());
    let registry = SchemaRegistry::from_nodes([&node]);
    let options = GenerateOptions::default();
    let mut writer = PythonWriter::new();
    writer.indent();

    emit_record(&record, &GenContext::new(&registry, &options), &mut writer).unwrap();

    assert!(writer.as_str().starts_with("    class PointClass(object):\n"));
}

// ============================================================================
// Enums
// ============================================================================

#[test]
fn emit_enum___symbols_become_string_constants() {
    let schema = EnumSchema::new("cards.Suit", ["A", "B"]);
    let mut writer = PythonWriter::new();

    let class = emit_enum(&schema, &mut writer);

    assert_eq!(class.class_ref, "cards.SuitClass");
    assert_eq!(
        writer.finish(),
        "class SuitClass(str):\n\
         \x20   # No docs available.\n\
         \n\
         \x20   A = \"A\"\n\
         \x20   B = \"B\"\n"
    );
}

#[test]
fn emit_enum___symbol_doc___sits_below_symbol() {
    let schema = EnumSchema::new("Color", ["RED", "GREEN"])
        .with_doc("Colors.")
        .with_symbol_doc("RED", "Warm.");
    let mut writer = PythonWriter::new();

    emit_enum(&schema, &mut writer);

    assert!(writer.as_str().contains("    RED = \"RED\"\n    \"\"\"Warm.\"\"\"\n    GREEN = \"GREEN\"\n"));
}

#[test]
fn emit_enum___keyword_symbol___keeps_symbol_text_as_value() {
    let schema = EnumSchema::new("Flag", ["None", "True"]);
    let mut writer = PythonWriter::new();

    emit_enum(&schema, &mut writer);

    assert!(writer.as_str().contains("    None_ = \"None\"\n    True_ = \"True\"\n"));
}

#[test]
fn emit_enum___no_symbols___emits_pass() {
    let schema = EnumSchema::new("Nothing", Vec::<String>::new());
    let mut writer = PythonWriter::new();

    emit_enum(&schema, &mut writer);

    assert!(writer.as_str().ends_with("    pass\n"));
}
