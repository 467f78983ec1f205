//! Check command implementation

use anyhow::{Context, Result};
use avrobind_core::{SchemaDocument, SchemaKind, SchemaNode};

/// Run the check command.
pub fn run(input: &str) -> Result<()> {
    println!("Checking schema: {input}");

    let document = SchemaDocument::from_file(input)
        .with_context(|| format!("Failed to load schema: {input}"))?;

    for line in describe(&document) {
        println!("  {line}");
    }
    println!("✓ Named types: {}", document.registry.len());
    println!("\nSchema loaded successfully!");

    Ok(())
}

/// One `<kind> <fullname>` line per named type, in registration order.
pub fn describe(document: &SchemaDocument) -> Vec<String> {
    document
        .registry
        .iter()
        .map(|(fullname, node)| format!("{:<6} {fullname}", kind_label(node)))
        .collect()
}

fn kind_label(node: &SchemaNode) -> &'static str {
    match node.kind {
        SchemaKind::Record(_) => "record",
        SchemaKind::Enum(_) => "enum",
        SchemaKind::Fixed(_) => "fixed",
        _ => "other",
    }
}
