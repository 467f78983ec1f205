//! Generate command implementation

use crate::config::{ConfigFile, apply_flags};
use anyhow::{Context, Result};
use avrobind_codegen::{GeneratedOutput, GenerationSession};
use avrobind_core::{GenerateOptions, SchemaDocument};
use std::path::Path;

/// Run the generate command.
pub fn run(
    input: &str,
    output: &str,
    logical_types: bool,
    imports: Vec<String>,
    config: Option<String>,
) -> Result<()> {
    let options = resolve_options(config.as_deref(), logical_types, imports)?;

    println!("Generating Python bindings from {input}");

    let generated = generate(Path::new(input), Path::new(output), options)?;

    println!("✓ Classes: {}", generated.classes.len());
    println!("✓ Namespaces: {}", generated.namespaces.len());
    println!("✓ Files: {}", generated.units.len());
    println!("\nGenerated package in {output}");

    Ok(())
}

/// Options from the config file, if any, with command-line flags applied on top.
pub fn resolve_options(
    config: Option<&str>,
    logical_types: bool,
    imports: Vec<String>,
) -> Result<GenerateOptions> {
    let base = match config {
        Some(path) => {
            let file = ConfigFile::from_file(path)?;
            file.validate()
                .with_context(|| format!("Invalid config: {path}"))?;
            file.to_options()
        }
        None => GenerateOptions::default(),
    };
    Ok(apply_flags(base, logical_types, imports))
}

/// Load `input`, generate, and write the package below `output`.
pub fn generate(input: &Path, output: &Path, options: GenerateOptions) -> Result<GeneratedOutput> {
    let document = SchemaDocument::from_file(input)
        .with_context(|| format!("Failed to load schema: {input:?}"))?;

    let session = GenerationSession::from_document(document, options);
    let generated = session
        .generate()
        .with_context(|| format!("Failed to generate bindings for {input:?}"))?;

    generated
        .write_to(output)
        .with_context(|| format!("Failed to write package to {output:?}"))?;

    Ok(generated)
}
