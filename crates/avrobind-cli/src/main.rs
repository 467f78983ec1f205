//! avrobind CLI - Python bindings from Avro schemas
//!
//! Commands:
//! - `avrobind generate` - Generate a Python package from a schema document
//! - `avrobind check` - Load a schema document and list its named types

use avrobind_core::GenError;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod check;
mod config;
mod generate;
mod logging;

#[derive(Parser)]
#[command(name = "avrobind")]
#[command(author, version, about = "Generate typed Python classes from Avro schemas", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Python package from a schema document
    Generate {
        /// Path to the schema document (.avsc)
        #[arg(short, long)]
        input: String,

        /// Output directory for the generated package
        #[arg(short, long)]
        output: String,

        /// Map logicalType annotations through the configured plugins
        #[arg(long)]
        logical_types: bool,

        /// Extra module imported by the generated code (repeatable)
        #[arg(long = "import")]
        imports: Vec<String>,

        /// Path to avrobind.toml
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Load a schema document and list its named types
    Check {
        /// Path to the schema document (.avsc)
        #[arg(short, long)]
        input: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            logical_types,
            imports,
            config,
        } => generate::run(&input, &output, logical_types, imports, config),
        Commands::Check { input } => check::run(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Exit code of the first generator error in the chain, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<GenError>())
        .and_then(|gen_err| u8::try_from(gen_err.exit_code()).ok())
        .unwrap_or(1)
}
