//! Generate serde-ready Rust types from the component schemas of an OpenAPI
//! document.
//!
//! The engine ([`openapi::generate`]) is a pure function from a parsed
//! document and a [`GeneratorConfig`] to one source text per topic module
//! plus a `mod.rs` manifest. [`api_generator`] wraps it with file loading,
//! change planning and the write / dry-run / check modes used by the CLI.

#![forbid(unsafe_code)]
#![deny(warnings, unused_must_use, dead_code, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use clap::{CommandFactory, Parser, Subcommand};

pub mod api_generator;
mod cli;
pub mod config;
pub mod error;
pub mod openapi;

pub use api_generator::{GenerateOptions, GenerateReport, Mode, generate_types, load_document};
pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use openapi::{generate, generate_from_json};

#[derive(Parser, Debug)]
#[command(
    name = "oas-typegen",
    version,
    about = "Generate serde-ready Rust types from OpenAPI component schemas"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate type modules from an OpenAPI document
    Generate(cli::generate::GenerateArgs),
    /// Show which module each definition name is assigned to
    Classify(cli::classify::ClassifyArgs),
}

/// Parse `args` (including the program name) and run the selected command.
///
/// Returns the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => cli::generate::run(args),
            Some(Commands::Classify(args)) => cli::classify::run(args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}
