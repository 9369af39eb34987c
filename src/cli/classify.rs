//! `classify`: show the type name and module a definition name maps to.

use clap::Args;
use std::path::PathBuf;

use crate::cli::run_command;
use crate::config::GeneratorConfig;
use crate::openapi::ir::utils::sanitize_type_name;

/// Arguments for `oas-typegen classify`.
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Definition names to classify
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
    /// Configuration file (default: ./typegen.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Print one `name<TAB>type<TAB>module` line per name.
pub fn run(args: ClassifyArgs) -> i32 {
    run_command(|| {
        let config = GeneratorConfig::load(args.config.as_deref())?;
        let classifier = config.classifier();

        for name in &args.names {
            let rust_name = sanitize_type_name(name, &config.reserved_words);
            if config.is_excluded(&rust_name) {
                println!("{name}\t{rust_name}\t(excluded)");
            } else {
                println!("{name}\t{rust_name}\t{}", classifier.classify(name));
            }
        }
        Ok(())
    })
}
