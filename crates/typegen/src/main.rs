//! oas-typegen - generate Rust types from OpenAPI component schemas
//!
//! Thin binary wrapper: installs the tracing subscriber and hands the
//! command line to [`oas_typegen::run_cli`].

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "TYPEGEN_LOG";
const CRATE_TARGET: &str = "oas_typegen";

fn main() -> ExitCode {
    init_tracing();

    let code = oas_typegen::run_cli(std::env::args().collect());
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn init_tracing() {
    // TYPEGEN_LOG takes a plain level ("debug") or a full filter spec
    let filter = match std::env::var(LOG_ENV) {
        Ok(level) if is_plain_level(&level) => format!("{CRATE_TARGET}={level}"),
        Ok(spec) => spec,
        Err(_) => format!("{CRATE_TARGET}=info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
