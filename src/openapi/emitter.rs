//! Rust code emitter for OpenAPI component schemas.
//!
//! This module is a thin wrapper around the IR-based code generation.
//! The pipeline is:
//! 1. Index: sanitize every definition name, suffix collisions
//! 2. Normalize: schemas -> Rust IR (classification and type resolution)
//! 3. Codegen: IR -> rendered declarations grouped by module
//! 4. Emit: modules -> source text plus `mod.rs` manifest

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::openapi::ir::types::GeneratedCode;
use crate::openapi::ir::{
    TypeIndex, assemble_modules, codegen_output, normalize_schemas, render_declaration,
};
use crate::openapi::spec::OpenApiSpec;

/// Generate Rust modules from a parsed document.
///
/// Fails without producing anything if a single definition cannot be
/// rendered; callers never see a partial module set.
pub fn generate(spec: &OpenApiSpec, config: &GeneratorConfig) -> Result<GeneratedCode, GenerateError> {
    let schemas = &spec.components.schemas;
    let index = TypeIndex::new(schemas, config);
    let classifier = config.classifier();

    let normalized = normalize_schemas(schemas, &index, &classifier)?;
    debug!(
        schemas = schemas.len(),
        generated = normalized.len(),
        "Normalized component schemas."
    );

    let declarations = normalized.into_iter().map(render_declaration).collect();
    let modules = assemble_modules(declarations);
    debug!(modules = modules.len(), "Assembled modules.");

    Ok(codegen_output(&modules))
}

/// Generate Rust modules from an OpenAPI JSON string.
pub fn generate_from_json(
    openapi_json: &str,
    config: &GeneratorConfig,
) -> Result<GeneratedCode, String> {
    let spec = OpenApiSpec::from_json(openapi_json)
        .map_err(|e| format!("Failed to parse OpenAPI spec: {e}"))?;
    generate(&spec, config).map_err(|e| e.to_string())
}
