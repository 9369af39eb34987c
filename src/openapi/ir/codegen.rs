//! Module assembly from normalized declarations.
//!
//! Declarations are rendered to text, grouped by module tag and emitted with
//! their imports. Modules come out sorted by tag and keep the sorted-name
//! order of their declarations, so unchanged input gives byte-identical
//! output.

use std::collections::BTreeMap;

use super::emit::{Emit, emit_manifest};
use super::types::{GeneratedCode, NormalizedDef, RenderedDeclaration, RustModule};

/// Render one normalized definition.
pub fn render_declaration(normalized: NormalizedDef) -> RenderedDeclaration {
    RenderedDeclaration {
        code: normalized.def.emit(),
        uses_value: normalized.def.uses_value(),
        name: normalized.def.name,
        source_name: normalized.source_name,
        module: normalized.module,
    }
}

/// Group rendered declarations into modules, sorted by tag.
///
/// Only populated modules are returned.
pub fn assemble_modules(declarations: Vec<RenderedDeclaration>) -> Vec<RustModule> {
    let mut modules: BTreeMap<String, RustModule> = BTreeMap::new();

    for declaration in declarations {
        modules
            .entry(declaration.module.clone())
            .or_insert_with(|| RustModule {
                tag: declaration.module.clone(),
                declarations: Vec::new(),
            })
            .declarations
            .push(declaration);
    }

    modules.into_values().collect()
}

/// Emit every module plus the manifest.
pub fn codegen_output(modules: &[RustModule]) -> GeneratedCode {
    GeneratedCode {
        modules: modules
            .iter()
            .map(|module| (module.tag.clone(), module.emit()))
            .collect(),
        manifest: emit_manifest(modules),
    }
}
