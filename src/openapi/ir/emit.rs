//! Rust code emission via the Emit trait.
//!
//! Each IR type implements `Emit`; the output of one generator run is the
//! concatenation of these strings, so everything here must be deterministic.

use super::types::{
    RustField, RustModule, RustPrimitive, RustType, RustTypeDef, RustVariant, TypeDefKind,
};
use super::utils::escape_rust_string;

/// Trait for emitting Rust code from IR nodes.
pub trait Emit {
    /// Convert the IR node to its Rust source representation.
    fn emit(&self) -> String;
}

const DERIVE_LINE: &str = "#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]";
const SERDE_IMPORT: &str = "use serde::{Deserialize, Serialize};";
const VALUE_IMPORT: &str = "use serde_json::Value;";

/// Type names every generated module already has in scope, through its
/// imports or the prelude. Declaring one of them would clash or shadow.
pub const NAMES_IN_SCOPE: &[&str] = &["Deserialize", "Serialize", "Value", "String", "Vec", "Option"];

// =============================================================================
// Types
// =============================================================================

impl Emit for RustPrimitive {
    fn emit(&self) -> String {
        match self {
            RustPrimitive::String => "String".to_string(),
            RustPrimitive::I64 => "i64".to_string(),
            RustPrimitive::F64 => "f64".to_string(),
            RustPrimitive::Bool => "bool".to_string(),
        }
    }
}

impl Emit for RustType {
    fn emit(&self) -> String {
        match self {
            RustType::Primitive(p) => p.emit(),
            RustType::Vec(inner) => format!("Vec<{}>", inner.emit()),
            RustType::Option(inner) => format!("Option<{}>", inner.emit()),
            RustType::Path(path) => path.clone(),
            RustType::Value => "Value".to_string(),
        }
    }
}

impl Emit for RustField {
    fn emit(&self) -> String {
        format!(
            "    #[serde(rename = \"{}\")]\n    pub {}: {},",
            escape_rust_string(&self.wire_name),
            self.ident,
            self.ty.emit()
        )
    }
}

impl Emit for RustVariant {
    fn emit(&self) -> String {
        format!(
            "    #[serde(rename = \"{}\")]\n    {},",
            escape_rust_string(&self.wire_value),
            self.ident
        )
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for RustTypeDef {
    fn emit(&self) -> String {
        let mut lines: Vec<String> = self
            .doc
            .iter()
            .flat_map(|doc| doc.lines())
            .map(|line| format!("/// {}", line.trim_end()).trim_end().to_string())
            .collect();

        match &self.kind {
            TypeDefKind::Struct { fields } => {
                lines.push(DERIVE_LINE.to_string());
                lines.push(format!("pub struct {} {{", self.name));
                lines.extend(fields.iter().map(Emit::emit));
                lines.push("}".to_string());
            }
            TypeDefKind::Enum { variants } => {
                lines.push(DERIVE_LINE.to_string());
                lines.push(format!("pub enum {} {{", self.name));
                lines.extend(variants.iter().map(Emit::emit));
                lines.push("}".to_string());
            }
            TypeDefKind::Alias { ty } => {
                lines.push(format!("pub type {} = {};", self.name, ty.emit()));
            }
        }

        lines.join("\n")
    }
}

// =============================================================================
// Modules
// =============================================================================

impl Emit for RustModule {
    fn emit(&self) -> String {
        let mut output = String::new();
        output.push_str(SERDE_IMPORT);
        output.push('\n');
        if self.uses_value() {
            output.push_str(VALUE_IMPORT);
            output.push('\n');
        }
        output.push('\n');

        let body: Vec<&str> = self.declarations.iter().map(|d| d.code.as_str()).collect();
        output.push_str(&body.join("\n\n"));
        output.push('\n');
        output
    }
}

/// `mod.rs` declaring and re-exporting every module, in the given order.
pub fn emit_manifest(modules: &[RustModule]) -> String {
    let mut output = String::new();
    for module in modules {
        output.push_str(&format!("pub mod {};\n", module.tag));
        output.push_str(&format!("pub use {}::*;\n", module.tag));
    }
    output
}
