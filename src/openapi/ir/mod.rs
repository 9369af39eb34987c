//! Intermediate Representation for schema to Rust code generation.
//!
//! The pipeline is split so every decision is made before any text exists:
//! 1. Normalization: schemas -> Rust IR (names, modules, types all resolved)
//! 2. Codegen: IR -> rendered declarations grouped into modules
//! 3. Emission: IR -> code strings via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `types`: Rust IR (RustType, RustTypeDef, RustModule, GeneratedCode)
//! - `utils`: identifier sanitizing shared by normalization and config validation
//! - `classify`: ordered rule table assigning definitions to modules
//! - `normalize`: schemas -> IR, including type resolution
//! - `codegen`: IR -> modules + manifest
//! - `emit`: IR -> code strings (via Emit trait)

pub mod classify;
mod codegen;
mod emit;
mod normalize;
pub mod types;
pub mod utils;

// Re-export the main entry points
pub use codegen::{assemble_modules, codegen_output, render_declaration};
pub use emit::Emit;
pub use normalize::{TypeIndex, normalize_schemas, resolve_type};
