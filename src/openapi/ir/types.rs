//! Rust IR types for code generation.
//!
//! This module defines the slice of the Rust type system the generator emits:
//! - RustType: type expressions (primitives, `Vec<T>`, `Option<T>`, paths, `Value`)
//! - RustTypeDef: one declaration (struct, enum or type alias)
//! - RenderedDeclaration / RustModule / GeneratedCode: assembled output

use std::collections::BTreeMap;

/// Rust type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RustType {
    /// Primitive types: String, i64, f64, bool
    Primitive(RustPrimitive),
    /// Sequence: Vec<T>
    Vec(Box<RustType>),
    /// Optional field marker: Option<T>
    Option(Box<RustType>),
    /// Qualified path to another declaration: crate::types::generated::Item
    Path(String),
    /// Opaque fallback: serde_json::Value
    Value,
}

/// Rust primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RustPrimitive {
    /// `string`
    String,
    /// `integer`
    I64,
    /// `number`
    F64,
    /// `boolean`
    Bool,
}

impl RustType {
    /// Whether the expression is, or contains, the opaque `Value` type.
    ///
    /// Computed from the structure itself, so the flag can never disagree with
    /// the emitted text.
    pub fn uses_value(&self) -> bool {
        match self {
            RustType::Value => true,
            RustType::Vec(inner) | RustType::Option(inner) => inner.uses_value(),
            RustType::Primitive(_) | RustType::Path(_) => false,
        }
    }

    /// Wrap in `Option<..>`.
    pub fn optional(self) -> Self {
        RustType::Option(Box::new(self))
    }
}

/// Struct field definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustField {
    /// snake_case identifier used in code
    pub ident: String,
    /// Original property name, kept as the serde key
    pub wire_name: String,
    /// Field type, already wrapped in `Option` when not required
    pub ty: RustType,
}

/// Enum variant definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustVariant {
    /// PascalCase identifier, unique within its enum
    pub ident: String,
    /// Original enum literal, kept as the serde value
    pub wire_value: String,
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefKind {
    /// pub struct Foo { ... }
    Struct {
        /// Fields sorted by property name
        fields: Vec<RustField>,
    },
    /// pub enum Foo { ... }
    Enum {
        /// Variants in declaration order
        variants: Vec<RustVariant>,
    },
    /// pub type Foo = ...;
    Alias {
        /// Aliased type
        ty: RustType,
    },
}

/// Type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustTypeDef {
    /// Sanitized Rust type name
    pub name: String,
    /// Schema title, emitted as a doc comment
    pub doc: Option<String>,
    /// Declaration body
    pub kind: TypeDefKind,
}

impl RustTypeDef {
    /// OR over every type expression the declaration contains.
    pub fn uses_value(&self) -> bool {
        match &self.kind {
            TypeDefKind::Struct { fields } => fields.iter().any(|f| f.ty.uses_value()),
            TypeDefKind::Enum { .. } => false,
            TypeDefKind::Alias { ty } => ty.uses_value(),
        }
    }
}

/// Source text for exactly one definition, tagged with its module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDeclaration {
    /// Original definition name
    pub source_name: String,
    /// Sanitized Rust type name
    pub name: String,
    /// Module tag the declaration belongs to
    pub module: String,
    /// Rendered source, without imports
    pub code: String,
    /// Whether `code` mentions `Value`
    pub uses_value: bool,
}

/// Declarations sharing one module tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RustModule {
    /// Module name, also the file stem
    pub tag: String,
    /// Declarations in sorted source-name order
    pub declarations: Vec<RenderedDeclaration>,
}

impl RustModule {
    /// Whether `use serde_json::Value;` is needed.
    pub fn uses_value(&self) -> bool {
        self.declarations.iter().any(|d| d.uses_value)
    }
}

/// Complete generator output: one text per module plus the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    /// Module tag -> rendered source text
    pub modules: BTreeMap<String, String>,
    /// `mod.rs` text re-exporting every module
    pub manifest: String,
}

/// A declaration before emission, with the module it was classified into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDef {
    /// Original definition name
    pub source_name: String,
    /// Module tag chosen by the classifier
    pub module: String,
    /// The declaration itself
    pub def: RustTypeDef,
}
