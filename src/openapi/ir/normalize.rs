//! Normalization from component schemas to Rust IR.
//!
//! This module handles all the schema-specific logic:
//! - Schema to Rust type resolution (refs, arrays, primitives, opaque fallback)
//! - Enum, struct and alias declaration building
//! - Module classification of each definition

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::openapi::spec::{Schema, enum_literal};

use super::classify::ModuleClassifier;
use super::emit::NAMES_IN_SCOPE;
use super::types::{
    NormalizedDef, RustField, RustPrimitive, RustType, RustTypeDef, RustVariant, TypeDefKind,
};
use super::utils::{sanitize_field_name, sanitize_type_name, sanitize_variant_name};

/// Definition name -> Rust type name, plus the path rules for references.
///
/// Built once per run and read-only afterwards.
#[derive(Debug)]
pub struct TypeIndex<'a> {
    names: BTreeMap<&'a str, String>,
    config: &'a GeneratorConfig,
}

impl<'a> TypeIndex<'a> {
    /// Sanitize every definition name, in sorted order.
    ///
    /// A generated (non-excluded) definition whose name is already taken
    /// gets `2`, `3`, ... appended. Taken means: used by an earlier
    /// definition, listed in the exclusion set, or already in scope in every
    /// generated module.
    pub fn new(schemas: &'a BTreeMap<String, Schema>, config: &'a GeneratorConfig) -> Self {
        let mut names = BTreeMap::new();
        let mut taken: HashSet<String> = NAMES_IN_SCOPE.iter().map(|n| (*n).to_string()).collect();

        for name in schemas.keys() {
            let base = sanitize_type_name(name, &config.reserved_words);
            if config.is_excluded(&base) {
                names.insert(name.as_str(), base);
                continue;
            }

            let mut rust_name = base.clone();
            let mut suffix = 2_u32;
            while taken.contains(&rust_name) || config.is_excluded(&rust_name) {
                rust_name = format!("{base}{suffix}");
                suffix += 1;
            }
            if rust_name != base {
                warn!(
                    definition = name.as_str(),
                    rust_name = %rust_name,
                    "Type name already taken, renamed."
                );
            }
            taken.insert(rust_name.clone());
            names.insert(name.as_str(), rust_name);
        }

        Self { names, config }
    }

    /// Configuration the index was built with.
    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    /// Rust type name for a definition.
    pub fn rust_name(&self, definition: &str) -> String {
        self.names.get(definition).cloned().unwrap_or_else(|| {
            sanitize_type_name(definition, &self.config.reserved_words)
        })
    }

    /// Qualified path for a `$ref`.
    ///
    /// Hand-written types live under `manual_path`, generated ones under
    /// `generated_path`. This is the only place paths are qualified.
    pub fn ref_path(&self, owner: &str, reference: &str) -> Result<String, GenerateError> {
        let target = reference.rsplit('/').next().unwrap_or(reference);
        let rust_name = self
            .names
            .get(target)
            .ok_or_else(|| GenerateError::unresolved(owner, reference))?;

        let base = if self.config.is_excluded(rust_name) {
            &self.config.manual_path
        } else {
            &self.config.generated_path
        };
        Ok(format!("{base}::{rust_name}"))
    }
}

/// Convert a Schema to a Rust type.
///
/// `owner` is the definition being rendered, used only for diagnostics.
/// References are never expanded, so cyclic schemas terminate.
pub fn resolve_type(
    schema: &Schema,
    index: &TypeIndex<'_>,
    owner: &str,
) -> Result<RustType, GenerateError> {
    // Handle $ref first
    if let Some(ref_path) = &schema.ref_path {
        return Ok(RustType::Path(index.ref_path(owner, ref_path)?));
    }

    // Unions are not modelled
    if schema.is_union() {
        return Ok(RustType::Value);
    }

    match schema.single_type() {
        Some("array") => {
            let inner = match &schema.items {
                Some(items) => resolve_type(items, index, owner)?,
                None => RustType::Value,
            };
            Ok(RustType::Vec(Box::new(inner)))
        }
        Some("string") => Ok(RustType::Primitive(RustPrimitive::String)),
        Some("integer") => Ok(RustType::Primitive(RustPrimitive::I64)),
        Some("number") => Ok(RustType::Primitive(RustPrimitive::F64)),
        Some("boolean") => Ok(RustType::Primitive(RustPrimitive::Bool)),
        // object without a name, null, type arrays, allOf, no type at all
        _ => Ok(RustType::Value),
    }
}

/// Normalize every component schema, in sorted-name order.
///
/// Excluded definitions are dropped here and never reach the assembler.
pub fn normalize_schemas(
    schemas: &BTreeMap<String, Schema>,
    index: &TypeIndex<'_>,
    classifier: &ModuleClassifier,
) -> Result<Vec<NormalizedDef>, GenerateError> {
    let mut defs = Vec::with_capacity(schemas.len());

    for (name, schema) in schemas {
        let Some(def) = normalize_schema_to_typedef(name, schema, index)? else {
            continue;
        };
        defs.push(NormalizedDef {
            source_name: name.clone(),
            module: classifier.classify(name).to_string(),
            def,
        });
    }

    Ok(defs)
}

/// Convert a schema to a type definition, or `None` if it is hand-written.
pub fn normalize_schema_to_typedef(
    name: &str,
    schema: &Schema,
    index: &TypeIndex<'_>,
) -> Result<Option<RustTypeDef>, GenerateError> {
    let rust_name = index.rust_name(name);
    if index.config().is_excluded(&rust_name) {
        debug!(definition = name, rust_name = %rust_name, "Skipping excluded definition.");
        return Ok(None);
    }

    let kind = if schema.is_string_enum() {
        TypeDefKind::Enum {
            variants: normalize_enum_values(schema, index.config()),
        }
    } else if schema.is_object() {
        TypeDefKind::Struct {
            fields: normalize_properties(name, schema, index)?,
        }
    } else {
        TypeDefKind::Alias {
            ty: resolve_type(schema, index, name)?,
        }
    };

    Ok(Some(RustTypeDef {
        name: rust_name,
        doc: schema.title.clone().filter(|t| !t.trim().is_empty()),
        kind,
    }))
}

/// One variant per enum value, in declaration order.
fn normalize_enum_values(schema: &Schema, config: &GeneratorConfig) -> Vec<RustVariant> {
    let mut used = HashSet::new();
    schema
        .enum_values
        .iter()
        .flatten()
        .map(|value| {
            let wire_value = enum_literal(value);
            let ident = sanitize_variant_name(&wire_value, &mut used, &config.reserved_words);
            RustVariant { ident, wire_value }
        })
        .collect()
}

/// Normalize object properties, sorted by original property name.
fn normalize_properties(
    owner: &str,
    schema: &Schema,
    index: &TypeIndex<'_>,
) -> Result<Vec<RustField>, GenerateError> {
    let required: HashSet<&str> = schema
        .required
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();

    let mut used = HashSet::new();
    let mut fields = Vec::new();

    for (prop_name, prop_schema) in schema.properties.iter().flatten() {
        let mut ty = resolve_type(prop_schema, index, owner)?;
        if !required.contains(prop_name.as_str()) {
            ty = ty.optional();
        }
        fields.push(RustField {
            ident: unique_field_ident(prop_name, &mut used, index.config()),
            wire_name: prop_name.clone(),
            ty,
        });
    }

    Ok(fields)
}

/// Field identifier, suffixed `_2`, `_3`, ... if an earlier property of the
/// same struct already took it.
fn unique_field_ident(raw: &str, used: &mut HashSet<String>, config: &GeneratorConfig) -> String {
    let ident = sanitize_field_name(raw, &config.reserved_words);
    let mut candidate = ident.clone();
    let mut suffix = 2_u32;
    while used.contains(&candidate) {
        candidate = format!("{}_{suffix}", ident.trim_end_matches('_'));
        suffix += 1;
    }
    used.insert(candidate.clone());
    candidate
}
