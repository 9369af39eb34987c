//! Identifier sanitizing for Rust code generation.
//!
//! Turns arbitrary schema names, enum literals and property names into valid
//! Rust identifiers. Every function here is pure and total.

use std::collections::{BTreeSet, HashSet};

/// Rust keywords (strict and reserved, 2024 edition).
pub const RUST_RESERVED_WORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
    // reserved for future use
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Placeholder for a type name with no alphanumeric content.
const UNNAMED_TYPE: &str = "Unnamed";
/// Placeholder for a variant with no alphanumeric content.
const UNNAMED_VARIANT: &str = "Variant";
/// Placeholder for a field with no alphanumeric content.
const UNNAMED_FIELD: &str = "field";

/// Default reserved word set as owned strings.
pub fn default_reserved_words() -> BTreeSet<String> {
    RUST_RESERVED_WORDS.iter().map(|w| (*w).to_string()).collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Split on runs of non-alphanumeric characters and capitalize each segment.
fn pascal_segments(raw: &str) -> String {
    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(capitalize_first)
        .collect()
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// PascalCase `raw`, falling back to `placeholder` and prefixing `digit_prefix`
/// when the result would start with a digit.
fn pascal_identifier(
    raw: &str,
    placeholder: &str,
    digit_prefix: char,
    reserved: &BTreeSet<String>,
) -> String {
    let mut ident = pascal_segments(raw);
    if ident.is_empty() {
        return placeholder.to_string();
    }
    if starts_with_digit(&ident) {
        ident.insert(0, digit_prefix);
    }
    if reserved.contains(&ident) {
        ident.push('_');
    }
    ident
}

/// Convert a schema name to a PascalCase Rust type name.
///
/// - `order-line item` -> `OrderLineItem`
/// - `2fa_token` -> `T2faToken`
/// - `!!!` -> `Unnamed`
pub fn sanitize_type_name(raw: &str, reserved: &BTreeSet<String>) -> String {
    pascal_identifier(raw, UNNAMED_TYPE, 'T', reserved)
}

/// Convert an enum literal to a variant name unique within `used`.
///
/// `used` belongs to one enum. Collisions get `2`, `3`, ... appended in
/// first-seen order, and the chosen name is recorded before returning.
pub fn sanitize_variant_name(
    raw: &str,
    used: &mut HashSet<String>,
    reserved: &BTreeSet<String>,
) -> String {
    let ident = pascal_identifier(raw, UNNAMED_VARIANT, 'V', reserved);
    let mut candidate = ident.clone();
    let mut suffix = 2_u32;
    while used.contains(&candidate) {
        candidate = format!("{ident}{suffix}");
        suffix += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Convert a property name to a snake_case field name.
///
/// - `orderId` -> `order_id`
/// - `prop.with.dots` -> `prop_with_dots`
/// - `type` -> `type_`
/// - `123abc` -> `f_123abc`
pub fn sanitize_field_name(raw: &str, reserved: &BTreeSet<String>) -> String {
    let mut split = String::with_capacity(raw.len() + 4);
    let mut prev: Option<char> = None;
    for c in raw.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            split.push('_');
        }
        split.push(c);
        prev = Some(c);
    }

    let mut snaked = String::with_capacity(split.len());
    for c in split.chars() {
        if c.is_ascii_alphanumeric() {
            snaked.push(c.to_ascii_lowercase());
        } else if !snaked.ends_with('_') {
            snaked.push('_');
        }
    }
    let mut snaked = snaked.trim_matches('_').to_string();

    if snaked.is_empty() {
        return UNNAMED_FIELD.to_string();
    }
    if starts_with_digit(&snaked) {
        snaked.insert_str(0, "f_");
    }
    if reserved.contains(&snaked) {
        snaked.push('_');
    }
    snaked
}

/// Whether `tag` can be used as a module name: lower-case snake_case, not a keyword.
pub fn is_module_identifier(tag: &str, reserved: &BTreeSet<String>) -> bool {
    tag.chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase())
        && tag
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !reserved.contains(tag)
}

/// Escape a string for use inside a Rust string literal.
pub fn escape_rust_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
