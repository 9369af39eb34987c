//! OpenAPI document structs for serde deserialization.
//!
//! Only the `components.schemas` section is read. Paths, operations and
//! every schema keyword the generator does not act on are ignored.
//!
//! Anywhere a subschema may appear, a boolean is accepted as well. `true`
//! and `false` both read as an untyped [`Schema`], which resolves to an
//! opaque value.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// Root OpenAPI document.
#[derive(Debug, Deserialize)]
pub struct OpenApiSpec {
    /// The `components` object. Required, though it may be empty.
    pub components: Components,
}

/// Components section containing reusable schemas.
#[derive(Debug, Default, Deserialize)]
pub struct Components {
    /// Named definitions, kept sorted so every walk over them is deterministic.
    #[serde(default, deserialize_with = "schema_map")]
    pub schemas: BTreeMap<String, Schema>,
}

/// JSON Schema definition used in OpenAPI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Human-readable label, emitted as a doc comment.
    pub title: Option<String>,

    /// Properties for object types.
    #[serde(default, deserialize_with = "opt_schema_map")]
    pub properties: Option<BTreeMap<String, Schema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Item schema for array types.
    #[serde(default, deserialize_with = "opt_boxed_schema")]
    pub items: Option<Box<Schema>>,

    /// Enum values. Anything but a JSON string is kept as its JSON text.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    /// Union type (any of these schemas).
    #[serde(default, deserialize_with = "opt_schema_list")]
    pub any_of: Option<Vec<Schema>>,

    /// Union type (exactly one of these schemas).
    #[serde(default, deserialize_with = "opt_schema_list")]
    pub one_of: Option<Vec<Schema>>,

    /// Intersection type. Not modelled; degrades to an opaque value.
    #[serde(default, deserialize_with = "opt_schema_list")]
    pub all_of: Option<Vec<Schema>>,
}

/// Schema type can be a single type or an array of types.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `type: "string"`.
    Single(String),
    /// `type: ["string", "null"]`. Never treated as a primitive.
    Multiple(Vec<String>),
}

/// A subschema position: either a schema object or a boolean schema.
struct SchemaOrBool(Schema);

impl<'de> Deserialize<'de> for SchemaOrBool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a schema object or a boolean")
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Schema, E> {
                Ok(Schema::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Schema, A::Error> {
                Schema::deserialize(de::value::MapAccessDeserializer::new(map))
            }
        }

        deserializer.deserialize_any(SchemaVisitor).map(SchemaOrBool)
    }
}

fn schema_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Schema>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, SchemaOrBool>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(name, SchemaOrBool(s))| (name, s)).collect())
}

fn opt_schema_map<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, Schema>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, SchemaOrBool>>::deserialize(deserializer)?;
    Ok(raw.map(|m| m.into_iter().map(|(name, SchemaOrBool(s))| (name, s)).collect()))
}

fn opt_boxed_schema<'de, D>(deserializer: D) -> Result<Option<Box<Schema>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<SchemaOrBool>::deserialize(deserializer)?;
    Ok(raw.map(|SchemaOrBool(s)| Box::new(s)))
}

fn opt_schema_list<'de, D>(deserializer: D) -> Result<Option<Vec<Schema>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<SchemaOrBool>>::deserialize(deserializer)?;
    Ok(raw.map(|v| v.into_iter().map(|SchemaOrBool(s)| s).collect()))
}

impl OpenApiSpec {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

impl Schema {
    /// The `type` keyword when it names exactly one type.
    pub fn single_type(&self) -> Option<&str> {
        match &self.schema_type {
            Some(SchemaType::Single(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    /// `type: string` together with an `enum` list.
    pub fn is_string_enum(&self) -> bool {
        self.single_type() == Some("string") && self.enum_values.is_some()
    }

    /// `type: object`, with or without properties.
    pub fn is_object(&self) -> bool {
        self.single_type() == Some("object")
    }

    /// `anyOf` or `oneOf` is present.
    pub fn is_union(&self) -> bool {
        self.any_of.is_some() || self.one_of.is_some()
    }
}

/// The literal a variant serializes to.
pub fn enum_literal(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let spec = OpenApiSpec::from_json(
            r##"{
  "openapi": "3.1.0",
  "paths": {},
  "components": {
    "schemas": {
      "Status": { "type": "string", "enum": ["a", "b"], "title": "Status" },
      "Pet": { "type": "object", "properties": { "id": { "type": "integer" } }, "required": ["id"] },
      "Pets": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }
    }
  }
}"##,
        )
        .unwrap();

        let schemas = &spec.components.schemas;
        let names: Vec<_> = schemas.keys().map(String::as_str).collect();
        assert_eq!(names, ["Pet", "Pets", "Status"]);
        assert!(schemas["Status"].is_string_enum());
        assert_eq!(schemas["Status"].title.as_deref(), Some("Status"));
        assert!(schemas["Pet"].is_object());
        assert_eq!(
            schemas["Pets"].items.as_ref().unwrap().ref_path.as_deref(),
            Some("#/components/schemas/Pet")
        );
    }

    #[test]
    fn test_missing_schemas_is_empty() {
        let spec = OpenApiSpec::from_json(r#"{ "components": {} }"#).unwrap();
        assert!(spec.components.schemas.is_empty());
    }

    #[test]
    fn test_missing_components_is_an_error() {
        assert!(OpenApiSpec::from_json(r#"{ "paths": {} }"#).is_err());
    }

    #[test]
    fn test_type_array_is_not_single() {
        let schema: Schema = serde_json::from_str(r#"{ "type": ["string", "null"] }"#).unwrap();
        assert!(matches!(schema.schema_type, Some(SchemaType::Multiple(_))));
        assert_eq!(schema.single_type(), None);
    }

    #[test]
    fn test_union_detection() {
        let any: Schema = serde_json::from_str(r#"{ "anyOf": [{ "type": "string" }] }"#).unwrap();
        let one: Schema = serde_json::from_str(r#"{ "oneOf": [{ "type": "string" }] }"#).unwrap();
        let all: Schema = serde_json::from_str(r#"{ "allOf": [{ "type": "string" }] }"#).unwrap();
        assert!(any.is_union());
        assert!(one.is_union());
        assert!(!all.is_union());
    }

    #[test]
    fn test_boolean_subschemas_are_untyped() {
        let spec = OpenApiSpec::from_json(
            r#"{
  "components": {
    "schemas": {
      "Anything": true,
      "Holder": {
        "type": "object",
        "properties": { "extra": true, "id": { "type": "string" } }
      },
      "Bag": { "type": "array", "items": false },
      "Either": { "anyOf": [true, { "type": "integer" }] }
    }
  }
}"#,
        )
        .unwrap();

        let schemas = &spec.components.schemas;
        assert!(schemas["Anything"].schema_type.is_none());
        assert!(schemas["Anything"].ref_path.is_none());

        let props = schemas["Holder"].properties.as_ref().unwrap();
        assert!(props["extra"].schema_type.is_none());
        assert!(props["extra"].properties.is_none());
        assert_eq!(props["id"].single_type(), Some("string"));

        assert!(schemas["Bag"].items.as_ref().unwrap().schema_type.is_none());

        let branches = schemas["Either"].any_of.as_ref().unwrap();
        assert_eq!(branches.len(), 2);
        assert!(branches[0].schema_type.is_none());
        assert_eq!(branches[1].single_type(), Some("integer"));
    }

    #[test]
    fn test_boolean_subschema_in_yaml() {
        let spec = OpenApiSpec::from_yaml(
            "components:\n  schemas:\n    Holder:\n      type: object\n      properties:\n        extra: true\n",
        )
        .unwrap();
        let props = spec.components.schemas["Holder"].properties.as_ref().unwrap();
        assert!(props["extra"].schema_type.is_none());
    }

    #[test]
    fn test_nested_errors_still_reported() {
        let err = OpenApiSpec::from_json(
            r#"{ "components": { "schemas": { "X": { "properties": { "a": 5 } } } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("a schema object or a boolean"), "{err}");
    }

    #[test]
    fn test_yaml_document() {
        let spec = OpenApiSpec::from_yaml(
            "components:\n  schemas:\n    Flag:\n      type: boolean\n",
        )
        .unwrap();
        assert_eq!(spec.components.schemas["Flag"].single_type(), Some("boolean"));
    }

    #[test]
    fn test_enum_literal() {
        assert_eq!(enum_literal(&serde_json::json!("in progress")), "in progress");
        assert_eq!(enum_literal(&serde_json::json!(42)), "42");
        assert_eq!(enum_literal(&serde_json::json!(true)), "true");
        assert_eq!(enum_literal(&serde_json::Value::Null), "null");
    }
}
