//! OpenAPI to Rust type generator.
//!
//! This module reads the `components.schemas` section of an OpenAPI document
//! and generates serde-ready Rust declarations:
//! - string enums with the original literals kept as serde renames
//! - structs with sorted, snake_cased fields and `Option` for non-required ones
//! - type aliases for arrays, primitives and shapes it cannot model
//!
//! Declarations are grouped into topic modules and re-exported from a
//! generated `mod.rs`.

mod emitter;
pub mod ir;
pub mod spec;

pub use emitter::{generate, generate_from_json};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::error::GenerateError;
    use crate::openapi::ir::types::GeneratedCode;
    use crate::openapi::spec::OpenApiSpec;

    const TEST_OPENAPI_JSON: &str = r##"{
  "openapi": "3.1.0",
  "info": { "title": "Shop API", "version": "1.0.0" },
  "paths": {},
  "components": {
    "schemas": {
      "Order": {
        "type": "object",
        "title": "Customer order",
        "required": ["orderId"],
        "properties": {
          "orderId": { "type": "string" },
          "items": { "type": "array", "items": { "$ref": "#/components/schemas/LineItem" } }
        }
      },
      "LineItem": {
        "type": "object",
        "required": ["sku", "quantity"],
        "properties": {
          "sku": { "type": "string" },
          "quantity": { "type": "integer" },
          "measure": { "$ref": "#/components/schemas/Measure" }
        }
      },
      "Measure": { "type": "string", "enum": ["kg", "pcs"] },
      "Status": { "type": "string", "enum": ["in progress", "Done!"] },
      "PaymentMeta": {
        "type": "object",
        "properties": {
          "extra": { "type": "array", "items": { "anyOf": [{ "type": "string" }, { "type": "integer" }] } },
          "paid": { "type": "boolean" }
        }
      }
    }
  }
}"##;

    fn test_config() -> GeneratorConfig {
        GeneratorConfig::default().with_exclusions(["Measure"])
    }

    fn generate_and_verify(openapi_json: &str, config: &GeneratorConfig) -> GeneratedCode {
        let result = generate_from_json(openapi_json, config);
        assert!(result.is_ok(), "Generation failed: {:?}", result.err());
        result.unwrap()
    }

    #[test]
    fn test_generate_from_openapi_json() {
        let code = generate_and_verify(TEST_OPENAPI_JSON, &test_config());

        let tags: Vec<_> = code.modules.keys().map(String::as_str).collect();
        assert_eq!(tags, ["common", "order", "payment"]);

        assert_eq!(
            code.modules["order"],
            r#"use serde::{Deserialize, Serialize};

/// Customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "items")]
    pub items: Option<Vec<crate::types::generated::LineItem>>,
    #[serde(rename = "orderId")]
    pub order_id: String,
}
"#
        );

        assert_eq!(
            code.modules["common"],
            r#"use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "measure")]
    pub measure: Option<crate::types::Measure>,
    #[serde(rename = "quantity")]
    pub quantity: i64,
    #[serde(rename = "sku")]
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "Done!")]
    Done,
}
"#
        );

        assert_eq!(
            code.manifest,
            "pub mod common;\npub use common::*;\npub mod order;\npub use order::*;\npub mod payment;\npub use payment::*;\n"
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let config = test_config();
        let first = generate_and_verify(TEST_OPENAPI_JSON, &config);
        let second = generate_and_verify(TEST_OPENAPI_JSON, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_value_import_only_where_needed() {
        let code = generate_and_verify(TEST_OPENAPI_JSON, &test_config());

        assert!(
            code.modules["payment"].starts_with(
                "use serde::{Deserialize, Serialize};\nuse serde_json::Value;\n\n"
            ),
            "payment module should import Value:\n{}",
            code.modules["payment"]
        );
        assert!(code.modules["payment"].contains("pub extra: Option<Vec<Value>>,"));
        assert!(code.modules["payment"].contains("pub paid: Option<bool>,"));
        assert!(!code.modules["order"].contains("serde_json::Value"));
        assert!(!code.modules["common"].contains("serde_json::Value"));
    }

    #[test]
    fn test_excluded_definitions_leave_no_trace() {
        let code = generate_and_verify(TEST_OPENAPI_JSON, &test_config());

        for (tag, text) in &code.modules {
            assert!(!text.contains("pub enum Measure"), "Measure generated in {tag}");
            assert!(
                !text.contains("crate::types::generated::Measure"),
                "Measure referenced as generated in {tag}"
            );
        }

        // Without the exclusion it is generated and referenced as such
        let code = generate_and_verify(TEST_OPENAPI_JSON, &GeneratorConfig::default());
        assert!(code.modules["common"].contains("pub enum Measure {"));
        assert!(code.modules["common"].contains("Option<crate::types::generated::Measure>"));
    }

    #[test]
    fn test_excluded_only_module_is_not_emitted() {
        let openapi_json = r##"{
  "components": {
    "schemas": {
      "OrderType": { "type": "string", "enum": ["a", "b"] },
      "Widget": { "type": "object", "properties": { "kind": { "$ref": "#/components/schemas/OrderType" } } }
    }
  }
}"##;
        let config = GeneratorConfig::default().with_exclusions(["OrderType"]);
        let code = generate_and_verify(openapi_json, &config);

        assert_eq!(code.modules.keys().collect::<Vec<_>>(), ["common"]);
        assert!(code.modules["common"].contains("pub kind: Option<crate::types::OrderType>,"));
        assert!(!code.manifest.contains("order"));
    }

    #[test]
    fn test_special_characters() {
        let openapi_json = r##"{
  "components": {
    "schemas": {
      "scim-user schema": {
        "type": "string",
        "enum": [
          "urn:ietf:params:scim:schemas:core:2.0:User",
          "urn:ietf:params:scim:schemas:core:2.0:user",
          "",
          "2.0"
        ]
      },
      "SpecialProps": {
        "type": "object",
        "properties": {
          "normal-prop": { "type": "string" },
          "prop.with.dots": { "type": "number" },
          "123startsWithNumber": { "type": "string" },
          "type": { "type": "string" },
          "say \"hi\"": { "type": "string" }
        }
      }
    }
  }
}"##;
        let code = generate_and_verify(openapi_json, &GeneratorConfig::default());
        let common = &code.modules["common"];

        assert!(common.contains("pub enum ScimUserSchema {"));
        assert!(common.contains(
            "    #[serde(rename = \"urn:ietf:params:scim:schemas:core:2.0:User\")]\n    UrnIetfParamsScimSchemasCore20User,"
        ));
        assert!(common.contains(
            "    #[serde(rename = \"urn:ietf:params:scim:schemas:core:2.0:user\")]\n    UrnIetfParamsScimSchemasCore20User2,"
        ));
        assert!(common.contains("    #[serde(rename = \"\")]\n    Variant,"));
        assert!(common.contains("    #[serde(rename = \"2.0\")]\n    V20,"));

        assert!(common.contains("    #[serde(rename = \"normal-prop\")]\n    pub normal_prop: Option<String>,"));
        assert!(common.contains("    #[serde(rename = \"prop.with.dots\")]\n    pub prop_with_dots: Option<f64>,"));
        assert!(common.contains(
            "    #[serde(rename = \"123startsWithNumber\")]\n    pub f_123starts_with_number: Option<String>,"
        ));
        assert!(common.contains("    #[serde(rename = \"type\")]\n    pub type_: Option<String>,"));
        assert!(common.contains("    #[serde(rename = \"say \\\"hi\\\"\")]\n    pub say_hi: Option<String>,"));
    }

    #[test]
    fn test_recursive_schema() {
        let openapi_json = r##"{
  "components": {
    "schemas": {
      "TreeNode": {
        "type": "object",
        "required": ["value"],
        "properties": {
          "value": { "type": "string" },
          "children": { "type": "array", "items": { "$ref": "#/components/schemas/TreeNode" } }
        }
      },
      "Forest": { "type": "array", "items": { "$ref": "#/components/schemas/TreeNode" } }
    }
  }
}"##;
        let code = generate_and_verify(openapi_json, &GeneratorConfig::default());
        let common = &code.modules["common"];
        assert!(common.contains("pub type Forest = Vec<crate::types::generated::TreeNode>;"));
        assert!(common.contains(
            "pub children: Option<Vec<crate::types::generated::TreeNode>>,"
        ));
    }

    #[test]
    fn test_alias_kinds() {
        let openapi_json = r##"{
  "components": {
    "schemas": {
      "Amount": { "type": "number", "title": "Amount in minor units" },
      "Anything": { "oneOf": [{ "type": "string" }, { "type": "integer" }] },
      "Merged": { "allOf": [{ "type": "object" }] },
      "Nullable": { "type": ["string", "null"] }
    }
  }
}"##;
        let code = generate_and_verify(openapi_json, &GeneratorConfig::default());
        assert_eq!(
            code.modules["common"],
            r#"use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Amount in minor units
pub type Amount = f64;

pub type Anything = Value;

pub type Merged = Value;

pub type Nullable = Value;
"#
        );
    }

    #[test]
    fn test_definition_named_like_an_import() {
        let openapi_json = r##"{
  "components": {
    "schemas": {
      "Value": { "type": "string" },
      "Blob": { "anyOf": [{ "type": "string" }, { "type": "integer" }] },
      "Holder": { "type": "object", "properties": { "v": { "$ref": "#/components/schemas/Value" } } }
    }
  }
}"##;
        let code = generate_and_verify(openapi_json, &GeneratorConfig::default());
        assert_eq!(
            code.modules["common"],
            r#"use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type Blob = Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    #[serde(rename = "v")]
    pub v: Option<crate::types::generated::Value2>,
}

pub type Value2 = String;
"#
        );
    }

    #[test]
    fn test_boolean_schemas_become_values() {
        let openapi_json = r##"{
  "components": {
    "schemas": {
      "Anything": true,
      "Holder": {
        "type": "object",
        "properties": {
          "extra": true,
          "id": { "type": "string" },
          "tags": { "type": "array", "items": true }
        },
        "required": ["id"]
      }
    }
  }
}"##;
        let code = generate_and_verify(openapi_json, &GeneratorConfig::default());
        assert_eq!(
            code.modules["common"],
            r#"use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type Anything = Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    #[serde(rename = "extra")]
    pub extra: Option<Value>,
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "tags")]
    pub tags: Option<Vec<Value>>,
}
"#
        );
    }

    #[test]
    fn test_classifier_drives_module_assignment() {
        let openapi_json = r##"{
  "components": {
    "schemas": {
      "InvoicePayment": { "type": "string" },
      "Application__Sbp__QrCode": { "type": "string" },
      "HTTPValidationError": { "type": "string" },
      "CustomerAccount": { "type": "string" }
    }
  }
}"##;
        let code = generate_and_verify(openapi_json, &GeneratorConfig::default());
        assert!(code.modules["invoice"].contains("pub type InvoicePayment = String;"));
        assert!(code.modules["sbp"].contains("pub type ApplicationSbpQrCode = String;"));
        assert!(code.modules["errors"].contains("pub type HTTPValidationError = String;"));
        assert!(code.modules["account"].contains("pub type CustomerAccount = String;"));
        assert!(!code.modules.contains_key("customer"));
    }

    #[test]
    fn test_unknown_reference_aborts_generation() {
        let openapi_json = r##"{
  "components": {
    "schemas": {
      "Good": { "type": "string" },
      "Order": { "type": "object", "properties": { "line": { "$ref": "#/components/schemas/Missing" } } }
    }
  }
}"##;
        let spec = OpenApiSpec::from_json(openapi_json).unwrap();
        let err = generate(&spec, &GeneratorConfig::default()).unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnresolvedReference {
                definition: "Order".to_string(),
                reference: "#/components/schemas/Missing".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = generate_from_json("{ not json", &GeneratorConfig::default()).unwrap_err();
        assert!(err.starts_with("Failed to parse OpenAPI spec"), "{err}");
    }

    #[test]
    fn test_empty_document() {
        let code = generate_and_verify(r#"{ "components": { "schemas": {} } }"#, &GeneratorConfig::default());
        assert!(code.modules.is_empty());
        assert_eq!(code.manifest, "");
    }
}
