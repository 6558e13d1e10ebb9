//! Event schema validation and backward-compatibility checks.
//!
//! Supports the JSON Schema keywords the event contracts use: `type`,
//! `required`, `properties`, `additionalProperties` (boolean form), `items`
//! and `enum`. Unknown keywords are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::ValidationError;
use crate::customer::Address;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonSchema {
    root: Value,
}

impl JsonSchema {
    pub fn from_value(root: Value) -> Result<Self, ValidationError> {
        if !root.is_object() {
            return Err(ValidationError::new("schema document must be a JSON object"));
        }
        Ok(Self { root })
    }

    pub fn parse(document: &str) -> Result<Self, ValidationError> {
        let root = serde_json::from_str(document)
            .map_err(|error| ValidationError::new(format!("invalid schema document: {error}")))?;
        Self::from_value(root)
    }

    pub fn validate(&self, instance: &Value) -> Vec<SchemaViolation> {
        let mut violations = Vec::new();
        validate_node(&self.root, instance, "$", &mut violations);
        violations
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_empty()
    }
}

fn validate_node(schema: &Value, instance: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
    if let Some(expected) = schema.get("type") {
        if !type_matches(expected, instance) {
            out.push(SchemaViolation {
                path: path.to_string(),
                message: format!("expected type {expected}, found {}", type_name(instance)),
            });
            return;
        }
    }

    if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
        if !allowed.contains(instance) {
            out.push(SchemaViolation {
                path: path.to_string(),
                message: format!("value {instance} is not one of the allowed values"),
            });
        }
    }

    if let Some(object) = instance.as_object() {
        if let Some(required) = schema.get("required").and_then(Value::as_array) {
            for name in required.iter().filter_map(Value::as_str) {
                if !object.contains_key(name) {
                    out.push(SchemaViolation {
                        path: path.to_string(),
                        message: format!("required property '{name}' is missing"),
                    });
                }
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        for (name, value) in object {
            let child_path = format!("{path}.{name}");
            match properties.and_then(|props| props.get(name)) {
                Some(child_schema) => validate_node(child_schema, value, &child_path, out),
                None => {
                    if schema.get("additionalProperties") == Some(&Value::Bool(false)) {
                        out.push(SchemaViolation {
                            path: child_path,
                            message: format!("additional property '{name}' is not allowed"),
                        });
                    }
                }
            }
        }
    }

    if let (Some(items), Some(elements)) = (schema.get("items"), instance.as_array()) {
        for (index, element) in elements.iter().enumerate() {
            validate_node(items, element, &format!("{path}[{index}]"), out);
        }
    }
}

fn type_matches(expected: &Value, instance: &Value) -> bool {
    match expected {
        Value::String(name) => single_type_matches(name, instance),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| single_type_matches(name, instance)),
        _ => true,
    }
}

fn single_type_matches(name: &str, instance: &Value) -> bool {
    match name {
        "object" => instance.is_object(),
        "array" => instance.is_array(),
        "string" => instance.is_string(),
        "boolean" => instance.is_boolean(),
        "null" => instance.is_null(),
        "number" => instance.is_number(),
        "integer" => instance.is_i64() || instance.is_u64(),
        _ => true,
    }
}

fn type_name(instance: &Value) -> &'static str {
    match instance {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Published versions of the CustomerCreated event schema.
pub struct CustomerCreatedSchemas;

impl CustomerCreatedSchemas {
    pub const VERSIONS: [&'static str; 5] = ["1.0.0", "1.1.0", "1.2.0", "1.3.0", "1.4.0"];

    pub fn document(version: &str) -> Option<&'static str> {
        match version {
            "1.0.0" => Some(include_str!("../schemas/customerCreated-v1.0.0.json")),
            "1.1.0" => Some(include_str!("../schemas/customerCreated-v1.1.0.json")),
            "1.2.0" => Some(include_str!("../schemas/customerCreated-v1.2.0.json")),
            "1.3.0" => Some(include_str!("../schemas/customerCreated-v1.3.0.json")),
            "1.4.0" => Some(include_str!("../schemas/customerCreated-v1.4.0.json")),
            _ => None,
        }
    }

    pub fn load(version: &str) -> Result<JsonSchema, ValidationError> {
        let document = Self::document(version).ok_or_else(|| {
            ValidationError::new(format!("unknown CustomerCreated schema version {version}"))
        })?;
        JsonSchema::parse(document)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompatibilityReport {
    /// Violations of the schema version the sample was produced for.
    pub own_schema_violations: Vec<SchemaViolation>,
    /// Violations of the schema existing consumers were built against.
    pub origin_schema_violations: Vec<SchemaViolation>,
}

impl CompatibilityReport {
    pub fn conforms_to_own_schema(&self) -> bool {
        self.own_schema_violations.is_empty()
    }

    pub fn is_backward_compatible(&self) -> bool {
        self.conforms_to_own_schema() && self.origin_schema_violations.is_empty()
    }
}

pub fn check_compatibility(
    origin: &JsonSchema,
    updated: &JsonSchema,
    sample: &Value,
) -> CompatibilityReport {
    CompatibilityReport {
        own_schema_violations: updated.validate(sample),
        origin_schema_violations: origin.validate(sample),
    }
}

/// Business rule consumers apply on top of the schema: the address must
/// carry street, city, state and zip.
pub fn is_valid_address(event: &Value) -> bool {
    event
        .get("address")
        .filter(|address| address.is_object())
        .and_then(|address| serde_json::from_value::<Address>(address.clone()).ok())
        .map(|address| address.is_complete())
        .unwrap_or(false)
}
