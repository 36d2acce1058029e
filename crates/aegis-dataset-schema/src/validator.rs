// crates/aegis-dataset-schema/src/validator.rs
// ============================================================================
// Module: Schema Validator
// Description: Structural validation of JSON values against parsed schemas.
// Purpose: Gate generated sensor readings and tool-call arguments.
// Dependencies: serde_json, crate::schema, crate::error
// ============================================================================

//! ## Overview
//! [`validate`] walks a value and a [`Schema`] together and reports the first
//! violation with a path locator. Object properties are visited in the
//! value's key order; array elements report their index as `path[i]`.
//!
//! Keys outside the declared properties are skipped when the schema allows
//! them: they are permitted to exist but are never validated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::error::SchemaError;
use crate::error::SchemaViolation;
use crate::schema::AdditionalProperties;
use crate::schema::ArraySchema;
use crate::schema::NumberSchema;
use crate::schema::ObjectSchema;
use crate::schema::Schema;
use crate::schema::StringSchema;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates `value` against `schema`, using `path` as the error locator root.
///
/// # Errors
///
/// Returns [`SchemaError`] for the first violation found.
pub fn validate(value: &Value, schema: &Schema, path: &str) -> Result<(), SchemaError> {
    match schema {
        Schema::Object(object) => validate_object(value, object, path),
        Schema::Array(array) => validate_array(value, array, path),
        Schema::String(string) => validate_string(value, string, path),
        Schema::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(type_error(path, schema))
            }
        }
        Schema::Number(number) => validate_number(value, *number, schema, path),
    }
}

/// Validates an object value.
fn validate_object(value: &Value, schema: &ObjectSchema, path: &str) -> Result<(), SchemaError> {
    let Some(map) = value.as_object() else {
        return Err(SchemaError::new(
            path,
            SchemaViolation::ExpectedType {
                expected: "OBJECT",
            },
        ));
    };

    if let Some(key) = schema.required.iter().find(|key| !map.contains_key(key.as_str())) {
        return Err(SchemaError::new(
            path,
            SchemaViolation::MissingRequired {
                key: key.clone(),
            },
        ));
    }

    if schema.additional == AdditionalProperties::Reject {
        let extra = unlisted_keys(map, schema);
        if !extra.is_empty() {
            return Err(SchemaError::new(
                path,
                SchemaViolation::UnexpectedKeys {
                    keys: extra,
                },
            ));
        }
    }

    for (key, child) in map {
        let Some(child_schema) = schema.properties.get(key) else {
            continue;
        };
        validate(child, child_schema, &format!("{path}.{key}"))?;
    }
    Ok(())
}

/// Collects keys not declared in the object's properties, in value order.
fn unlisted_keys(map: &Map<String, Value>, schema: &ObjectSchema) -> Vec<String> {
    map.keys().filter(|key| !schema.properties.contains_key(key.as_str())).cloned().collect()
}

/// Validates an array value.
fn validate_array(value: &Value, schema: &ArraySchema, path: &str) -> Result<(), SchemaError> {
    let Some(items) = value.as_array() else {
        return Err(SchemaError::new(
            path,
            SchemaViolation::ExpectedType {
                expected: "ARRAY",
            },
        ));
    };
    if let Some(item_schema) = &schema.items {
        for (index, item) in items.iter().enumerate() {
            validate(item, item_schema, &format!("{path}[{index}]"))?;
        }
    }
    Ok(())
}

/// Validates a string value.
fn validate_string(value: &Value, schema: &StringSchema, path: &str) -> Result<(), SchemaError> {
    let Some(text) = value.as_str() else {
        return Err(SchemaError::new(
            path,
            SchemaViolation::ExpectedType {
                expected: "STRING",
            },
        ));
    };
    if let Some(allowed) = &schema.allowed
        && !allowed.iter().any(|candidate| candidate == text)
    {
        return Err(SchemaError::new(
            path,
            SchemaViolation::NotInEnum {
                value: text.to_string(),
                allowed: allowed.clone(),
            },
        ));
    }
    if let Some(pattern) = &schema.pattern
        && !pattern.matches_start(text)
    {
        return Err(SchemaError::new(
            path,
            SchemaViolation::PatternMismatch {
                value: text.to_string(),
                pattern: pattern.as_str().to_string(),
            },
        ));
    }
    Ok(())
}

/// Validates an integer or floating-point value.
fn validate_number(
    value: &Value,
    number: NumberSchema,
    schema: &Schema,
    path: &str,
) -> Result<(), SchemaError> {
    let is_number = if number.integer { value.is_i64() || value.is_u64() } else { value.is_number() };
    let Some(actual) = value.as_f64().filter(|_| is_number) else {
        return Err(type_error(path, schema));
    };
    if let Some(minimum) = number.minimum
        && actual < minimum
    {
        return Err(SchemaError::new(
            path,
            SchemaViolation::BelowMinimum {
                value: actual,
                minimum,
            },
        ));
    }
    if let Some(maximum) = number.maximum
        && actual > maximum
    {
        return Err(SchemaError::new(
            path,
            SchemaViolation::AboveMaximum {
                value: actual,
                maximum,
            },
        ));
    }
    Ok(())
}

/// Builds a type mismatch error naming the schema's type tag.
fn type_error(path: &str, schema: &Schema) -> SchemaError {
    SchemaError::new(
        path,
        SchemaViolation::ExpectedType {
            expected: schema.type_tag(),
        },
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        reason = "Test-only assertions are permitted."
    )]

    use serde_json::json;

    use super::validate;
    use crate::error::SchemaViolation;
    use crate::schema::Schema;

    fn schema(value: &serde_json::Value) -> Schema {
        Schema::from_value(value).expect("schema parses")
    }

    #[test]
    fn unlisted_keys_are_skipped_when_allowed() {
        let schema = schema(&json!({
            "type": "OBJECT",
            "properties": { "a": { "type": "BOOLEAN" } }
        }));
        validate(&json!({ "a": true, "b": "anything" }), &schema, "root").expect("valid");
    }

    #[test]
    fn integer_rejects_float_encoding() {
        let schema = schema(&json!({ "type": "INTEGER" }));
        let err = validate(&json!(1.0), &schema, "n").expect_err("float is not integer");
        assert_eq!(
            err.violation,
            SchemaViolation::ExpectedType {
                expected: "INTEGER"
            }
        );
        validate(&json!(1), &schema, "n").expect("integer");
    }

    #[test]
    fn boolean_is_never_a_number() {
        let schema = schema(&json!({ "type": "NUMBER" }));
        assert!(validate(&json!(true), &schema, "n").is_err());
    }
}
