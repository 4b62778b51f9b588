//! Field-level validation of raw entries
//!
//! Validation semantics:
//! - All required fields are present
//! - Undeclared fields are stripped from the output
//! - Field types match exactly (no coercion between strings and numbers)
//! - Null values are rejected; optional means absent
//! - Dates are normalized to RFC 3339 UTC
//!
//! The first violation aborts validation; there is no partial result.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::errors::{ErrorKind, SchemaError, SchemaResult, ValidationDetails};
use super::types::{FieldDef, FieldType, PatternSet, Schema, StringFormat};

/// Validates raw entries against one collection schema.
///
/// Validator does not mutate its input; it returns a normalized copy.
/// Validation is deterministic. Patterns are compiled once, on construction.
pub struct SchemaValidator {
    schema: Schema,
    patterns: PatternSet,
}

impl SchemaValidator {
    /// Compiles a schema into a validator.
    ///
    /// # Errors
    ///
    /// CONTENT_MALFORMED_SCHEMA if the schema structure is invalid or a
    /// pattern does not compile.
    pub fn new(schema: Schema) -> SchemaResult<Self> {
        let patterns = schema
            .compile_patterns()
            .map_err(|e| SchemaError::malformed_schema(&schema.collection, e))?;
        Ok(Self { schema, patterns })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates an entry and returns its normalized form.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` with code:
    /// - CONTENT_TYPE_MISMATCH if a field is missing, null or of the wrong type
    /// - CONTENT_FORMAT_INVALID if a string fails its format constraint
    pub fn validate(&self, entry: &Value) -> SchemaResult<Value> {
        let obj = entry
            .as_object()
            .ok_or_else(|| self.type_error("$root", "object", entry))?;

        let normalized = self.validate_object(obj, &self.schema.fields, "")?;
        Ok(Value::Object(normalized))
    }

    fn validate_object(
        &self,
        obj: &Map<String, Value>,
        fields: &BTreeMap<String, FieldDef>,
        path_prefix: &str,
    ) -> SchemaResult<Map<String, Value>> {
        let mut out = Map::new();

        for (field_name, field_def) in fields {
            let field_path = make_path(path_prefix, field_name);

            match obj.get(field_name) {
                Some(Value::Null) => {
                    return Err(SchemaError::type_mismatch(
                        &self.schema.collection,
                        ValidationDetails::null_value(field_path),
                    ));
                }
                Some(value) => {
                    let normalized =
                        self.validate_value(value, &field_def.field_type, &field_path)?;
                    out.insert(field_name.clone(), normalized);
                }
                None if field_def.required => {
                    return Err(SchemaError::type_mismatch(
                        &self.schema.collection,
                        ValidationDetails::missing_field(field_path),
                    ));
                }
                None => {}
            }
        }

        Ok(out)
    }

    fn validate_value(
        &self,
        value: &Value,
        expected: &FieldType,
        field_path: &str,
    ) -> SchemaResult<Value> {
        match expected {
            FieldType::String { format } => {
                let s = value
                    .as_str()
                    .ok_or_else(|| self.type_error(field_path, "string", value))?;
                if let Some(format) = format {
                    self.check_format(s, format, field_path)?;
                }
                Ok(value.clone())
            }
            FieldType::Number => {
                if !value.is_number() {
                    return Err(self.type_error(field_path, "number", value));
                }
                Ok(value.clone())
            }
            FieldType::Boolean => {
                if !value.is_boolean() {
                    return Err(self.type_error(field_path, "boolean", value));
                }
                Ok(value.clone())
            }
            FieldType::Date => {
                let s = value
                    .as_str()
                    .ok_or_else(|| self.type_error(field_path, "date", value))?;
                let parsed = parse_date(s).ok_or_else(|| {
                    SchemaError::format_invalid(
                        &self.schema.collection,
                        ValidationDetails::new(field_path, "date", format!("'{}'", s)),
                        format!("{} must be a valid date", field_path),
                    )
                })?;
                Ok(Value::String(parsed.to_rfc3339_opts(SecondsFormat::Secs, true)))
            }
            FieldType::Array { element_type } => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| self.type_error(field_path, &expected.type_name(), value))?;

                let mut out = Vec::with_capacity(arr.len());
                for (i, elem) in arr.iter().enumerate() {
                    let elem_path = format!("{}[{}]", field_path, i);
                    if elem.is_null() {
                        return Err(SchemaError::type_mismatch(
                            &self.schema.collection,
                            ValidationDetails::null_value(elem_path),
                        ));
                    }
                    out.push(self.validate_value(elem, element_type, &elem_path)?);
                }
                Ok(Value::Array(out))
            }
            FieldType::Object { fields } => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| self.type_error(field_path, "object", value))?;
                Ok(Value::Object(self.validate_object(obj, fields, field_path)?))
            }
            FieldType::Record { value_type } => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| self.type_error(field_path, &expected.type_name(), value))?;

                let mut out = Map::new();
                for (key, item) in obj {
                    let item_path = make_path(field_path, key);
                    if item.is_null() {
                        return Err(SchemaError::type_mismatch(
                            &self.schema.collection,
                            ValidationDetails::null_value(item_path),
                        ));
                    }
                    out.insert(key.clone(), self.validate_value(item, value_type, &item_path)?);
                }
                Ok(Value::Object(out))
            }
            FieldType::Union { variants } => {
                let mut format_failure = None;
                for variant in variants {
                    match self.validate_value(value, variant, field_path) {
                        Ok(normalized) => return Ok(normalized),
                        Err(e) if e.kind() == ErrorKind::Format && format_failure.is_none() => {
                            format_failure = Some(e);
                        }
                        Err(_) => {}
                    }
                }
                // A variant of the right shape but wrong format is the more useful report.
                Err(format_failure
                    .unwrap_or_else(|| self.type_error(field_path, &expected.type_name(), value)))
            }
        }
    }

    fn check_format(&self, s: &str, format: &StringFormat, field_path: &str) -> SchemaResult<()> {
        let ok = match format {
            StringFormat::Pattern { pattern, .. } => {
                self.patterns.get(pattern).is_some_and(|re| re.is_match(s))
            }
            StringFormat::Enum { values } => {
                if !values.iter().any(|v| v == s) {
                    return Err(SchemaError::type_mismatch(
                        &self.schema.collection,
                        ValidationDetails::new(field_path, format.describe(), format!("'{}'", s)),
                    ));
                }
                true
            }
            StringFormat::Url => url::Url::parse(s).is_ok(),
            StringFormat::StartsWith { prefixes } => {
                prefixes.iter().any(|p| s.starts_with(p.as_str()))
            }
        };

        if ok {
            return Ok(());
        }

        let message = match format {
            StringFormat::Pattern { message, .. } => message.clone(),
            other => format!("{} must be a {}", field_path, other.describe()),
        };
        Err(SchemaError::format_invalid(
            &self.schema.collection,
            ValidationDetails::new(field_path, format.describe(), format!("'{}'", s)),
            message,
        ))
    }

    fn type_error(&self, field_path: &str, expected: &str, actual: &Value) -> SchemaError {
        SchemaError::type_mismatch(
            &self.schema.collection,
            ValidationDetails::type_mismatch(field_path, expected, json_type_name(actual)),
        )
    }
}

/// Parses the date shapes front matter produces.
///
/// Accepts RFC 3339, `YYYY-MM-DD` (midnight UTC) and `YYYY-MM-DD HH:MM[:SS]` (UTC).
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}
