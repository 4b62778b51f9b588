//! Schema type definitions
//!
//! Supported types:
//! - string: UTF-8 string, optionally constrained by a format
//! - number: integer or floating point
//! - boolean
//! - date: timestamp, normalized to RFC 3339 UTC
//! - array: homogeneous array with element type
//! - object: nested object with field schema
//! - record: object with arbitrary keys and one value type
//! - union: first matching variant wins

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Compiled patterns of a schema, keyed by their source
pub type PatternSet = BTreeMap<String, Regex>;

/// Constraint applied to a string value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StringFormat {
    /// Must match a regular expression
    Pattern { pattern: String, message: String },
    /// Must be one of the listed values
    Enum { values: Vec<String> },
    /// Must parse as an absolute URL
    Url,
    /// Must start with one of the listed prefixes
    StartsWith { prefixes: Vec<String> },
}

impl StringFormat {
    /// Short description for error messages
    pub fn describe(&self) -> String {
        match self {
            StringFormat::Pattern { pattern, .. } => format!("string matching {}", pattern),
            StringFormat::Enum { values } => format!("one of [{}]", values.join(", ")),
            StringFormat::Url => "url".to_string(),
            StringFormat::StartsWith { prefixes } => {
                let quoted: Vec<String> = prefixes.iter().map(|p| format!("'{}'", p)).collect();
                format!("string starting with {}", quoted.join(" or "))
            }
        }
    }
}

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<StringFormat>,
    },
    Number,
    Boolean,
    Date,
    Array {
        element_type: Box<FieldType>,
    },
    Object {
        fields: BTreeMap<String, FieldDef>,
    },
    Record {
        value_type: Box<FieldType>,
    },
    Union {
        variants: Vec<FieldType>,
    },
}

impl FieldType {
    pub fn string() -> Self {
        FieldType::String { format: None }
    }

    pub fn pattern(pattern: &str, message: &str) -> Self {
        FieldType::String {
            format: Some(StringFormat::Pattern {
                pattern: pattern.to_string(),
                message: message.to_string(),
            }),
        }
    }

    pub fn enumeration(values: &[&str]) -> Self {
        FieldType::String {
            format: Some(StringFormat::Enum {
                values: values.iter().map(|v| v.to_string()).collect(),
            }),
        }
    }

    pub fn url() -> Self {
        FieldType::String {
            format: Some(StringFormat::Url),
        }
    }

    pub fn starts_with(prefixes: &[&str]) -> Self {
        FieldType::String {
            format: Some(StringFormat::StartsWith {
                prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
            }),
        }
    }

    pub fn array(element_type: FieldType) -> Self {
        FieldType::Array {
            element_type: Box::new(element_type),
        }
    }

    pub fn object(fields: BTreeMap<String, FieldDef>) -> Self {
        FieldType::Object { fields }
    }

    pub fn record(value_type: FieldType) -> Self {
        FieldType::Record {
            value_type: Box::new(value_type),
        }
    }

    pub fn union(variants: Vec<FieldType>) -> Self {
        FieldType::Union { variants }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> String {
        match self {
            FieldType::String { format: None } => "string".to_string(),
            FieldType::String { format: Some(format) } => format.describe(),
            FieldType::Number => "number".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Date => "date".to_string(),
            FieldType::Array { element_type } => format!("array<{}>", element_type.type_name()),
            FieldType::Object { .. } => "object".to_string(),
            FieldType::Record { value_type } => format!("record<{}>", value_type.type_name()),
            FieldType::Union { variants } => variants
                .iter()
                .map(FieldType::type_name)
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    fn check_structure(&self, path: &str, patterns: &mut PatternSet) -> Result<(), String> {
        match self {
            FieldType::String { format: Some(format) } => match format {
                StringFormat::Pattern { pattern, .. } => {
                    if !patterns.contains_key(pattern) {
                        let re = Regex::new(pattern)
                            .map_err(|e| format!("'{}': invalid pattern: {}", path, e))?;
                        patterns.insert(pattern.clone(), re);
                    }
                    Ok(())
                }
                StringFormat::Enum { values } if values.is_empty() => {
                    Err(format!("'{}': enum has no values", path))
                }
                StringFormat::StartsWith { prefixes } if prefixes.is_empty() => {
                    Err(format!("'{}': prefix list is empty", path))
                }
                _ => Ok(()),
            },
            FieldType::Array { element_type } => {
                element_type.check_structure(&format!("{}[]", path), patterns)
            }
            FieldType::Record { value_type } => {
                value_type.check_structure(&format!("{}{{}}", path), patterns)
            }
            FieldType::Object { fields } => {
                for (name, def) in fields {
                    let field_path = format!("{}.{}", path, name);
                    def.field_type.check_structure(&field_path, patterns)?;
                }
                Ok(())
            }
            FieldType::Union { variants } => {
                if variants.is_empty() {
                    return Err(format!("'{}': union has no variants", path));
                }
                variants
                    .iter()
                    .try_for_each(|v| v.check_structure(path, patterns))
            }
            _ => Ok(()),
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    #[serde(flatten)]
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDef {
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
        }
    }

    pub fn optional(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
        }
    }

    pub fn required_string() -> Self {
        Self::required(FieldType::string())
    }

    pub fn optional_string() -> Self {
        Self::optional(FieldType::string())
    }

    pub fn optional_number() -> Self {
        Self::optional(FieldType::Number)
    }

    pub fn optional_bool() -> Self {
        Self::optional(FieldType::Boolean)
    }

    pub fn optional_date() -> Self {
        Self::optional(FieldType::Date)
    }
}

/// Builds a field table from `(name, def)` pairs.
pub fn fields<const N: usize>(entries: [(&str, FieldDef); N]) -> BTreeMap<String, FieldDef> {
    entries
        .into_iter()
        .map(|(name, def)| (name.to_string(), def))
        .collect()
}

/// Field schema of one content collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Collection this schema belongs to
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: BTreeMap<String, FieldDef>,
}

impl Schema {
    pub fn new(collection: impl Into<String>, fields: BTreeMap<String, FieldDef>) -> Self {
        Self {
            collection: collection.into(),
            description: None,
            fields,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the schema structure itself (not an entry)
    pub fn validate_structure(&self) -> Result<(), String> {
        self.compile_patterns().map(|_| ())
    }

    /// Checks the structure and compiles every pattern, keyed by source.
    pub fn compile_patterns(&self) -> Result<PatternSet, String> {
        if self.collection.is_empty() {
            return Err("collection name must not be empty".into());
        }
        let mut patterns = PatternSet::new();
        for (name, def) in &self.fields {
            def.field_type.check_structure(name, &mut patterns)?;
        }
        Ok(patterns)
    }
}
