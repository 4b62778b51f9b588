//! Schema error types
//!
//! Error codes:
//! - CONTENT_TYPE_MISMATCH (type)
//! - CONTENT_FORMAT_INVALID (format)
//! - CONTENT_CONSISTENCY_VIOLATED (consistency)
//! - CONTENT_UNKNOWN_COLLECTION (registry)
//! - CONTENT_COLLECTION_EXISTS (registry)
//! - CONTENT_MALFORMED_SCHEMA (registry)

use std::fmt;

use thiserror::Error;

/// Broad category of a schema error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Value does not match its declared type or enumerated set
    Type,
    /// String value fails its pattern, URL, prefix or date format
    Format,
    /// A cross-field rule is violated
    Consistency,
    /// Registry lookup or registration failure
    Registry,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Type => write!(f, "type"),
            ErrorKind::Format => write!(f, "format"),
            ErrorKind::Consistency => write!(f, "consistency"),
            ErrorKind::Registry => write!(f, "registry"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Wrong primitive type, enum value, missing required field or null
    ContentTypeMismatch,
    /// String fails its format constraint
    ContentFormatInvalid,
    /// Cross-field rule violated
    ContentConsistencyViolated,
    /// Collection name not registered
    ContentUnknownCollection,
    /// Collection name registered twice
    ContentCollectionExists,
    /// Schema definition itself is broken
    ContentMalformedSchema,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ContentTypeMismatch => "CONTENT_TYPE_MISMATCH",
            SchemaErrorCode::ContentFormatInvalid => "CONTENT_FORMAT_INVALID",
            SchemaErrorCode::ContentConsistencyViolated => "CONTENT_CONSISTENCY_VIOLATED",
            SchemaErrorCode::ContentUnknownCollection => "CONTENT_UNKNOWN_COLLECTION",
            SchemaErrorCode::ContentCollectionExists => "CONTENT_COLLECTION_EXISTS",
            SchemaErrorCode::ContentMalformedSchema => "CONTENT_MALFORMED_SCHEMA",
        }
    }

    /// Returns the error category for this code
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaErrorCode::ContentTypeMismatch => ErrorKind::Type,
            SchemaErrorCode::ContentFormatInvalid => ErrorKind::Format,
            SchemaErrorCode::ContentConsistencyViolated => ErrorKind::Consistency,
            SchemaErrorCode::ContentUnknownCollection
            | SchemaErrorCode::ContentCollectionExists
            | SchemaErrorCode::ContentMalformedSchema => ErrorKind::Registry,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "locations[0].city")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Schema error with full context
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    collection: Option<String>,
    details: Option<ValidationDetails>,
}

impl SchemaError {
    /// Field value has the wrong type (or is not in its enumerated set)
    pub fn type_mismatch(collection: impl Into<String>, details: ValidationDetails) -> Self {
        Self {
            code: SchemaErrorCode::ContentTypeMismatch,
            message: format!("{}", details),
            collection: Some(collection.into()),
            details: Some(details),
        }
    }

    /// String field fails its format constraint
    pub fn format_invalid(
        collection: impl Into<String>,
        details: ValidationDetails,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: SchemaErrorCode::ContentFormatInvalid,
            message: message.into(),
            collection: Some(collection.into()),
            details: Some(details),
        }
    }

    /// Cross-field rule violated
    pub fn consistency(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::ContentConsistencyViolated,
            message: message.into(),
            collection: Some(collection.into()),
            details: None,
        }
    }

    pub fn unknown_collection(collection: impl Into<String>) -> Self {
        let name = collection.into();
        Self {
            code: SchemaErrorCode::ContentUnknownCollection,
            message: format!("Collection '{}' is not registered", name),
            collection: Some(name),
            details: None,
        }
    }

    pub fn collection_exists(collection: impl Into<String>) -> Self {
        let name = collection.into();
        Self {
            code: SchemaErrorCode::ContentCollectionExists,
            message: format!("Collection '{}' is already registered", name),
            collection: Some(name),
            details: None,
        }
    }

    pub fn malformed_schema(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        let name = collection.into();
        Self {
            code: SchemaErrorCode::ContentMalformedSchema,
            message: format!("Malformed schema for '{}': {}", name, reason.into()),
            collection: Some(name),
            details: None,
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
