//! Schema registry subsystem
//!
//! Every content entry is validated exactly once, at build time, against
//! the schema of the collection it belongs to.
//!
//! # Design Principles
//!
//! - Field checks first, cross-field rules second
//! - All-or-nothing: the first violation rejects the entry
//! - No coercion, no nulls
//! - Deterministic validation, no shared mutable state

mod errors;
mod registry;
mod types;
mod validator;

pub use errors::{ErrorKind, SchemaError, SchemaErrorCode, SchemaResult, ValidationDetails};
pub use registry::{CollectionRegistry, ContentCollection, EntryRules, PassThrough, TypedCollection};
pub use types::{fields, FieldDef, FieldType, Schema, StringFormat};
pub use validator::{parse_date, SchemaValidator};
