//! Collection registry
//!
//! Maps collection names to validators. A collection is either typed
//! (field schema, cross-field rules, normalization) or pass-through.
//! The registry is immutable once built and shared freely across threads.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::Schema;
use super::validator::SchemaValidator;
use crate::collections::{self, ValidEntry};

/// A named collection the content pipeline can validate entries against.
pub trait ContentCollection: Send + Sync {
    /// Collection name as used for the content directory
    fn name(&self) -> &str;

    /// Field schema, `None` for collections that accept any content
    fn schema(&self) -> Option<&Schema>;

    /// Validates one raw entry.
    fn validate(&self, raw: &Value) -> SchemaResult<ValidEntry>;
}

/// Rules of a typed entry, applied after field-level validation.
pub trait EntryRules: Serialize + DeserializeOwned + Sized {
    const COLLECTION: &'static str;

    fn schema() -> Schema;

    /// Cross-field rules and derived fields.
    fn refine(self) -> SchemaResult<Self> {
        Ok(self)
    }

    /// Output transform applied once the entry is known to be valid.
    fn normalize(self) -> Self {
        self
    }

    fn into_entry(self) -> ValidEntry;
}

/// Collection backed by a typed entry.
pub struct TypedCollection<E> {
    validator: SchemaValidator,
    _entry: PhantomData<fn() -> E>,
}

impl<E: EntryRules> TypedCollection<E> {
    /// Compiles the entry's schema.
    pub fn new() -> SchemaResult<Self> {
        Ok(Self {
            validator: SchemaValidator::new(E::schema())?,
            _entry: PhantomData,
        })
    }
}

impl<E: EntryRules> ContentCollection for TypedCollection<E> {
    fn name(&self) -> &str {
        E::COLLECTION
    }

    fn schema(&self) -> Option<&Schema> {
        Some(self.validator.schema())
    }

    fn validate(&self, raw: &Value) -> SchemaResult<ValidEntry> {
        let normalized = self.validator.validate(raw)?;

        let entry: E = serde_json::from_value(normalized).map_err(|e| {
            SchemaError::type_mismatch(
                E::COLLECTION,
                ValidationDetails::new("$root", "typed entry", e.to_string()),
            )
        })?;

        Ok(entry.refine()?.normalize().into_entry())
    }
}

/// Collection without a schema; entries are accepted unchanged.
pub struct PassThrough {
    name: String,
}

impl PassThrough {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ContentCollection for PassThrough {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Option<&Schema> {
        None
    }

    fn validate(&self, raw: &Value) -> SchemaResult<ValidEntry> {
        Ok(ValidEntry::Unvalidated(raw.clone()))
    }
}

/// Registry of content collections, keyed by name.
#[derive(Default)]
pub struct CollectionRegistry {
    collections: BTreeMap<String, Box<dyn ContentCollection>>,
}

impl CollectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in collection.
    pub fn builtin() -> SchemaResult<Self> {
        Self::with_collections(collections::builtin()?)
    }

    /// Creates a registry from a set of collections; any failed registration fails the whole.
    pub fn with_collections(
        collections: impl IntoIterator<Item = Box<dyn ContentCollection>>,
    ) -> SchemaResult<Self> {
        let mut registry = Self::new();
        for collection in collections {
            let name = collection.name().to_string();
            registry.register_boxed(collection).map_err(|e| {
                error!(collection = %name, error = %e, "collection registration failed");
                e
            })?;
        }
        Ok(registry)
    }

    /// Registers a collection.
    ///
    /// # Errors
    ///
    /// - CONTENT_COLLECTION_EXISTS if the name is taken
    /// - CONTENT_MALFORMED_SCHEMA if the schema structure is invalid
    pub fn register(&mut self, collection: impl ContentCollection + 'static) -> SchemaResult<()> {
        self.register_boxed(Box::new(collection))
    }

    pub fn register_boxed(&mut self, collection: Box<dyn ContentCollection>) -> SchemaResult<()> {
        let name = collection.name().to_string();

        if self.collections.contains_key(&name) {
            return Err(SchemaError::collection_exists(name));
        }
        if let Some(schema) = collection.schema() {
            schema
                .validate_structure()
                .map_err(|e| SchemaError::malformed_schema(&name, e))?;
        }

        self.collections.insert(name, collection);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn ContentCollection> {
        self.collections.get(name).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Validates a raw entry against the named collection.
    pub fn validate(&self, collection: &str, raw: &Value) -> SchemaResult<ValidEntry> {
        let validator = self
            .get(collection)
            .ok_or_else(|| SchemaError::unknown_collection(collection))?;

        let result = validator.validate(raw);
        match &result {
            Ok(_) => debug!(collection, "entry valid"),
            Err(e) => debug!(collection, code = e.code().code(), "entry rejected"),
        }
        result
    }

    /// Exports the registry as `{ name: schema | null }`.
    pub fn export(&self) -> Value {
        let map = self
            .collections
            .iter()
            .map(|(name, collection)| {
                let schema = collection
                    .schema()
                    .and_then(|s| serde_json::to_value(s).ok())
                    .unwrap_or(Value::Null);
                (name.clone(), schema)
            })
            .collect();
        Value::Object(map)
    }
}
