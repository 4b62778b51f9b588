//! content-schema - Strict, deterministic schema validation for static-site
//! content collections
//!
//! ```
//! use content_schema::schema::CollectionRegistry;
//! use serde_json::json;
//!
//! let registry = CollectionRegistry::builtin().unwrap();
//! let entry = registry.validate("docs", &json!({ "title": "Usage" }));
//! assert!(entry.is_ok());
//! ```

pub mod cli;
pub mod collections;
pub mod content;
pub mod schema;
