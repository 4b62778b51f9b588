//! CLI command implementations
//!
//! Commands build the built-in registry, do their work and write a single
//! JSON response. A failed check is reported on stdout and also returned
//! as an error so the process exits non-zero.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::content::{check_content, read_entry, ContentLoader};
use crate::schema::{CollectionRegistry, SchemaError};

use super::args::Command;
use super::config::ContentConfig;
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{write_error, write_response};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Check {
            config,
            content_dir,
            fail_fast,
        } => check(config.as_deref(), content_dir, fail_fast),
        Command::Validate { collection, file } => validate(&collection, &file),
        Command::Schema { collection } => schema(collection.as_deref()),
    }
}

/// Validate every entry under the configured content directory.
pub fn check(
    config_path: Option<&Path>,
    content_dir: Option<PathBuf>,
    fail_fast: bool,
) -> CliResult<()> {
    let mut config = ContentConfig::load_or_default(config_path)?;
    if let Some(dir) = content_dir {
        config.content_dir = dir;
    }
    config.fail_fast |= fail_fast;

    info!(content_dir = %config.content_dir.display(), "checking content");

    let registry = builtin_registry()?;
    let loader = ContentLoader::new(&config.content_dir, config.extensions.clone());
    let report = check_content(&registry, &loader, config.fail_fast)?;

    let data = serde_json::to_value(&report)?;
    if report.is_success() {
        return write_response(data);
    }

    let message = format!(
        "{} of {} entries failed validation",
        report.failures.len(),
        report.checked
    );
    write_error(CliErrorCode::ValidationFailed.code(), &message, Some(data))?;
    Err(CliError::validation_failed(message))
}

/// Validate one file against a named collection.
pub fn validate(collection: &str, file: &Path) -> CliResult<()> {
    let registry = builtin_registry()?;
    let raw = read_entry(file)?;

    match registry.validate(collection, &raw) {
        Ok(entry) => write_response(entry.to_value()),
        Err(e) => {
            write_error(e.code().code(), e.message(), details_value(&e))?;
            Err(e.into())
        }
    }
}

/// Print the registry export, or a single collection's schema.
pub fn schema(collection: Option<&str>) -> CliResult<()> {
    let registry = builtin_registry()?;

    match collection {
        None => write_response(registry.export()),
        Some(name) => {
            let entry = registry
                .get(name)
                .ok_or_else(|| SchemaError::unknown_collection(name))?;
            let schema = match entry.schema() {
                Some(schema) => serde_json::to_value(schema)?,
                None => serde_json::Value::Null,
            };
            write_response(schema)
        }
    }
}

fn builtin_registry() -> CliResult<CollectionRegistry> {
    CollectionRegistry::builtin()
        .map_err(|e| CliError::new(CliErrorCode::RegistryError, e.to_string()))
}

fn details_value(err: &SchemaError) -> Option<serde_json::Value> {
    err.details().map(|d| {
        serde_json::json!({
            "field": d.field,
            "expected": d.expected,
            "actual": d.actual,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_command_accepts_valid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("about.md");
        fs::write(&path, "---\ntitle: About\ndescription: Who we are\n---\n").unwrap();

        assert!(validate("about", &path).is_ok());
    }

    #[test]
    fn test_validate_command_rejects_invalid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.md");
        fs::write(
            &path,
            "---\ntitle: P\ncategory: tooling\nleaders:\n  a:\n    name: A\ncolor: red\n---\n",
        )
        .unwrap();

        let err = validate("hackathon-projects", &path).unwrap_err();
        assert_eq!(err.code_str(), "CONTENT_CLI_VALIDATION_FAILED");
        assert!(err.message().contains("CONTENT_FORMAT_INVALID"));
    }

    #[test]
    fn test_check_command_fails_on_invalid_content() {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("a.md"), "---\nweight: 1\n---\n").unwrap();

        let err = check(None, Some(tmp.path().to_path_buf()), false).unwrap_err();
        assert_eq!(err.code_str(), "CONTENT_CLI_VALIDATION_FAILED");
    }

    #[test]
    fn test_builtin_registry_builds() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_schema_command_unknown_collection() {
        assert!(schema(Some("recipes")).is_err());
        assert!(schema(Some("pipelines")).is_ok());
    }
}
