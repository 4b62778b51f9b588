//! Whole-site content check
//!
//! Validates every discovered entry against the registry and collects the
//! outcome per entry. Directories naming no registered collection are
//! skipped with a warning.

use serde::Serialize;
use tracing::{info, warn};

use super::errors::{ContentError, ContentResult};
use super::loader::{ContentFile, ContentLoader};
use crate::schema::CollectionRegistry;

/// Outcome of validating one entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryFailure {
    pub collection: String,
    pub id: String,
    pub path: String,
    pub code: String,
    pub message: String,
}

/// Summary of a content check
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub checked: usize,
    pub valid: usize,
    /// Collections found on disk without a registered schema
    pub skipped_collections: Vec<String>,
    pub failures: Vec<EntryFailure>,
}

impl CheckReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validates every entry under the loader's root.
///
/// With `fail_fast` the check stops at the first failing entry.
pub fn check_content(
    registry: &CollectionRegistry,
    loader: &ContentLoader,
    fail_fast: bool,
) -> ContentResult<CheckReport> {
    let mut report = CheckReport::default();

    for file in loader.discover()? {
        if !registry.contains(&file.collection) {
            if !report.skipped_collections.contains(&file.collection) {
                warn!(collection = %file.collection, "no schema registered for content directory");
                report.skipped_collections.push(file.collection.clone());
            }
            continue;
        }

        report.checked += 1;
        match check_file(registry, &file) {
            Ok(()) => report.valid += 1,
            Err(e) => {
                warn!(collection = %file.collection, entry = %file.id, code = e.code(), "{}", e);
                report.failures.push(EntryFailure {
                    collection: file.collection.clone(),
                    id: file.id.clone(),
                    path: file.path.display().to_string(),
                    code: e.code().to_string(),
                    message: failure_message(&e),
                });
                if fail_fast {
                    break;
                }
            }
        }
    }

    info!(
        checked = report.checked,
        valid = report.valid,
        failed = report.failures.len(),
        "content check complete"
    );
    Ok(report)
}

fn check_file(registry: &CollectionRegistry, file: &ContentFile) -> ContentResult<()> {
    let raw = file.read_entry()?;
    registry
        .validate(&file.collection, &raw)
        .map(|_| ())
        .map_err(|source| ContentError::Validation {
            path: file.path.clone(),
            source,
        })
}

fn failure_message(err: &ContentError) -> String {
    match err {
        ContentError::Validation { source, .. } => source.message().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn run(root: &Path, fail_fast: bool) -> CheckReport {
        let registry = CollectionRegistry::builtin().unwrap();
        let loader = ContentLoader::new(root, vec!["md".into()]);
        check_content(&registry, &loader, fail_fast).unwrap()
    }

    #[test]
    fn test_report_counts() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/a.md", "---\ntitle: A\n---\n");
        write(tmp.path(), "docs/b.md", "---\nsubtitle: no title\n---\n");
        write(tmp.path(), "pipelines/rnaseq.md", "anything");
        write(tmp.path(), "recipes/soup.md", "---\ntitle: Soup\n---\n");

        let report = run(tmp.path(), false);
        assert_eq!(report.checked, 3);
        assert_eq!(report.valid, 2);
        assert_eq!(report.skipped_collections, vec!["recipes"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, "b");
        assert_eq!(report.failures[0].code, "CONTENT_TYPE_MISMATCH");
        assert!(!report.is_success());
    }

    #[test]
    fn test_fail_fast_stops_early() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/a.md", "---\nweight: 1\n---\n");
        write(tmp.path(), "docs/b.md", "---\nweight: 2\n---\n");

        let report = run(tmp.path(), true);
        assert_eq!(report.checked, 1);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_front_matter_errors_are_reported() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/broken.md", "---\ntitle: open\n");

        let report = run(tmp.path(), false);
        assert_eq!(report.failures[0].code, "CONTENT_FRONT_MATTER_INVALID");
    }
}
