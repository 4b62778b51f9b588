//! Content discovery
//!
//! Layout: `<root>/<collection>/**/<entry>.<ext>`. The entry id is the path
//! below the collection directory without its extension.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use super::errors::{ContentError, ContentResult};
use super::frontmatter::parse_front_matter;

/// One content file found under the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    pub collection: String,
    pub id: String,
    pub path: PathBuf,
}

impl ContentFile {
    /// Reads the file and parses its front matter.
    pub fn read_entry(&self) -> ContentResult<Value> {
        read_entry(&self.path)
    }
}

/// Reads a single file and parses its front matter.
pub fn read_entry(path: &Path) -> ContentResult<Value> {
    let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_front_matter(&source).map_err(|reason| ContentError::FrontMatter {
        path: path.to_path_buf(),
        reason,
    })
}

/// Walks a content root and lists entry files per collection.
pub struct ContentLoader {
    root: PathBuf,
    extensions: Vec<String>,
}

impl ContentLoader {
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists every entry file, sorted by collection then id.
    ///
    /// Files directly in the root and names starting with `_` or `.` are skipped.
    pub fn discover(&self) -> ContentResult<Vec<ContentFile>> {
        if !self.root.is_dir() {
            return Err(ContentError::MissingRoot(self.root.clone()));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e.file_name().to_str().unwrap_or("")));

        for entry in walker {
            let entry = entry.map_err(|e| ContentError::Io {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone()),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(file) = self.classify(entry.path()) {
                files.push(file);
            }
        }

        files.sort_by(|a, b| (&a.collection, &a.id).cmp(&(&b.collection, &b.id)));
        Ok(files)
    }

    fn classify(&self, path: &Path) -> Option<ContentFile> {
        let ext = path.extension()?.to_str()?;
        if !self.extensions.iter().any(|e| e == ext) {
            return None;
        }

        let relative = path.strip_prefix(&self.root).ok()?;
        let mut components = relative.components();
        let collection = components.next()?.as_os_str().to_str()?.to_string();

        let id_path = components.as_path().with_extension("");
        let id = id_path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");

        Some(ContentFile {
            collection,
            id,
            path: path.to_path_buf(),
        })
    }
}

fn is_ignored(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn loader(root: &Path) -> ContentLoader {
        ContentLoader::new(root, vec!["md".into(), "mdx".into()])
    }

    #[test]
    fn test_discovers_nested_entries() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "events/2024/bytesize-1.md", "---\ntitle: a\n---\n");
        write(tmp.path(), "blog/tools.mdx", "");
        write(tmp.path(), "blog/notes.txt", "");

        let files = loader(tmp.path()).discover().unwrap();
        let ids: Vec<(&str, &str)> = files
            .iter()
            .map(|f| (f.collection.as_str(), f.id.as_str()))
            .collect();
        assert_eq!(ids, vec![("blog", "tools"), ("events", "2024/bytesize-1")]);
    }

    #[test]
    fn test_skips_root_files_and_ignored_names() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "config.md", "");
        write(tmp.path(), "docs/_partial.md", "");
        write(tmp.path(), "docs/_drafts/wip.md", "");
        write(tmp.path(), "docs/.hidden.md", "");
        write(tmp.path(), "docs/usage.md", "");

        let files = loader(tmp.path()).discover().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id, "usage");
    }

    #[test]
    fn test_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = loader(&tmp.path().join("nope")).discover().unwrap_err();
        assert_eq!(err.code(), "CONTENT_MISSING_ROOT");
    }

    #[test]
    fn test_read_entry_reports_bad_yaml() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "docs/bad.md", "---\ntitle: [unclosed\n---\n");
        let err = read_entry(&tmp.path().join("docs/bad.md")).unwrap_err();
        assert_eq!(err.code(), "CONTENT_FRONT_MATTER_INVALID");
    }
}
