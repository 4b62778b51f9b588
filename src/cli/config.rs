//! Configuration file
//!
//! ```json
//! { "content_dir": "src/content", "extensions": ["md", "mdx"], "fail_fast": false }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root of the content collections (default "src/content")
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Entry file extensions (default ["md", "mdx"])
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Stop at the first invalid entry (default false)
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("src/content")
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "mdx".to_string()]
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            extensions: default_extensions(),
            fail_fast: false,
        }
    }
}

impl ContentConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: ContentConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.extensions.is_empty() {
            return Err(CliError::config_error("extensions must not be empty"));
        }
        if let Some(bad) = self.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(CliError::config_error(format!(
                "Invalid extension '{}': use the bare extension, e.g. \"md\"",
                bad
            )));
        }
        Ok(())
    }
}
