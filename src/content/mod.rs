//! Content loading
//!
//! Finds entry files under a content root, extracts their front matter and
//! runs them through the collection registry.

mod check;
mod errors;
mod frontmatter;
mod loader;

pub use check::{check_content, CheckReport, EntryFailure};
pub use errors::{ContentError, ContentResult};
pub use frontmatter::{parse_front_matter, split_front_matter, yaml_to_json};
pub use loader::{read_entry, ContentFile, ContentLoader};
