//! About pages collection

use serde::{Deserialize, Serialize};

use super::ValidEntry;
use crate::schema::{fields, EntryRules, FieldDef, FieldType, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutEntry {
    pub title: String,
    pub description: String,
    /// Link to the page source on GitHub
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md_github_url: Option<String>,
    #[serde(rename = "minHeadingDepth", default, skip_serializing_if = "Option::is_none")]
    pub min_heading_depth: Option<f64>,
    #[serde(rename = "maxHeadingDepth", default, skip_serializing_if = "Option::is_none")]
    pub max_heading_depth: Option<f64>,
}

impl EntryRules for AboutEntry {
    const COLLECTION: &'static str = "about";

    fn schema() -> Schema {
        Schema::new(
            Self::COLLECTION,
            fields([
                ("title", FieldDef::required_string()),
                ("description", FieldDef::required_string()),
                ("md_github_url", FieldDef::optional(FieldType::url())),
                ("minHeadingDepth", FieldDef::optional_number()),
                ("maxHeadingDepth", FieldDef::optional_number()),
            ]),
        )
    }

    fn into_entry(self) -> ValidEntry {
        ValidEntry::About(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContentCollection, SchemaErrorCode, TypedCollection};
    use serde_json::json;

    #[test]
    fn test_description_required() {
        let err = TypedCollection::<AboutEntry>::new().unwrap()
            .validate(&json!({ "title": "Code of conduct" }))
            .unwrap_err();
        assert_eq!(err.details().unwrap().field, "description");
    }

    #[test]
    fn test_github_url_must_be_url() {
        let collection = TypedCollection::<AboutEntry>::new().unwrap();
        assert!(collection
            .validate(&json!({
                "title": "Governance",
                "description": "How we work",
                "md_github_url": "https://github.com/nf-core/website/blob/main/governance.md"
            }))
            .is_ok());

        let err = collection
            .validate(&json!({
                "title": "Governance",
                "description": "How we work",
                "md_github_url": "governance.md"
            }))
            .unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::ContentFormatInvalid);
    }
}
