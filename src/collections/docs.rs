//! Docs collection

use serde::{Deserialize, Serialize};

use super::ValidEntry;
use crate::schema::{fields, EntryRules, FieldDef, FieldType, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Tutorial,
}

/// Remark plugin applied when rendering the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkdownPlugin {
    Checklist,
    AddNumbersToHeadings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_weight: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_plugin: Option<MarkdownPlugin>,
}

impl EntryRules for DocEntry {
    const COLLECTION: &'static str = "docs";

    fn schema() -> Schema {
        Schema::new(
            Self::COLLECTION,
            fields([
                ("title", FieldDef::required_string()),
                ("subtitle", FieldDef::optional_string()),
                ("shortTitle", FieldDef::optional_string()),
                ("weight", FieldDef::optional_number()),
                ("parent", FieldDef::optional_string()),
                ("parentWeight", FieldDef::optional_number()),
                ("type", FieldDef::optional(FieldType::enumeration(&["tutorial"]))),
                (
                    "markdownPlugin",
                    FieldDef::optional(FieldType::enumeration(&[
                        "checklist",
                        "addNumbersToHeadings",
                    ])),
                ),
            ]),
        )
    }

    fn into_entry(self) -> ValidEntry {
        ValidEntry::Doc(self)
    }
}
