//! Blog collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::announcement::Announcement;
use super::{is_set, ValidEntry};
use crate::schema::{fields, EntryRules, FieldDef, FieldType, Schema, SchemaError, SchemaResult};

/// Local header images live under this prefix.
const BLOG_IMAGE_PREFIX: &str = "/assets/images/blog/";
/// Dimensions can only be declared for local assets.
const LOCAL_ASSET_PREFIX: &str = "/assets/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    pub title: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image_dim: Option<Vec<f64>>,
    pub label: Vec<String>,
    pub pub_date: DateTime<Utc>,
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_header_image: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<Announcement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heading_depth: Option<f64>,
}

impl BlogEntry {
    pub fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }
}

impl EntryRules for BlogEntry {
    const COLLECTION: &'static str = "blog";

    fn schema() -> Schema {
        Schema::new(
            Self::COLLECTION,
            fields([
                ("title", FieldDef::required_string()),
                ("subtitle", FieldDef::required_string()),
                ("shortTitle", FieldDef::optional_string()),
                (
                    "headerImage",
                    FieldDef::optional(FieldType::union(vec![
                        FieldType::url(),
                        FieldType::starts_with(&[BLOG_IMAGE_PREFIX]),
                    ])),
                ),
                ("headerImageAlt", FieldDef::optional_string()),
                ("headerImageDim", FieldDef::optional(FieldType::array(FieldType::Number))),
                ("label", FieldDef::required(FieldType::array(FieldType::string()))),
                ("pubDate", FieldDef::required(FieldType::Date)),
                ("authors", FieldDef::required(FieldType::array(FieldType::string()))),
                ("draft", FieldDef::optional_bool()),
                ("embedHeaderImage", FieldDef::optional_bool()),
                ("announcement", FieldDef::optional(Announcement::field_type())),
                ("maxHeadingDepth", FieldDef::optional_number()),
            ]),
        )
        .with_description("Blog posts")
    }

    fn refine(self) -> SchemaResult<Self> {
        if is_set(&self.header_image) && !is_set(&self.header_image_alt) {
            return Err(SchemaError::consistency(
                Self::COLLECTION,
                "Please provide alt text for your `headerImage` in `headerImageAlt`.",
            ));
        }

        if self.header_image_dim.is_some() {
            let local = self
                .header_image
                .as_deref()
                .is_some_and(|image| image.starts_with(LOCAL_ASSET_PREFIX));
            if !local {
                return Err(SchemaError::consistency(
                    Self::COLLECTION,
                    concat!(
                        "Please provide a `headerImage` that starts with `/assets/` ",
                        "if you are providing `headerImageDim`."
                    ),
                ));
            }
        }

        if let Some(announcement) = &self.announcement {
            announcement.check(Self::COLLECTION)?;
        }

        Ok(self)
    }

    fn into_entry(self) -> ValidEntry {
        ValidEntry::Blog(self)
    }
}
