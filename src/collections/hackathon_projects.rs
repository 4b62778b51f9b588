//! Hackathon projects collection

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{is_set, ValidEntry};
use crate::schema::{
    fields, EntryRules, FieldDef, FieldType, Schema, SchemaError, SchemaResult, ValidationDetails,
};

/// YAML authors often quote the hash, which leaves a leading quote.
const COLOR_PREFIXES: [&str; 2] = ["#", "'#"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Pipelines,
    Components,
    Tooling,
    Community,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HackathonProjectEntry {
    pub title: String,
    pub category: ProjectCategory,
    /// Keyed by GitHub handle
    pub leaders: BTreeMap<String, Leader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<String>,
}

impl EntryRules for HackathonProjectEntry {
    const COLLECTION: &'static str = "hackathon-projects";

    fn schema() -> Schema {
        let leader = fields([
            ("name", FieldDef::required_string()),
            ("slack", FieldDef::optional(FieldType::url())),
        ]);

        Schema::new(
            Self::COLLECTION,
            fields([
                ("title", FieldDef::required_string()),
                (
                    "category",
                    FieldDef::required(FieldType::enumeration(&[
                        "pipelines",
                        "components",
                        "tooling",
                        "community",
                    ])),
                ),
                ("leaders", FieldDef::required(FieldType::record(FieldType::object(leader)))),
                ("color", FieldDef::optional_string()),
                ("intro_video", FieldDef::optional_string()),
                ("image", FieldDef::optional_string()),
                ("image_alt", FieldDef::optional_string()),
                ("slack", FieldDef::optional(FieldType::url())),
            ]),
        )
    }

    fn refine(self) -> SchemaResult<Self> {
        if let Some(color) = self.color.as_deref().filter(|c| !c.is_empty()) {
            if !COLOR_PREFIXES.iter().any(|p| color.starts_with(p)) {
                return Err(SchemaError::format_invalid(
                    Self::COLLECTION,
                    ValidationDetails::new(
                        "color",
                        "string starting with '#'",
                        format!("'{}'", color),
                    ),
                    "color must start with '#'",
                ));
            }
        }

        if is_set(&self.image) && !is_set(&self.image_alt) {
            return Err(SchemaError::consistency(
                Self::COLLECTION,
                "Please provide alt text for your `image` in `image_alt`.",
            ));
        }
        Ok(self)
    }

    fn into_entry(self) -> ValidEntry {
        ValidEntry::HackathonProject(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContentCollection, ErrorKind, TypedCollection};
    use serde_json::{json, Value};

    fn project(overrides: Value) -> Value {
        let mut base = json!({
            "title": "Migrate modules to nf-test",
            "category": "components",
            "leaders": {
                "mashehu": { "name": "Matthias", "slack": "https://nfcore.slack.com/team/U01" }
            }
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        base
    }

    fn validate(raw: &Value) -> SchemaResult<ValidEntry> {
        TypedCollection::<HackathonProjectEntry>::new().unwrap().validate(raw)
    }

    #[test]
    fn test_color_needs_hash() {
        let err = validate(&project(json!({ "color": "red" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.details().unwrap().field, "color");

        assert!(validate(&project(json!({ "color": "#ff0000" }))).is_ok());
        assert!(validate(&project(json!({ "color": "'#ff0000'" }))).is_ok());
    }

    #[test]
    fn test_empty_color_is_unset() {
        let entry = validate(&project(json!({ "color": "" }))).unwrap();
        match entry {
            ValidEntry::HackathonProject(p) => assert_eq!(p.color.as_deref(), Some("")),
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_image_requires_alt() {
        let err = validate(&project(json!({ "image": "nf-test.png" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);

        let with_alt = project(json!({ "image": "nf-test.png", "image_alt": "nf-test logo" }));
        assert!(validate(&with_alt).is_ok());
    }

    #[test]
    fn test_leader_slack_must_be_url() {
        let err = validate(&project(json!({
            "leaders": { "mashehu": { "name": "Matthias", "slack": "@matthias" } }
        })))
        .unwrap_err();
        assert_eq!(err.details().unwrap().field, "leaders.mashehu.slack");
    }

    #[test]
    fn test_leader_name_required() {
        let err = validate(&project(json!({ "leaders": { "mashehu": {} } }))).unwrap_err();
        assert_eq!(err.details().unwrap().field, "leaders.mashehu.name");
    }

    #[test]
    fn test_category_enum() {
        let err = validate(&project(json!({ "category": "docs" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }
}
