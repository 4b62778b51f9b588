//! Special interest groups collection
//!
//! Group index pages list their leads and the pipelines they look after.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ValidEntry;
use crate::schema::{fields, EntryRules, FieldDef, FieldType, Schema, SchemaError, SchemaResult};

/// Leads are either plain handles or records of string attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Leads {
    Names(Vec<String>),
    Records(Vec<BTreeMap<String, String>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestGroupEntry {
    pub title: String,
    pub subtitle: String,
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leads: Option<Leads>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipelines: Option<Vec<String>>,
}

impl EntryRules for InterestGroupEntry {
    const COLLECTION: &'static str = "special-interest-groups";

    fn schema() -> Schema {
        Schema::new(
            Self::COLLECTION,
            fields([
                ("title", FieldDef::required_string()),
                ("subtitle", FieldDef::required_string()),
                ("groupName", FieldDef::required_string()),
                (
                    "leads",
                    FieldDef::optional(FieldType::union(vec![
                        FieldType::array(FieldType::string()),
                        FieldType::array(FieldType::record(FieldType::string())),
                    ])),
                ),
                ("pipelines", FieldDef::optional(FieldType::array(FieldType::string()))),
            ]),
        )
    }

    fn refine(self) -> SchemaResult<Self> {
        if self.leads.is_some() && self.pipelines.is_none() {
            return Err(SchemaError::consistency(
                Self::COLLECTION,
                "`pipelines` must be set if `leads` is",
            ));
        }
        Ok(self)
    }

    fn normalize(mut self) -> Self {
        if let Some(pipelines) = self.pipelines.as_mut() {
            pipelines.sort();
        }
        self
    }

    fn into_entry(self) -> ValidEntry {
        ValidEntry::InterestGroup(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContentCollection, ErrorKind, TypedCollection};
    use serde_json::{json, Value};

    fn validate(raw: &Value) -> SchemaResult<InterestGroupEntry> {
        match TypedCollection::<InterestGroupEntry>::new().unwrap().validate(raw)? {
            ValidEntry::InterestGroup(group) => Ok(group),
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_pipelines_sorted() {
        let raw = json!({
            "title": "Animal genomics",
            "subtitle": "Non-model organisms",
            "groupName": "animal-genomics",
            "leads": ["alice", "bob"],
            "pipelines": ["zeta", "alpha", "mu"]
        });
        let group = validate(&raw).unwrap();
        assert_eq!(group.pipelines.unwrap(), vec!["alpha", "mu", "zeta"]);
        // input untouched
        assert_eq!(raw["pipelines"][0], "zeta");
    }

    #[test]
    fn test_leads_require_pipelines() {
        let err = validate(&json!({
            "title": "Meta-omics",
            "subtitle": "s",
            "groupName": "meta-omics",
            "leads": ["carol"]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert_eq!(err.message(), "`pipelines` must be set if `leads` is");
    }

    #[test]
    fn test_lead_records_accepted() {
        let group = validate(&json!({
            "title": "Meta-omics",
            "subtitle": "s",
            "groupName": "meta-omics",
            "leads": [{ "carol": "Carol Smith" }],
            "pipelines": []
        }))
        .unwrap();
        assert!(matches!(group.leads, Some(Leads::Records(_))));
    }

    #[test]
    fn test_sub_pages_need_no_leads() {
        let group = validate(&json!({
            "title": "Meeting notes",
            "subtitle": "s",
            "groupName": "meta-omics"
        }))
        .unwrap();
        assert!(group.pipelines.is_none());
    }

    #[test]
    fn test_mixed_leads_rejected() {
        let err = validate(&json!({
            "title": "t",
            "subtitle": "s",
            "groupName": "g",
            "leads": ["carol", { "dave": "Dave" }],
            "pipelines": ["a"]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }
}
