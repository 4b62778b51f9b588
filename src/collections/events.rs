//! Events collection
//!
//! Start and end timestamps are derived from the date and time-with-offset
//! fields unless given explicitly, and must be ordered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::announcement::Announcement;
use super::{is_set, ValidEntry};
use crate::schema::{
    fields, EntryRules, FieldDef, FieldType, Schema, SchemaError, SchemaResult, ValidationDetails,
};

const DATE_PATTERN: &str = r"^(\d{4}-\d{2}-\d{2})$";
const TIME_PATTERN: &str = r"^(\d{2}:\d{2})([+-]\d{2}:\d{2})$";
const START_TIME_MESSAGE: &str =
    "startTime must be in the format HH:MM+|-HH:MM where the +/-HH:MM is the UTC offset";
const END_TIME_MESSAGE: &str =
    "endTime must be in the format HH:MM+|-HH:MM where the +/-HH:MM is the UTC offset";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Bytesize,
    Talk,
    Hackathon,
    Training,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationLinks {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YoutubeEmbed {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<LocationLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_coordinates: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEntry {
    pub title: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<Announcement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    /// Derived from `startDate` + `startTime` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    /// Derived from `endDate` + `endTime` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_typeform: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hackathon_project_list_modals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_embed: Option<YoutubeEmbed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_export_button: Option<bool>,
}

impl EventEntry {
    /// Start timestamp; always set on a validated entry.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// End timestamp; always set on a validated entry.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

/// Combines `YYYY-MM-DD` and `HH:MM±HH:MM` into a UTC timestamp.
pub fn compose_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(&format!("{}T{}", date, time), "%Y-%m-%dT%H:%M%:z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn derive_timestamp(field: &str, date: &str, time: &str) -> SchemaResult<DateTime<Utc>> {
    compose_timestamp(date, time).ok_or_else(|| {
        SchemaError::format_invalid(
            EventEntry::COLLECTION,
            ValidationDetails::new(
                field,
                "YYYY-MM-DD and HH:MM+|-HH:MM",
                format!("'{}T{}'", date, time),
            ),
            format!(
                "{}Date and {}Time must be in the format YYYY-MM-DD and HH:MM+|-HH:MM",
                field, field
            ),
        )
    })
}

impl EntryRules for EventEntry {
    const COLLECTION: &'static str = "events";

    fn schema() -> Schema {
        let location = fields([
            ("name", FieldDef::optional_string()),
            (
                "links",
                FieldDef::optional(FieldType::union(vec![
                    FieldType::url(),
                    FieldType::starts_with(&["#"]),
                    FieldType::array(FieldType::url()),
                ])),
            ),
            ("geoCoordinates", FieldDef::optional(FieldType::array(FieldType::Number))),
            ("address", FieldDef::optional_string()),
            ("country", FieldDef::optional_string()),
            ("city", FieldDef::optional_string()),
        ]);

        Schema::new(
            Self::COLLECTION,
            fields([
                ("title", FieldDef::required_string()),
                ("subtitle", FieldDef::required_string()),
                ("shortTitle", FieldDef::optional_string()),
                (
                    "type",
                    FieldDef::required(FieldType::enumeration(&[
                        "bytesize",
                        "talk",
                        "hackathon",
                        "training",
                    ])),
                ),
                (
                    "startDate",
                    FieldDef::required(FieldType::pattern(
                        DATE_PATTERN,
                        "startDate must be in the format YYYY-MM-DD",
                    )),
                ),
                (
                    "startTime",
                    FieldDef::required(FieldType::pattern(TIME_PATTERN, START_TIME_MESSAGE)),
                ),
                (
                    "endDate",
                    FieldDef::required(FieldType::pattern(
                        DATE_PATTERN,
                        "endDate must be in the format YYYY-MM-DD",
                    )),
                ),
                (
                    "endTime",
                    FieldDef::required(FieldType::pattern(TIME_PATTERN, END_TIME_MESSAGE)),
                ),
                ("announcement", FieldDef::optional(Announcement::field_type())),
                ("locations", FieldDef::optional(FieldType::array(FieldType::object(location)))),
                ("links", FieldDef::optional(FieldType::array(FieldType::url()))),
                ("start", FieldDef::optional_date()),
                ("end", FieldDef::optional_date()),
                ("duration", FieldDef::optional_string()),
                ("embedAt", FieldDef::optional_string()),
                ("importTypeform", FieldDef::optional_bool()),
                ("hackathonProjectListModals", FieldDef::optional_string()),
                (
                    "youtubeEmbed",
                    FieldDef::optional(FieldType::union(vec![
                        FieldType::array(FieldType::url()),
                        FieldType::url(),
                    ])),
                ),
                ("hideExportButton", FieldDef::optional_bool()),
            ]),
        )
        .with_description("Talks, bytesize sessions, hackathons and trainings")
    }

    fn refine(mut self) -> SchemaResult<Self> {
        let start = match self.start {
            Some(start) => start,
            None => derive_timestamp("start", &self.start_date, &self.start_time)?,
        };
        let end = match self.end {
            Some(end) => end,
            None => derive_timestamp("end", &self.end_date, &self.end_time)?,
        };

        if start > end {
            return Err(SchemaError::consistency(
                Self::COLLECTION,
                format!(
                    "startDate {} must be before endDate {}",
                    start.to_rfc3339(),
                    end.to_rfc3339()
                ),
            ));
        }
        self.start = Some(start);
        self.end = Some(end);

        if let Some(announcement) = &self.announcement {
            announcement.check(Self::COLLECTION)?;
        }

        if let Some(first) = self.locations.as_ref().and_then(|l| l.first()) {
            if is_set(&first.city) && !is_set(&first.country) {
                return Err(SchemaError::consistency(
                    Self::COLLECTION,
                    "locations.country must be set if locations.city is",
                ));
            }
        }

        Ok(self)
    }

    fn into_entry(self) -> ValidEntry {
        ValidEntry::Event(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContentCollection, ErrorKind, TypedCollection};
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn event(overrides: Value) -> Value {
        let mut base = json!({
            "title": "nf-core/bytesize: rnaseq",
            "subtitle": "A walk through the pipeline",
            "type": "bytesize",
            "startDate": "2024-01-10",
            "startTime": "09:00+00:00",
            "endDate": "2024-01-10",
            "endTime": "10:00+00:00"
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        base
    }

    fn validate(raw: &Value) -> SchemaResult<EventEntry> {
        match TypedCollection::<EventEntry>::new().unwrap().validate(raw)? {
            ValidEntry::Event(e) => Ok(e),
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_valid_event_derives_timestamps() {
        let entry = validate(&event(json!({}))).unwrap();
        assert_eq!(entry.start, Some(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()));
        assert_eq!(entry.end, Some(Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap()));
        assert_eq!(entry.event_type, EventType::Bytesize);
    }

    #[test]
    fn test_offsets_are_applied() {
        let entry = validate(&event(json!({
            "startTime": "11:00+02:00",
            "endTime": "05:00-05:00"
        })))
        .unwrap();
        assert_eq!(entry.starts_at(), Some(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()));
        assert_eq!(entry.ends_at(), Some(Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_start_after_end_fails() {
        let err = validate(&event(json!({ "endTime": "08:00+00:00" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert!(err.message().contains("must be before endDate"));
    }

    #[test]
    fn test_same_instant_passes() {
        assert!(validate(&event(json!({ "endTime": "09:00+00:00" }))).is_ok());
    }

    #[test]
    fn test_time_without_offset_fails() {
        let err = validate(&event(json!({ "startTime": "09:00" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.message().starts_with("startTime must be in the format"));
    }

    #[test]
    fn test_impossible_time_fails_composition() {
        let err = validate(&event(json!({ "startTime": "25:00+00:00" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.message().contains("YYYY-MM-DD and HH:MM+|-HH:MM"));
    }

    #[test]
    fn test_explicit_start_wins() {
        let entry = validate(&event(json!({ "start": "2024-01-10T09:30:00Z" }))).unwrap();
        assert_eq!(entry.start, Some(Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = validate(&event(json!({ "type": "keynote" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_city_requires_country() {
        let err = validate(&event(json!({ "locations": [{ "city": "Barcelona" }] }))).unwrap_err();
        assert_eq!(err.message(), "locations.country must be set if locations.city is");

        let ok = validate(&event(json!({
            "locations": [{ "city": "Barcelona", "country": "Spain", "links": "#venue" }]
        })));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_only_first_location_checked() {
        let entry = validate(&event(json!({
            "locations": [{ "name": "Online" }, { "city": "Stockholm" }]
        })));
        assert!(entry.is_ok());
    }

    #[test]
    fn test_announcement_rules_apply() {
        let raw = event(json!({ "announcement": { "text": "Register now" } }));
        let err = validate(&raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);

        let err = validate(&event(json!({
            "announcement": { "start": "2024-01-05", "end": "2024-01-01" }
        })))
        .unwrap_err();
        assert!(err.message().contains("announcement.start"));
    }

    #[test]
    fn test_youtube_embed_single_or_list() {
        assert!(validate(&event(json!({ "youtubeEmbed": "https://youtu.be/abc" }))).is_ok());
        assert!(validate(&event(json!({ "youtubeEmbed": ["https://youtu.be/abc"] }))).is_ok());
        assert!(validate(&event(json!({ "youtubeEmbed": "abc" }))).is_err());
    }

    #[test]
    fn test_output_contains_derived_fields() {
        let collection = TypedCollection::<EventEntry>::new().unwrap();
        let entry = collection.validate(&event(json!({}))).unwrap();
        let value = entry.to_value();
        assert_eq!(value["start"], "2024-01-10T09:00:00Z");
        assert_eq!(value["type"], "bytesize");
    }

    #[test]
    fn test_compose_timestamp() {
        assert!(compose_timestamp("2024-01-10", "09:00+01:00").is_some());
        assert!(compose_timestamp("2024-02-30", "09:00+01:00").is_none());
        assert!(compose_timestamp("2024-01-10", "9am").is_none());
    }
}
