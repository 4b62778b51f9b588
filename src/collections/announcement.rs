//! Announcement banner shared by events and blog posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::is_set;
use crate::schema::{fields, FieldDef, FieldType, SchemaError, SchemaResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl Announcement {
    pub fn field_type() -> FieldType {
        FieldType::object(fields([
            ("text", FieldDef::optional_string()),
            ("start", FieldDef::optional_date()),
            ("end", FieldDef::optional_date()),
        ]))
    }

    /// Ordering and text-requires-window rules.
    pub fn check(&self, collection: &str) -> SchemaResult<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(SchemaError::consistency(
                    collection,
                    "`announcement.start` must be before `announcement.end`",
                ));
            }
        }
        if is_set(&self.text) && self.start.is_none() && self.end.is_none() {
            return Err(SchemaError::consistency(
                collection,
                "`announcement.start` and `announcement.end` must be set if `announcement.text` is",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_ordered_window_passes() {
        let a = Announcement {
            text: Some("Registration open".into()),
            start: at(1),
            end: at(5),
        };
        assert!(a.check("events").is_ok());
    }

    #[test]
    fn test_equal_bounds_pass() {
        let a = Announcement {
            text: None,
            start: at(3),
            end: at(3),
        };
        assert!(a.check("events").is_ok());
    }

    #[test]
    fn test_reversed_window_fails() {
        let a = Announcement {
            text: None,
            start: at(5),
            end: at(1),
        };
        let err = a.check("blog").unwrap_err();
        assert!(err.message().contains("announcement.start"));
    }

    #[test]
    fn test_text_without_window_fails() {
        let a = Announcement {
            text: Some("Soon".into()),
            ..Default::default()
        };
        assert!(a.check("events").is_err());
    }

    #[test]
    fn test_text_with_only_end_passes() {
        let a = Announcement {
            text: Some("Soon".into()),
            start: None,
            end: at(2),
        };
        assert!(a.check("events").is_ok());
    }

    #[test]
    fn test_empty_text_needs_no_window() {
        let a = Announcement {
            text: Some(String::new()),
            ..Default::default()
        };
        assert!(a.check("events").is_ok());
    }
}
