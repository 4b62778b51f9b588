//! Built-in content collections
//!
//! | Collection | Entry type |
//! |---|---|
//! | events | [`EventEntry`] |
//! | docs | [`DocEntry`] |
//! | about | [`AboutEntry`] |
//! | blog | [`BlogEntry`] |
//! | special-interest-groups | [`InterestGroupEntry`] |
//! | hackathon-projects | [`HackathonProjectEntry`] |
//! | pipelines, api_reference | pass-through |

mod about;
mod announcement;
mod blog;
mod docs;
mod events;
mod hackathon_projects;
mod special_interest_groups;

pub use about::AboutEntry;
pub use announcement::Announcement;
pub use blog::BlogEntry;
pub use docs::{DocEntry, DocType, MarkdownPlugin};
pub use events::{compose_timestamp, EventEntry, EventType, Location, LocationLinks, YoutubeEmbed};
pub use hackathon_projects::{HackathonProjectEntry, Leader, ProjectCategory};
pub use special_interest_groups::{InterestGroupEntry, Leads};

use serde::Serialize;
use serde_json::Value;

use crate::schema::{ContentCollection, PassThrough, SchemaResult, TypedCollection};

/// A validated entry, typed by collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidEntry {
    Event(EventEntry),
    Doc(DocEntry),
    About(AboutEntry),
    Blog(BlogEntry),
    InterestGroup(InterestGroupEntry),
    HackathonProject(HackathonProjectEntry),
    /// Entry of a collection without a schema, unchanged
    Unvalidated(Value),
}

impl ValidEntry {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// All built-in collections, in no particular order.
pub fn builtin() -> SchemaResult<Vec<Box<dyn ContentCollection>>> {
    Ok(vec![
        Box::new(TypedCollection::<EventEntry>::new()?),
        Box::new(TypedCollection::<DocEntry>::new()?),
        Box::new(TypedCollection::<AboutEntry>::new()?),
        Box::new(TypedCollection::<BlogEntry>::new()?),
        Box::new(TypedCollection::<InterestGroupEntry>::new()?),
        Box::new(TypedCollection::<HackathonProjectEntry>::new()?),
        Box::new(PassThrough::new("pipelines")),
        Box::new(PassThrough::new("api_reference")),
    ])
}

/// Whether an optional string carries a non-empty value.
pub(crate) fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}
