use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled event as fetched from an event source.
///
/// The grid only reads the calendar-date portion of `start`; every other
/// field of the source record rides along in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub start: DateTime<Utc>,

    #[serde(flatten)]
    pub extra: toml::value::Table,
}

impl Event {
    pub fn at(start: DateTime<Utc>) -> Self {
        Event {
            start,
            extra: toml::value::Table::new(),
        }
    }

    pub fn summary(&self) -> Option<&str> {
        self.extra.get("summary").and_then(|value| value.as_str())
    }
}
