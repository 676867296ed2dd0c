use async_trait::async_trait;
use chrono::{DateTime, Month, NaiveDate, Utc};
use once_cell::sync::Lazy;

use crate::error::Result;
use crate::event::Event;

mod datetime;
mod file;

pub use datetime::ChronoDateProvider;
pub use file::TomlEventSource;

/// Date arithmetic the grid depends on. Implementations must be
/// deterministic and side-effect free.
pub trait DateProvider: Send + Sync {
    /// Weekday column of the 1st of (month, year), 0 = Sunday .. 6 = Saturday.
    fn first_weekday_offset(&self, month: Month, year: i32) -> Result<u32>;

    /// Number of days in (month, year), leap-year aware.
    fn days_in_month(&self, month: Month, year: i32) -> Result<u32>;

    /// (year, month, day) of a timestamp.
    fn components(&self, stamp: &DateTime<Utc>) -> (i32, u32, u32);

    fn today(&self) -> NaiveDate;
}

/// Supplier of the events shown in a month grid.
///
/// A fetch either succeeds with the complete list for the requested month
/// or fails as a whole; a partial list is never returned.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self, month: u32, year: i32) -> Result<Vec<Event>>;
}

#[async_trait]
impl EventSource for Box<dyn EventSource> {
    async fn fetch_events(&self, month: u32, year: i32) -> Result<Vec<Event>> {
        (**self).fetch_events(month, year).await
    }
}

/// In-memory source holding a fixed event list.
pub struct StaticEventSource {
    events: Vec<Event>,
}

impl StaticEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        StaticEventSource { events }
    }

    pub fn empty() -> Self {
        StaticEventSource { events: Vec::new() }
    }
}

#[async_trait]
impl EventSource for StaticEventSource {
    async fn fetch_events(&self, _month: u32, _year: i32) -> Result<Vec<Event>> {
        Ok(self.events.clone())
    }
}

static CHRONO_PROVIDER: Lazy<ChronoDateProvider> = Lazy::new(ChronoDateProvider::new);

/// Process-wide chrono-backed provider, initialized once.
pub fn default_provider() -> &'static dyn DateProvider {
    &*CHRONO_PROVIDER
}
