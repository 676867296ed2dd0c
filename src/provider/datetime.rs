use chrono::{DateTime, Datelike, Month, NaiveDate, Utc};

use crate::error::{Error, ErrorKind, Result};
use crate::provider::DateProvider;

/// Statically linked date capability backed by chrono.
#[derive(Debug, Default)]
pub struct ChronoDateProvider;

impl ChronoDateProvider {
    pub fn new() -> Self {
        ChronoDateProvider
    }
}

fn first_of_month(month: Month, year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidMonthYear,
            format!("no such date: {}-{:02}-01", year, month.number_from_month()).as_str(),
        )
    })
}

impl DateProvider for ChronoDateProvider {
    fn first_weekday_offset(&self, month: Month, year: i32) -> Result<u32> {
        Ok(first_of_month(month, year)?.weekday().num_days_from_sunday())
    }

    fn days_in_month(&self, month: Month, year: i32) -> Result<u32> {
        let first = first_of_month(month, year)?;
        let next = if month.number_from_month() == 12 {
            first_of_month(Month::January, year + 1)?
        } else {
            first_of_month(month.succ(), year)?
        };

        Ok(next.signed_duration_since(first).num_days() as u32)
    }

    fn components(&self, stamp: &DateTime<Utc>) -> (i32, u32, u32) {
        (stamp.year(), stamp.month(), stamp.day())
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
