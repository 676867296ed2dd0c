use chrono::{Datelike, Month, NaiveDate};
use itertools::Itertools;
use num_traits::FromPrimitive;
use std::fmt;

use crate::error::{Error, ErrorKind, Result};
use crate::event::Event;
use crate::provider::DateProvider;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Identity of a cell within one grid: leading padding cells are keyed
/// `blank-<n>`, dated cells by their day number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKey {
    Blank(u32),
    Day(u32),
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKey::Blank(n) => write!(f, "blank-{}", n),
            CellKey::Day(d) => write!(f, "{}", d),
        }
    }
}

/// One grid square: either blank padding or a day of the month.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    key: CellKey,
    date: Option<u32>,
    is_today: bool,
    events: Vec<Event>,
}

impl DayCell {
    fn blank(n: u32) -> Self {
        DayCell {
            key: CellKey::Blank(n),
            date: None,
            is_today: false,
            events: Vec::new(),
        }
    }

    fn day(day: u32, is_today: bool) -> Self {
        DayCell {
            key: CellKey::Day(day),
            date: Some(day),
            is_today,
            events: Vec::new(),
        }
    }

    pub fn key(&self) -> &CellKey {
        &self.key
    }

    pub fn date(&self) -> Option<u32> {
        self.date
    }

    pub fn is_blank(&self) -> bool {
        self.date.is_none()
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

/// A fully laid-out month: leading blanks for weekday alignment followed
/// by one cell per day, in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    month: Month,
    year: i32,
    cells: Vec<DayCell>,
}

impl CalendarMonth {
    pub fn month(&self) -> Month {
        self.month
    }

    pub fn month_num(&self) -> u32 {
        self.month.number_from_month()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn name(&self) -> &'static str {
        self.month.name()
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }
}

fn month_from_num(month: u32) -> Result<Month> {
    Month::from_u32(month).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidMonthYear,
            format!("month must be in 1..=12, got {}", month).as_str(),
        )
    })
}

/// Lay out (month, year) as an ordered cell sequence with empty event
/// lists. `today` marks at most one cell.
pub fn build_grid(
    month: u32,
    year: i32,
    today: NaiveDate,
    provider: &dyn DateProvider,
) -> Result<CalendarMonth> {
    let month = month_from_num(month)?;
    let offset = provider.first_weekday_offset(month, year)?;
    let days = provider.days_in_month(month, year)?;

    let cells = (0..offset)
        .map(DayCell::blank)
        .chain((1..=days).map(|day| {
            let is_today = today.day() == day
                && today.month() == month.number_from_month()
                && today.year() == year;
            DayCell::day(day, is_today)
        }))
        .collect();

    Ok(CalendarMonth {
        month,
        year,
        cells,
    })
}

/// Bucket `events` into the matching day cells of `grid`, returning a new
/// grid. Per-day event order follows the input order; blanks stay empty.
/// Full recomputation, so repeated calls over a fresh grid are safe.
pub fn map_events(
    grid: &CalendarMonth,
    events: &[Event],
    provider: &dyn DateProvider,
) -> CalendarMonth {
    let mut by_day = events
        .iter()
        .cloned()
        .into_group_map_by(|event| provider.components(&event.start).2);

    let cells = grid
        .cells
        .iter()
        .map(|cell| match cell.date {
            Some(day) => DayCell {
                key: cell.key.clone(),
                date: cell.date,
                is_today: cell.is_today,
                events: by_day.remove(&day).unwrap_or_default(),
            },
            None => cell.clone(),
        })
        .collect();

    CalendarMonth {
        month: grid.month,
        year: grid.year,
        cells,
    }
}
