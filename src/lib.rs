pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod grid;
pub mod navigate;
pub mod provider;

pub use crate::controller::MonthController;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::event::Event;
pub use crate::grid::{build_grid, map_events, CalendarMonth, CellKey, DayCell, WEEKDAYS};
pub use crate::navigate::{shift_month, MonthShift};
pub use crate::provider::{
    default_provider, ChronoDateProvider, DateProvider, EventSource, StaticEventSource,
    TomlEventSource,
};
