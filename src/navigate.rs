use crate::error::{Error, ErrorKind, Result};

/// Direction of a month step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthShift {
    Prev,
    Next,
}

/// Step one month in either direction, carrying into the year at the
/// January/December boundaries. Pure integer arithmetic.
pub fn shift_month(month: u32, year: i32, shift: MonthShift) -> Result<(u32, i32)> {
    if !(1..=12).contains(&month) {
        return Err(Error::new(
            ErrorKind::InvalidMonthYear,
            format!("month must be in 1..=12, got {}", month).as_str(),
        ));
    }

    Ok(match shift {
        MonthShift::Prev if month == 1 => (12, year - 1),
        MonthShift::Prev => (month - 1, year),
        MonthShift::Next if month == 12 => (1, year + 1),
        MonthShift::Next => (month + 1, year),
    })
}
