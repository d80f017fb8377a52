//! Exact age between two dates

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Age {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub total_days: i64,
    pub days_to_next_birthday: i64,
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Birthday in `year`; Feb 29 falls back to Feb 28 in common years
fn birthday_in(birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    birth.with_year(year).or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

/// Completed years, months and days from `birth` to `today`.
/// A birth date after `today` gives `None`.
pub fn calculate(birth: NaiveDate, today: NaiveDate) -> Option<Age> {
    if birth > today {
        return None;
    }

    // Month additions clamp to the end of the month (Jan 31 + 1 = Feb 28/29)
    let span = (today.year() - birth.year()) * 12 + today.month() as i32 - birth.month() as i32;
    let mut whole_months = u32::try_from(span).ok()?;
    let mut anchor = birth.checked_add_months(Months::new(whole_months))?;
    if anchor > today {
        whole_months = whole_months.checked_sub(1)?;
        anchor = birth.checked_add_months(Months::new(whole_months))?;
    }

    let this_year = birthday_in(birth, today.year())?;
    let next = if this_year >= today {
        this_year
    } else {
        birthday_in(birth, today.year() + 1)?
    };

    Some(Age {
        years: whole_months / 12,
        months: whole_months % 12,
        days: u32::try_from((today - anchor).num_days()).ok()?,
        total_days: (today - birth).num_days(),
        days_to_next_birthday: (next - today).num_days(),
    })
}
