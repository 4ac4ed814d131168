//! Calendar windows for the report endpoints.
//!
//! All windows are whole days, inclusive on both ends, computed on UTC
//! dates.

use std::ops::RangeInclusive;

use time::{Date, Duration, Month};

use crate::Error;

/// Convert a one-based month number into a [Month].
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `month` is not in `1..=12`.
pub fn month_from_number(month: u8) -> Result<Month, Error> {
    Month::try_from(month).map_err(|_| Error::InvalidDate(format!("{month} is not a valid month")))
}

/// The window covering just `date`.
pub fn day_of(date: Date) -> RangeInclusive<Date> {
    date..=date
}

/// The Sunday-started week containing `date`.
pub fn week_of(date: Date) -> RangeInclusive<Date> {
    let start = date - Duration::days(date.weekday().number_days_from_sunday() as i64);

    start..=start + Duration::days(6)
}

/// The calendar month `month` of `year`.
pub fn month_of(year: i32, month: Month) -> RangeInclusive<Date> {
    let start = Date::from_calendar_date(year, month, 1)
        .expect("the first day of a month is always valid");
    let end = Date::from_calendar_date(year, month, month.length(year))
        .expect("Month::length returns a valid day of the month");

    start..=end
}

/// The whole of `year`.
pub fn year_of(year: i32) -> RangeInclusive<Date> {
    let start = Date::from_calendar_date(year, Month::January, 1)
        .expect("January 1 is always valid");
    let end = Date::from_calendar_date(year, Month::December, 31)
        .expect("December 31 is always valid");

    start..=end
}

/// The `week`-th seven-day window of `year`.
///
/// Week 1 starts on January 1 regardless of which weekday that is, and each
/// following week starts seven days later. Values past the end of the year
/// are not clamped; they simply produce a window in the next year.
pub fn week_of_year(year: i32, week: u32) -> RangeInclusive<Date> {
    let start = Date::from_calendar_date(year, Month::January, 1)
        .expect("January 1 is always valid")
        + Duration::days((week as i64 - 1) * 7);

    start..=start + Duration::days(6)
}

/// The year and month immediately before `(year, month)`.
pub fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        month => (year, month.previous()),
    }
}
