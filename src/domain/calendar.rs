use chrono::{Datelike, Months, NaiveDate};

/// Whole years, months and leftover days between two dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarSpan {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

/// Time between two dated records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Elapsed {
    pub days: i64,
    pub span: CalendarSpan,
}

impl Elapsed {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            days: (end - start).num_days(),
            span: calendar_span(start, end),
        }
    }
}

/// Breaks `start..=end` down the way a calendar reads it: step forward by
/// whole months (clamping to the last day of shorter months) as far as
/// possible without passing `end`, then count the remaining days.
///
/// `start` must not be after `end`.
pub fn calendar_span(start: NaiveDate, end: NaiveDate) -> CalendarSpan {
    let mut total_months = (end.year() - start.year()) * 12 + end.month() as i32
        - start.month() as i32;
    if total_months < 0 {
        total_months = 0;
    }

    let mut anchor = add_months(start, total_months as u32);
    while total_months > 0 && anchor > end {
        total_months -= 1;
        anchor = add_months(start, total_months as u32);
    }

    let days = (end - anchor).num_days().max(0) as u32;
    CalendarSpan {
        years: total_months as u32 / 12,
        months: total_months as u32 % 12,
        days,
    }
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(NaiveDate::MAX)
}
