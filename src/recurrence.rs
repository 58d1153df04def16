use chrono::{Datelike, Duration, NaiveDate};

use crate::error::PatternError;
use crate::models::{RecurrencePattern, RecurrenceType, WeekOfMonth};

/// Computes the earliest occurrence of `pattern` strictly after `after`.
///
/// Pure date arithmetic: no I/O, no clock, deterministic. Returns `Ok(None)`
/// once the pattern's end condition is reached (end date passed or the
/// occurrence cap hit) — callers treat that as "no further action", not as a
/// failure. Invalid pattern configurations fail fast with a [`PatternError`].
pub fn next_due_date(
    pattern: &RecurrencePattern,
    after: NaiveDate,
) -> Result<Option<NaiveDate>, PatternError> {
    validate_pattern(pattern)?;

    if let Some(max) = pattern.max_occurrences {
        if pattern.instances_generated >= max {
            return Ok(None);
        }
    }

    let candidate = match pattern.recurrence_type {
        RecurrenceType::Daily => Some(after + Duration::days(pattern.interval as i64)),
        RecurrenceType::Weekly => next_weekly(pattern, after),
        RecurrenceType::Monthly => next_monthly(pattern, after),
        RecurrenceType::Yearly => next_yearly(pattern, after),
    };

    match candidate {
        Some(d) if pattern.end_date.map_or(true, |end| d <= end) => Ok(Some(d)),
        _ => Ok(None),
    }
}

/// Checks that a pattern is computable; the draft layer validates too, but the
/// engine re-checks so a bad record fails loudly instead of looping.
pub fn validate_pattern(pattern: &RecurrencePattern) -> Result<(), PatternError> {
    if pattern.interval < 1 {
        return Err(PatternError::ZeroInterval);
    }
    for &d in &pattern.days_of_week {
        if d > 6 {
            return Err(PatternError::InvalidWeekday(d));
        }
    }
    if let Some(dom) = pattern.day_of_month {
        if !(1..=31).contains(&dom) {
            return Err(PatternError::InvalidDayOfMonth(dom));
        }
    }
    if let Some(raw) = pattern.week_of_month {
        if WeekOfMonth::from_raw(raw).is_none() {
            return Err(PatternError::InvalidWeekOfMonth(raw));
        }
    }
    match pattern.recurrence_type {
        RecurrenceType::Daily => {}
        RecurrenceType::Weekly => {
            if pattern.days_of_week.is_empty() {
                return Err(PatternError::EmptyDaysOfWeek);
            }
        }
        RecurrenceType::Monthly => check_anchor(pattern)?,
        RecurrenceType::Yearly => {
            match pattern.month_of_year {
                None => return Err(PatternError::MissingMonth),
                Some(m) if !(1..=12).contains(&m) => return Err(PatternError::InvalidMonth(m)),
                Some(_) => {}
            }
            check_anchor(pattern)?;
        }
    }
    Ok(())
}

fn check_anchor(pattern: &RecurrencePattern) -> Result<(), PatternError> {
    if pattern.day_of_month.is_some() {
        return Ok(());
    }
    if pattern.week_of_month.is_some() && !pattern.days_of_week.is_empty() {
        return Ok(());
    }
    Err(PatternError::MissingAnchor)
}

/// Weeks are counted as rolling 7-day blocks anchored at `after` (week 0 starts
/// the day after `after`); only blocks at multiples of `interval` qualify.
fn next_weekly(pattern: &RecurrencePattern, after: NaiveDate) -> Option<NaiveDate> {
    let interval = pattern.interval as i64;
    // A qualifying block always arrives within interval weeks plus one block.
    for offset in 1..=(interval * 7 + 7) {
        if (offset / 7) % interval != 0 {
            continue;
        }
        let d = after + Duration::days(offset);
        let weekday = d.weekday().num_days_from_monday() as u8;
        if pattern.days_of_week.contains(&weekday) {
            return Some(d);
        }
    }
    None
}

fn next_monthly(pattern: &RecurrencePattern, after: NaiveDate) -> Option<NaiveDate> {
    let mut year = after.year();
    let mut month = after.month();
    // The second stepped month is always past `after`; the bound is slack.
    for _ in 0..4 {
        if let Some(d) = candidate_in_month(pattern, year, month) {
            if d > after {
                return Some(d);
            }
        }
        (year, month) = add_months(year, month, pattern.interval);
    }
    None
}

fn next_yearly(pattern: &RecurrencePattern, after: NaiveDate) -> Option<NaiveDate> {
    let month = pattern.month_of_year?;
    let mut year = after.year();
    for _ in 0..4 {
        if let Some(d) = candidate_in_month(pattern, year, month) {
            if d > after {
                return Some(d);
            }
        }
        year += pattern.interval as i32;
    }
    None
}

/// Resolves the pattern's anchor within one month. `day_of_month` is
/// authoritative when both anchors are stored; otherwise the first weekday in
/// `days_of_week` combined with `week_of_month` decides.
fn candidate_in_month(pattern: &RecurrencePattern, year: i32, month: u32) -> Option<NaiveDate> {
    if let Some(dom) = pattern.day_of_month {
        let clamped = dom.min(days_in_month(year, month));
        return NaiveDate::from_ymd_opt(year, month, clamped);
    }
    let weekday = *pattern.days_of_week.first()?;
    let week = WeekOfMonth::from_raw(pattern.week_of_month?)?;
    nth_weekday_of_month(year, month, weekday, week)
}

/// The Nth (or last) date in the month falling on `weekday` (0=Mon..6=Sun).
/// Every month holds at least four of each weekday, so Nth(1-4) always exists.
fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: u8,
    week: WeekOfMonth,
) -> Option<NaiveDate> {
    let mut hits = Vec::with_capacity(5);
    for day in 1..=days_in_month(year, month) {
        let d = NaiveDate::from_ymd_opt(year, month, day)?;
        if d.weekday().num_days_from_monday() as u8 == weekday {
            hits.push(d);
        }
    }
    match week {
        WeekOfMonth::Nth(n) => hits.get(n as usize - 1).copied(),
        WeekOfMonth::Last => hits.last().copied(),
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn add_months(year: i32, month: u32, step: u32) -> (i32, u32) {
    let total = year * 12 + (month as i32 - 1) + step as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}
