use thiserror::Error;

/// A recurrence pattern that cannot be computed against.
///
/// These are data/configuration mistakes, not runtime failures: the calculator
/// fails fast so the caller can fix the pattern before trying again. A pattern
/// that has simply ended is not an error; `next_due_date` reports that as
/// `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("interval must be at least 1")]
    ZeroInterval,
    #[error("weekly pattern has no days of week")]
    EmptyDaysOfWeek,
    #[error("invalid weekday index {0} (expected 0=Mon..6=Sun)")]
    InvalidWeekday(u8),
    #[error("yearly pattern is missing month_of_year")]
    MissingMonth,
    #[error("invalid month {0} (expected 1-12)")]
    InvalidMonth(u32),
    #[error("invalid day_of_month {0} (expected 1-31)")]
    InvalidDayOfMonth(u32),
    #[error("invalid week_of_month {0} (expected 1-4, or 5/-1 for last)")]
    InvalidWeekOfMonth(i8),
    #[error("pattern needs day_of_month, or week_of_month with a weekday")]
    MissingAnchor,
}
