use crate::models::{RecurrencePattern, RecurrenceType, WeekOfMonth, MONTH_NAMES, WEEKDAY_NAMES};

/// Renders an integer with its ordinal suffix, e.g. `21` -> `"21st"`.
///
/// 11-13 take "th" regardless of their last digit.
pub fn ordinal(n: u32) -> String {
    let suffix = match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{}{}", n, suffix)
}

/// Renders a pattern as a human sentence, e.g. "Weekly on Mon, Wed, Fri" or
/// "Yearly on the last Fri of Dec".
///
/// A pure function of the pattern's fields; the current date plays no part.
/// When both anchors are stored, `day_of_month` wins, matching the calculator.
pub fn format_pattern_summary(pattern: &RecurrencePattern) -> String {
    let n = pattern.interval;
    match pattern.recurrence_type {
        RecurrenceType::Daily => {
            if n == 1 {
                "Daily".to_string()
            } else {
                format!("Every {} days", n)
            }
        }
        RecurrenceType::Weekly => {
            let days = weekday_list(&pattern.days_of_week);
            match (n, days.is_empty()) {
                (1, true) => "Weekly".to_string(),
                (1, false) => format!("Weekly on {}", days),
                (_, true) => format!("Every {} weeks", n),
                (_, false) => format!("Every {} weeks on {}", n, days),
            }
        }
        RecurrenceType::Monthly => {
            let lead = if n == 1 {
                "Monthly".to_string()
            } else {
                format!("Every {} months", n)
            };
            match month_anchor(pattern) {
                Some(anchor) => format!("{} on {}", lead, anchor),
                None => lead,
            }
        }
        RecurrenceType::Yearly => {
            let lead = if n == 1 {
                "Yearly".to_string()
            } else {
                format!("Every {} years", n)
            };
            let month = pattern
                .month_of_year
                .and_then(|m| MONTH_NAMES.get((m as usize).checked_sub(1)?))
                .copied()
                .unwrap_or("?");
            if let Some(dom) = pattern.day_of_month {
                format!("{} on {} {}", lead, month, dom)
            } else {
                match month_anchor(pattern) {
                    Some(anchor) => format!("{} on {} of {}", lead, anchor, month),
                    None => format!("{} in {}", lead, month),
                }
            }
        }
    }
}

/// "the 15th", "the 2nd Tue", or "the last Fri"; `None` when no anchor is set.
fn month_anchor(pattern: &RecurrencePattern) -> Option<String> {
    if let Some(dom) = pattern.day_of_month {
        return Some(format!("the {}", ordinal(dom)));
    }
    let weekday = pattern
        .days_of_week
        .first()
        .and_then(|&d| WEEKDAY_NAMES.get(d as usize))
        .copied()?;
    match WeekOfMonth::from_raw(pattern.week_of_month?)? {
        WeekOfMonth::Nth(n) => Some(format!("the {} {}", ordinal(n as u32), weekday)),
        WeekOfMonth::Last => Some(format!("the last {}", weekday)),
    }
}

/// Weekday names in ascending Mon..Sun order, deduplicated.
fn weekday_list(days: &[u8]) -> String {
    let mut sorted: Vec<u8> = days.iter().copied().filter(|&d| d <= 6).collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
        .iter()
        .map(|&d| WEEKDAY_NAMES[d as usize])
        .collect::<Vec<_>>()
        .join(", ")
}
