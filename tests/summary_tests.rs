use cadence::models::{RecurrencePattern, RecurrenceType};
use cadence::summary::{format_pattern_summary, ordinal};

fn pattern(recurrence_type: RecurrenceType, interval: u32) -> RecurrencePattern {
    RecurrencePattern::new(1, recurrence_type, interval, "Report", "Alice")
}

#[test]
fn ordinal_suffixes() {
    assert_eq!(ordinal(1), "1st");
    assert_eq!(ordinal(2), "2nd");
    assert_eq!(ordinal(3), "3rd");
    assert_eq!(ordinal(4), "4th");
    assert_eq!(ordinal(11), "11th");
    assert_eq!(ordinal(12), "12th");
    assert_eq!(ordinal(13), "13th");
    assert_eq!(ordinal(21), "21st");
    assert_eq!(ordinal(22), "22nd");
    assert_eq!(ordinal(23), "23rd");
    assert_eq!(ordinal(31), "31st");
    assert_eq!(ordinal(111), "111th");
    assert_eq!(ordinal(101), "101st");
}

#[test]
fn daily_summaries() {
    assert_eq!(format_pattern_summary(&pattern(RecurrenceType::Daily, 1)), "Daily");
    assert_eq!(
        format_pattern_summary(&pattern(RecurrenceType::Daily, 3)),
        "Every 3 days"
    );
}

#[test]
fn weekly_summaries_sort_weekday_names() {
    let mut p = pattern(RecurrenceType::Weekly, 1);
    p.days_of_week = vec![4, 0, 2];
    assert_eq!(format_pattern_summary(&p), "Weekly on Mon, Wed, Fri");
    p.interval = 2;
    assert_eq!(format_pattern_summary(&p), "Every 2 weeks on Mon, Wed, Fri");
}

#[test]
fn monthly_day_summaries() {
    let mut p = pattern(RecurrenceType::Monthly, 1);
    p.day_of_month = Some(15);
    assert_eq!(format_pattern_summary(&p), "Monthly on the 15th");
    p.day_of_month = Some(22);
    p.interval = 3;
    assert_eq!(format_pattern_summary(&p), "Every 3 months on the 22nd");
}

#[test]
fn monthly_weekday_summaries() {
    let mut p = pattern(RecurrenceType::Monthly, 1);
    p.week_of_month = Some(2);
    p.days_of_week = vec![1];
    assert_eq!(format_pattern_summary(&p), "Monthly on the 2nd Tue");
    p.week_of_month = Some(-1);
    p.days_of_week = vec![4];
    assert_eq!(format_pattern_summary(&p), "Monthly on the last Fri");
    // The 5 sentinel reads the same as -1.
    p.week_of_month = Some(5);
    assert_eq!(format_pattern_summary(&p), "Monthly on the last Fri");
    p.interval = 2;
    assert_eq!(format_pattern_summary(&p), "Every 2 months on the last Fri");
}

#[test]
fn monthly_prefers_day_of_month_when_both_anchors_set() {
    let mut p = pattern(RecurrenceType::Monthly, 1);
    p.day_of_month = Some(15);
    p.week_of_month = Some(-1);
    p.days_of_week = vec![4];
    assert_eq!(format_pattern_summary(&p), "Monthly on the 15th");
}

#[test]
fn yearly_summaries() {
    let mut p = pattern(RecurrenceType::Yearly, 1);
    p.month_of_year = Some(3);
    p.day_of_month = Some(15);
    assert_eq!(format_pattern_summary(&p), "Yearly on Mar 15");

    let mut p = pattern(RecurrenceType::Yearly, 1);
    p.month_of_year = Some(12);
    p.week_of_month = Some(-1);
    p.days_of_week = vec![4];
    assert_eq!(format_pattern_summary(&p), "Yearly on the last Fri of Dec");

    p.interval = 2;
    assert_eq!(format_pattern_summary(&p), "Every 2 years on the last Fri of Dec");
}

#[test]
fn summary_ignores_cursor_and_end_fields() {
    // Presentation depends only on the calendar shape, not on generation state.
    let mut a = pattern(RecurrenceType::Weekly, 1);
    a.days_of_week = vec![0];
    let mut b = a.clone();
    b.instances_generated = 12;
    b.last_generated_date = chrono::NaiveDate::from_ymd_opt(2026, 1, 5);
    b.max_occurrences = Some(20);
    assert_eq!(format_pattern_summary(&a), format_pattern_summary(&b));
}
