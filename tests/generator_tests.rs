use cadence::generator::{generate_instance, should_generate_instance, DEFAULT_WINDOW_DAYS};
use cadence::models::{RecurrencePattern, RecurrenceType, TaskTemplate, WorkStatus};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn weekly_fridays() -> RecurrencePattern {
    let mut p = RecurrencePattern::new(7, RecurrenceType::Weekly, 1, "Status report", "Alice");
    p.days_of_week = vec![4];
    p
}

#[test]
fn paused_pattern_never_generates() {
    let mut p = weekly_fridays();
    p.active = false;
    // Due today and overdue alike: paused wins.
    assert!(!should_generate_instance(&p, date(2026, 1, 9), DEFAULT_WINDOW_DAYS).unwrap());
    assert!(!should_generate_instance(&p, date(2026, 3, 1), DEFAULT_WINDOW_DAYS).unwrap());
}

#[test]
fn never_generated_pattern_is_due_on_its_first_occurrence() {
    // 2026-01-09 is a Friday; with no cursor the reference is the day before,
    // so an occurrence landing today is picked up immediately.
    let p = weekly_fridays();
    assert!(should_generate_instance(&p, date(2026, 1, 9), 0).unwrap());
}

#[test]
fn occurrence_inside_the_window_is_due() {
    // Friday the 9th seen from Wednesday the 7th, window 7.
    let p = weekly_fridays();
    assert!(should_generate_instance(&p, date(2026, 1, 7), DEFAULT_WINDOW_DAYS).unwrap());
}

#[test]
fn occurrence_beyond_the_window_is_not_due() {
    let mut p = weekly_fridays();
    p.advance_cursor(date(2026, 1, 9));
    // Next Friday is the 16th; a zero-day window from the 10th misses it.
    assert!(!should_generate_instance(&p, date(2026, 1, 10), 0).unwrap());
}

#[test]
fn ended_pattern_is_not_due() {
    let mut p = weekly_fridays();
    p.max_occurrences = Some(2);
    p.instances_generated = 2;
    assert!(!should_generate_instance(&p, date(2026, 1, 9), DEFAULT_WINDOW_DAYS).unwrap());
}

#[test]
fn generated_instance_copies_the_pattern() {
    let mut p = weekly_fridays();
    p.goal_ref = Some("Q1 visibility".into());
    p.notes = Some("Keep it short".into());
    p.due_time = Some("17:00".into());
    p.timezone = Some("Europe/Madrid".into());

    let (c, tasks) = generate_instance(&p, date(2026, 1, 9));
    assert_eq!(c.pattern_id, 7);
    assert_eq!(c.deliverable, "Status report");
    assert_eq!(c.stakeholder, "Alice");
    assert_eq!(c.goal_ref, Some("Q1 visibility".into()));
    assert_eq!(c.due_date, date(2026, 1, 9));
    assert_eq!(c.due_time, Some("17:00".into()));
    assert_eq!(c.timezone, Some("Europe/Madrid".into()));
    assert_eq!(c.status, WorkStatus::Pending);
    // Ids are the caller's job.
    assert_eq!(c.id, 0);
    assert!(tasks.is_empty());
}

#[test]
fn checklist_is_deep_copied_in_template_order() {
    let mut p = weekly_fridays();
    p.task_templates = vec![
        TaskTemplate {
            title: "Send".into(),
            scope: None,
            order: 2,
            subtasks: vec![],
        },
        TaskTemplate {
            title: "Draft".into(),
            scope: Some("one page".into()),
            order: 1,
            subtasks: vec!["Collect numbers".into(), "Write summary".into()],
        },
    ];

    let (_, tasks) = generate_instance(&p, date(2026, 1, 9));
    assert_eq!(tasks.len(), 2);
    // Ordered by the template's order field, not by storage order.
    assert_eq!(tasks[0].title, "Draft");
    assert_eq!(tasks[1].title, "Send");
    assert_eq!(tasks[0].scope, Some("one page".into()));
    assert!(tasks.iter().all(|t| t.status == WorkStatus::Pending));
    assert_eq!(tasks[0].subtasks.len(), 2);
    assert!(tasks[0].subtasks.iter().all(|s| !s.completed));
    assert_eq!(tasks[0].subtasks[0].description, "Collect numbers");
}

#[test]
fn generate_twice_without_advance_duplicates() {
    // The generator does not dedupe: without a cursor advance in between, the
    // same occurrence materializes twice, as two structurally identical but
    // independent items. At-most-once is the transactional caller's job.
    let mut p = weekly_fridays();
    p.task_templates = vec![TaskTemplate {
        title: "Draft".into(),
        scope: None,
        order: 1,
        subtasks: vec!["Write".into()],
    }];

    let due = date(2026, 1, 9);
    let (c1, t1) = generate_instance(&p, due);
    let (c2, mut t2) = generate_instance(&p, due);
    assert_eq!(c1, c2);
    assert_eq!(t1, t2);
    // Independent copies: mutating one leaves the other untouched.
    t2[0].subtasks[0].completed = true;
    assert!(!t1[0].subtasks[0].completed);
}

#[test]
fn cursor_advance_moves_both_fields_together() {
    let mut p = weekly_fridays();
    assert_eq!(p.instances_generated, 0);
    p.advance_cursor(date(2026, 1, 9));
    assert_eq!(p.last_generated_date, Some(date(2026, 1, 9)));
    assert_eq!(p.instances_generated, 1);
    p.advance_cursor(date(2026, 1, 16));
    assert_eq!(p.last_generated_date, Some(date(2026, 1, 16)));
    assert_eq!(p.instances_generated, 2);
}

#[test]
fn misconfigured_pattern_surfaces_the_error() {
    let p = RecurrencePattern::new(1, RecurrenceType::Weekly, 1, "Report", "Alice");
    assert!(should_generate_instance(&p, date(2026, 1, 9), DEFAULT_WINDOW_DAYS).is_err());
}
