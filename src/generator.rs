use chrono::{Duration, NaiveDate};

use crate::error::PatternError;
use crate::models::{Commitment, CommitmentTask, RecurrencePattern, SubTask, WorkStatus};
use crate::recurrence::next_due_date;

/// How many days ahead of "now" an occurrence counts as due for generation.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Decides whether `pattern` has an occurrence due within the lookahead window.
///
/// The reference point is the generation cursor (`last_generated_date`) when
/// set, otherwise the day before `current_date`, so a never-generated pattern
/// whose occurrence lands today is picked up immediately. Paused patterns never
/// generate. The caller supplies `current_date`; this function reads no clock.
pub fn should_generate_instance(
    pattern: &RecurrencePattern,
    current_date: NaiveDate,
    window_days: i64,
) -> Result<bool, PatternError> {
    if !pattern.active {
        return Ok(false);
    }
    let reference = pattern
        .last_generated_date
        .unwrap_or(current_date - Duration::days(1));
    match next_due_date(pattern, reference)? {
        Some(next) => Ok(next <= current_date + Duration::days(window_days)),
        None => Ok(false),
    }
}

/// Materializes one occurrence of `pattern` as an unsaved commitment plus its
/// checklist, deep-copied from the pattern's templates in template order.
///
/// Performs no persistence, no cursor mutation, and no deduplication: the
/// caller saves the result and advances the pattern's cursor in the same unit
/// of work, which is where the at-most-once guarantee lives. Called twice for
/// the same occurrence without advancing the cursor, it happily builds two
/// identical independent items.
pub fn generate_instance(
    pattern: &RecurrencePattern,
    due_date: NaiveDate,
) -> (Commitment, Vec<CommitmentTask>) {
    let commitment = Commitment {
        id: 0, // assigned by the caller at save time
        pattern_id: pattern.id,
        deliverable: pattern.deliverable_template.clone(),
        stakeholder: pattern.stakeholder_ref.clone(),
        goal_ref: pattern.goal_ref.clone(),
        notes: pattern.notes.clone(),
        due_date,
        due_time: pattern.due_time.clone(),
        timezone: pattern.timezone.clone(),
        status: WorkStatus::Pending,
        created_at: String::new(), // assigned by the caller at save time
    };

    let mut templates: Vec<_> = pattern.task_templates.iter().collect();
    templates.sort_by_key(|t| t.order);
    let tasks = templates
        .into_iter()
        .map(|t| CommitmentTask {
            id: 0,
            commitment_id: 0,
            title: t.title.clone(),
            scope: t.scope.clone(),
            order: t.order,
            status: WorkStatus::Pending,
            subtasks: t
                .subtasks
                .iter()
                .map(|description| SubTask {
                    description: description.clone(),
                    completed: false,
                })
                .collect(),
        })
        .collect();

    (commitment, tasks)
}
