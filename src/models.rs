use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often a recurring commitment comes due.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Which occurrence of a weekday anchors a monthly/yearly pattern.
///
/// Stored patterns keep the raw `week_of_month` integer; `5` and `-1` are two
/// spellings of the same "last occurrence" sentinel and both normalize to
/// [`WeekOfMonth::Last`] here. No other code inspects the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekOfMonth {
    /// The Nth occurrence of the weekday in the month (1-4).
    Nth(u8),
    /// The last occurrence of the weekday in the month.
    Last,
}

impl WeekOfMonth {
    /// Normalizes a raw `week_of_month` value, or `None` if out of range.
    pub fn from_raw(raw: i8) -> Option<WeekOfMonth> {
        match raw {
            1..=4 => Some(WeekOfMonth::Nth(raw as u8)),
            5 | -1 => Some(WeekOfMonth::Last),
            _ => None,
        }
    }
}

/// A template for one checklist task copied into every generated commitment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskTemplate {
    /// Task title.
    pub title: String,
    /// Optional scope note (what "done" means for this task).
    #[serde(default)]
    pub scope: Option<String>,
    /// Position within the checklist; copies preserve this ordering.
    pub order: u32,
    /// Sub-task descriptions; each becomes an unchecked [`SubTask`].
    #[serde(default)]
    pub subtasks: Vec<String>,
}

/// A recurring-commitment template plus its generation cursor.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RecurrencePattern {
    /// Unique identifier for the pattern.
    pub id: u64,
    /// The calendar shape of the recurrence.
    pub recurrence_type: RecurrenceType,
    /// "Every N units"; must be at least 1.
    pub interval: u32,
    /// Weekday indices, 0=Mon..6=Sun. Non-empty for weekly patterns; the first
    /// entry is the anchor weekday for nth-weekday monthly/yearly patterns.
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    /// Day-of-month anchor (1-31), clamped to short months. Takes precedence
    /// over `week_of_month` when both are set.
    #[serde(default)]
    pub day_of_month: Option<u32>,
    /// Week-of-month anchor; see [`WeekOfMonth::from_raw`].
    #[serde(default)]
    pub week_of_month: Option<i8>,
    /// Month (1-12); required for yearly patterns.
    #[serde(default)]
    pub month_of_year: Option<u32>,
    /// Due time of day, carried through to generated commitments unchanged.
    #[serde(default)]
    pub due_time: Option<String>,
    /// Opaque timezone label, carried through unchanged.
    #[serde(default)]
    pub timezone: Option<String>,
    /// What gets delivered; copied into each generated commitment.
    pub deliverable_template: String,
    /// Who it is delivered to.
    pub stakeholder_ref: String,
    /// Optional goal this commitment serves.
    #[serde(default)]
    pub goal_ref: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Checklist templates deep-copied into each generated commitment.
    #[serde(default)]
    pub task_templates: Vec<TaskTemplate>,
    /// Due date of the most recently generated occurrence.
    #[serde(default)]
    pub last_generated_date: Option<NaiveDate>,
    /// How many occurrences have been generated so far.
    #[serde(default)]
    pub instances_generated: u32,
    /// Paused patterns generate nothing until resumed.
    #[serde(default = "default_active")]
    pub active: bool,
    /// No occurrence is generated past this date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// No occurrence is generated once this many exist.
    #[serde(default)]
    pub max_occurrences: Option<u32>,
    /// Timestamp when the pattern was created (ISO 8601).
    pub created_at: String,
}

fn default_active() -> bool {
    true
}

impl RecurrencePattern {
    /// A pattern with the given shape and everything else at its defaults:
    /// active, no anchors, no end condition, cursor at zero.
    pub fn new(
        id: u64,
        recurrence_type: RecurrenceType,
        interval: u32,
        deliverable: &str,
        stakeholder: &str,
    ) -> RecurrencePattern {
        RecurrencePattern {
            id,
            recurrence_type,
            interval,
            days_of_week: Vec::new(),
            day_of_month: None,
            week_of_month: None,
            month_of_year: None,
            due_time: None,
            timezone: None,
            deliverable_template: deliverable.to_string(),
            stakeholder_ref: stakeholder.to_string(),
            goal_ref: None,
            notes: None,
            task_templates: Vec::new(),
            last_generated_date: None,
            instances_generated: 0,
            active: true,
            end_date: None,
            max_occurrences: None,
            created_at: String::new(),
        }
    }

    /// Advances the generation cursor for one generated occurrence.
    ///
    /// `last_generated_date` and `instances_generated` only ever move together,
    /// and only via this method; the caller persists the updated pattern in the
    /// same unit of work as the generated commitment.
    pub fn advance_cursor(&mut self, due: NaiveDate) {
        self.last_generated_date = Some(due);
        self.instances_generated += 1;
    }
}

/// Status of a generated commitment or one of its checklist tasks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl WorkStatus {
    /// Completed and skipped items do not transition further.
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkStatus::Completed | WorkStatus::Skipped)
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkStatus::Pending => "Pending",
            WorkStatus::InProgress => "In Progress",
            WorkStatus::Completed => "Completed",
            WorkStatus::Skipped => "Skipped",
        }
    }
}

/// One concrete work item generated from a pattern occurrence.
///
/// Lives independently after generation: its status evolves on its own and
/// deleting the originating pattern does not remove it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Commitment {
    /// Unique identifier for the commitment.
    pub id: u64,
    /// Back-reference to the originating pattern, for traceability only.
    pub pattern_id: u64,
    /// The deliverable, copied from the pattern template.
    pub deliverable: String,
    /// The stakeholder, copied from the pattern.
    pub stakeholder: String,
    #[serde(default)]
    pub goal_ref: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// The occurrence date this commitment materializes.
    pub due_date: NaiveDate,
    #[serde(default)]
    pub due_time: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    pub status: WorkStatus,
    /// Timestamp when the commitment was saved (ISO 8601).
    pub created_at: String,
}

/// One checklist task belonging to a generated commitment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommitmentTask {
    pub id: u64,
    pub commitment_id: u64,
    pub title: String,
    #[serde(default)]
    pub scope: Option<String>,
    pub order: u32,
    pub status: WorkStatus,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
}

/// A checkable sub-item of a commitment task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubTask {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Short weekday names indexed 0=Mon..6=Sun.
pub const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Short month names indexed 0=Jan..11=Dec.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parses a weekday name ("mon", "Monday", ...) into its 0=Mon..6=Sun index.
pub fn parse_weekday(s: &str) -> Option<u8> {
    match s.trim().to_lowercase().as_str() {
        "mon" | "monday" => Some(0),
        "tue" | "tues" | "tuesday" => Some(1),
        "wed" | "wednesday" => Some(2),
        "thu" | "thur" | "thurs" | "thursday" => Some(3),
        "fri" | "friday" => Some(4),
        "sat" | "saturday" => Some(5),
        "sun" | "sunday" => Some(6),
        _ => None,
    }
}
