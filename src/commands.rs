use std::io::{self, Write};

use chrono::{Duration, Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::generator::{generate_instance, should_generate_instance};
use crate::models::{parse_weekday, RecurrencePattern, RecurrenceType, TaskTemplate, WorkStatus};
use crate::recurrence::{next_due_date, validate_pattern};
use crate::storage::{
    delete_database, load_commitment, load_commitments, load_patterns, load_tasks,
    save_commitments, save_patterns, save_tasks,
};
use crate::summary::format_pattern_summary;

/// At most this many occurrences are emitted per pattern in one sweep. A
/// pattern further behind resumes from its cursor on the next run, so nothing
/// is skipped.
const CATCH_UP_CAP: u32 = 100;

/// Raw command-line input for a new recurrence pattern, before validation.
pub struct NewPatternInput {
    pub deliverable: String,
    pub stakeholder: String,
    pub recur: String,
    pub every: u32,
    pub on: Option<String>,
    pub day: Option<u32>,
    pub week: Option<String>,
    pub month: Option<u32>,
    pub due_time: Option<String>,
    pub timezone: Option<String>,
    pub goal: Option<String>,
    pub notes: Option<String>,
    pub end: Option<String>,
    pub max: Option<u32>,
    pub tasks: Vec<String>,
}

/// Adds a new recurrence pattern to the database.
///
/// The structured flags are parsed here; the pattern is validated with the
/// engine's own checks before anything is saved, so a pattern that would later
/// fail generation is rejected up front.
pub fn cmd_add(input: NewPatternInput, silent: bool) {
    let recurrence_type = match input.recur.to_lowercase().as_str() {
        "daily" => RecurrenceType::Daily,
        "weekly" => RecurrenceType::Weekly,
        "monthly" => RecurrenceType::Monthly,
        "yearly" => RecurrenceType::Yearly,
        other => {
            if !silent {
                eprintln!(
                    "Unknown recurrence '{}'. Supported: daily, weekly, monthly, yearly.",
                    other
                );
            }
            return;
        }
    };

    let mut days_of_week = Vec::new();
    if let Some(on) = &input.on {
        for part in on.split(',') {
            match parse_weekday(part) {
                Some(d) => days_of_week.push(d),
                None => {
                    if !silent {
                        eprintln!("Unknown weekday '{}'. Use names like mon,wed,fri.", part.trim());
                    }
                    return;
                }
            }
        }
    }

    let week_of_month = match input.week.as_deref() {
        None => None,
        Some(w) if w.eq_ignore_ascii_case("last") => Some(-1),
        Some(w) => match w.parse::<i8>() {
            Ok(n) => Some(n),
            Err(_) => {
                if !silent {
                    eprintln!("Invalid week '{}'. Use 1-4 or 'last'.", w);
                }
                return;
            }
        },
    };

    let end_date = match &input.end {
        None => None,
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(e) => {
                if !silent {
                    eprintln!("Invalid end date '{}': {}. Use YYYY-MM-DD.", s, e);
                }
                return;
            }
        },
    };

    let task_templates = input
        .tasks
        .iter()
        .enumerate()
        .map(|(i, title)| TaskTemplate {
            title: title.clone(),
            scope: None,
            order: i as u32 + 1,
            subtasks: Vec::new(),
        })
        .collect();

    let mut patterns = load_patterns();
    let next_id = patterns.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let pattern = RecurrencePattern {
        id: next_id,
        recurrence_type,
        interval: input.every,
        days_of_week,
        day_of_month: input.day,
        week_of_month,
        month_of_year: input.month,
        due_time: input.due_time,
        timezone: input.timezone,
        deliverable_template: input.deliverable,
        stakeholder_ref: input.stakeholder,
        goal_ref: input.goal,
        notes: input.notes,
        task_templates,
        last_generated_date: None,
        instances_generated: 0,
        active: true,
        end_date,
        max_occurrences: input.max,
        created_at: Local::now().to_rfc3339(),
    };

    if let Err(e) = validate_pattern(&pattern) {
        if !silent {
            eprintln!("Invalid pattern: {}", e);
        }
        return;
    }

    patterns.push(pattern);
    if let Err(e) = save_patterns(&patterns) {
        if !silent {
            eprintln!("Failed to save patterns: {}", e);
        }
    } else if !silent {
        println!("Pattern added (id = {})", next_id);
    }
}

/// Runs one generation sweep as of `date` (today when not given).
///
/// For every active pattern with an occurrence due within the window, a
/// commitment and its checklist are materialized and the pattern's cursor is
/// advanced. A pattern several occurrences behind emits each missed occurrence;
/// running the sweep again at the same date generates nothing new.
pub fn cmd_run(date: Option<String>, window_days: i64, silent: bool) {
    let current = match date {
        Some(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                if !silent {
                    eprintln!("Invalid date '{}': {}. Use YYYY-MM-DD.", s, e);
                }
                return;
            }
        },
        None => Local::now().date_naive(),
    };

    let mut patterns = load_patterns();
    let mut commitments = load_commitments();
    let mut tasks = load_tasks();
    let mut next_commitment_id = commitments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    let mut next_task_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let mut generated = 0u32;

    for pattern in patterns.iter_mut() {
        // Catch-up loop: the cursor moves strictly forward each pass, so this
        // terminates once the next occurrence leaves the window or the
        // per-sweep cap is hit.
        let mut emitted = 0u32;
        while emitted < CATCH_UP_CAP {
            match should_generate_instance(pattern, current, window_days) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    if !silent {
                        eprintln!("Pattern {} is misconfigured: {}", pattern.id, e);
                    }
                    break;
                }
            }
            let reference = pattern
                .last_generated_date
                .unwrap_or(current - Duration::days(1));
            let due = match next_due_date(pattern, reference) {
                Ok(Some(d)) => d,
                _ => break,
            };
            let (mut commitment, mut checklist) = generate_instance(pattern, due);
            commitment.id = next_commitment_id;
            next_commitment_id += 1;
            commitment.created_at = Local::now().to_rfc3339();
            for task in checklist.iter_mut() {
                task.id = next_task_id;
                next_task_id += 1;
                task.commitment_id = commitment.id;
            }
            if !silent {
                println!(
                    "Generated commitment {} for pattern {} (due {})",
                    commitment.id, pattern.id, due
                );
            }
            commitments.push(commitment);
            tasks.append(&mut checklist);
            pattern.advance_cursor(due);
            emitted += 1;
            generated += 1;
        }
    }

    if generated == 0 {
        if !silent {
            println!("Nothing due within {} days.", window_days);
        }
        return;
    }

    // Instances are written before the advanced cursors: an interrupted run
    // regenerates instead of silently skipping an occurrence.
    if let Err(e) = save_commitments(&commitments) {
        if !silent {
            eprintln!("Failed to save commitments: {}", e);
        }
        return;
    }
    if let Err(e) = save_tasks(&tasks) {
        if !silent {
            eprintln!("Failed to save tasks: {}", e);
        }
        return;
    }
    if let Err(e) = save_patterns(&patterns) {
        if !silent {
            eprintln!("Failed to save patterns: {}", e);
        }
        return;
    }
    if !silent {
        println!("Generated {} commitment(s).", generated);
    }
}

/// Lists recurrence patterns in a formatted table.
///
/// By default, hides paused and ended patterns unless `all` is true.
pub fn cmd_list(all: bool) {
    let patterns = load_patterns();
    if patterns.is_empty() {
        println!("No patterns found.");
        return;
    }

    let today = Local::now().date_naive();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Deliverable").add_attribute(Attribute::Bold),
            Cell::new("Stakeholder").add_attribute(Attribute::Bold),
            Cell::new("Schedule").add_attribute(Attribute::Bold),
            Cell::new("Next Due").add_attribute(Attribute::Bold),
            Cell::new("Generated").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    let mut shown = 0;
    for p in &patterns {
        let reference = p.last_generated_date.unwrap_or(today - Duration::days(1));
        let next = next_due_date(p, reference);
        let (status, status_color, next_str) = match (p.active, &next) {
            (false, _) => ("Paused", Color::Grey, "-".to_string()),
            (true, Ok(Some(d))) => ("Active", Color::Green, d.to_string()),
            (true, Ok(None)) => ("Ended", Color::Grey, "-".to_string()),
            (true, Err(_)) => ("Invalid", Color::Red, "?".to_string()),
        };
        if !all && (status == "Paused" || status == "Ended") {
            continue;
        }
        shown += 1;
        table.add_row(vec![
            Cell::new(p.id),
            Cell::new(&p.deliverable_template),
            Cell::new(&p.stakeholder_ref),
            Cell::new(format_pattern_summary(p)),
            Cell::new(next_str),
            Cell::new(p.instances_generated),
            Cell::new(status).fg(status_color),
        ]);
    }

    if shown == 0 {
        println!("No active patterns. Use --all to include paused and ended ones.");
    } else {
        println!("{table}");
    }
}

/// Lists generated commitments, hiding completed/skipped ones unless `all`.
pub fn cmd_commitments(all: bool) {
    let mut commitments = load_commitments();
    if !all {
        commitments.retain(|c| !c.status.is_terminal());
    }
    if commitments.is_empty() {
        println!("No commitments found.");
        return;
    }
    commitments.sort_by_key(|c| c.due_date);

    let today = Local::now().date_naive();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Deliverable").add_attribute(Attribute::Bold),
            Cell::new("Stakeholder").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Time Left").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Pattern").add_attribute(Attribute::Bold),
        ]);

    for c in commitments {
        let days_left = (c.due_date - today).num_days();
        let time_left_str = if days_left < 0 {
            format!("{}d overdue", days_left.abs())
        } else if days_left == 0 {
            "Today".to_string()
        } else {
            format!("{}d", days_left)
        };
        let status_color = match c.status {
            WorkStatus::Pending => Color::Yellow,
            WorkStatus::InProgress => Color::Cyan,
            WorkStatus::Completed => Color::Green,
            WorkStatus::Skipped => Color::Grey,
        };
        let overdue = days_left < 0 && !c.status.is_terminal();
        table.add_row(vec![
            Cell::new(c.id),
            Cell::new(&c.deliverable),
            Cell::new(&c.stakeholder),
            Cell::new(c.due_date),
            Cell::new(time_left_str).fg(if overdue { Color::Red } else { Color::Reset }),
            Cell::new(c.status.label()).fg(status_color),
            Cell::new(c.pattern_id),
        ]);
    }

    println!("{table}");
}

/// Prints one commitment with its full checklist.
pub fn cmd_show(id: u64) {
    let commitment = match load_commitment(id) {
        Some(c) => c,
        None => {
            eprintln!("Commitment {} not found.", id);
            return;
        }
    };

    println!("Commitment {}: {}", commitment.id, commitment.deliverable);
    println!("  Stakeholder: {}", commitment.stakeholder);
    if let Some(goal) = &commitment.goal_ref {
        println!("  Goal:        {}", goal);
    }
    match (&commitment.due_time, &commitment.timezone) {
        (Some(t), Some(tz)) => println!("  Due:         {} {} ({})", commitment.due_date, t, tz),
        (Some(t), None) => println!("  Due:         {} {}", commitment.due_date, t),
        _ => println!("  Due:         {}", commitment.due_date),
    }
    println!("  Status:      {}", commitment.status.label());
    println!("  Pattern:     {}", commitment.pattern_id);
    if let Some(notes) = &commitment.notes {
        println!("  Notes:       {}", notes);
    }

    let mut checklist: Vec<_> = load_tasks()
        .into_iter()
        .filter(|t| t.commitment_id == id)
        .collect();
    if checklist.is_empty() {
        return;
    }
    checklist.sort_by_key(|t| t.order);
    println!("  Checklist:");
    for task in checklist {
        let mark = match task.status {
            WorkStatus::Completed => "x",
            WorkStatus::Skipped => "-",
            _ => " ",
        };
        match &task.scope {
            Some(scope) => println!("    [{}] {} ({})", mark, task.title, scope),
            None => println!("    [{}] {}", mark, task.title),
        }
        for sub in &task.subtasks {
            let mark = if sub.completed { "x" } else { " " };
            println!("        [{}] {}", mark, sub.description);
        }
    }
}

/// Pauses a pattern so it generates nothing until resumed.
pub fn cmd_pause(id: u64, silent: bool) {
    set_pattern_active(id, false, silent);
}

/// Resumes a paused pattern.
pub fn cmd_resume(id: u64, silent: bool) {
    set_pattern_active(id, true, silent);
}

fn set_pattern_active(id: u64, active: bool, silent: bool) {
    let mut patterns = load_patterns();
    if let Some(p) = patterns.iter_mut().find(|p| p.id == id) {
        p.active = active;
        if let Err(e) = save_patterns(&patterns) {
            if !silent {
                eprintln!("Failed to save patterns: {}", e);
            }
        } else if !silent {
            println!(
                "Pattern {} {}.",
                id,
                if active { "resumed" } else { "paused" }
            );
        }
    } else if !silent {
        eprintln!("Pattern {} not found.", id);
    }
}

/// Removes a pattern. Commitments already generated from it are kept; they
/// live independently once created.
pub fn cmd_remove(id: u64, silent: bool) {
    let mut patterns = load_patterns();
    let len_before = patterns.len();
    patterns.retain(|p| p.id != id);
    if patterns.len() == len_before {
        if !silent {
            eprintln!("Pattern {} not found.", id);
        }
    } else if let Err(e) = save_patterns(&patterns) {
        if !silent {
            eprintln!("Failed to save patterns: {}", e);
        }
    } else if !silent {
        println!("Pattern {} removed.", id);
    }
}

/// Marks a pending commitment as in progress.
pub fn cmd_start(id: u64, silent: bool) {
    set_commitment_status(id, WorkStatus::InProgress, silent);
}

/// Marks a commitment as completed.
pub fn cmd_complete(id: u64, silent: bool) {
    set_commitment_status(id, WorkStatus::Completed, silent);
}

/// Marks a commitment as skipped.
pub fn cmd_skip(id: u64, silent: bool) {
    set_commitment_status(id, WorkStatus::Skipped, silent);
}

fn set_commitment_status(id: u64, status: WorkStatus, silent: bool) {
    let mut commitments = load_commitments();
    if let Some(c) = commitments.iter_mut().find(|c| c.id == id) {
        if c.status.is_terminal() {
            if !silent {
                eprintln!("Commitment {} is already {}.", id, c.status.label());
            }
            return;
        }
        c.status = status;
        if let Err(e) = save_commitments(&commitments) {
            if !silent {
                eprintln!("Failed to save commitments: {}", e);
            }
        } else if !silent {
            println!("Commitment {} marked {}.", id, status.label());
        }
    } else if !silent {
        eprintln!("Commitment {} not found.", id);
    }
}

/// Resets the database by deleting all patterns, commitments and tasks.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all patterns and commitments? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return;
        }
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
