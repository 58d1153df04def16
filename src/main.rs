//! # Cadence
//!
//! A terminal tracker for recurring commitments ("I will deliver X to Y every
//! week"). Cadence stores recurrence patterns, computes when the next concrete
//! occurrence of each pattern is due, and materializes it exactly once as a
//! commitment with its own checklist.
//!
//! ## Features
//!
//! *   **Calendar patterns**: daily, weekly (weekday sets), monthly (day of
//!     month, or Nth/last weekday), yearly, each with an "every N" interval.
//! *   **Exactly-once generation**: run the sweep as often as you like; each
//!     occurrence becomes one commitment, never two, never silently zero.
//! *   **Checklists**: task templates on a pattern are deep-copied into every
//!     generated commitment.
//! *   **Independent lifecycle**: commitments evolve (pending, in progress,
//!     completed, skipped) and survive their pattern's deletion.
//! *   **Data Persistence**: stored in standard XDG data directories (JSON).
//!
//! ## Usage
//!
//! **Adding patterns**
//! ```bash
//! # Weekly report, Mondays and Thursdays
//! cadence add "Status report" --to "Alice" --recur weekly --on mon,thu
//!
//! # Invoice on the last Friday of every month, with a checklist
//! cadence add "Invoice" --to "Acme" --recur monthly --week last --on fri \
//!     --task "Collect hours" --task "Send PDF"
//!
//! # Every 2 weeks, at most 10 times
//! cadence add "Newsletter" --to "Subscribers" --recur weekly --on fri \
//!     --every 2 --max 10
//! ```
//!
//! **Generating and working**
//! ```bash
//! # Generate everything due in the next 7 days (run this on startup/cron)
//! cadence run
//!
//! # Deterministic runs for scripting
//! cadence run --date 2026-03-01 --window 3
//!
//! cadence list            # patterns with schedule and next due date
//! cadence commitments     # open commitments
//! cadence show 3          # one commitment with its checklist
//! cadence complete 3
//! ```
//!
//! ## Data Storage
//!
//! Patterns and commitments are saved in your local data directory:
//! *   Linux: `~/.local/share/cadence/patterns.json`
//! *   macOS: `~/Library/Application Support/cadence/patterns.json`
//! *   Windows: `%APPDATA%\cadence\patterns.json`
//!
//! You can override this by setting the `CADENCE_DB` environment variable.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use cadence::commands::*;
use cadence::generator::DEFAULT_WINDOW_DAYS;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Terminal tracker for recurring commitments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new recurrence pattern
    Add {
        /// Deliverable (quoted if it has spaces)
        deliverable: String,
        /// Stakeholder the deliverable goes to
        #[arg(short, long = "to")]
        to: String,
        /// Recurrence (daily, weekly, monthly, yearly)
        #[arg(short, long)]
        recur: String,
        /// Every N units (default 1)
        #[arg(short, long, default_value_t = 1)]
        every: u32,
        /// Weekdays, comma-separated (e.g. mon,wed,fri)
        #[arg(short, long)]
        on: Option<String>,
        /// Day of month (1-31, clamped to short months)
        #[arg(short, long)]
        day: Option<u32>,
        /// Week of month (1-4, or 'last')
        #[arg(short, long)]
        week: Option<String>,
        /// Month of year (1-12, yearly patterns)
        #[arg(short, long)]
        month: Option<u32>,
        /// Due time of day, carried through as-is (e.g. 17:00)
        #[arg(long)]
        time: Option<String>,
        /// Timezone label, carried through as-is
        #[arg(long)]
        tz: Option<String>,
        /// Goal this commitment serves
        #[arg(short, long)]
        goal: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Stop generating after this date (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
        /// Stop generating after this many occurrences
        #[arg(long)]
        max: Option<u32>,
        /// Checklist task title (repeatable, in order)
        #[arg(long = "task")]
        tasks: Vec<String>,
    },
    /// List recurrence patterns
    List {
        /// Include paused and ended patterns
        #[arg(short, long)]
        all: bool,
    },
    /// Generate commitments due within the lookahead window
    Run {
        /// Current date override (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Lookahead window in days
        #[arg(short, long, default_value_t = DEFAULT_WINDOW_DAYS)]
        window: i64,
    },
    /// Pause a pattern
    Pause { id: u64 },
    /// Resume a paused pattern
    Resume { id: u64 },
    /// Remove a pattern (generated commitments are kept)
    Remove { id: u64 },
    /// List generated commitments
    Commitments {
        /// Include completed and skipped commitments
        #[arg(short, long)]
        all: bool,
    },
    /// Show one commitment with its checklist
    Show { id: u64 },
    /// Mark a commitment as in progress
    Start { id: u64 },
    /// Mark a commitment as completed
    Complete { id: u64 },
    /// Mark a commitment as skipped
    Skip { id: u64 },
    /// Reset the database (delete all patterns and commitments)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add {
            deliverable,
            to,
            recur,
            every,
            on,
            day,
            week,
            month,
            time,
            tz,
            goal,
            notes,
            until,
            max,
            tasks,
        }) => cmd_add(
            NewPatternInput {
                deliverable,
                stakeholder: to,
                recur,
                every,
                on,
                day,
                week,
                month,
                due_time: time,
                timezone: tz,
                goal,
                notes,
                end: until,
                max,
                tasks,
            },
            false,
        ),
        Some(Commands::Run { date, window }) => cmd_run(date, window, false),
        Some(Commands::Pause { id }) => cmd_pause(id, false),
        Some(Commands::Resume { id }) => cmd_resume(id, false),
        Some(Commands::Remove { id }) => cmd_remove(id, false),
        Some(Commands::Commitments { all }) => cmd_commitments(all),
        Some(Commands::Show { id }) => cmd_show(id),
        Some(Commands::Start { id }) => cmd_start(id, false),
        Some(Commands::Complete { id }) => cmd_complete(id, false),
        Some(Commands::Skip { id }) => cmd_skip(id, false),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "cadence", &mut io::stdout());
        }
        Some(Commands::List { all }) => cmd_list(all),
        None => cmd_list(false),
    }
}
