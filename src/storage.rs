use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::models::{Commitment, CommitmentTask, RecurrencePattern};

/// Returns the path to the patterns database file (`patterns.json`).
///
/// The path is determined in the following order:
/// 1. `CADENCE_DB` environment variable.
/// 2. `~/.local/share/cadence/patterns.json` (on Linux).
/// 3. `./patterns.json` (fallback).
fn db_path() -> PathBuf {
    std::env::var("CADENCE_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("cadence");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("patterns.json");
        p
    })
}

/// Returns the path to the commitments database file (`commitments.json`).
///
/// Located in the same directory as the patterns database.
fn commitments_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("commitments.json");
    p
}

/// Returns the path to the checklist-tasks database file (`tasks.json`).
///
/// Located in the same directory as the patterns database.
fn tasks_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("tasks.json");
    p
}

fn read_list<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|_| Vec::new())
}

fn write_list<T: serde::Serialize>(path: &Path, items: &[T]) -> std::io::Result<()> {
    let s = serde_json::to_string_pretty(items)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Loads all recurrence patterns from the storage file.
///
/// Returns an empty vector if the file does not exist or cannot be read.
pub fn load_patterns() -> Vec<RecurrencePattern> {
    read_list(&db_path())
}

/// Saves the given list of patterns to the storage file, overwriting it.
pub fn save_patterns(patterns: &[RecurrencePattern]) -> std::io::Result<()> {
    write_list(&db_path(), patterns)
}

/// Loads all generated commitments from the storage file.
pub fn load_commitments() -> Vec<Commitment> {
    read_list(&commitments_path())
}

/// Saves the given list of commitments to the storage file, overwriting it.
pub fn save_commitments(commitments: &[Commitment]) -> std::io::Result<()> {
    write_list(&commitments_path(), commitments)
}

/// Loads a single commitment by its ID.
pub fn load_commitment(id: u64) -> Option<Commitment> {
    load_commitments().into_iter().find(|c| c.id == id)
}

/// Loads all commitment checklist tasks from the storage file.
pub fn load_tasks() -> Vec<CommitmentTask> {
    read_list(&tasks_path())
}

/// Saves the given list of checklist tasks to the storage file, overwriting it.
pub fn save_tasks(tasks: &[CommitmentTask]) -> std::io::Result<()> {
    write_list(&tasks_path(), tasks)
}

/// Deletes the patterns, commitments and tasks database files.
pub fn delete_database() -> std::io::Result<()> {
    for path in [db_path(), commitments_path(), tasks_path()] {
        if path.exists() {
            fs::remove_file(path)?;
        }
    }
    Ok(())
}
