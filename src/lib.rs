//! Recurrence engine and command layer for the `cadence` commitment tracker.
//!
//! The engine itself is pure: [`recurrence::next_due_date`] computes occurrence
//! dates, [`generator::should_generate_instance`] and
//! [`generator::generate_instance`] turn them into concrete commitments. All
//! clock reads and persistence live in [`commands`] and [`storage`].

pub mod commands;
pub mod error;
pub mod generator;
pub mod models;
pub mod recurrence;
pub mod storage;
pub mod summary;
