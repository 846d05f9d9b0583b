//! cronkeep-jobs — crontab-backed job management for the cronkeep CLI.
//!
//! The user's crontab is treated as an external, shared table of lines.
//! Lines written by cronkeep carry a delimited marker comment
//! (`# cronkeep[<uuid>]`) so they can be recognised, listed, and removed
//! later without touching anything else in the table; every other line is
//! preserved byte-for-byte across rewrites.
//!
//! Layering:
//! - [`crontab`] — the table seam: [`crontab::CrontabTable`] (read all lines /
//!   write all lines), implemented by [`crontab::SystemCrontab`] (shells out
//!   to the `crontab` program) and [`crontab::MemoryCrontab`] (tests).
//! - [`store`] — [`store::JobStore`]: add / list / remove against a table,
//!   with typed error translation.
//! - [`manager`] — [`manager::JobManager`]: schedule + command validation,
//!   dry-run, interactive prompting, orchestration.
//! - [`schedule`] — pure five-field cron expression validator.
//!
//! # Known limitation
//!
//! The crontab is shared with the rest of the system. Each operation is one
//! read-modify-write cycle with no locking, so an external edit landing
//! between the read and the write of the same invocation is lost. The system
//! `crontab` program is relied on for the atomicity of the write itself.

pub mod crontab;
pub mod error;
pub mod manager;
pub mod schedule;
pub mod store;
pub mod types;

pub use crontab::{CrontabTable, MemoryCrontab, SystemCrontab};
pub use error::{JobError, Result};
pub use manager::{AddOptions, JobManager, Prompter, StdinPrompter};
pub use schedule::is_valid_schedule;
pub use store::JobStore;
pub use types::{CrontabLine, Job, JobEntry};
