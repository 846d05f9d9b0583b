//! `JobStore` — job-level operations over a [`CrontabTable`].
//!
//! Translates add/list/remove into whole-table read-modify-write cycles and
//! normalises table failures into [`JobError`] variants. Identity is the
//! uuid generated at add time, matched exactly against the delimited id in
//! each entry's marker — never by substring.

use tracing::{error, info};
use uuid::Uuid;

use crate::{
    crontab::CrontabTable,
    error::{JobError, Result},
    types::{CrontabLine, Job, JobEntry, MARKER_PREFIX},
};

/// Mediates between job identity and the crontab table.
pub struct JobStore<T: CrontabTable> {
    table: T,
}

impl<T: CrontabTable> JobStore<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// Borrow the underlying table (used by tests to inspect state).
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Append one job to the crontab and return its generated id.
    ///
    /// The schedule is expected to be validated by the caller; this layer
    /// only enforces what would corrupt the table: empty commands, embedded
    /// newlines, and tags that spoof the marker. On any failure the table
    /// is left untouched.
    pub fn add(&mut self, schedule: &str, command: &str, tag: Option<&str>) -> Result<String> {
        let command = command.trim();
        if command.is_empty() {
            return Err(JobError::InvalidInput("command is empty".to_string()));
        }
        if command.contains('\n') {
            return Err(JobError::InvalidInput(
                "command must not contain newlines".to_string(),
            ));
        }
        if let Some(tag) = tag {
            if tag.contains('\n') {
                return Err(JobError::InvalidInput(
                    "tag must not contain newlines".to_string(),
                ));
            }
            if tag.contains(MARKER_PREFIX) {
                return Err(JobError::InvalidInput(
                    "tag must not contain the cronkeep marker".to_string(),
                ));
            }
        }

        let id = Uuid::new_v4().to_string();
        let mut lines = self.table.read()?;
        lines.push(CrontabLine::Entry(JobEntry {
            id: id.clone(),
            schedule: schedule.to_string(),
            command: command.to_string(),
            tag: tag.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
        }));
        self.table.write(&lines)?;

        info!(job_id = %id, %schedule, %command, "job added");
        Ok(id)
    }

    /// All cronkeep-owned jobs, in table order.
    ///
    /// Best-effort by design: a read failure is logged and yields an empty
    /// list rather than an error. No mutation happens on this path, so
    /// nothing can be lost.
    pub fn list_all(&self) -> Vec<Job> {
        let lines = match self.table.read() {
            Ok(lines) => lines,
            Err(e) => {
                error!(error = %e, "failed to read crontab while listing jobs");
                return Vec::new();
            }
        };
        lines
            .iter()
            .filter_map(|line| match line {
                CrontabLine::Entry(entry) => Some(entry.to_job()),
                CrontabLine::Raw(_) => None,
            })
            .collect()
    }

    /// Remove every entry whose id equals `id` exactly.
    ///
    /// All-or-nothing: either the rewritten table is persisted without the
    /// matching entries, or an error is returned and the table is unchanged.
    /// Zero matches is [`JobError::NotFound`] and performs no write.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let lines = self.table.read()?;
        let before = lines.len();
        let kept: Vec<CrontabLine> = lines
            .into_iter()
            .filter(|line| !matches!(line, CrontabLine::Entry(entry) if entry.id == id))
            .collect();

        let removed = before - kept.len();
        if removed == 0 {
            return Err(JobError::NotFound { id: id.to_string() });
        }

        self.table.write(&kept)?;
        info!(job_id = %id, removed, "job removed");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
