//! `JobManager` — validation and orchestration in front of [`JobStore`].
//!
//! Every user-facing operation goes through here: the manager validates the
//! schedule and command before any table access, applies dry-run and
//! interactive policy, and logs failures with context before handing them
//! back to the caller. It holds no state beyond the store.

use std::io::{self, BufRead, Write};

use tracing::{error, info, warn};

use crate::{
    crontab::CrontabTable,
    error::{JobError, Result},
    schedule::is_valid_schedule,
    store::JobStore,
    types::Job,
};

/// Injectable source of interactive answers.
///
/// The CLI supplies [`StdinPrompter`]; tests supply a scripted
/// implementation so interactive flows run without a terminal.
pub trait Prompter {
    /// Ask `question` and return the raw answer line (without the newline).
    fn prompt(&mut self, question: &str) -> io::Result<String>;
}

/// Reads answers from the controlling terminal via stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&mut self, question: &str) -> io::Result<String> {
        print!("{question}");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Inputs for [`JobManager::add_job`].
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub schedule: String,
    pub command: String,
    pub tag: Option<String>,
    pub dry_run: bool,
}

/// High-level interface to manage cron jobs safely.
pub struct JobManager<T: CrontabTable> {
    store: JobStore<T>,
}

impl<T: CrontabTable> JobManager<T> {
    pub fn new(store: JobStore<T>) -> Self {
        Self { store }
    }

    /// Validate and add a job. Returns `Some(id)` on a real add, `None` on
    /// dry-run.
    ///
    /// When `prompter` is given, schedule, command, and tag are prompted for
    /// first; an empty answer keeps the already-supplied value. Validation
    /// happens after prompting, so interactive input goes through the same
    /// checks. The command check resolves only the first token on PATH —
    /// a best-effort sanity check, not a guarantee that a pipeline or a
    /// command that only exists at run time will work.
    pub fn add_job(
        &mut self,
        mut opts: AddOptions,
        prompter: Option<&mut dyn Prompter>,
    ) -> Result<Option<String>> {
        if let Some(prompter) = prompter {
            fill_interactively(&mut opts, prompter)?;
        }

        if !is_valid_schedule(&opts.schedule) {
            error!(schedule = %opts.schedule, "rejected invalid cron schedule");
            return Err(JobError::InvalidSchedule(opts.schedule));
        }
        if let Some(missing) = unresolvable_command(&opts.command) {
            error!(command = %opts.command, "command does not resolve on PATH");
            return Err(JobError::CommandNotFound(missing));
        }

        if opts.dry_run {
            info!(schedule = %opts.schedule, command = %opts.command, "dry-run: job not added");
            return Ok(None);
        }

        match self.store.add(&opts.schedule, &opts.command, opts.tag.as_deref()) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                error!(schedule = %opts.schedule, command = %opts.command, error = %e, "failed to add job");
                Err(e)
            }
        }
    }

    /// All cronkeep-owned jobs, in crontab order.
    ///
    /// An empty result can mean "no jobs" or an absorbed read failure; the
    /// latter is logged at error level inside the store.
    pub fn list_jobs(&self) -> Vec<Job> {
        self.store.list_all()
    }

    /// Remove a job by id. Returns `true` on a real removal, `false` on
    /// dry-run.
    pub fn remove_job(&mut self, id: &str, dry_run: bool) -> Result<bool> {
        if dry_run {
            info!(job_id = %id, "dry-run: job not removed");
            return Ok(false);
        }
        match self.store.remove(id) {
            Ok(()) => Ok(true),
            Err(e @ JobError::NotFound { .. }) => {
                warn!(job_id = %id, "remove target not found");
                Err(e)
            }
            Err(e) => {
                error!(job_id = %id, error = %e, "failed to remove job");
                Err(e)
            }
        }
    }
}

/// Prompt for each add field, keeping the supplied value on empty answers.
fn fill_interactively(opts: &mut AddOptions, prompter: &mut dyn Prompter) -> Result<()> {
    let schedule = prompter.prompt("Enter cron schedule (e.g. '0 5 * * *'): ")?;
    if !schedule.trim().is_empty() {
        opts.schedule = schedule.trim().to_string();
    }

    let command = prompter.prompt("Enter command to execute: ")?;
    if !command.trim().is_empty() {
        opts.command = command.trim().to_string();
    }

    let tag = prompter.prompt("Enter optional tag: ")?;
    if !tag.trim().is_empty() {
        opts.tag = Some(tag.trim().to_string());
    }
    Ok(())
}

/// Returns the first token of `command` when it does not resolve to an
/// executable, `None` when it does.
fn unresolvable_command(command: &str) -> Option<String> {
    let token = command.split_whitespace().next().unwrap_or("");
    if token.is_empty() || which::which(token).is_err() {
        Some(token.to_string())
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crontab::MemoryCrontab;

    /// Scripted prompter: pops answers front-to-back, empty when exhausted.
    struct ScriptedPrompter {
        answers: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().rev().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn prompt(&mut self, _question: &str) -> io::Result<String> {
            Ok(self.answers.pop().unwrap_or_default())
        }
    }

    fn manager() -> JobManager<MemoryCrontab> {
        JobManager::new(JobStore::new(MemoryCrontab::new()))
    }

    fn add_opts(schedule: &str, command: &str) -> AddOptions {
        AddOptions {
            schedule: schedule.to_string(),
            command: command.to_string(),
            ..AddOptions::default()
        }
    }

    #[test]
    fn add_validates_then_stores() {
        let mut mgr = manager();
        let id = mgr.add_job(add_opts("0 5 * * *", "sh -c 'echo hi'"), None).unwrap();
        let id = id.expect("real add returns an id");

        let jobs = mgr.list_jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, id);
    }

    #[test]
    fn invalid_schedule_aborts_before_any_mutation() {
        let mut mgr = manager();
        assert!(matches!(
            mgr.add_job(add_opts("100 * * * *", "sh"), None),
            Err(JobError::InvalidSchedule(_))
        ));
        assert!(mgr.list_jobs().is_empty());
    }

    #[test]
    fn unknown_command_aborts_before_any_mutation() {
        let mut mgr = manager();
        assert!(matches!(
            mgr.add_job(add_opts("* * * * *", "definitely-not-a-real-command-xyz"), None),
            Err(JobError::CommandNotFound(_))
        ));
        assert!(mgr.list_jobs().is_empty());
    }

    #[test]
    fn command_check_uses_only_the_first_token() {
        let mut mgr = manager();
        // Arguments after the first token are opaque to the check.
        let added = mgr
            .add_job(add_opts("* * * * *", "sh -c 'no-such-thing'"), None)
            .unwrap();
        assert!(added.is_some());
    }

    #[test]
    fn dry_run_add_changes_nothing() {
        let mut mgr = manager();
        let mut opts = add_opts("0 5 * * *", "sh");
        opts.dry_run = true;
        assert_eq!(mgr.add_job(opts, None).unwrap(), None);
        assert!(mgr.list_jobs().is_empty());
    }

    #[test]
    fn interactive_answers_override_supplied_values() {
        let mut mgr = manager();
        let mut prompter = ScriptedPrompter::new(&["*/10 * * * *", "sh -c date", "heartbeat"]);
        let id = mgr
            .add_job(add_opts("0 5 * * *", "sh"), Some(&mut prompter))
            .unwrap()
            .unwrap();

        let jobs = mgr.list_jobs();
        assert_eq!(jobs[0].id, id);
        assert_eq!(jobs[0].schedule, "*/10 * * * *");
        assert_eq!(jobs[0].command, "sh -c date");
        assert_eq!(jobs[0].tag.as_deref(), Some("heartbeat"));
    }

    #[test]
    fn empty_interactive_answers_keep_supplied_values() {
        let mut mgr = manager();
        let mut prompter = ScriptedPrompter::new(&["", "  ", ""]);
        let mut opts = add_opts("0 5 * * *", "sh");
        opts.tag = Some("supplied".to_string());
        mgr.add_job(opts, Some(&mut prompter)).unwrap();

        let jobs = mgr.list_jobs();
        assert_eq!(jobs[0].schedule, "0 5 * * *");
        assert_eq!(jobs[0].command, "sh");
        assert_eq!(jobs[0].tag.as_deref(), Some("supplied"));
    }

    #[test]
    fn interactive_input_is_still_validated() {
        let mut mgr = manager();
        let mut prompter = ScriptedPrompter::new(&["not a schedule", "", ""]);
        assert!(matches!(
            mgr.add_job(add_opts("0 5 * * *", "sh"), Some(&mut prompter)),
            Err(JobError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn dry_run_remove_changes_nothing() {
        let mut mgr = manager();
        let id = mgr.add_job(add_opts("0 5 * * *", "sh"), None).unwrap().unwrap();
        assert!(!mgr.remove_job(&id, true).unwrap());
        assert_eq!(mgr.list_jobs().len(), 1);
    }

    #[test]
    fn remove_surfaces_not_found() {
        let mut mgr = manager();
        assert!(matches!(
            mgr.remove_job("missing", false),
            Err(JobError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_after_add_leaves_no_trace() {
        let mut mgr = manager();
        let id = mgr.add_job(add_opts("0 5 * * *", "sh"), None).unwrap().unwrap();
        assert!(mgr.remove_job(&id, false).unwrap());
        assert!(mgr.list_jobs().is_empty());
    }
}
