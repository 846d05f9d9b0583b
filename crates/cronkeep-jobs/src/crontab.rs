//! Crontab table access.
//!
//! The user's crontab is an external, shared resource. This module exposes it
//! behind the smallest possible seam — read the whole table, write the whole
//! table — so [`crate::store::JobStore`] can be tested against an in-memory
//! table instead of the real one.
//!
//! [`SystemCrontab`] shells out to the system `crontab` program (`crontab -l`
//! to read, `crontab -` to write), mirroring what every other crontab tool
//! does. There is no locking: a concurrent external edit between the read and
//! the write of one invocation is lost.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::{
    error::{JobError, Result},
    types::{CrontabLine, JobEntry},
};

/// Marker comment introducing a cronkeep-owned line: ` # cronkeep[`.
const MARKER_COMMENT: &str = " # cronkeep[";

/// Full-table access to a crontab: ordered lines in, ordered lines out.
///
/// `write` has replace semantics — the entire table is overwritten with the
/// given lines. Implementations surface permission problems as
/// [`JobError::PermissionDenied`] and everything else as [`JobError::Store`]
/// or [`JobError::Io`].
pub trait CrontabTable {
    fn read(&self) -> Result<Vec<CrontabLine>>;
    fn write(&mut self, lines: &[CrontabLine]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Line parsing / rendering
// ---------------------------------------------------------------------------

/// Parse one crontab line.
///
/// A line is an [`CrontabLine::Entry`] iff it carries the marker comment and
/// its head splits into five schedule fields plus a non-empty command.
/// Everything else — blank lines, comments, environment assignments, foreign
/// jobs, `@reboot`-style shortcuts, malformed lines — is [`CrontabLine::Raw`]
/// and round-trips verbatim.
pub fn parse_line(line: &str) -> CrontabLine {
    let raw = || CrontabLine::Raw(line.to_string());

    // The marker comment is appended last when rendering, so match the last
    // occurrence: a tag can then never shadow the real marker.
    let Some((head, rest)) = line.rsplit_once(MARKER_COMMENT) else {
        return raw();
    };
    let Some((id, tail)) = rest.split_once(']') else {
        return raw();
    };
    if id.is_empty() {
        return raw();
    }

    // A commented-out entry is not a live job.
    let head = head.trim_end();
    if head.trim_start().starts_with('#') {
        return raw();
    }

    let Some((schedule, command)) = split_schedule(head) else {
        return raw();
    };

    let tag = tail.trim();
    CrontabLine::Entry(JobEntry {
        id: id.to_string(),
        schedule,
        command: command.to_string(),
        tag: (!tag.is_empty()).then(|| tag.to_string()),
    })
}

/// Split `head` into five schedule fields and the remaining command text.
///
/// The command keeps its internal spacing; only the field separators are
/// normalised. Returns `None` for `@shortcut` lines and for heads with fewer
/// than six tokens.
fn split_schedule(head: &str) -> Option<(String, &str)> {
    let mut rest = head.trim_start();
    if rest.starts_with('@') {
        return None;
    }

    let mut fields = Vec::with_capacity(5);
    for _ in 0..5 {
        let end = rest.find(char::is_whitespace)?;
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    if rest.is_empty() {
        return None;
    }
    Some((fields.join(" "), rest))
}

/// Render one line back to crontab text.
pub fn render_line(line: &CrontabLine) -> String {
    match line {
        CrontabLine::Raw(raw) => raw.clone(),
        CrontabLine::Entry(entry) => {
            format!("{} {} # {}", entry.schedule, entry.command, entry.annotation())
        }
    }
}

/// Parse a whole crontab into lines.
pub fn parse_table(text: &str) -> Vec<CrontabLine> {
    text.lines().map(parse_line).collect()
}

/// Render a whole table. Non-empty tables end with a trailing newline, as
/// `crontab -` requires.
pub fn render_table(lines: &[CrontabLine]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.iter().map(render_line).collect::<Vec<_>>().join("\n");
    out.push('\n');
    out
}

// ---------------------------------------------------------------------------
// System crontab
// ---------------------------------------------------------------------------

/// The real user crontab, accessed through the system `crontab` program.
pub struct SystemCrontab {
    binary: String,
}

impl SystemCrontab {
    /// `binary` is the crontab program to invoke, usually just `"crontab"`.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl CrontabTable for SystemCrontab {
    fn read(&self) -> Result<Vec<CrontabLine>> {
        debug!(binary = %self.binary, "reading crontab");
        let output = Command::new(&self.binary)
            .arg("-l")
            .output()
            .map_err(map_spawn_error)?;

        if output.status.success() {
            return Ok(parse_table(&String::from_utf8_lossy(&output.stdout)));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        // `crontab -l` exits nonzero for a user with no crontab at all; that
        // is an empty table, not a failure.
        if stderr.contains("no crontab for") {
            return Ok(Vec::new());
        }
        if is_permission_diagnostic(&stderr) {
            return Err(JobError::PermissionDenied);
        }
        Err(JobError::Store(format!(
            "crontab -l exited with {}: {}",
            output.status,
            stderr.trim()
        )))
    }

    fn write(&mut self, lines: &[CrontabLine]) -> Result<()> {
        let table = render_table(lines);
        debug!(binary = %self.binary, bytes = table.len(), "writing crontab");

        let mut child = Command::new(&self.binary)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(map_spawn_error)?;

        // Keep the pipe-write result instead of returning early: the child
        // must be reaped either way, and when it bails out (broken pipe) its
        // stderr is the more useful diagnostic.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(table.as_bytes()).map_err(JobError::Io),
            None => Err(JobError::Store("crontab stdin was not captured".to_string())),
        };

        let output = child.wait_with_output()?;
        if output.status.success() {
            return written;
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if is_permission_diagnostic(&stderr) {
            return Err(JobError::PermissionDenied);
        }
        Err(JobError::Store(format!(
            "crontab - exited with {}: {}",
            output.status,
            stderr.trim()
        )))
    }
}

fn map_spawn_error(e: std::io::Error) -> JobError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        JobError::PermissionDenied
    } else {
        JobError::Io(e)
    }
}

fn is_permission_diagnostic(stderr: &str) -> bool {
    let stderr = stderr.to_ascii_lowercase();
    stderr.contains("permission denied")
        || stderr.contains("not allowed")
        || stderr.contains("must be privileged")
}

// ---------------------------------------------------------------------------
// In-memory crontab
// ---------------------------------------------------------------------------

/// In-memory [`CrontabTable`] for tests and embedding.
///
/// Failure injection covers the error paths the real crontab can take:
/// `deny_writes` simulates insufficient privilege, `fail_reads` /
/// `fail_writes` simulate generic access failures.
#[derive(Debug, Default)]
pub struct MemoryCrontab {
    lines: Vec<CrontabLine>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub deny_writes: bool,
}

impl MemoryCrontab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the table with pre-existing lines.
    pub fn with_lines(lines: Vec<CrontabLine>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Current table contents, for assertions.
    pub fn lines(&self) -> &[CrontabLine] {
        &self.lines
    }
}

impl CrontabTable for MemoryCrontab {
    fn read(&self) -> Result<Vec<CrontabLine>> {
        if self.fail_reads {
            return Err(JobError::Store("injected read failure".to_string()));
        }
        Ok(self.lines.clone())
    }

    fn write(&mut self, lines: &[CrontabLine]) -> Result<()> {
        if self.deny_writes {
            return Err(JobError::PermissionDenied);
        }
        if self.fail_writes {
            return Err(JobError::Store("injected write failure".to_string()));
        }
        self.lines = lines.to_vec();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
