use serde::{Deserialize, Serialize};

/// Marker prefix embedded in the comment of every cronkeep-owned line.
///
/// The full annotation is `cronkeep[<id>]`, optionally followed by a
/// space and a free-text tag. The id is delimited by the brackets, so it
/// can never be mistaken for a substring of an unrelated tag.
pub const MARKER_PREFIX: &str = "cronkeep[";

/// A job as seen by list/remove: one cronkeep-owned crontab entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// UUID v4 string generated at add time.
    pub id: String,
    /// Five-field cron expression, rendered as stored.
    pub schedule: String,
    /// Shell command line, opaque to cronkeep.
    pub command: String,
    /// Optional human-readable label.
    pub tag: Option<String>,
}

impl Job {
    /// The comment text carried on the crontab line for this job.
    pub fn annotation(&self) -> String {
        match &self.tag {
            Some(tag) => format!("{MARKER_PREFIX}{}] {tag}", self.id),
            None => format!("{MARKER_PREFIX}{}]", self.id),
        }
    }

    /// Display label: the tag when present, the id otherwise.
    pub fn label(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.id)
    }
}

/// A cronkeep-owned crontab line, decomposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEntry {
    pub id: String,
    pub schedule: String,
    pub command: String,
    pub tag: Option<String>,
}

impl JobEntry {
    /// The comment text carried on the rendered crontab line.
    pub fn annotation(&self) -> String {
        match &self.tag {
            Some(tag) => format!("{MARKER_PREFIX}{}] {tag}", self.id),
            None => format!("{MARKER_PREFIX}{}]", self.id),
        }
    }

    /// The list/inspection view of this entry.
    pub fn to_job(&self) -> Job {
        Job {
            id: self.id.clone(),
            schedule: self.schedule.clone(),
            command: self.command.clone(),
            tag: self.tag.clone(),
        }
    }
}

/// One line of the user's crontab.
///
/// Anything that is not a cronkeep entry — comments, environment
/// assignments, other tools' jobs, malformed lines — is kept as `Raw` and
/// round-trips byte-for-byte, in its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrontabLine {
    /// A line carrying the cronkeep marker.
    Entry(JobEntry),
    /// Any other line, preserved verbatim.
    Raw(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn job(tag: Option<&str>) -> Job {
        Job {
            id: "abc-123".to_string(),
            schedule: "0 5 * * *".to_string(),
            command: "/bin/true".to_string(),
            tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn annotation_without_tag_is_just_the_marker() {
        assert_eq!(job(None).annotation(), "cronkeep[abc-123]");
    }

    #[test]
    fn annotation_embeds_id_even_with_a_tag() {
        let j = job(Some("backup"));
        let annotation = j.annotation();
        assert_eq!(annotation, "cronkeep[abc-123] backup");
        assert!(annotation.contains(&j.id));
        assert!(annotation.contains("backup"));
    }

    #[test]
    fn label_prefers_the_tag() {
        assert_eq!(job(Some("backup")).label(), "backup");
        assert_eq!(job(None).label(), "abc-123");
    }
}
