//! Command-line surface for cronkeep.
//!
//! Exactly one of `--add`, `--list`, `--remove` must be given. The extra
//! requirements (`--schedule`/`--command` with `--add`, `--id` with
//! `--remove`) are checked in `main` so they exit with status 1 like every
//! other operational error.

use clap::{ArgGroup, Parser};

#[derive(Debug, Parser)]
#[command(name = "cronkeep", version, about = "Manage tagged cron jobs in the user crontab")]
#[command(group(ArgGroup::new("mode").required(true).args(["add", "list", "remove"])))]
pub struct Cli {
    /// Add a new cron job
    #[arg(long)]
    pub add: bool,

    /// List all cron jobs added by cronkeep
    #[arg(long)]
    pub list: bool,

    /// Remove a cron job by its id
    #[arg(long)]
    pub remove: bool,

    /// Cron schedule, e.g. '0 5 * * *' (required with --add)
    #[arg(long)]
    pub schedule: Option<String>,

    /// Command to execute (required with --add)
    #[arg(long)]
    pub command: Option<String>,

    /// Id of the job to remove (required with --remove)
    #[arg(long)]
    pub id: Option<String>,

    /// Optional tag shown instead of the id when listing
    #[arg(long)]
    pub tag: Option<String>,

    /// Simulate the operation without applying changes
    #[arg(long)]
    pub dry_run: bool,

    /// Prompt for schedule, command, and tag step by step
    #[arg(long)]
    pub interactive: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_with_schedule_and_command_parses() {
        let cli = Cli::try_parse_from([
            "cronkeep",
            "--add",
            "--schedule",
            "0 5 * * *",
            "--command",
            "/bin/true",
            "--tag",
            "backup",
            "--dry-run",
        ])
        .unwrap();
        assert!(cli.add && !cli.list && !cli.remove);
        assert_eq!(cli.schedule.as_deref(), Some("0 5 * * *"));
        assert_eq!(cli.command.as_deref(), Some("/bin/true"));
        assert_eq!(cli.tag.as_deref(), Some("backup"));
        assert!(cli.dry_run);
        assert!(!cli.interactive);
    }

    #[test]
    fn list_takes_no_extra_arguments() {
        let cli = Cli::try_parse_from(["cronkeep", "--list"]).unwrap();
        assert!(cli.list);
    }

    #[test]
    fn remove_with_id_parses() {
        let cli = Cli::try_parse_from(["cronkeep", "--remove", "--id", "abc-123"]).unwrap();
        assert!(cli.remove);
        assert_eq!(cli.id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn exactly_one_mode_flag_is_required() {
        assert!(Cli::try_parse_from(["cronkeep"]).is_err());
        assert!(Cli::try_parse_from(["cronkeep", "--add", "--list"]).is_err());
        assert!(Cli::try_parse_from(["cronkeep", "--list", "--remove"]).is_err());
    }
}
