//! cronkeep — manage tagged cron jobs in the user crontab.
//!
//! Every path ends in a logged message and a deterministic exit code:
//! 0 on success, 1 on a missing required flag combination or any
//! operational failure.

use anyhow::bail;
use clap::Parser;
use tracing::{error, info};

use cronkeep_core::CronkeepConfig;
use cronkeep_jobs::{AddOptions, JobManager, JobStore, StdinPrompter, SystemCrontab};

mod cli;
mod logging;

fn main() {
    let args = cli::Cli::parse();

    // config: explicit CRONKEEP_CONFIG env path > ~/.cronkeep/cronkeep.toml
    let config_path = std::env::var("CRONKEEP_CONFIG").ok();
    let config = CronkeepConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        eprintln!("Config load failed ({e}), using defaults");
        CronkeepConfig::default()
    });

    let _guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e}");
            None
        }
    };

    if let Err(e) = run(args, &config) {
        error!(error = %e, "operation failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: cli::Cli, config: &CronkeepConfig) -> anyhow::Result<()> {
    let store = JobStore::new(SystemCrontab::new(config.crontab.binary.clone()));
    let mut manager = JobManager::new(store);

    if args.add {
        let (Some(schedule), Some(command)) = (args.schedule, args.command) else {
            bail!("--add requires --schedule and --command");
        };
        let opts = AddOptions {
            schedule,
            command,
            tag: args.tag,
            dry_run: args.dry_run,
        };

        let added = if args.interactive {
            let mut prompter = StdinPrompter;
            manager.add_job(opts, Some(&mut prompter))?
        } else {
            manager.add_job(opts, None)?
        };

        match added {
            Some(id) => {
                info!(job_id = %id, "job added");
                println!("Job added with id: {id}");
            }
            None => println!("[dry-run] job not added"),
        }
    } else if args.remove {
        let Some(id) = args.id else {
            bail!("--remove requires --id");
        };
        if manager.remove_job(&id, args.dry_run)? {
            println!("Job removed: {id}");
        } else {
            println!("[dry-run] job not removed: {id}");
        }
    } else {
        let jobs = manager.list_jobs();
        if jobs.is_empty() {
            println!("No cron jobs found.");
        } else {
            for job in &jobs {
                println!("[{}] {} -> {}", job.label(), job.schedule, job.command);
            }
        }
    }

    Ok(())
}
