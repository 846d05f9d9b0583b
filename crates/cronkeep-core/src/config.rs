use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level config (cronkeep.toml + CRONKEEP_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CronkeepConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub crontab: CrontabConfig,
}

/// Logging configuration: console level plus an optional rotating log file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default directive for the env filter when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for daily-rotated log files. No file output when unset.
    pub dir: Option<String>,
    /// How many rotated log files to keep.
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
            max_log_files: default_max_log_files(),
        }
    }
}

/// How to reach the system crontab program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrontabConfig {
    /// Binary invoked as `<binary> -l` to read and `<binary> -` to write.
    #[serde(default = "default_crontab_binary")]
    pub binary: String,
}

impl Default for CrontabConfig {
    fn default() -> Self {
        Self {
            binary: default_crontab_binary(),
        }
    }
}

impl CronkeepConfig {
    /// Load config from a TOML file with CRONKEEP_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.cronkeep/cronkeep.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: CronkeepConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CRONKEEP_").split("_"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.cronkeep/cronkeep.toml", home)
}

fn default_log_level() -> String {
    "cronkeep=info".to_string()
}

fn default_max_log_files() -> usize {
    7
}

fn default_crontab_binary() -> String {
    "crontab".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
