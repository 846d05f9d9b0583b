//! cronkeep-core — shared configuration and error types for cronkeep.

pub mod config;
pub mod error;

pub use config::CronkeepConfig;
pub use error::{CoreError, Result};
