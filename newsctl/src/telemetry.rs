//! Tracing initialization: an `EnvFilter` plus a fmt layer writing to stdout or a log file.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from `log.level` in the
//! configuration. `log.output` selects the destination:
//!
//! ```yaml
//! log:
//!   level: "info,sqlx=warn"
//!   output: /var/log/newsctl.log   # or "stdout"
//! ```
//!
//! File output is appended to and written without ANSI colours.

use std::{fs::OpenOptions, sync::Mutex};

use anyhow::Context as _;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogConfig, LogOutput};

/// Build the filter: `RUST_LOG` wins, then the configured level.
fn env_filter(log: &LogConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&log.level).with_context(|| format!("invalid log level directive {:?}", log.level)),
    }
}

/// Initialize the global tracing subscriber
pub fn init_telemetry(log: &LogConfig) -> anyhow::Result<()> {
    let env_filter = env_filter(log)?;

    match log.destination() {
        LogOutput::Stdout => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()?;

            info!("Telemetry initialized (stdout)");
        }
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()?;

            info!("Telemetry initialized (file: {})", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        // only meaningful when RUST_LOG does not take precedence
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        let log = LogConfig {
            level: "newsctl=notalevel".to_string(),
            output: "stdout".to_string(),
        };
        assert!(env_filter(&log).is_err());

        let log = LogConfig {
            level: "info,sqlx=warn".to_string(),
            output: "stdout".to_string(),
        };
        assert!(env_filter(&log).is_ok());
    }

    #[test]
    fn test_log_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newsctl.log");
        let log = LogConfig {
            level: "info".to_string(),
            output: path.display().to_string(),
        };

        // the global subscriber may already be installed by another test; the file is opened first either way
        let _ = init_telemetry(&log);
        assert!(path.exists());
    }
}
