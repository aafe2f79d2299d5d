//! Diagnostic logging sink.
//!
//! The transcript owns stdout, so log lines go to stderr or to the file named
//! by `CHAT_LOG_FILE`. Stderr shares the terminal with the transcript, so it
//! stays silent unless `CHAT_DEBUG` or `RUST_LOG` asks for output. `RUST_LOG`
//! overrides the level derived from [`EnvConfig`].

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

pub const DEFAULT_FILTER: &str = "off";
pub const FILE_FILTER: &str = "warn";
pub const DEBUG_FILTER: &str = "debug";

/// Filter directive used when `RUST_LOG` is unset or invalid.
#[must_use]
pub fn default_filter(config: &EnvConfig) -> &'static str {
    if config.debug {
        DEBUG_FILTER
    } else if config.log_file.is_some() {
        FILE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Installs the global `tracing` subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed. Fails only when
/// the configured log file cannot be opened.
pub fn init_logging(config: &EnvConfig) -> io::Result<bool> {
    let fallback = default_filter(config);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let installed = match config.log_file.as_deref() {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .is_ok()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(!config.no_color)
            .with_writer(io::stderr)
            .try_init()
            .is_ok(),
    };

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_sink_is_silent_by_default() {
        assert_eq!(default_filter(&EnvConfig::default()), "off");
    }

    #[test]
    fn log_file_enables_warnings() {
        let config = EnvConfig {
            log_file: Some("/tmp/chat.log".to_string()),
            ..EnvConfig::default()
        };

        assert_eq!(default_filter(&config), "warn");
    }

    #[test]
    fn debug_flag_raises_default_level() {
        let verbose = EnvConfig {
            debug: true,
            ..EnvConfig::default()
        };
        let verbose_to_file = EnvConfig {
            debug: true,
            log_file: Some("/tmp/chat.log".to_string()),
            ..EnvConfig::default()
        };

        assert_eq!(default_filter(&verbose), "debug");
        assert_eq!(default_filter(&verbose_to_file), "debug");
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let config = EnvConfig {
            log_file: Some("/nonexistent-dir/for/sure/chat.log".to_string()),
            ..EnvConfig::default()
        };

        assert!(init_logging(&config).is_err());
    }
}
