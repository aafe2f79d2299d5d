//! Environment configuration shared by the transcript and logging layers.

use std::env;

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Disable ANSI styling in the transcript.
    pub no_color: bool,
    /// Append log output to this file instead of stderr.
    pub log_file: Option<String>,
    /// Raise the default log level to `debug`.
    pub debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            no_color: env_flag("CHAT_NO_COLOR") || env_string_opt("NO_COLOR").is_some(),
            log_file: env_string_opt("CHAT_LOG_FILE"),
            debug: env_flag("CHAT_DEBUG"),
        }
    }
}

/// `true` only when `key` is set to exactly `1`.
pub fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

/// Value of `key`, treating unset and blank values alike.
pub fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_off() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CHAT_NO_COLOR", None);
        let _g2 = set_env_guard("NO_COLOR", None);
        let _g3 = set_env_guard("CHAT_LOG_FILE", None);
        let _g4 = set_env_guard("CHAT_DEBUG", None);

        let config = EnvConfig::from_env();
        assert!(!config.no_color);
        assert!(config.log_file.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn env_flags_set_to_one_enable() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CHAT_NO_COLOR", Some("1"));
        let _g2 = set_env_guard("CHAT_LOG_FILE", Some("/tmp/chat.log"));
        let _g3 = set_env_guard("CHAT_DEBUG", Some("1"));

        let config = EnvConfig::from_env();
        assert!(config.no_color);
        assert_eq!(config.log_file.as_deref(), Some("/tmp/chat.log"));
        assert!(config.debug);
    }

    #[test]
    fn flags_other_than_one_are_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CHAT_DEBUG", Some("true"));
        let _g2 = set_env_guard("CHAT_LOG_FILE", Some("   "));

        let config = EnvConfig::from_env();
        assert!(!config.debug);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn conventional_no_color_is_honoured() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CHAT_NO_COLOR", None);
        let _g2 = set_env_guard("NO_COLOR", Some("yes"));

        assert!(EnvConfig::from_env().no_color);
    }
}
