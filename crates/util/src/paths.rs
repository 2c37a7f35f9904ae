use std::env;
use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Directory name used under the platform configuration directory.
pub const APP_DIR_NAME: &str = "clockpick";

/// Environment variable overriding the log file location.
pub const LOG_PATH_ENV: &str = "CLOCKPICK_LOG_PATH";

/// Default log file name.
pub const LOG_FILE_NAME: &str = "clockpick.log";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// `<config_dir>/clockpick`, or `./clockpick` when the platform has none.
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Resolves the log file: explicit path, then `CLOCKPICK_LOG_PATH`, then the config directory.
pub fn resolve_log_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit.map(str::trim).filter(|path| !path.is_empty()) {
        return expand_tilde(path);
    }
    if let Ok(path) = env::var(LOG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    app_config_dir().join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/logs/a.log"), home.join("logs/a.log"));
        assert_eq!(expand_tilde(" /tmp/x "), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn explicit_log_path_wins_over_environment() {
        temp_env::with_var(LOG_PATH_ENV, Some("/tmp/env.log"), || {
            assert_eq!(resolve_log_path(Some("/tmp/flag.log")), PathBuf::from("/tmp/flag.log"));
            assert_eq!(resolve_log_path(None), PathBuf::from("/tmp/env.log"));
            assert_eq!(resolve_log_path(Some("  ")), PathBuf::from("/tmp/env.log"));
        });
    }

    #[test]
    fn log_path_defaults_to_config_dir() {
        temp_env::with_var_unset(LOG_PATH_ENV, || {
            let path = resolve_log_path(None);
            assert!(path.ends_with("clockpick/clockpick.log"));
        });
    }
}
