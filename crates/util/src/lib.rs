//! Filesystem helpers shared by the clockpick binary: configuration paths,
//! log file resolution and the preferences store.

pub mod paths;
pub mod preferences;

pub use paths::{app_config_dir, expand_tilde, resolve_log_path};
pub use preferences::{PreferencesError, PreferencesPayload, UserPreferences};
