use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use clockpick_tui::{PickerOptions, time_selector::ValueMode};
use clockpick_types::{ClockTime, MinimumTime};
use clockpick_util::{UserPreferences, resolve_log_path};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Pick a time of day in the terminal and print it as HH:MM.
#[derive(Parser, Debug, Default)]
#[command(name = "clockpick", version, about)]
struct Args {
    /// Initial value (HH:MM); malformed input starts unset
    #[arg(long, value_name = "HH:MM")]
    value: Option<String>,

    /// Earliest selectable time (HH:MM)
    #[arg(long, value_name = "HH:MM", conflicts_with = "min_now")]
    min_time: Option<String>,

    /// Use the current local time as the earliest selectable time
    #[arg(long)]
    min_now: bool,

    /// Keep the panel open after a value is committed
    #[arg(long)]
    keep_open: bool,

    /// Let the picker own its value instead of echoing it back
    #[arg(long)]
    uncontrolled: bool,

    /// Theme id or alias (nord, dracula, ansi256)
    #[arg(long, value_name = "ID")]
    theme: Option<String>,

    /// Log file path
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Do not remember the picked value
    #[arg(long)]
    no_persist: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&resolve_log_path(args.log_file.as_deref()))?;

    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!(%error, "preferences unavailable; using an in-memory store");
        UserPreferences::ephemeral()
    });
    let options = build_options(&args, &preferences, ClockTime::from(Local::now().time()));
    info!(?options, "resolved picker options");

    let value = clockpick_tui::run(options).await.context("time picker failed")?;

    if let Some(value) = value {
        println!("{value}");
    }
    if !args.no_persist {
        persist_session(&args, &preferences, value);
    }
    Ok(())
}

/// Remembers the picked value and an explicitly requested, known theme.
fn persist_session(args: &Args, preferences: &UserPreferences, value: Option<ClockTime>) {
    if let Err(error) = preferences.set_last_value(value) {
        warn!(%error, path = %preferences.path().display(), "failed to persist the picked value");
    }
    let Some(requested) = args.theme.as_deref() else {
        return;
    };
    match clockpick_tui::resolve_theme_id(requested) {
        Some(theme_id) => {
            if let Err(error) = preferences.set_preferred_theme(Some(theme_id.to_string())) {
                warn!(%error, path = %preferences.path().display(), "failed to persist the theme");
            }
        }
        None => warn!(theme = requested, "unknown theme; not remembered"),
    }
}

/// Installs a file-backed subscriber; the terminal belongs to the UI.
fn init_tracing(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();
    Ok(())
}

/// Merges flags over stored preferences over defaults.
fn build_options(args: &Args, preferences: &UserPreferences, now: ClockTime) -> PickerOptions {
    let value = match args.value.as_deref() {
        Some(raw) => ClockTime::parse_selection(Some(raw)),
        None => preferences.last_value(),
    };

    let minimum = if args.min_now {
        MinimumTime::from(now)
    } else if let Some(raw) = args.min_time.as_deref() {
        MinimumTime::parse(Some(raw))
    } else {
        preferences.minimum_time().unwrap_or_default()
    };

    let close_on_commit = !args.keep_open && preferences.close_on_commit().unwrap_or(true);
    let mode = if args.uncontrolled {
        ValueMode::Uncontrolled
    } else {
        ValueMode::Controlled
    };

    PickerOptions {
        value,
        minimum,
        close_on_commit,
        mode,
        preferred_theme: args.theme.clone().or_else(|| preferences.preferred_theme()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn noon() -> ClockTime {
        ClockTime::new(12, 0).unwrap()
    }

    fn stored(json: &str) -> (tempfile::TempDir, UserPreferences) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, json).unwrap();
        let preferences = UserPreferences::at(path).unwrap();
        (dir, preferences)
    }

    #[test]
    fn args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_without_flags_or_preferences() {
        let options = build_options(&Args::default(), &UserPreferences::ephemeral(), noon());
        assert_eq!(options.value, None);
        assert!(options.minimum.is_unrestricted());
        assert!(options.close_on_commit);
        assert_eq!(options.mode, ValueMode::Controlled);
        assert_eq!(options.preferred_theme, None);
    }

    #[test]
    fn flags_override_preferences() {
        let (_dir, preferences) = stored(
            r#"{ "preferred_theme": "nord", "close_on_commit": true, "minimum_time": "08:00", "last_value": "10:10" }"#,
        );
        let args = Args::try_parse_from([
            "clockpick",
            "--value",
            "11:15",
            "--min-time",
            "09:30",
            "--keep-open",
            "--uncontrolled",
            "--theme",
            "dracula",
        ])
        .unwrap();
        let options = build_options(&args, &preferences, noon());
        assert_eq!(options.value, ClockTime::new(11, 15));
        assert_eq!(options.minimum, MinimumTime::new(9, 30));
        assert!(!options.close_on_commit);
        assert_eq!(options.mode, ValueMode::Uncontrolled);
        assert_eq!(options.preferred_theme.as_deref(), Some("dracula"));
    }

    #[test]
    fn preferences_fill_missing_flags() {
        let (_dir, preferences) = stored(
            r#"{ "preferred_theme": "nord", "close_on_commit": false, "minimum_time": "08:00", "last_value": "10:10" }"#,
        );
        let options = build_options(&Args::default(), &preferences, noon());
        assert_eq!(options.value, ClockTime::new(10, 10));
        assert_eq!(options.minimum, MinimumTime::new(8, 0));
        assert!(!options.close_on_commit);
        assert_eq!(options.preferred_theme.as_deref(), Some("nord"));
    }

    #[test]
    fn session_remembers_value_and_resolved_theme() {
        let (dir, preferences) = stored("{}");
        let args = Args::try_parse_from(["clockpick", "--theme", "Dracula"]).unwrap();
        persist_session(&args, &preferences, ClockTime::new(17, 5));

        let reloaded = UserPreferences::at(dir.path().join("preferences.json")).unwrap();
        assert_eq!(reloaded.last_value(), ClockTime::new(17, 5));
        assert_eq!(reloaded.preferred_theme().as_deref(), Some("dracula"));
    }

    #[test]
    fn unknown_theme_is_not_remembered() {
        let (_dir, preferences) = stored(r#"{ "preferred_theme": "nord" }"#);
        let args = Args::try_parse_from(["clockpick", "--theme", "solarized"]).unwrap();
        persist_session(&args, &preferences, None);
        assert_eq!(preferences.preferred_theme().as_deref(), Some("nord"));
        assert_eq!(preferences.last_value(), None);
    }

    #[test]
    fn min_now_uses_the_clock() {
        let args = Args::try_parse_from(["clockpick", "--min-now"]).unwrap();
        let options = build_options(&args, &UserPreferences::ephemeral(), ClockTime::new(14, 20).unwrap());
        assert_eq!(options.minimum, MinimumTime::new(14, 20));
    }

    #[test]
    fn min_now_conflicts_with_min_time() {
        assert!(Args::try_parse_from(["clockpick", "--min-now", "--min-time", "09:00"]).is_err());
    }

    #[test]
    fn malformed_value_flag_starts_unset() {
        let (_dir, preferences) = stored(r#"{ "last_value": "10:10" }"#);
        let args = Args::try_parse_from(["clockpick", "--value", "soon"]).unwrap();
        assert_eq!(build_options(&args, &preferences, noon()).value, None);
    }
}
