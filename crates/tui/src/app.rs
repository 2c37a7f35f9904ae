//! Application state for the picker TUI.
//!
//! `App` plays the caller's role in the selector's value contract: it owns
//! the committed value in controlled mode and receives every change.

use clockpick_types::{ClockTime, MinimumTime};
use tracing::info;

use crate::time_selector::{SelectorConfig, TimeSelectorState, ValueMode};
use crate::ui::theme::{self, Theme};

/// Startup options assembled by the binary from flags and preferences.
#[derive(Debug, Clone, Default)]
pub struct PickerOptions {
    pub value: Option<ClockTime>,
    pub minimum: MinimumTime,
    pub close_on_commit: bool,
    pub mode: ValueMode,
    pub preferred_theme: Option<String>,
}

/// Cross-cutting shared context owned by the App.
#[derive(Debug)]
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
    /// Canonical id of the active palette.
    pub theme_id: &'static str,
}

impl SharedCtx {
    pub fn new(preferred_theme: Option<&str>) -> Self {
        let loaded = theme::load(preferred_theme);
        Self {
            theme: loaded.theme,
            theme_id: loaded.definition.id,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub time_picker: TimeSelectorState,
    /// Value owned on the caller side of the contract.
    value: Option<ClockTime>,
    /// Number of change notifications received.
    change_count: usize,
}

impl App {
    pub fn new(options: &PickerOptions) -> Self {
        let config = SelectorConfig {
            minimum: options.minimum,
            close_on_commit: options.close_on_commit,
            mode: options.mode,
        };
        Self {
            ctx: SharedCtx::new(options.preferred_theme.as_deref()),
            time_picker: TimeSelectorState::new(config, options.value),
            value: options.value,
            change_count: 0,
        }
    }

    pub fn value(&self) -> Option<ClockTime> {
        self.value
    }

    pub fn change_count(&self) -> usize {
        self.change_count
    }

    /// Receives a change notification from the selector.
    pub fn apply_committed_value(&mut self, value: Option<ClockTime>) {
        let label = value.map_or_else(|| "unset".to_string(), |time| time.to_string());
        info!(value = %label, "time value changed");
        self.value = value;
        self.change_count += 1;
        if self.time_picker.config().mode == ValueMode::Controlled {
            self.time_picker.set_value(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clockpick_types::NavKey;

    #[test]
    fn controlled_value_round_trips_through_the_caller() {
        let options = PickerOptions {
            minimum: MinimumTime::new(9, 30),
            close_on_commit: true,
            ..Default::default()
        };
        let mut app = App::new(&options);
        app.time_picker.open();
        app.time_picker.handle_key(NavKey::Enter);
        assert_eq!(app.time_picker.value(), None);

        app.apply_committed_value(ClockTime::new(9, 30));
        assert_eq!(app.value(), ClockTime::new(9, 30));
        assert_eq!(app.time_picker.value(), ClockTime::new(9, 30));
        assert_eq!(app.change_count(), 1);
    }
}
