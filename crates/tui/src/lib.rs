//! # Clockpick TUI Library
//!
//! A terminal time picker: a trigger showing the current `HH:MM` value and a
//! drop-down panel with an hours column and a minutes column. Times before a
//! configurable minimum are rendered disabled, skipped by keyboard
//! navigation, and never committed.
//!
//! ## Architecture
//!
//! - [`time_selector`] holds the terminal-independent state machine. Its
//!   transitions return effects describing value changes and scroll requests.
//! - The UI layer renders that state with ratatui and feeds crossterm input
//!   back into it through the component trait.
//! - The runtime owns the terminal and the event loop.

mod app;
pub mod time_selector;
mod ui;

use anyhow::Result;
use clockpick_types::ClockTime;

pub use app::PickerOptions;

/// Canonical id of the palette `name` selects (id or alias, case-insensitive).
pub fn resolve_theme_id(name: &str) -> Option<&'static str> {
    ui::theme::catalog::resolve(name.trim()).map(|definition| definition.id)
}

/// Runs the picker until the user quits.
///
/// Returns the last value committed on the caller side, or `None` when no
/// time is selected.
///
/// # Errors
///
/// Terminal setup failures (raw mode, alternate screen) and draw errors.
pub async fn run(options: PickerOptions) -> Result<Option<ClockTime>> {
    ui::runtime::run_app(options).await
}
