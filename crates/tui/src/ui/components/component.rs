//! Component abstraction for the picker TUI.
//!
//! Components own their local layout state, react to input and messages, and
//! report side effects back to the runtime as [`Effect`]s instead of mutating
//! anything outside the [`App`].

use clockpick_types::{Effect, Msg};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A UI element with its own layout state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: `handle_key_events()` and `handle_mouse_events()` receive terminal input
/// 2. **Messages**: `handle_message()` receives runtime messages such as resizes and due reveals
/// 3. **Rendering**: `render()` draws into the provided area and records layout for hit testing
pub(crate) trait Component {
    /// Handle a runtime message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events; coordinates are absolute terminal cells.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations may record the resolved layout for later hit testing,
    /// but must not change application state.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key binding hints for the footer.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}
