//! Trigger button plus drop-down panel with hour and minute columns.
//!
//! The component translates crossterm input into selector transitions,
//! forwards reveal requests to its column viewports, and turns value changes
//! into [`Effect::ValueCommitted`] for the caller.

use clockpick_types::{Column, Effect, Msg, NavKey, SelectorEffect};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::debug;

use super::viewport::ColumnViewports;
use crate::{
    app::App,
    time_selector::{CellView, EnsureVisible, PendingReveal, TimeSelectorState},
    ui::{
        components::Component,
        theme::{
            Theme,
            theme_helpers::{block, build_hint_spans, button_block, panel_style},
        },
    },
};

const TRIGGER_WIDTH: u16 = 18;
const TRIGGER_HEIGHT: u16 = 3;
const PANEL_WIDTH: u16 = 18;
const PANEL_MAX_HEIGHT: u16 = 12;
const PLACEHOLDER: &str = "Pick a time";

/// Rectangles resolved during the last render, used for hit testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimePickerLayout {
    pub trigger_area: Rect,
    pub panel_area: Rect,
    pub hours_area: Rect,
    pub minutes_area: Rect,
}

impl TimePickerLayout {
    fn column_at(&self, position: Position) -> Option<(Column, u16)> {
        if self.hours_area.contains(position) {
            Some((Column::Hours, position.y - self.hours_area.y))
        } else if self.minutes_area.contains(position) {
            Some((Column::Minutes, position.y - self.minutes_area.y))
        } else {
            None
        }
    }
}

/// Controller + renderer for the time picker.
#[derive(Debug, Default)]
pub struct TimePickerComponent {
    layout: TimePickerLayout,
    viewports: ColumnViewports,
    pending_reveal: PendingReveal,
}

impl TimePickerComponent {
    pub fn layout(&self) -> &TimePickerLayout {
        &self.layout
    }

    pub fn viewports(&self) -> &ColumnViewports {
        &self.viewports
    }

    /// Routes selector output: reveals go to the viewports, value changes to the caller.
    fn route(&mut self, effects: Vec<SelectorEffect>) -> Vec<Effect> {
        let mut routed = Vec::new();
        for effect in effects {
            match effect {
                SelectorEffect::ValueChanged(value) => routed.push(Effect::ValueCommitted(value)),
                SelectorEffect::Reveal(request) => self.viewports.apply(request),
                SelectorEffect::DeferReveal { generation, requests } => {
                    self.pending_reveal.schedule(generation, requests);
                    routed.push(Effect::ScheduleReveal(generation));
                }
                SelectorEffect::PanelOpened => {}
                SelectorEffect::PanelClosed => self.pending_reveal.cancel(),
            }
        }
        routed
    }

    fn nav_key(code: KeyCode) -> Option<NavKey> {
        match code {
            KeyCode::Up => Some(NavKey::Up),
            KeyCode::Down => Some(NavKey::Down),
            KeyCode::Left => Some(NavKey::Left),
            KeyCode::Right => Some(NavKey::Right),
            KeyCode::Enter => Some(NavKey::Enter),
            _ => None,
        }
    }

    fn toggle_panel(&mut self, app: &mut App) -> Vec<Effect> {
        let effects = if app.time_picker.is_open() {
            app.time_picker.close()
        } else {
            app.time_picker.open()
        };
        self.route(effects)
    }

    fn render_trigger(&self, frame: &mut Frame, area: Rect, state: &TimeSelectorState, theme: &dyn Theme) {
        let (label, label_style) = match state.formatted_value() {
            Some(value) => (value, theme.text_primary_style()),
            None => (PLACEHOLDER.to_string(), theme.text_muted_style()),
        };
        let line = Line::from(vec![Span::styled("◷ ", theme.accent_primary_style()), Span::styled(label, label_style)]);
        let paragraph = Paragraph::new(line).block(button_block(theme, !state.is_open()));
        frame.render_widget(paragraph, area);
    }

    fn render_panel(&mut self, frame: &mut Frame, area: Rect, state: &TimeSelectorState, theme: &dyn Theme) {
        frame.render_widget(Clear, area);
        let panel_block = block(theme, Some(" HH : MM "), true);
        let inner = panel_block.inner(area);
        frame.render_widget(panel_block, area);

        let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(inner);

        let hours_block = Block::new()
            .borders(Borders::RIGHT)
            .border_style(theme.border_style(false));
        let hours_area = hours_block.inner(columns[0]);
        frame.render_widget(hours_block, columns[0]);
        let minutes_area = columns[1];

        self.viewports.hours.set_height(hours_area.height);
        self.viewports.minutes.set_height(minutes_area.height);

        for (column, column_area) in [(Column::Hours, hours_area), (Column::Minutes, minutes_area)] {
            let cells = state.cells(column);
            let lines: Vec<Line> = self
                .viewports
                .get(column)
                .visible_range()
                .filter_map(|index| cells.get(usize::from(index)))
                .map(|cell| Line::from(Span::styled(format!(" {} ", cell.label()), cell_style(cell, theme))).centered())
                .collect();
            frame.render_widget(Paragraph::new(lines).style(panel_style(theme)), column_area);
        }

        self.layout.panel_area = area;
        self.layout.hours_area = hours_area;
        self.layout.minutes_area = minutes_area;
    }
}

/// Style for one cell: disabled wins, then selection, then the cursor.
///
/// A cursor over a cell a click would reject keeps its background so it stays visible.
fn cell_style(cell: &CellView, theme: &dyn Theme) -> Style {
    if cell.disabled {
        let style = theme.disabled_style();
        return if cell.focused {
            style.bg(theme.roles().cursor_bg)
        } else {
            style
        };
    }
    let mut style = if cell.selected {
        theme.selection_style().add_modifier(Modifier::BOLD)
    } else {
        theme.text_primary_style()
    };
    if cell.focused {
        style = if cell.selected {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            theme.cursor_style()
        };
    }
    style
}

impl Component for TimePickerComponent {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        if let Msg::RevealDue(generation) = msg {
            if !app.time_picker.is_open() || *generation != app.time_picker.generation() {
                debug!(generation, "reveal outlived its panel");
                return Vec::new();
            }
            if let Some(requests) = self.pending_reveal.take_due(*generation) {
                for request in requests {
                    self.viewports.apply(request);
                }
            }
        }
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }

        if app.time_picker.is_open() {
            if key.code == KeyCode::Esc {
                let effects = app.time_picker.close();
                return self.route(effects);
            }
            let Some(nav_key) = Self::nav_key(key.code) else {
                return Vec::new();
            };
            let effects = app.time_picker.handle_key(nav_key);
            return self.route(effects);
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                let effects = app.time_picker.open();
                self.route(effects)
            }
            KeyCode::Backspace | KeyCode::Delete => {
                let effects = app.time_picker.clear();
                self.route(effects)
            }
            KeyCode::Char('q') | KeyCode::Esc => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        let is_open = app.time_picker.is_open();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.layout.trigger_area.contains(position) {
                    return self.toggle_panel(app);
                }
                if !is_open {
                    return Vec::new();
                }
                if let Some((column, row)) = self.layout.column_at(position) {
                    let Some(index) = self.viewports.get(column).index_at_row(row) else {
                        return Vec::new();
                    };
                    let effects = match column {
                        Column::Hours => app.time_picker.click_hour(index),
                        Column::Minutes => app.time_picker.click_minute(index),
                    };
                    return self.route(effects);
                }
                if !self.layout.panel_area.contains(position) {
                    let effects = app.time_picker.close();
                    return self.route(effects);
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp if is_open => {
                if let Some((column, _)) = self.layout.column_at(position) {
                    let delta = if mouse.kind == MouseEventKind::ScrollDown { 1 } else { -1 };
                    self.viewports.get_mut(column).scroll_lines(delta);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let state = &app.time_picker;

        let trigger_area = Rect {
            x: rect.x,
            y: rect.y,
            width: TRIGGER_WIDTH.min(rect.width),
            height: TRIGGER_HEIGHT.min(rect.height),
        };
        self.render_trigger(frame, trigger_area, state, theme);
        self.layout = TimePickerLayout {
            trigger_area,
            ..Default::default()
        };

        if state.is_open() {
            let panel_top = trigger_area.bottom();
            let panel_area = Rect {
                x: rect.x,
                y: panel_top,
                width: PANEL_WIDTH.min(rect.width),
                height: PANEL_MAX_HEIGHT.min(rect.bottom().saturating_sub(panel_top)),
            };
            self.render_panel(frame, panel_area, state, theme);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let hints: &[(&str, &str)] = if app.time_picker.is_open() {
            &[(" ↑/↓", " Move  "), (" ←/→", " Column  "), (" Enter", " Select  "), (" Esc", " Close ")]
        } else {
            &[(" Enter", " Open  "), (" Backspace", " Clear  "), (" q", " Quit ")]
        };
        build_hint_spans(&*app.ctx.theme, hints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PickerOptions;
    use crate::time_selector::ValueMode;
    use clockpick_types::{ClockTime, MinimumTime};
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};

    fn app_with(minimum: MinimumTime, value: Option<ClockTime>) -> App {
        App::new(&PickerOptions {
            value,
            minimum,
            close_on_commit: true,
            mode: ValueMode::Uncontrolled,
            preferred_theme: None,
        })
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn draw(terminal: &mut Terminal<TestBackend>, component: &mut TimePickerComponent, app: &mut App) {
        terminal
            .draw(|frame| component.render(frame, frame.area(), app))
            .expect("draw to test backend");
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn trigger_shows_placeholder_until_a_value_exists() {
        let mut terminal = Terminal::new(TestBackend::new(30, 20)).unwrap();
        let mut component = TimePickerComponent::default();
        let mut app = app_with(MinimumTime::default(), None);
        draw(&mut terminal, &mut component, &mut app);
        assert!(buffer_text(&terminal).contains(PLACEHOLDER));

        app.time_picker.set_value(ClockTime::new(7, 5));
        draw(&mut terminal, &mut component, &mut app);
        assert!(buffer_text(&terminal).contains("07:05"));
    }

    #[test]
    fn open_reveal_waits_for_layout_then_centers() {
        let mut terminal = Terminal::new(TestBackend::new(30, 20)).unwrap();
        let mut component = TimePickerComponent::default();
        let mut app = app_with(MinimumTime::new(20, 0), None);

        let effects = component.handle_key_events(&mut app, press(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::ScheduleReveal(1)]);
        assert_eq!(component.viewports().hours.offset(), 0);

        draw(&mut terminal, &mut component, &mut app);
        component.handle_message(&mut app, &Msg::RevealDue(1));
        // Ten visible rows: hour 20 centered, clamped to the last page.
        assert_eq!(component.viewports().hours.height(), 10);
        assert_eq!(component.viewports().hours.offset(), 14);
        assert_eq!(component.viewports().minutes.offset(), 0);
    }

    #[test]
    fn reveal_from_an_earlier_open_is_dropped() {
        let mut terminal = Terminal::new(TestBackend::new(30, 20)).unwrap();
        let mut component = TimePickerComponent::default();
        let mut app = app_with(MinimumTime::default(), ClockTime::new(18, 0));

        component.handle_key_events(&mut app, press(KeyCode::Enter));
        component.handle_key_events(&mut app, press(KeyCode::Esc));
        assert!(!app.time_picker.is_open());
        draw(&mut terminal, &mut component, &mut app);
        component.handle_message(&mut app, &Msg::RevealDue(1));
        assert_eq!(component.viewports().hours.offset(), 0);

        component.handle_key_events(&mut app, press(KeyCode::Enter));
        draw(&mut terminal, &mut component, &mut app);
        component.handle_message(&mut app, &Msg::RevealDue(1));
        assert_eq!(component.viewports().hours.offset(), 0);
        component.handle_message(&mut app, &Msg::RevealDue(2));
        assert_eq!(component.viewports().hours.offset(), 13);
    }

    #[test]
    fn clicking_a_cell_commits_through_the_selector() {
        let mut terminal = Terminal::new(TestBackend::new(30, 20)).unwrap();
        let mut component = TimePickerComponent::default();
        let mut app = app_with(MinimumTime::default(), None);

        component.handle_key_events(&mut app, press(KeyCode::Enter));
        draw(&mut terminal, &mut component, &mut app);
        let hours_area = component.layout().hours_area;
        let effects = component.handle_mouse_events(&mut app, click(hours_area.x + 1, hours_area.y + 3));
        assert_eq!(effects, vec![Effect::ValueCommitted(ClockTime::new(3, 0))]);
        assert!(!app.time_picker.is_open());
    }

    #[test]
    fn clicking_a_minute_keeps_the_committed_hour() {
        let mut terminal = Terminal::new(TestBackend::new(30, 20)).unwrap();
        let mut component = TimePickerComponent::default();
        let mut app = app_with(MinimumTime::default(), ClockTime::new(7, 15));

        component.handle_key_events(&mut app, press(KeyCode::Enter));
        component.handle_key_events(&mut app, press(KeyCode::Down));
        draw(&mut terminal, &mut component, &mut app);
        let minutes_area = component.layout().minutes_area;
        let effects = component.handle_mouse_events(&mut app, click(minutes_area.x + 1, minutes_area.y + 2));
        assert_eq!(effects, vec![Effect::ValueCommitted(ClockTime::new(7, 2))]);
    }

    #[test]
    fn focused_disabled_cell_keeps_the_cursor_background() {
        let theme = crate::ui::theme::NordTheme::new();
        let cell = CellView {
            value: 3,
            disabled: true,
            focused: true,
            selected: false,
        };
        let style = cell_style(&cell, &theme);
        assert_eq!(style.bg, Some(theme.roles().cursor_bg));
        assert!(style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn clicking_outside_the_panel_closes_without_commit() {
        let mut terminal = Terminal::new(TestBackend::new(30, 20)).unwrap();
        let mut component = TimePickerComponent::default();
        let mut app = app_with(MinimumTime::default(), None);

        component.handle_key_events(&mut app, press(KeyCode::Enter));
        draw(&mut terminal, &mut component, &mut app);
        let effects = component.handle_mouse_events(&mut app, click(28, 19));
        assert!(effects.is_empty());
        assert!(!app.time_picker.is_open());
        assert_eq!(app.time_picker.value(), None);
    }

    #[test]
    fn keys_outside_the_alphabet_are_ignored_while_open() {
        let mut component = TimePickerComponent::default();
        let mut app = app_with(MinimumTime::default(), None);
        component.handle_key_events(&mut app, press(KeyCode::Enter));
        let before = app.time_picker.navigation().copied();
        assert!(component.handle_key_events(&mut app, press(KeyCode::Char('x'))).is_empty());
        assert!(component.handle_key_events(&mut app, press(KeyCode::Char('q'))).is_empty());
        assert_eq!(app.time_picker.navigation().copied(), before);
    }

    #[test]
    fn closed_trigger_quits_and_clears() {
        let mut component = TimePickerComponent::default();
        let mut app = app_with(MinimumTime::default(), ClockTime::new(6, 30));
        assert_eq!(
            component.handle_key_events(&mut app, press(KeyCode::Backspace)),
            vec![Effect::ValueCommitted(None)]
        );
        assert_eq!(component.handle_key_events(&mut app, press(KeyCode::Char('q'))), vec![Effect::Quit]);
    }
}
