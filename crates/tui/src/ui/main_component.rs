use clockpick_types::{Effect, Msg};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{prelude::*, widgets::Paragraph};

use super::components::{Component, TimePickerComponent};
use super::theme::theme_helpers as th;
use crate::app::App;

/// Root view: header, the picker, and the hints bar.
#[derive(Debug, Default)]
pub struct MainView {
    pub picker_view: TimePickerComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_preferred_layout(&self, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Picker
            Constraint::Length(1), // Hints bar
        ])
        .split(area)
        .to_vec()
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let minimum = app.time_picker.minimum();
        let bound = if minimum.is_unrestricted() {
            Span::styled("any time of day", theme.text_muted_style())
        } else {
            Span::styled(format!("not before {minimum}"), theme.status_warning())
        };
        let header = Line::from(vec![
            Span::styled("Pick a time", theme.accent_primary_style().add_modifier(Modifier::BOLD)),
            Span::styled("  ·  ", theme.text_muted_style()),
            bound,
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        self.picker_view.handle_message(app, msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        self.picker_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        self.picker_view.handle_mouse_events(app, mouse)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        frame.render_widget(Paragraph::new("").style(th::background_style(&*app.ctx.theme)), area);

        let inner = area.inner(Margin::new(2, 1));
        let layout = self.get_preferred_layout(inner);
        self.render_header(frame, layout[0], app);
        self.picker_view.render(frame, layout[1], app);

        let hint_spans: Vec<Span> = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[2]);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        hint_spans.extend(self.picker_view.get_hint_spans(app));
        hint_spans.extend(th::build_hint_spans(&*app.ctx.theme, &[(" Ctrl+C", " Exit ")]));
        hint_spans
    }
}
