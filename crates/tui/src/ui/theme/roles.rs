use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Semantic color roles used by the picker.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub border: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent_primary: Color,

    pub warning: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,
    pub focus: Color,
    /// Background behind the focused cell of the active column.
    pub cursor_bg: Color,
}

/// Theme trait exposes semantic roles and common style builders.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    // Text styles
    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    // Borders and focus
    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        Style::default().fg(color)
    }

    // Selection
    fn selection_style(&self) -> Style {
        Style::default().fg(self.roles().selection_fg).bg(self.roles().selection_bg)
    }

    /// Cell the keyboard cursor rests on.
    fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.roles().text)
            .bg(self.roles().cursor_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Cell excluded by the minimum time.
    fn disabled_style(&self) -> Style {
        Style::default()
            .fg(self.roles().text_muted)
            .add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
    }

    fn status_warning(&self) -> Style {
        Style::default().fg(self.roles().warning)
    }

    // Accents
    fn accent_primary_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary)
    }
    fn accent_emphasis_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary).add_modifier(Modifier::BOLD)
    }
}
